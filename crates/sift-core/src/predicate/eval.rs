use crate::{
    path::{ResolvedPath, Segment},
    predicate::{
        ast::CompareOp,
        compile::{Atom, Plan},
    },
    schema::FieldValues,
    value::{Value, strict_order_cmp},
};
use std::cmp::Ordering;
use thiserror::Error as ThisError;

///
/// Plan evaluation
///
/// Pure runtime walk of a compiled plan against one record. Literals
/// were coerced at compile time, so comparisons here are same-variant;
/// any variant mismatch means the record's `FieldValues` impl disagrees
/// with its declared schema and is surfaced as a typed error rather
/// than a silent non-match.
///

///
/// EvalError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum EvalError {
    /// A nullable link held `Null` where a comparison needed a value.
    /// Callers must guard nullable fields or treat this as a failure.
    #[error("field '{path}' was null during comparison")]
    NullField { path: String },

    #[error("record returned no value for field '{path}'")]
    MissingField { path: String },

    #[error("index {index} out of bounds for list at '{path}'")]
    IndexOutOfBounds { path: String, index: usize },

    #[error("field '{path}' produced {actual}, schema declares {expected}")]
    ShapeMismatch {
        path: String,
        expected: &'static str,
        actual: &'static str,
    },
}

pub(crate) fn eval_plan<V: FieldValues>(record: &V, plan: &Plan) -> Result<bool, EvalError> {
    match plan {
        Plan::True => Ok(true),
        Plan::Atom(atom) => eval_atom(record, atom),
        Plan::And(children) => {
            for child in children {
                if !eval_plan(record, child)? {
                    return Ok(false);
                }
            }

            Ok(true)
        }
        Plan::Or(children) => {
            for child in children {
                if eval_plan(record, child)? {
                    return Ok(true);
                }
            }

            Ok(false)
        }
    }
}

/// Walk one resolved access chain. Returns `Value::Null` only when the
/// leaf itself is null; a null on an intermediate link is already the
/// unwrap failure.
pub(crate) fn read_path<V: FieldValues>(
    record: &V,
    path: &ResolvedPath,
) -> Result<Value, EvalError> {
    let mut segments = path.segments.iter();

    let Some(Segment::Field(first)) = segments.next() else {
        // Resolution guarantees a leading field segment.
        return Err(EvalError::MissingField {
            path: path.path.clone(),
        });
    };

    let mut current = record.get_value(first).ok_or_else(|| EvalError::MissingField {
        path: path.path.clone(),
    })?;

    for segment in segments {
        if current.is_null() {
            return Err(EvalError::NullField {
                path: path.path.clone(),
            });
        }

        current = match segment {
            Segment::Field(name) => match current {
                Value::Map(entries) => entries
                    .into_iter()
                    .find(|(key, _)| key == name)
                    .map(|(_, value)| value)
                    .ok_or_else(|| EvalError::MissingField {
                        path: path.path.clone(),
                    })?,
                other => {
                    return Err(EvalError::ShapeMismatch {
                        path: path.path.clone(),
                        expected: "record",
                        actual: other.kind_name(),
                    });
                }
            },
            Segment::Index(index) => match current {
                Value::List(mut items) => {
                    if *index >= items.len() {
                        return Err(EvalError::IndexOutOfBounds {
                            path: path.path.clone(),
                            index: *index,
                        });
                    }

                    items.swap_remove(*index)
                }
                other => {
                    return Err(EvalError::ShapeMismatch {
                        path: path.path.clone(),
                        expected: "list",
                        actual: other.kind_name(),
                    });
                }
            },
        };
    }

    Ok(current)
}

fn eval_atom<V: FieldValues>(record: &V, atom: &Atom) -> Result<bool, EvalError> {
    let actual = read_path(record, &atom.path)?;

    if actual.is_null() {
        return Err(EvalError::NullField {
            path: atom.path.path.clone(),
        });
    }

    match atom.op {
        CompareOp::Eq => strict_eq(atom, &actual, &atom.literal),
        CompareOp::Ne => strict_eq(atom, &actual, &atom.literal).map(|eq| !eq),

        CompareOp::Lt => strict_cmp(atom, &actual).map(Ordering::is_lt),
        CompareOp::Lte => strict_cmp(atom, &actual).map(Ordering::is_le),
        CompareOp::Gt => strict_cmp(atom, &actual).map(Ordering::is_gt),
        CompareOp::Gte => strict_cmp(atom, &actual).map(Ordering::is_ge),

        CompareOp::In => in_list(atom, &actual),
        CompareOp::NotIn => in_list(atom, &actual).map(|found| !found),

        CompareOp::Contains => text_op(atom, actual.text_contains(&atom.literal)),
        CompareOp::NotContains => {
            text_op(atom, actual.text_contains(&atom.literal)).map(|found| !found)
        }
        CompareOp::StartsWith => text_op(atom, actual.text_starts_with(&atom.literal)),
        CompareOp::EndsWith => text_op(atom, actual.text_ends_with(&atom.literal)),
    }
}

fn strict_eq(atom: &Atom, actual: &Value, literal: &Value) -> Result<bool, EvalError> {
    if std::mem::discriminant(actual) == std::mem::discriminant(literal) {
        Ok(actual == literal)
    } else {
        Err(shape_mismatch(atom, actual))
    }
}

fn strict_cmp(atom: &Atom, actual: &Value) -> Result<Ordering, EvalError> {
    strict_order_cmp(actual, &atom.literal).ok_or_else(|| shape_mismatch(atom, actual))
}

fn in_list(atom: &Atom, actual: &Value) -> Result<bool, EvalError> {
    let Value::List(items) = &atom.literal else {
        // Membership literals are always compiled to lists.
        return Err(shape_mismatch(atom, actual));
    };

    for item in items {
        if strict_eq(atom, actual, item)? {
            return Ok(true);
        }
    }

    Ok(false)
}

fn text_op(atom: &Atom, outcome: Option<bool>) -> Result<bool, EvalError> {
    outcome.ok_or_else(|| EvalError::ShapeMismatch {
        path: atom.path.path.clone(),
        expected: "text",
        actual: "non-text",
    })
}

fn shape_mismatch(atom: &Atom, actual: &Value) -> EvalError {
    EvalError::ShapeMismatch {
        path: atom.path.path.clone(),
        expected: atom.path.leaf.name(),
        actual: actual.kind_name(),
    }
}
