use crate::{
    schema::FieldKind,
    types::{Date, Float64},
    value::Value,
};
use num_traits::ToPrimitive;
use thiserror::Error as ThisError;

///
/// Literal coercion
///
/// Converts a caller-supplied literal into the exact kind a resolved
/// leaf requires, once, at compile time. Evaluation then only ever
/// compares same-variant values. Every conversion is explicit and total
/// per target kind; anything outside the table is rejected here rather
/// than deep in plan construction.
///

// Integers beyond 2^53 cannot round-trip through f64; widening them
// silently would change comparison results.
const F64_SAFE_U64: u64 = 1u64 << 53;

///
/// CoercionError
///

#[derive(Clone, Debug, PartialEq, ThisError)]
pub enum CoercionError {
    #[error("field '{field}': {from} value is not coercible to {target}")]
    Incoercible {
        field: String,
        from: &'static str,
        target: &'static str,
    },

    #[error("field '{field}': text '{text}' does not parse as {target}")]
    UnparsableText {
        field: String,
        target: &'static str,
        text: String,
    },

    #[error("field '{field}': float {value} has a fractional part, not coercible to int")]
    FractionalInt { field: String, value: f64 },

    #[error("field '{field}': int {value} exceeds the exact float64 range")]
    IntPrecision { field: String, value: i64 },

    #[error("field '{field}': membership operator {op} requires a list literal, got {from}")]
    ListExpected {
        field: String,
        op: &'static str,
        from: &'static str,
    },

    #[error("field '{field}': list element {index}: {source}")]
    ListElement {
        field: String,
        index: usize,
        source: Box<CoercionError>,
    },
}

/// Coerce one scalar literal to the leaf kind.
///
/// The caller has already unwrapped `Nullable`; `Null` literals never
/// coerce (there is no null-comparison operator in the set).
pub(crate) fn coerce_scalar(
    field: &str,
    value: &Value,
    target: FieldKind,
) -> Result<Value, CoercionError> {
    match target {
        FieldKind::Int => coerce_int(field, value),
        FieldKind::Float => coerce_float(field, value),
        FieldKind::Bool => coerce_bool(field, value),
        FieldKind::Date => coerce_date(field, value),
        FieldKind::Text => coerce_text(field, value),
        FieldKind::Nullable(_) | FieldKind::List(_) | FieldKind::Record(_) => {
            Err(incoercible(field, value, target.name()))
        }
    }
}

/// Coerce a membership literal: the value must already be a list, and
/// every element must coerce to the leaf kind.
pub(crate) fn coerce_membership(
    field: &str,
    op: &'static str,
    value: &Value,
    target: FieldKind,
) -> Result<Vec<Value>, CoercionError> {
    let Value::List(items) = value else {
        return Err(CoercionError::ListExpected {
            field: field.to_string(),
            op,
            from: value.kind_name(),
        });
    };

    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            coerce_scalar(field, item, target).map_err(|source| CoercionError::ListElement {
                field: field.to_string(),
                index,
                source: Box::new(source),
            })
        })
        .collect()
}

fn coerce_int(field: &str, value: &Value) -> Result<Value, CoercionError> {
    match value {
        Value::Int(n) => Ok(Value::Int(*n)),
        Value::Float(f) => {
            if !f.is_integral() {
                return Err(CoercionError::FractionalInt {
                    field: field.to_string(),
                    value: f.get(),
                });
            }

            f.get()
                .to_i64()
                .map(Value::Int)
                .ok_or_else(|| incoercible(field, value, "int"))
        }
        Value::Text(s) => s
            .trim()
            .parse()
            .map(Value::Int)
            .map_err(|_| unparsable(field, "int", s)),
        _ => Err(incoercible(field, value, "int")),
    }
}

fn coerce_float(field: &str, value: &Value) -> Result<Value, CoercionError> {
    match value {
        Value::Float(f) => Ok(Value::Float(*f)),
        Value::Int(n) => {
            if n.unsigned_abs() > F64_SAFE_U64 {
                return Err(CoercionError::IntPrecision {
                    field: field.to_string(),
                    value: *n,
                });
            }

            n.to_f64()
                .and_then(Float64::try_new)
                .map(Value::Float)
                .ok_or_else(|| incoercible(field, value, "float"))
        }
        Value::Text(s) => s
            .trim()
            .parse::<f64>()
            .ok()
            .and_then(Float64::try_new)
            .map(Value::Float)
            .ok_or_else(|| unparsable(field, "float", s)),
        _ => Err(incoercible(field, value, "float")),
    }
}

fn coerce_bool(field: &str, value: &Value) -> Result<Value, CoercionError> {
    match value {
        Value::Bool(b) => Ok(Value::Bool(*b)),
        Value::Text(s) => match s.trim() {
            "true" => Ok(Value::Bool(true)),
            "false" => Ok(Value::Bool(false)),
            _ => Err(unparsable(field, "bool", s)),
        },
        _ => Err(incoercible(field, value, "bool")),
    }
}

fn coerce_date(field: &str, value: &Value) -> Result<Value, CoercionError> {
    match value {
        Value::Date(d) => Ok(Value::Date(*d)),
        Value::Text(s) => Date::parse(s.trim())
            .map(Value::Date)
            .ok_or_else(|| unparsable(field, "date", s)),
        _ => Err(incoercible(field, value, "date")),
    }
}

fn coerce_text(field: &str, value: &Value) -> Result<Value, CoercionError> {
    match value {
        Value::Text(s) => Ok(Value::Text(s.clone())),
        Value::Int(n) => Ok(Value::Text(n.to_string())),
        Value::Float(f) => Ok(Value::Text(f.to_string())),
        Value::Bool(b) => Ok(Value::Text(b.to_string())),
        _ => Err(incoercible(field, value, "text")),
    }
}

fn incoercible(field: &str, value: &Value, target: &'static str) -> CoercionError {
    CoercionError::Incoercible {
        field: field.to_string(),
        from: value.kind_name(),
        target,
    }
}

fn unparsable(field: &str, target: &'static str, text: &str) -> CoercionError {
    CoercionError::UnparsableText {
        field: field.to_string(),
        target,
        text: text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn float(v: f64) -> Value {
        Value::Float(Float64::try_new(v).unwrap())
    }

    #[test]
    fn int_accepts_integral_float_and_text() {
        assert_eq!(coerce_scalar("f", &float(4.0), FieldKind::Int), Ok(Value::Int(4)));
        assert_eq!(
            coerce_scalar("f", &Value::Text(" 42 ".to_string()), FieldKind::Int),
            Ok(Value::Int(42))
        );
    }

    #[test]
    fn int_rejects_fractional_float() {
        assert!(matches!(
            coerce_scalar("f", &float(4.5), FieldKind::Int),
            Err(CoercionError::FractionalInt { .. })
        ));
    }

    #[test]
    fn float_widens_small_ints_only() {
        assert_eq!(
            coerce_scalar("f", &Value::Int(2), FieldKind::Float),
            Ok(float(2.0))
        );
        assert!(matches!(
            coerce_scalar("f", &Value::Int(1 << 60), FieldKind::Float),
            Err(CoercionError::IntPrecision { .. })
        ));
    }

    #[test]
    fn bool_parses_exact_text() {
        assert_eq!(
            coerce_scalar("f", &Value::Text("true".to_string()), FieldKind::Bool),
            Ok(Value::Bool(true))
        );
        assert!(matches!(
            coerce_scalar("f", &Value::Text("TRUE".to_string()), FieldKind::Bool),
            Err(CoercionError::UnparsableText { .. })
        ));
    }

    #[test]
    fn date_parses_iso_text() {
        let expected = Value::Date(Date::new(2024, 3, 1).unwrap());
        assert_eq!(
            coerce_scalar("f", &Value::Text("2024-03-01".to_string()), FieldKind::Date),
            Ok(expected)
        );
    }

    #[test]
    fn text_displays_scalars() {
        assert_eq!(
            coerce_scalar("f", &Value::Int(7), FieldKind::Text),
            Ok(Value::Text("7".to_string()))
        );
        assert_eq!(
            coerce_scalar("f", &Value::Bool(false), FieldKind::Text),
            Ok(Value::Text("false".to_string()))
        );
    }

    #[test]
    fn null_never_coerces() {
        assert!(matches!(
            coerce_scalar("f", &Value::Null, FieldKind::Int),
            Err(CoercionError::Incoercible { .. })
        ));
    }

    #[test]
    fn membership_requires_a_list() {
        assert!(matches!(
            coerce_membership("f", "in", &Value::Int(1), FieldKind::Int),
            Err(CoercionError::ListExpected { .. })
        ));
    }

    #[test]
    fn membership_coerces_every_element() {
        let list = Value::List(vec![Value::Int(1), Value::Text("2".to_string())]);
        let coerced = coerce_membership("f", "in", &list, FieldKind::Int).unwrap();

        assert_eq!(coerced, vec![Value::Int(1), Value::Int(2)]);
    }

    #[test]
    fn membership_element_errors_carry_the_index() {
        let list = Value::List(vec![Value::Int(1), Value::Bool(true)]);
        let err = coerce_membership("f", "in", &list, FieldKind::Int).unwrap_err();

        assert!(matches!(err, CoercionError::ListElement { index: 1, .. }));
    }
}
