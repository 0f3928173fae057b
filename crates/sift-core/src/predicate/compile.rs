use crate::{
    path::{PathError, ResolvedPath, resolve_for},
    predicate::{
        ast::{CompareOp, Condition},
        coercion::{CoercionError, coerce_membership, coerce_scalar},
        eval::{EvalError, eval_plan},
    },
    schema::{FieldValues, Introspect},
    value::Value,
};
use serde::{Deserialize, Serialize};
use std::{marker::PhantomData, sync::Arc};
use thiserror::Error as ThisError;

///
/// Predicate compilation
///
/// Lowers a condition list into an executable plan in three steps per
/// condition: resolve the field path, gate the operator against the
/// leaf kind, coerce the literal. Aggregation into AND/OR shape is the
/// only thing the three policies disagree on.
///

///
/// CompilePolicy
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub enum CompilePolicy {
    /// OR-group tags aggregate; everything else ANDs.
    #[default]
    GroupedAnd,
    /// Ignore tags; AND every condition.
    FlatAnd,
    /// Ignore tags; OR every condition.
    FlatOr,
}

///
/// Atom
///
/// One compiled comparison: resolved access chain, operator, and the
/// already-coerced literal. Immutable; shared freely.
///

#[derive(Clone, Debug, PartialEq)]
pub struct Atom {
    pub(crate) path: Arc<ResolvedPath>,
    pub(crate) op: CompareOp,
    pub(crate) literal: Value,
}

impl Atom {
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path.path
    }

    #[must_use]
    pub const fn op(&self) -> CompareOp {
        self.op
    }

    #[must_use]
    pub const fn literal(&self) -> &Value {
        &self.literal
    }
}

///
/// Plan
///
/// Compiled predicate tree. Exposed read-only so deferred query
/// providers can translate it instead of evaluating in memory.
///

#[derive(Clone, Debug, PartialEq)]
pub enum Plan {
    /// Matches every record; the compiled form of "no filter".
    True,
    Atom(Atom),
    And(Vec<Self>),
    Or(Vec<Self>),
}

impl Plan {
    /// Collapse trivial aggregates: zero children is the neutral
    /// element, one child is the child itself.
    fn and(mut terms: Vec<Self>) -> Self {
        match terms.len() {
            0 => Self::True,
            1 => terms.remove(0),
            _ => Self::And(terms),
        }
    }

    fn or(mut terms: Vec<Self>) -> Self {
        match terms.len() {
            0 => Self::True,
            1 => terms.remove(0),
            _ => Self::Or(terms),
        }
    }
}

///
/// CompileError
///

#[derive(Clone, Debug, PartialEq, ThisError)]
pub enum CompileError {
    #[error(transparent)]
    Path(#[from] PathError),

    #[error(transparent)]
    Coercion(#[from] CoercionError),

    #[error("operator {op} is not valid for field '{field}' of kind {kind}")]
    InvalidOperator {
        field: String,
        op: CompareOp,
        kind: &'static str,
    },

    #[error("sort key '{path}' of kind {kind} has no defined ordering")]
    NotSortable { path: String, kind: &'static str },
}

///
/// CompiledPredicate
///
/// Pure function of (record schema, condition list). Immutable after
/// compilation; safe to share and evaluate concurrently.
///

#[derive(Clone, Debug)]
pub struct CompiledPredicate<R> {
    plan: Plan,
    marker: PhantomData<fn(&R)>,
}

impl<R: Introspect> CompiledPredicate<R> {
    const fn new(plan: Plan) -> Self {
        Self {
            plan,
            marker: PhantomData,
        }
    }

    /// The compiled tree, for deferred providers.
    #[must_use]
    pub const fn plan(&self) -> &Plan {
        &self.plan
    }

    /// Evaluate against one record.
    pub fn matches(&self, record: &R) -> Result<bool, EvalError>
    where
        R: FieldValues,
    {
        eval_plan(record, &self.plan)
    }

    /// Eagerly filter a sequence, keeping matching records.
    pub fn apply<I>(&self, records: I) -> Result<Vec<R>, EvalError>
    where
        R: FieldValues,
        I: IntoIterator<Item = R>,
    {
        let mut kept = Vec::new();
        for record in records {
            if self.matches(&record)? {
                kept.push(record);
            }
        }

        Ok(kept)
    }
}

/// Compile one condition into an atom.
fn compile_atom<R: Introspect>(condition: &Condition) -> Result<Atom, CompileError> {
    let path = resolve_for::<R>(&condition.field)?;
    let leaf = path.leaf;
    let op = condition.op;

    if !leaf.is_scalar() {
        return Err(invalid_operator(condition, leaf.name()));
    }

    if op.is_ordering() && !leaf.is_orderable() {
        return Err(invalid_operator(condition, leaf.name()));
    }

    if op.is_text() && !leaf.is_text() {
        return Err(invalid_operator(condition, leaf.name()));
    }

    let literal = if op.is_membership() {
        Value::List(coerce_membership(
            &condition.field,
            op.as_str(),
            &condition.value,
            leaf,
        )?)
    } else {
        coerce_scalar(&condition.field, &condition.value, leaf)?
    };

    Ok(Atom { path, op, literal })
}

fn invalid_operator(condition: &Condition, kind: &'static str) -> CompileError {
    CompileError::InvalidOperator {
        field: condition.field.clone(),
        op: condition.op,
        kind,
    }
}

/// Compile with OR-group aggregation: ungrouped conditions AND directly;
/// conditions sharing a non-empty tag OR together first (buckets in
/// first-appearance order), then AND with the rest, left to right.
pub fn compile_grouped<R: Introspect>(
    conditions: &[Condition],
) -> Result<CompiledPredicate<R>, CompileError> {
    let mut ungrouped = Vec::new();
    let mut groups: Vec<(&str, Vec<Plan>)> = Vec::new();

    for condition in conditions {
        let atom = Plan::Atom(compile_atom::<R>(condition)?);

        match condition.group_tag() {
            None => ungrouped.push(atom),
            Some(tag) => match groups.iter_mut().find(|(name, _)| *name == tag) {
                Some((_, members)) => members.push(atom),
                None => groups.push((tag, vec![atom])),
            },
        }
    }

    let mut terms = ungrouped;
    terms.extend(groups.into_iter().map(|(_, members)| Plan::or(members)));

    Ok(CompiledPredicate::new(Plan::and(terms)))
}

/// Compile ignoring OR-groups: AND every condition.
pub fn compile_all<R: Introspect>(
    conditions: &[Condition],
) -> Result<CompiledPredicate<R>, CompileError> {
    let terms = conditions
        .iter()
        .map(|condition| compile_atom::<R>(condition).map(Plan::Atom))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(CompiledPredicate::new(Plan::and(terms)))
}

/// Compile ignoring OR-groups: OR every condition.
///
/// An empty list still compiles to the match-everything plan so that
/// "no filter" means the same thing under every policy.
pub fn compile_any<R: Introspect>(
    conditions: &[Condition],
) -> Result<CompiledPredicate<R>, CompileError> {
    let terms = conditions
        .iter()
        .map(|condition| compile_atom::<R>(condition).map(Plan::Atom))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(CompiledPredicate::new(Plan::or(terms)))
}

/// Policy-dispatched entry point.
pub fn compile_with<R: Introspect>(
    conditions: &[Condition],
    policy: CompilePolicy,
) -> Result<CompiledPredicate<R>, CompileError> {
    match policy {
        CompilePolicy::GroupedAnd => compile_grouped(conditions),
        CompilePolicy::FlatAnd => compile_all(conditions),
        CompilePolicy::FlatOr => compile_any(conditions),
    }
}
