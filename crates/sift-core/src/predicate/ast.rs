use crate::value::Value;
use serde::{Deserialize, Serialize};
use std::fmt;

///
/// Condition AST
///
/// Pure, schema-agnostic description of one comparison. This layer
/// carries no type validation or execution semantics; interpretation
/// happens at compile time against a record schema.
///

///
/// CompareOp
///
/// Closed operator set, matched exhaustively everywhere it is consumed.
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum CompareOp {
    Eq,
    Ne,
    Lt,
    Lte,
    Gt,
    Gte,
    In,
    NotIn,
    Contains,
    NotContains,
    StartsWith,
    EndsWith,
}

impl CompareOp {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Eq => "eq",
            Self::Ne => "ne",
            Self::Lt => "lt",
            Self::Lte => "lte",
            Self::Gt => "gt",
            Self::Gte => "gte",
            Self::In => "in",
            Self::NotIn => "not_in",
            Self::Contains => "contains",
            Self::NotContains => "not_contains",
            Self::StartsWith => "starts_with",
            Self::EndsWith => "ends_with",
        }
    }

    #[must_use]
    pub const fn is_ordering(self) -> bool {
        matches!(self, Self::Lt | Self::Lte | Self::Gt | Self::Gte)
    }

    #[must_use]
    pub const fn is_membership(self) -> bool {
        matches!(self, Self::In | Self::NotIn)
    }

    #[must_use]
    pub const fn is_text(self) -> bool {
        matches!(
            self,
            Self::Contains | Self::NotContains | Self::StartsWith | Self::EndsWith
        )
    }
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

///
/// Condition
///
/// One declarative comparison: field path, operator, literal, and an
/// optional OR-group tag. Conditions sharing a non-empty tag are
/// OR-combined before being ANDed with everything else.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Condition {
    pub field: String,
    pub op: CompareOp,
    pub value: Value,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub or_group: Option<String>,
}

impl Condition {
    #[must_use]
    pub fn new(field: impl Into<String>, op: CompareOp, value: impl Into<Value>) -> Self {
        Self {
            field: field.into(),
            op,
            value: value.into(),
            or_group: None,
        }
    }

    /// Tag this condition into an OR-group.
    #[must_use]
    pub fn or_group(mut self, tag: impl Into<String>) -> Self {
        self.or_group = Some(tag.into());
        self
    }

    #[must_use]
    pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(field, CompareOp::Eq, value)
    }

    #[must_use]
    pub fn ne(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(field, CompareOp::Ne, value)
    }

    #[must_use]
    pub fn lt(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(field, CompareOp::Lt, value)
    }

    #[must_use]
    pub fn lte(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(field, CompareOp::Lte, value)
    }

    #[must_use]
    pub fn gt(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(field, CompareOp::Gt, value)
    }

    #[must_use]
    pub fn gte(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(field, CompareOp::Gte, value)
    }

    #[must_use]
    pub fn in_list(field: impl Into<String>, values: Vec<Value>) -> Self {
        Self::new(field, CompareOp::In, Value::List(values))
    }

    #[must_use]
    pub fn not_in_list(field: impl Into<String>, values: Vec<Value>) -> Self {
        Self::new(field, CompareOp::NotIn, Value::List(values))
    }

    #[must_use]
    pub fn contains(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(field, CompareOp::Contains, Value::Text(value.into()))
    }

    #[must_use]
    pub fn not_contains(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(field, CompareOp::NotContains, Value::Text(value.into()))
    }

    #[must_use]
    pub fn starts_with(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(field, CompareOp::StartsWith, Value::Text(value.into()))
    }

    #[must_use]
    pub fn ends_with(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(field, CompareOp::EndsWith, Value::Text(value.into()))
    }

    /// The effective OR-group tag; empty tags count as ungrouped.
    #[must_use]
    pub fn group_tag(&self) -> Option<&str> {
        self.or_group.as_deref().filter(|tag| !tag.is_empty())
    }
}
