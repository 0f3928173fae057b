mod compare;

#[cfg(test)]
mod tests;

use crate::types::{Date, Float64};
use serde::{Deserialize, Serialize};

pub use compare::{canonical_cmp, strict_order_cmp};

///
/// Value
///
/// Runtime image of one record field, and the literal side of a condition.
///
/// Null → the field's value is Option::None.
/// Map  → snapshot of a nested record's fields; traversed by dotted paths,
///        never a comparison leaf.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum Value {
    Bool(bool),
    Date(Date),
    Float(Float64),
    Int(i64),
    /// Ordered list of values. List order is preserved.
    List(Vec<Self>),
    Map(Vec<(String, Self)>),
    Null,
    Text(String),
}

impl Value {
    /// Stable variant label used in error messages.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::Date(_) => "date",
            Self::Float(_) => "float",
            Self::Int(_) => "int",
            Self::List(_) => "list",
            Self::Map(_) => "map",
            Self::Null => "null",
            Self::Text(_) => "text",
        }
    }

    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[must_use]
    pub const fn is_scalar(&self) -> bool {
        matches!(
            self,
            Self::Bool(_) | Self::Date(_) | Self::Float(_) | Self::Int(_) | Self::Text(_)
        )
    }

    /// Case-sensitive substring test. `None` if either side is not text.
    #[must_use]
    pub fn text_contains(&self, needle: &Self) -> Option<bool> {
        match (self, needle) {
            (Self::Text(haystack), Self::Text(needle)) => Some(haystack.contains(needle)),
            _ => None,
        }
    }

    /// Case-sensitive prefix test. `None` if either side is not text.
    #[must_use]
    pub fn text_starts_with(&self, prefix: &Self) -> Option<bool> {
        match (self, prefix) {
            (Self::Text(haystack), Self::Text(prefix)) => Some(haystack.starts_with(prefix)),
            _ => None,
        }
    }

    /// Case-sensitive suffix test. `None` if either side is not text.
    #[must_use]
    pub fn text_ends_with(&self, suffix: &Self) -> Option<bool> {
        match (self, suffix) {
            (Self::Text(haystack), Self::Text(suffix)) => Some(haystack.ends_with(suffix)),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<Date> for Value {
    fn from(v: Date) -> Self {
        Self::Date(v)
    }
}

impl From<Float64> for Value {
    fn from(v: Float64) -> Self {
        Self::Float(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl<T: Into<Self>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}

impl<T: Into<Self>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Self::List(v.into_iter().map(Into::into).collect())
    }
}
