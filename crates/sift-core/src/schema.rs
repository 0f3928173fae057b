use crate::value::Value;

///
/// Schema introspection
///
/// Declared field shapes for one record type. This is the *only* schema
/// surface the compilers depend on: enough to resolve dotted paths, gate
/// operators, and direct literal coercion. No validation metadata, no
/// storage concerns.
///

///
/// FieldKind
///
/// Declared kind of one field. Nested kinds are borrowed `'static` so
/// schemas can be plain consts.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FieldKind {
    Bool,
    Date,
    Float,
    Int,
    Text,
    /// Field holds `Option` of the inner kind; `None` surfaces as `Value::Null`.
    Nullable(&'static Self),
    List(&'static Self),
    Record(&'static RecordSchema),
}

impl FieldKind {
    /// Stable kind label used in error messages.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Date => "date",
            Self::Float => "float",
            Self::Int => "int",
            Self::Text => "text",
            Self::Nullable(_) => "nullable",
            Self::List(_) => "list",
            Self::Record(_) => "record",
        }
    }

    /// Strip any `Nullable` wrappers; returns the underlying kind and
    /// whether a wrapper was present.
    #[must_use]
    pub const fn unwrap_nullable(self) -> (Self, bool) {
        let mut kind = self;
        let mut nullable = false;
        while let Self::Nullable(inner) = kind {
            kind = *inner;
            nullable = true;
        }

        (kind, nullable)
    }

    /// Comparison-leaf kinds: every operator requires one of these.
    #[must_use]
    pub const fn is_scalar(&self) -> bool {
        matches!(
            self,
            Self::Bool | Self::Date | Self::Float | Self::Int | Self::Text
        )
    }

    /// Kinds with a defined strict ordering for comparison operators.
    /// Bool is deliberately excluded here; it is still sortable.
    #[must_use]
    pub const fn is_orderable(&self) -> bool {
        matches!(self, Self::Date | Self::Float | Self::Int | Self::Text)
    }

    /// Kinds usable as a sort key (`false < true` for Bool).
    #[must_use]
    pub const fn is_sortable(&self) -> bool {
        self.is_orderable() || matches!(self, Self::Bool)
    }

    #[must_use]
    pub const fn is_text(&self) -> bool {
        matches!(self, Self::Text)
    }

    /// Whether a runtime value inhabits this kind.
    #[must_use]
    pub fn matches_value(&self, value: &Value) -> bool {
        match self {
            Self::Bool => matches!(value, Value::Bool(_)),
            Self::Date => matches!(value, Value::Date(_)),
            Self::Float => matches!(value, Value::Float(_)),
            Self::Int => matches!(value, Value::Int(_)),
            Self::Text => matches!(value, Value::Text(_)),
            Self::Nullable(inner) => value.is_null() || inner.matches_value(value),
            Self::List(inner) => match value {
                Value::List(items) => items.iter().all(|item| inner.matches_value(item)),
                _ => false,
            },
            Self::Record(_) => matches!(value, Value::Map(_)),
        }
    }
}

///
/// FieldModel
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct FieldModel {
    pub name: &'static str,
    pub kind: FieldKind,
}

///
/// RecordSchema
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct RecordSchema {
    pub record_name: &'static str,
    pub fields: &'static [FieldModel],
}

impl RecordSchema {
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldModel> {
        self.fields.iter().find(|field| field.name == name)
    }
}

///
/// Introspect
///
/// Declared schema facts for a record type. Implemented by callers
/// (typically generated); the compilers only ever read `SCHEMA`.
///

pub trait Introspect: 'static {
    const SCHEMA: &'static RecordSchema;
}

///
/// FieldValues
///
/// Instance-side accessor for one record. Nested record fields surface
/// as `Value::Map`, optional fields as `Value::Null` when unset.
///

pub trait FieldValues {
    fn get_value(&self, field: &str) -> Option<Value>;
}
