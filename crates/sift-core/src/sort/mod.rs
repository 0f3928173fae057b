
use crate::{
    path::{ResolvedPath, resolve_for},
    predicate::{CompileError, eval::read_path},
    schema::{FieldValues, Introspect},
    value::{Value, canonical_cmp},
};
use serde::{Deserialize, Serialize};
use std::{cmp::Ordering, marker::PhantomData, sync::Arc};

///
/// Sort compilation
///
/// Lowers an ordered key list into a stable multi-key comparator:
/// earlier keys establish order, later keys break ties, and each key
/// may resolve to a different leaf kind. The comparator is a linear
/// fold over the keys; there is no other state.
///

///
/// Direction
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

impl Direction {
    /// Apply this direction to an ascending ordering.
    #[must_use]
    pub const fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Asc => ordering,
            Self::Desc => ordering.reverse(),
        }
    }
}

///
/// SortKey
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct SortKey {
    pub path: String,
    pub direction: Direction,
}

impl SortKey {
    #[must_use]
    pub fn asc(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            direction: Direction::Asc,
        }
    }

    #[must_use]
    pub fn desc(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            direction: Direction::Desc,
        }
    }
}

///
/// OrderSpec
///
/// Inspectable ordering shape for deferred query providers: the same
/// keys the in-memory comparator executes, as plain data.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct OrderSpec {
    pub fields: Vec<(String, Direction)>,
}

///
/// ResolvedSortKey
///
/// One key resolved from path to access chain. This avoids repeated
/// path resolution in comparator hot loops.
///

#[derive(Clone, Debug)]
struct ResolvedSortKey {
    path: Arc<ResolvedPath>,
    direction: Direction,
}

///
/// CompiledSort
///
/// Immutable after compilation; safe to share and apply concurrently.
///

#[derive(Clone, Debug)]
pub struct CompiledSort<R> {
    keys: Vec<ResolvedSortKey>,
    marker: PhantomData<fn(&R)>,
}

/// Compile an ordered key list for a record type.
///
/// Every key must resolve to a sortable leaf. An empty list compiles to
/// the identity ordering.
pub fn compile_sort<R: Introspect>(keys: &[SortKey]) -> Result<CompiledSort<R>, CompileError> {
    let keys = keys
        .iter()
        .map(|key| {
            let path = resolve_for::<R>(&key.path)?;
            if !path.leaf.is_sortable() {
                return Err(CompileError::NotSortable {
                    path: key.path.clone(),
                    kind: path.leaf.name(),
                });
            }

            Ok(ResolvedSortKey {
                path,
                direction: key.direction,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(CompiledSort {
        keys,
        marker: PhantomData,
    })
}

impl<R: Introspect> CompiledSort<R> {
    /// Compare two records under the full key chain.
    ///
    /// Unreadable or null keys rank below every present value, so the
    /// comparator stays total and deterministic.
    #[must_use]
    pub fn compare(&self, left: &R, right: &R) -> Ordering
    where
        R: FieldValues,
    {
        for key in &self.keys {
            let l = read_key(left, &key.path);
            let r = read_key(right, &key.path);

            let ordering = key.direction.apply(canonical_cmp(&l, &r));
            if ordering != Ordering::Equal {
                return ordering;
            }
        }

        Ordering::Equal
    }

    /// Stable in-place multi-key sort.
    ///
    /// Ties on earlier keys are broken only by later keys; records equal
    /// under every key keep their input order.
    pub fn sort(&self, rows: &mut [R])
    where
        R: FieldValues,
    {
        if self.keys.is_empty() {
            return;
        }

        rows.sort_by(|left, right| self.compare(left, right));
    }

    /// Owning convenience over `sort`.
    #[must_use]
    pub fn sorted(&self, mut rows: Vec<R>) -> Vec<R>
    where
        R: FieldValues,
    {
        self.sort(&mut rows);
        rows
    }

    /// The ordering as plain data, for deferred providers.
    #[must_use]
    pub fn order_spec(&self) -> OrderSpec {
        OrderSpec {
            fields: self
                .keys
                .iter()
                .map(|key| (key.path.path.clone(), key.direction))
                .collect(),
        }
    }

    #[must_use]
    pub fn is_identity(&self) -> bool {
        self.keys.is_empty()
    }
}

fn read_key<R: FieldValues>(record: &R, path: &ResolvedPath) -> Value {
    read_path(record, path).unwrap_or(Value::Null)
}
