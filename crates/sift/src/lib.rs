//! Sift — a typed predicate and sort compiler for in-memory records.
//!
//! ## Crate layout
//! - `core`: runtime values, schema introspection, path resolution, and
//!   the predicate and sort compilers.
//!
//! The `prelude` module mirrors the surface used at call sites.

pub use sift_core as core;

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use core::Error;

///
/// Prelude
/// using _ brings traits into scope and avoids name conflicts
///

pub mod prelude {
    pub use crate::core::{
        predicate::{
            CompareOp, CompilePolicy, Condition, compile_all, compile_any, compile_grouped,
            compile_with,
        },
        schema::{FieldKind, FieldModel, FieldValues, Introspect, RecordSchema},
        sort::{Direction, SortKey, compile_sort},
        value::Value,
    };
}
