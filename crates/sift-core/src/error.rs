use crate::predicate::{CompileError, EvalError};
use thiserror::Error as ThisError;

///
/// Error
///
/// Umbrella over the two failure phases, for callers that thread both
/// through one error channel. Module-level errors stay the precise API.
///

#[derive(Clone, Debug, PartialEq, ThisError)]
pub enum Error {
    #[error(transparent)]
    Compile(#[from] CompileError),

    #[error(transparent)]
    Eval(#[from] EvalError),
}
