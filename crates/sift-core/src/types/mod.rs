mod date;
mod float64;

pub use date::Date;
pub use float64::{Float64, NonFiniteFloatError};
