//! Incremental Fibonacci queries over a cached power of `[[1, 1], [1, 0]]`.
//!
//! [`StepFib`] keeps `state = base^K` and walks `K` one step at a time toward
//! each requested index, so a query costs the distance from the previous one.

mod engine;
mod error;
mod matrix;

pub use engine::StepFib;
pub use error::EngineError;
pub use matrix::{Entry, Matrix2x2};
