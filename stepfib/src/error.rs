use thiserror::Error;

use crate::matrix::Entry;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("Fibonacci index must be non-negative, got {0}")]
    NegativeIndex(i64),
    #[error("matrix determinant is {det}, expected 1 or -1")]
    NotUnimodular { det: Entry },
    #[error("matrix determinant or inverse does not fit in an i128")]
    DeterminantOverflow,
    #[error("state for index {index} does not fit in an i128")]
    Overflow { index: i64 },
}
