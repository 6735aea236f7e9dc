use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum EvaluationError {
    #[error("Invalid domain: {0}")]
    InvalidDomain(String),

    #[error("Grid mismatch: {0}")]
    GridMismatch(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Grid is not strictly increasing at index {index} ({previous} -> {current})")]
    InvalidGrid {
        index: usize,
        previous: f64,
        current: f64,
    },
}
