use thiserror::Error;

// Unified error type for parjacobi

#[derive(Error, Debug, Clone, PartialEq)]
pub enum JError {
    #[error("unknown schedule `{0}` (expected static, dynamic or guided)")]
    UnknownSchedule(String),
    #[error("chunk size must be at least 1")]
    InvalidChunkSize,
    #[error("worker count must be at least 1")]
    InvalidWorkerCount,
    #[error("guided factor must be at least 1")]
    InvalidGuidedFactor,
    #[error("tolerance must be positive and finite, got {0}")]
    InvalidTolerance(f64),
    #[error("dimension mismatch: {0}")]
    DimensionMismatch(String),
    #[error("zero or near-zero diagonal entry at row {0}")]
    ZeroDiagonal(usize),
    #[error("failed to build worker pool: {0}")]
    ThreadPool(String),
}

impl JError {
    /// Invalid caller-supplied parameters or shapes.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            JError::UnknownSchedule(_)
                | JError::InvalidChunkSize
                | JError::InvalidWorkerCount
                | JError::InvalidGuidedFactor
                | JError::InvalidTolerance(_)
                | JError::DimensionMismatch(_)
        )
    }

    /// The system cannot be iterated because a diagonal entry divides by ~0.
    pub fn is_numeric_precondition(&self) -> bool {
        matches!(self, JError::ZeroDiagonal(_))
    }
}
