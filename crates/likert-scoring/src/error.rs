use thiserror::Error;

use likert_core::CoreError;

use crate::questionnaire::ValidationError;

#[derive(Debug, Error)]
pub enum ScoringError {
    #[error("unknown composite index: {0}")]
    UnknownIndex(String),

    #[error("{field} has {actual} entries but {expected} responses were given")]
    LengthMismatch {
        field: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Core(#[from] CoreError),
}
