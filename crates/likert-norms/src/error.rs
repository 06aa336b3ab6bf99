use thiserror::Error;

use likert_core::CoreError;

#[derive(Debug, Error)]
pub enum NormsError {
    #[error("insufficient sample: {actual} responses, at least {required} required")]
    InsufficientSample { required: usize, actual: usize },

    #[error("{field} has {actual} entries but {expected} were expected")]
    LengthMismatch {
        field: String,
        expected: usize,
        actual: usize,
    },

    #[error("reliability needs at least {required} items, got {actual}")]
    TooFewItems { required: usize, actual: usize },

    #[error("reliability needs at least {required} respondents, got {actual}")]
    TooFewRespondents { required: usize, actual: usize },

    #[error("item {0} appears more than once")]
    DuplicateItem(String),

    #[error("no norming statistics for item: {0}")]
    UnknownItem(String),

    #[error(transparent)]
    Core(#[from] CoreError),
}
