use thiserror::Error;

use crate::domain::validation::ValidationError;

/// Errors returned by `TodoService`
#[derive(Debug, Error)]
pub enum TodoError {
    #[error("invalid request: {0}")]
    Validation(#[from] ValidationError),

    #[error("Todo with ID {0} not found")]
    NotFound(String),

    #[error("Todo with ID {0} already exists")]
    AlreadyExists(String),

    #[error("storage failure: {0:#}")]
    Storage(#[from] anyhow::Error),
}
