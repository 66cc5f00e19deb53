use thiserror::Error;

use crate::context::ContextError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Context(#[from] ContextError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub type AppResult<T> = Result<T, AppError>;
