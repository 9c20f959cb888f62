use thiserror::Error;

use crate::auth::JwtError;
use crate::db::StorageError;

/// Startup and runtime errors (HTTP handlers use `shared::AppError`)
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("JWT configuration error: {0}")]
    Jwt(#[from] JwtError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl From<shared::AppError> for ServerError {
    fn from(err: shared::AppError) -> Self {
        ServerError::Internal(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ServerError>;
