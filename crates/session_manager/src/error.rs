//! Session manager error types

use storage_manager::StorageError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Storage error: {0}")]
    StorageError(#[from] StorageError),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not authenticated")]
    NotAuthenticated,
}

pub type Result<T> = std::result::Result<T, SessionError>;
