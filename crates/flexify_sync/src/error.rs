//! Synchronizer error types

use flexify_client::ApiError;
use session_manager::SessionError;
use thiserror::Error;

use crate::sets::SaveAllReport;

#[derive(Error, Debug)]
pub enum SyncError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    /// Input rejected before any request was made.
    #[error("{0}")]
    Validation(String),

    /// The owning view was left while the request was in flight.
    #[error("response discarded, view is no longer active")]
    Stale,

    #[error("{} of {} sets failed to save", .0.failed.len(), .0.attempted())]
    PartialSave(SaveAllReport),
}

impl SyncError {
    /// Text shown to the user for this failure.
    pub fn user_message(&self) -> String {
        match self {
            SyncError::Api(e) => e.user_message(),
            SyncError::Session(SessionError::NotAuthenticated) => {
                flexify_client::error::NO_TOKEN_MESSAGE.to_string()
            }
            other => other.to_string(),
        }
    }

    pub fn is_stale(&self) -> bool {
        matches!(self, SyncError::Stale)
    }
}

pub type Result<T> = std::result::Result<T, SyncError>;
