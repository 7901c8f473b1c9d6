use thiserror::Error;

pub const FALLBACK_MESSAGE: &str = "Something went wrong";
pub const NETWORK_MESSAGE: &str = "Network error, please try again";
pub const NO_TOKEN_MESSAGE: &str = "No token found";

/// Failures surfaced by the REST client.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// No session token was available for an operation that needs one.
    #[error("no access token stored")]
    MissingCredentials,

    /// The request never produced a response.
    #[error("transport error: {0}")]
    Transport(String),

    /// The server answered with an error status.
    #[error("HTTP {status}: {}", .message.as_deref().unwrap_or(FALLBACK_MESSAGE))]
    Http { status: u16, message: Option<String> },

    /// The server answered with a success status the operation does not expect.
    #[error("unexpected status code {0}")]
    UnexpectedStatus(u16),

    #[error("failed to decode response: {0}")]
    Decode(String),

    #[error("{0}")]
    Unexpected(String),
}

impl ApiError {
    /// Text to show the user for this failure.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::MissingCredentials => NO_TOKEN_MESSAGE.to_string(),
            ApiError::Transport(_) => NETWORK_MESSAGE.to_string(),
            ApiError::Http { message, .. } => message
                .clone()
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| FALLBACK_MESSAGE.to_string()),
            ApiError::UnexpectedStatus(status) => format!("Status code: {status}"),
            ApiError::Decode(_) | ApiError::Unexpected(_) => self.to_string(),
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } | ApiError::UnexpectedStatus(status) => Some(*status),
            _ => None,
        }
    }

    /// The server rejected the credentials (missing, expired or revoked token).
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Http { status: 401, .. })
    }
}

impl From<reqwest_middleware::Error> for ApiError {
    fn from(error: reqwest_middleware::Error) -> Self {
        match error {
            reqwest_middleware::Error::Reqwest(e) if e.is_decode() => {
                ApiError::Decode(e.to_string())
            }
            reqwest_middleware::Error::Reqwest(e) => ApiError::Transport(e.to_string()),
            reqwest_middleware::Error::Middleware(e) => ApiError::Unexpected(e.to_string()),
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_decode() {
            ApiError::Decode(error.to_string())
        } else {
            ApiError::Transport(error.to_string())
        }
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;
