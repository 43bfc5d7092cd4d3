use serde::Serialize;
use thiserror::Error;

/// Errors that can occur during user operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UserError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("User not found: {0}")]
    NotFound(String),
    #[error("User already exists: {0}")]
    AlreadyExists(String),
    #[error("Internal error: {0}")]
    Internal(String),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

/// Transport status codes, numbered like gRPC's.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StatusCode {
    InvalidArgument = 3,
    NotFound = 5,
    AlreadyExists = 6,
    Internal = 13,
    Unavailable = 14,
}

/// A status a transport adapter can put on the wire for a failed call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Status {
    pub code: StatusCode,
    pub message: String,
}

impl UserError {
    pub fn code(&self) -> StatusCode {
        match self {
            UserError::InvalidArgument(_) => StatusCode::InvalidArgument,
            UserError::NotFound(_) => StatusCode::NotFound,
            UserError::AlreadyExists(_) => StatusCode::AlreadyExists,
            UserError::Internal(_) => StatusCode::Internal,
            UserError::ActorCommunicationError(_) => StatusCode::Unavailable,
        }
    }
}

impl From<UserError> for Status {
    fn from(err: UserError) -> Self {
        Self {
            code: err.code(),
            message: err.to_string(),
        }
    }
}
