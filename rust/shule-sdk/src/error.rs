use crate::form::ValidationErrors;
use thiserror::Error;

/// Failure taxonomy for every client operation.
///
/// Nothing here is fatal to the process: each error is scoped to the
/// single user action that triggered it, and the store/draft state it
/// came from is left untouched so the action can be retried.
#[derive(Error, Debug)]
pub enum ClientError {
    /// Local validation rejected the draft; the network was never touched.
    #[error("validation failed: {0}")]
    ValidationFailed(ValidationErrors),

    /// The backend answered with a non-2xx status. Carries the
    /// server-supplied message when the error body had one.
    #[error("http {status}: {}", .message.as_deref().unwrap_or("request failed"))]
    Http { status: u16, message: Option<String> },

    /// No response was received at all.
    #[error("network unreachable: {0}")]
    NetworkUnreachable(String),

    /// The response body did not match the expected shape.
    #[error("decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// A request body could not be encoded (e.g. a bad MIME type on an
    /// upload part).
    #[error("invalid request body: {0}")]
    InvalidBody(String),
}

impl ClientError {
    /// Status code for HTTP failures, `None` for everything local.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, ClientError::ValidationFailed(_))
    }
}
