//! Shared error type across loadwire crates.

use thiserror::Error;

/// Client-facing error codes (stable API).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientCode {
    /// Invalid input / malformed message.
    BadRequest,
    /// Unsupported protocol or config version.
    UnsupportedVersion,
    /// Internal server error.
    Internal,
}

impl ClientCode {
    /// String representation used in JSON responses.
    pub fn as_str(self) -> &'static str {
        match self {
            ClientCode::BadRequest => "BAD_REQUEST",
            ClientCode::UnsupportedVersion => "UNSUPPORTED_VERSION",
            ClientCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, LoadwireError>;

/// Unified error type used by core, gateway and notify.
#[derive(Debug, Error)]
pub enum LoadwireError {
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("unsupported version")]
    UnsupportedVersion,
    #[error("internal: {0}")]
    Internal(String),
}

impl LoadwireError {
    /// Map internal error to a stable client-facing code.
    pub fn client_code(&self) -> ClientCode {
        match self {
            LoadwireError::BadRequest(_) => ClientCode::BadRequest,
            LoadwireError::UnsupportedVersion => ClientCode::UnsupportedVersion,
            LoadwireError::Internal(_) => ClientCode::Internal,
        }
    }
}

impl From<serde_json::Error> for LoadwireError {
    fn from(e: serde_json::Error) -> Self {
        LoadwireError::BadRequest(format!("invalid json: {e}"))
    }
}
