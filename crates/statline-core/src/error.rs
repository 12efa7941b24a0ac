//! Shared error type across statline crates.

use thiserror::Error;

/// Stable error codes (safe to match on or log as strings).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Metric key failed registration constraints.
    InvalidKey,
    /// Event or lookup for a key that was never registered.
    UnregisteredKey,
    /// Engine has shut down; the ingestion queue is closed.
    Stopped,
    /// Structured snapshot could not be serialized.
    Serialization,
    /// Malformed or out-of-range configuration.
    BadConfig,
    /// Unsupported config version.
    UnsupportedVersion,
    /// Internal failure.
    Internal,
}

impl ErrorCode {
    /// String representation used in logs and tests.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::InvalidKey => "INVALID_KEY",
            ErrorCode::UnregisteredKey => "UNREGISTERED_KEY",
            ErrorCode::Stopped => "STOPPED",
            ErrorCode::Serialization => "SERIALIZATION",
            ErrorCode::BadConfig => "BAD_CONFIG",
            ErrorCode::UnsupportedVersion => "UNSUPPORTED_VERSION",
            ErrorCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, StatError>;

/// Unified error type used by core and engine.
#[derive(Debug, Error)]
pub enum StatError {
    #[error("invalid key: {0}")]
    InvalidKey(String),
    #[error("unregistered key: {group}/{key}")]
    UnregisteredKey { group: String, key: String },
    #[error("engine stopped")]
    Stopped,
    #[error("serialization failed: {0}")]
    Serialization(String),
    #[error("bad config: {0}")]
    BadConfig(String),
    #[error("unsupported config version")]
    UnsupportedVersion,
    #[error("internal: {0}")]
    Internal(String),
}

impl StatError {
    /// Map to a stable error code.
    pub fn code(&self) -> ErrorCode {
        match self {
            StatError::InvalidKey(_) => ErrorCode::InvalidKey,
            StatError::UnregisteredKey { .. } => ErrorCode::UnregisteredKey,
            StatError::Stopped => ErrorCode::Stopped,
            StatError::Serialization(_) => ErrorCode::Serialization,
            StatError::BadConfig(_) => ErrorCode::BadConfig,
            StatError::UnsupportedVersion => ErrorCode::UnsupportedVersion,
            StatError::Internal(_) => ErrorCode::Internal,
        }
    }
}
