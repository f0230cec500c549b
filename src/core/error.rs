//! Gate error types

use thiserror::Error;

/// Errors raised around the access gate
///
/// The decision itself never fails; these cover the layers that feed it
/// (id parsing, configuration, platform lookups).
#[derive(Error, Debug)]
pub enum GateError {
    /// An id string was not a valid snowflake
    #[error("Invalid id: {0}")]
    InvalidId(String),

    /// The platform layer could not resolve the caller
    #[error("Caller context unavailable: {0}")]
    ContextUnavailable(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Generic error with message
    #[error("{0}")]
    Other(String),
}

impl GateError {
    /// Create a generic error from a string
    pub fn other(msg: impl Into<String>) -> Self {
        GateError::Other(msg.into())
    }

    /// Create a context resolution error
    pub fn context_unavailable(msg: impl Into<String>) -> Self {
        GateError::ContextUnavailable(msg.into())
    }
}

/// Result type alias for gate operations
pub type GateResult<T> = Result<T, GateError>;
