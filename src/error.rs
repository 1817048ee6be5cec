use std::time::Duration;

use thiserror::Error;

use crate::domain::error::PoolError;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

/// Failures turning a target identifier into connection coordinates.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolutionError {
    #[error("unknown target '{identifier}'")]
    UnknownTarget { identifier: String },

    #[error("malformed target '{identifier}': {reason}")]
    MalformedTarget { identifier: String, reason: String },
}

/// Failures reaching or talking to the remote management endpoint.
#[derive(Error, Debug)]
pub enum ConnectionError {
    #[error("invalid management URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("transport error: {0}")]
    Transport(String),

    #[error("connection to {endpoint} timed out after {after:?}")]
    Timeout { endpoint: String, after: Duration },

    #[error("handshake with {endpoint} failed: {reason}")]
    Handshake { endpoint: String, reason: String },

    #[error("remote error {status} ({error_type}): {message}")]
    Remote {
        status: u16,
        error_type: String,
        message: String,
    },
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Resolution(#[from] ResolutionError),

    #[error(transparent)]
    Connection(#[from] ConnectionError),

    #[error(transparent)]
    Pool(#[from] PoolError),

    /// The remote pool does not support the requested operation.
    #[error("unsupported operation: {0}")]
    UnsupportedOperation(String),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Connection(ConnectionError::Transport(err.to_string()))
    }
}

impl Error {
    /// True for the one condition the collector recovers from locally.
    #[must_use]
    pub const fn is_unsupported_operation(&self) -> bool {
        matches!(self, Self::UnsupportedOperation(_))
    }
}
