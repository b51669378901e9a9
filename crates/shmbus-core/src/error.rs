//! Error types for the logging subsystem

use thiserror::Error;

/// Result type alias for logging configuration operations
pub type LogResult<T> = Result<T, LogError>;

/// Error type for configuring the logging subsystem
///
/// These are only ever returned from configuration calls. Writing a log
/// record never produces a `LogError`.
#[derive(Error, Debug)]
pub enum LogError {
    /// A level name did not match any known level
    #[error("invalid log level: {0:?}")]
    InvalidLevel(String),

    /// A custom logger callback was null
    #[error("log callback is null")]
    NullCallback,

    /// The requested sink was not compiled into this build
    #[error("unsupported configuration: {sink} logger requires the `{feature}` feature")]
    Unsupported {
        sink: &'static str,
        feature: &'static str,
    },

    /// A custom logger callback is already installed
    #[error("a custom logger is already installed")]
    DuplicateInstall,

    /// Invalid configuration value
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// I/O error while preparing a sink
    #[error("I/O error: {0}")]
    Io(String),

    /// Serialization/deserialization error
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Internal error
    #[error("internal error: {0}")]
    Internal(String),
}

impl LogError {
    /// Returns a status code suitable for FFI (0 is reserved for success)
    pub fn error_code(&self) -> u32 {
        match self {
            LogError::InvalidLevel(_) => 1,
            LogError::NullCallback => 2,
            LogError::Unsupported { .. } => 3,
            LogError::DuplicateInstall => 4,
            LogError::InvalidConfig(_) => 5,
            LogError::Io(_) => 6,
            LogError::Serialization(_) => 7,
            LogError::Internal(_) => 8,
        }
    }

    /// Whether this error means the request cannot be served by this build
    pub fn is_unsupported(&self) -> bool {
        matches!(self, LogError::Unsupported { .. })
    }
}

impl From<serde_json::Error> for LogError {
    fn from(err: serde_json::Error) -> Self {
        LogError::Serialization(err.to_string())
    }
}

impl From<std::io::Error> for LogError {
    fn from(err: std::io::Error) -> Self {
        LogError::Io(err.to_string())
    }
}
