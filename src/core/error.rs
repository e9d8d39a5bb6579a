//! Error types for the logger system

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// IO error with context
    #[error("IO error while {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    /// JSON serialization error
    #[error("cannot marshal payload: {0}")]
    Json(#[from] serde_json::Error),

    /// Unrecognized severity name
    #[error("Invalid log level: '{0}'")]
    InvalidLevel(String),
}

impl LoggerError {
    /// Create an IO error with context
    pub fn io_operation(operation: impl Into<String>, source: std::io::Error) -> Self {
        LoggerError::Io {
            operation: operation.into(),
            source,
        }
    }

    /// Create an invalid level error
    pub fn invalid_level(name: impl Into<String>) -> Self {
        LoggerError::InvalidLevel(name.into())
    }
}
