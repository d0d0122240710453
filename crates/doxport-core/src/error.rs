//! Error types for the Doxport core library
//!
//! This module defines the error handling system for the export pipeline,
//! using thiserror for ergonomic error definitions.

use thiserror::Error;

/// Main error type for export operations
#[derive(Error, Debug)]
pub enum Error {
    /// The host model could not be used as an export root
    #[error("Model error: {message}")]
    Model { message: String },

    /// JSON serialization errors while rendering the artifact
    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// IO errors while writing the artifact
    #[error("IO error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience type alias for Results using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a model error
    pub fn model(message: impl Into<String>) -> Self {
        Error::Model {
            message: message.into(),
        }
    }
}

// Conversion implementations
impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json {
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io {
            message: err.to_string(),
            source: err,
        }
    }
}
