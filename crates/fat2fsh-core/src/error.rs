//! Error types for fetching, converting and writing code systems

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for fat2fsh operations
#[derive(Debug, Error)]
pub enum Fat2FshError {
    /// Network unreachable, timeout, or non-success HTTP status
    #[error("Transport error for '{identifier}': {message}")]
    Transport { identifier: String, message: String },

    /// Response body is not a usable JSON document
    #[error("Decode error for '{identifier}': {message}")]
    Decode { identifier: String, message: String },

    /// Configuration loading or validation errors
    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    /// File system I/O errors
    #[error("IO error for path '{path}': {source}")]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Raw artifact could not be serialized
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Error kind enumeration for categorizing errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Transport,
    Decode,
    Config,
    Io,
    Serialization,
}

impl Fat2FshError {
    /// Get the error kind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Fat2FshError::Transport { .. } => ErrorKind::Transport,
            Fat2FshError::Decode { .. } => ErrorKind::Decode,
            Fat2FshError::ConfigError { .. } => ErrorKind::Config,
            Fat2FshError::IoError { .. } => ErrorKind::Io,
            Fat2FshError::Serialization(_) => ErrorKind::Serialization,
        }
    }

    /// Check if this error only affects a single identifier, so a batch can
    /// move on to the next one
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::Transport | ErrorKind::Decode | ErrorKind::Io | ErrorKind::Serialization
        )
    }

    /// Create a transport error
    pub fn transport(identifier: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Transport {
            identifier: identifier.into(),
            message: message.into(),
        }
    }

    /// Create a decode error
    pub fn decode(identifier: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Decode {
            identifier: identifier.into(),
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn config_error(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    /// Create an IO error with path context
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::IoError {
            path: path.into(),
            source,
        }
    }
}
