//! Error types for hubspot-cli

use std::path::Path;

use thiserror::Error;

/// Result type alias for hubspot-cli operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in hubspot-cli
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Error from hubspot-client
    #[error(transparent)]
    Client(#[from] hubspot_client::Error),

    /// Error from hubspot-mcp
    #[error(transparent)]
    Mcp(#[from] hubspot_mcp::Error),

    /// Bad configuration or config command input
    #[error("Configuration error: {message}")]
    Config {
        /// What went wrong
        message: String,
    },

    /// `--args` was not a JSON object
    #[error("Invalid arguments: {message}")]
    Arguments {
        /// What went wrong
        message: String,
    },

    /// Filesystem error with the path involved
    #[error("I/O error at {path}: {source}")]
    Io {
        /// File or directory being accessed
        path: String,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// JSON encoding error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Creates a configuration error.
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Creates an argument error.
    pub fn arguments<S: Into<String>>(message: S) -> Self {
        Self::Arguments {
            message: message.into(),
        }
    }

    /// Wraps an I/O error with the path it concerns.
    pub fn io_with_path(source: std::io::Error, path: &Path) -> Self {
        Self::Io {
            path: path.display().to_string(),
            source,
        }
    }
}
