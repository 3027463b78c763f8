//! Error types for hubspot-client

use thiserror::Error;

/// Result type alias for hubspot-client operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in hubspot-client
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// The remote API answered with a non-2xx status.
    #[error("HTTP error {status}: {body}")]
    HttpStatus {
        /// HTTP status code
        status: u16,
        /// Raw response body
        body: String,
    },

    /// Connection, DNS, or timeout failure before a status was received.
    #[error("Network error: {0}")]
    Network(#[source] reqwest::Error),

    /// Response body was expected to be JSON but was not.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid or unreadable configuration
    #[error("Configuration error: {message}")]
    Config {
        /// What configuration is problematic
        message: String,
    },

    /// A value could not be interpreted (unknown object type, operator, ...)
    #[error("Invalid input: {message}")]
    Invalid {
        /// What was wrong with the value
        message: String,
    },

    /// The transport has been closed and accepts no further requests.
    #[error("Transport is closed")]
    Closed,
}

impl Error {
    /// Creates a new configuration error.
    pub fn config<S: Into<String>>(message: S) -> Self {
        Error::Config {
            message: message.into(),
        }
    }

    /// Creates a new invalid-input error.
    pub fn invalid<S: Into<String>>(message: S) -> Self {
        Error::Invalid {
            message: message.into(),
        }
    }

    /// Returns the HTTP status code for [`Error::HttpStatus`] errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns whether the failure happened below the HTTP layer.
    pub fn is_network(&self) -> bool {
        matches!(self, Error::Network(_))
    }
}
