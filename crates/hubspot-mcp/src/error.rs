//! Error types for hubspot-mcp

use thiserror::Error;

/// Result type alias for hubspot-mcp operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in hubspot-mcp
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// No tool is registered under this name. Raised before any envelope
    /// is built; callers treat it as a bug on their side.
    #[error("Unknown tool: {name}")]
    UnknownTool {
        /// The name that was looked up
        name: String,
    },

    /// A required argument is missing or an argument has the wrong type.
    #[error("Validation error: {message}")]
    Validation {
        /// Argument that failed validation
        field: Option<String>,
        /// What went wrong
        message: String,
    },

    /// Error from hubspot-client (HTTP status, network, decoding, ...)
    #[error(transparent)]
    Client(#[from] hubspot_client::Error),

    /// The tool catalog violates a construction invariant.
    #[error("Invalid tool registry: {message}")]
    Registry {
        /// Which invariant was violated
        message: String,
    },

    /// The MCP service failed to start or stopped abnormally.
    #[error("Server error: {message}")]
    Server {
        /// What went wrong
        message: String,
    },
}

impl Error {
    /// Creates an unknown-tool error.
    pub fn unknown_tool<S: Into<String>>(name: S) -> Self {
        Error::UnknownTool { name: name.into() }
    }

    /// Creates a validation error not tied to a single argument.
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Error::Validation {
            field: None,
            message: message.into(),
        }
    }

    /// Creates a validation error for a named argument.
    pub fn validation_field<F, M>(field: F, message: M) -> Self
    where
        F: Into<String>,
        M: Into<String>,
    {
        Error::Validation {
            field: Some(field.into()),
            message: message.into(),
        }
    }

    /// Creates a registry construction error.
    pub fn registry<S: Into<String>>(message: S) -> Self {
        Error::Registry {
            message: message.into(),
        }
    }

    /// Creates a server error.
    pub fn server<S: Into<String>>(message: S) -> Self {
        Error::Server {
            message: message.into(),
        }
    }

    /// Returns whether this is [`Error::UnknownTool`].
    pub fn is_unknown_tool(&self) -> bool {
        matches!(self, Error::UnknownTool { .. })
    }
}
