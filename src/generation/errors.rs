//! Error types for the generation domain

use std::path::PathBuf;

use thiserror::Error;

/// Result type for generation operations
pub type Result<T> = std::result::Result<T, GenerationError>;

/// Errors that can occur while turning an OpenAPI document into bindings
#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("OpenAPI document must specify at least one server.")]
    MissingServer,

    #[error(
        "Server URL '{url}' is relative; provide a baseUrlOverride (--base-url) with an absolute http(s) URL"
    )]
    RelativeServerUrl { url: String },

    #[error(
        "Invalid server URL '{url}': {reason}. Fix the servers entry or provide a baseUrlOverride (--base-url)"
    )]
    InvalidServerUrl { url: String, reason: String },

    #[error("Unsupported scheme '{scheme}' in server URL '{url}': only http and https are supported")]
    UnsupportedScheme { url: String, scheme: String },

    #[error("Failed to parse OpenAPI document: {0}")]
    Parse(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Render error: {0}")]
    Render(String),

    #[error("Unexpected {kind} during generation: {message}\n{backtrace}")]
    Unexpected {
        kind: String,
        message: String,
        backtrace: String,
    },

    #[error("OpenAPI loading error: {0}")]
    Load(String),

    #[error("Failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl GenerationError {
    /// Create a new parse error
    pub fn parse<S: Into<String>>(msg: S) -> Self {
        Self::Parse(msg.into())
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::InvalidConfiguration(msg.into())
    }

    /// Create a new loading error
    pub fn load<S: Into<String>>(msg: S) -> Self {
        Self::Load(msg.into())
    }
}

impl From<tera::Error> for GenerationError {
    fn from(err: tera::Error) -> Self {
        // tera nests the useful message in the source chain
        let mut message = err.to_string();
        let mut source = std::error::Error::source(&err);
        while let Some(inner) = source {
            message.push_str(": ");
            message.push_str(&inner.to_string());
            source = inner.source();
        }
        Self::Render(message)
    }
}
