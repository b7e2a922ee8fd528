//! Error types and handlers for build operations

pub mod handlers;

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, BuilderError>;

#[derive(Debug, Error)]
pub enum BuilderError {
    /// Invalid or missing settings
    #[error("Configuration error: {0}")]
    Config(String),
    /// Build specification content that parses but makes no sense
    #[error("Validation error: {0}")]
    Validation(String),
    /// File IO errors
    #[error("IO error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Build specification YAML errors
    #[error("Failed to parse {}: {message}", path.display())]
    SpecParse { path: PathBuf, message: String },
    /// External command could not be started or exited unsuccessfully
    #[error("Command `{command}` failed: {reason}")]
    Command { command: String, reason: String },
    /// Network related errors
    #[error("Network error: {0}")]
    Network(String),
    /// Authentication errors
    #[error("Authentication error: {0}")]
    Auth(String),
    /// Registry API errors
    #[error("Registry error: {0}")]
    Registry(String),
}

impl BuilderError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        BuilderError::Io {
            path: path.into(),
            source,
        }
    }
}

impl From<reqwest::Error> for BuilderError {
    fn from(err: reqwest::Error) -> Self {
        BuilderError::Network(err.to_string())
    }
}

impl From<url::ParseError> for BuilderError {
    fn from(err: url::ParseError) -> Self {
        BuilderError::Config(format!("Invalid URL: {}", err))
    }
}
