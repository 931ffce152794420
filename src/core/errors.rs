//! Shared error types for auditmap operations

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for auditmap operations
#[derive(Debug, Error)]
pub enum Error {
    /// File system related errors
    #[error("File system error: {message}")]
    FileSystem {
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<std::io::Error>,
    },

    /// Audit document parsing errors
    #[error("Parse error in {file}: {message}")]
    Parse { file: PathBuf, message: String },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),
}

impl Error {
    pub fn file_system(message: impl Into<String>, path: Option<PathBuf>) -> Self {
        Error::FileSystem {
            message: message.into(),
            path,
            source: None,
        }
    }

    pub fn parse(file: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Error::Parse {
            file: file.into(),
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
