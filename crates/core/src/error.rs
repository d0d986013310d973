//! Error types for Scribe
//!
//! Centralized error handling using thiserror.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for Scribe
#[derive(Error, Debug)]
pub enum ScribeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("Project error: {0}")]
    Project(String),

    #[error("Not found: {0}")]
    NotFound(PathBuf),

    #[error("Document has no file path")]
    NoFilePath,

    #[error("Unknown language: {0}")]
    UnknownLanguage(String),
}

/// Result type alias for Scribe operations
pub type Result<T> = std::result::Result<T, ScribeError>;

impl ScribeError {
    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            ScribeError::Io(e) => format!("File operation failed: {}", e),
            ScribeError::Config(msg) => format!("Configuration error: {}", msg),
            ScribeError::NotFound(path) => format!("Not found: {}", path.display()),
            ScribeError::NoFilePath => {
                "The buffer has not been saved yet; choose a file name".to_string()
            }
            ScribeError::UnknownLanguage(name) => {
                format!(
                    "Unknown language '{}'. Expected one of: Python, JavaScript, TypeScript, C#",
                    name
                )
            }
            _ => self.to_string(),
        }
    }
}
