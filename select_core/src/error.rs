//! Library error types

use thiserror::Error;

use crate::files::ValidationError;

pub type Result<T> = std::result::Result<T, SelectError>;

#[derive(Error, Debug)]
pub enum SelectError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Unknown language: {0}")]
    UnknownLanguage(String),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl SelectError {
    /// Localized message when the error came out of a validation run.
    pub fn localized_message(&self) -> Option<&str> {
        match self {
            SelectError::Validation(err) => Some(err.message()),
            _ => None,
        }
    }
}
