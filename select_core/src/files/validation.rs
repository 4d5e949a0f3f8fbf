use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;

use super::models::FileHandle;

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

lazy_static! {
    static ref ACCEPT_WILDCARDS: Regex = Regex::new(r"[.*]").unwrap();
}

/// Terminal failure of a validation run. `Display` is the localized message.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("{message}")]
    DisallowedFileType {
        message: String,
        file_name: String,
        accept: String,
    },

    #[error("{message}")]
    FileTooLarge {
        message: String,
        file_size: u64,
        maximum_size_mb: f64,
    },
}

impl ValidationError {
    pub fn message(&self) -> &str {
        match self {
            ValidationError::DisallowedFileType { message, .. } => message,
            ValidationError::FileTooLarge { message, .. } => message,
        }
    }
}

/// Checks a file against a comma separated accept pattern.
///
/// Each pattern matches when the MIME type contains the pattern with every
/// `.` and `*` removed, or when the file name ends with the pattern as
/// written. Patterns are not trimmed. An absent or empty accept allows all.
pub fn is_allowed_file_type<F: FileHandle + ?Sized>(accept: Option<&str>, file: &F) -> bool {
    let accept = match accept {
        Some(accept) if !accept.is_empty() => accept,
        _ => return true,
    };

    accept.split(',').any(|pattern| {
        let fragment = ACCEPT_WILDCARDS.replace_all(pattern, "");
        file.mime_type().contains(fragment.as_ref()) || file.name().ends_with(pattern)
    })
}

/// True when `file_size` is strictly above the cap. An absent, zero or NaN
/// cap never trips.
pub fn beyond_maximal_size(file_size: u64, maximum_size_mb: Option<f64>) -> bool {
    match maximum_size_mb {
        Some(maximum) if maximum != 0.0 && !maximum.is_nan() => {
            file_size as f64 > maximum * BYTES_PER_MB
        }
        _ => false,
    }
}
