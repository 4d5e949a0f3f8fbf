use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs as async_fs;

use crate::error::Result;

/// Read-only view of a file chosen by the user.
///
/// Handles are owned by whatever produced them (a picker host, a drop
/// surface, the filesystem); validation only ever reads them.
pub trait FileHandle: Send {
    /// File name including its extension.
    fn name(&self) -> &str;

    /// Size in bytes.
    fn size(&self) -> u64;

    /// MIME type, empty when the platform could not tell.
    fn mime_type(&self) -> &str;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedFile {
    pub name: String,
    pub size: u64,
    #[serde(default)]
    pub mime_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, size: u64, mime_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            size,
            mime_type: mime_type.into(),
            path: None,
        }
    }

    /// Builds a handle from a local file, guessing the MIME type from the
    /// extension the way browsers fill `File.type`.
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let metadata = async_fs::metadata(path).await?;

        if !metadata.is_file() {
            return Err(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("not a regular file: {}", path.display()),
            )
            .into());
        }

        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        let mime_type = mime_guess::from_path(path)
            .first()
            .map(|mime| mime.essence_str().to_string())
            .unwrap_or_default();

        Ok(Self {
            name,
            size: metadata.len(),
            mime_type,
            path: Some(path.to_path_buf()),
        })
    }
}

impl FileHandle for SelectedFile {
    fn name(&self) -> &str {
        &self.name
    }

    fn size(&self) -> u64 {
        self.size
    }

    fn mime_type(&self) -> &str {
        &self.mime_type
    }
}

/// Per-call selection options.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SelectionConfig {
    #[serde(default)]
    pub multiple: bool,
    /// Comma separated MIME fragments or filename suffixes, e.g. `image/*,.pdf`.
    #[serde(default)]
    pub accept: Option<String>,
}

impl SelectionConfig {
    pub fn new(multiple: bool, accept: Option<&str>) -> Self {
        Self {
            multiple,
            accept: accept.map(str::to_string),
        }
    }

    /// Accept pattern with the empty string folded into `None`.
    pub fn accept(&self) -> Option<&str> {
        self.accept.as_deref().filter(|accept| !accept.is_empty())
    }
}

/// Per-call upload limits.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UploadPolicy {
    /// Maximum size in megabytes. `None` or zero disables the check.
    #[serde(default)]
    pub maximum_size_mb: Option<f64>,
}

impl UploadPolicy {
    pub fn with_maximum_size_mb(maximum_size_mb: f64) -> Self {
        Self {
            maximum_size_mb: Some(maximum_size_mb),
        }
    }
}
