//! Error types for the capture queue.
//!
//! Capture and preview failures are raised to the caller. Explicit deletion
//! never raises; it reports through [`DeleteOutcome`] instead.

use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum CaptureError {
    #[error("Capture provider returned no data")]
    NoData,

    #[error("Capture provider failed: {0}")]
    Provider(String),

    #[error("Failed to write capture to {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum PreviewError {
    #[error("No image at {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to read image at {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl PreviewError {
    pub(crate) fn from_io(path: PathBuf, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::NotFound {
            PreviewError::NotFound(path)
        } else {
            PreviewError::Read { path, source }
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Partition capacity must be at least 1, got {0}")]
    InvalidCapacity(usize),

    #[error("Invalid value for {key}: {value:?}")]
    InvalidNumber { key: &'static str, value: String },

    #[error("Primary and secondary partitions share a directory: {}", .0.display())]
    SharedDirectory(PathBuf),

    #[error("No platform config directory; set SNAPQUEUE_ROOT")]
    NoStorageRoot,

    #[error("Failed to create {}: {source}", path.display())]
    Provision {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result of an explicit artifact deletion, shaped for a UI request loop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteOutcome {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DeleteOutcome {
    pub fn ok() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(message.into()),
        }
    }
}
