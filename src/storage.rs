//! On-disk storage for captured artifacts.
//!
//! Artifacts live under the platform config directory by default:
//!   macOS:   ~/Library/Application Support/snapqueue/
//!   Linux:   ~/.config/snapqueue/
//!   Windows: %APPDATA%/snapqueue/

use crate::error::ConfigError;
use std::path::{Path, PathBuf};

/// File extension for every stored capture.
pub const ARTIFACT_EXTENSION: &str = "png";

/// Default storage root, or `None` on platforms without a config dir.
pub fn default_storage_root() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("snapqueue"))
}

/// Create `dir` (and parents) if absent. Safe to call repeatedly.
pub fn ensure_dir(dir: &Path) -> Result<(), ConfigError> {
    std::fs::create_dir_all(dir).map_err(|source| ConfigError::Provision {
        path: dir.to_path_buf(),
        source,
    })
}

/// A fresh, collision-resistant artifact path inside `dir`.
pub fn new_artifact_path(dir: &Path) -> PathBuf {
    dir.join(format!("{}.{}", uuid::Uuid::new_v4(), ARTIFACT_EXTENSION))
}

/// Delete a file, logging instead of failing. Returns whether it was removed.
pub(crate) async fn remove_best_effort(path: &Path, context: &str) -> bool {
    match tokio::fs::remove_file(path).await {
        Ok(()) => true,
        Err(e) => {
            log::error!(
                "[STORAGE] Error removing {} at {}: {}",
                context,
                path.display(),
                e
            );
            false
        }
    }
}

/// Blocking variant of [`remove_best_effort`] for callers outside a runtime.
pub(crate) fn remove_best_effort_blocking(path: &Path, context: &str) -> bool {
    match std::fs::remove_file(path) {
        Ok(()) => true,
        Err(e) => {
            log::error!(
                "[STORAGE] Error removing {} at {}: {}",
                context,
                path.display(),
                e
            );
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn artifact_paths_are_unique_pngs() {
        let dir = Path::new("/tmp/snapqueue-test");
        let a = new_artifact_path(dir);
        let b = new_artifact_path(dir);
        assert_ne!(a, b);
        assert_eq!(a.parent(), Some(dir));
        assert_eq!(a.extension().and_then(|e| e.to_str()), Some("png"));
    }

    #[test]
    fn default_root_ends_with_crate_name() {
        if let Some(root) = default_storage_root() {
            assert!(root.ends_with("snapqueue"));
        }
    }

    #[test]
    fn ensure_dir_is_idempotent() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("a").join("b");
        ensure_dir(&dir).unwrap();
        ensure_dir(&dir).unwrap();
        assert!(dir.is_dir());
    }

    #[test]
    fn blocking_removal_reports_missing_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("missing.png");
        assert!(!remove_best_effort_blocking(&path, "screenshot"));
    }
}
