//! Output directory preparation.

use crate::error::{Error, Result};
use std::path::Path;

/// What [`ensure_directory`] found or did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectoryState {
    /// One or more path segments were created.
    Created,
    /// The directory was already present; nothing changed.
    AlreadyExists,
}

/// Ensure `path` exists as a directory, creating missing parents.
///
/// An existing directory is not an error. Fails with
/// [`Error::OutputDirCreateFailed`] when creation fails for any other reason,
/// such as a path segment being a regular file.
pub fn ensure_directory(path: &Path) -> Result<DirectoryState> {
    if path.is_dir() {
        return Ok(DirectoryState::AlreadyExists);
    }

    std::fs::create_dir_all(path).map_err(|e| Error::OutputDirCreateFailed {
        path: path.to_path_buf(),
        source: e,
    })?;

    Ok(DirectoryState::Created)
}

/// Async variant of [`ensure_directory`] for use inside the pipeline.
pub async fn ensure_directory_async(path: &Path) -> Result<DirectoryState> {
    if tokio::fs::metadata(path).await.is_ok_and(|m| m.is_dir()) {
        return Ok(DirectoryState::AlreadyExists);
    }

    tokio::fs::create_dir_all(path)
        .await
        .map_err(|e| Error::OutputDirCreateFailed {
            path: path.to_path_buf(),
            source: e,
        })?;

    Ok(DirectoryState::Created)
}
