//! Dump path validation.

use std::path::PathBuf;
use thiserror::Error;

/// Rejected dump paths.
#[derive(Debug, Error)]
pub enum PathError {
    #[error("path is empty")]
    Empty,
    #[error("{0} is a directory")]
    Directory(String),
}

/// Checks a user-supplied dump path.
///
/// Missing files are not rejected here; the loader reports them with the
/// underlying I/O error.
pub fn validate_dump_path(raw: &str) -> Result<PathBuf, PathError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(PathError::Empty);
    }
    let path = PathBuf::from(trimmed);
    if path.is_dir() {
        return Err(PathError::Directory(path.display().to_string()));
    }
    Ok(path)
}
