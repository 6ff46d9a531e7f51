//! File safety checks applied before an assets file or config file is read.

use crate::shared::error::DependencyError;
use std::fs;
use std::path::Path;

/// Upper bound for any file we parse. Real assets files of large solutions
/// reach tens of megabytes; anything beyond this is refused.
pub const MAX_FILE_SIZE: u64 = 256 * 1024 * 1024;

/// Ensures `path` is a regular, non-symlinked file no larger than `max_size`.
///
/// Returns the file length on success so callers can pre-size buffers.
///
/// # Errors
/// - `FileReadError` if metadata cannot be read or the path is not a file
/// - `SecurityError` if the path is a symbolic link or the file is too large
pub fn check_readable_file(
    path: &Path,
    description: &str,
    max_size: u64,
) -> Result<u64, DependencyError> {
    let metadata = fs::symlink_metadata(path).map_err(|e| DependencyError::FileReadError {
        path: path.to_path_buf(),
        details: format!("Failed to read {} metadata: {}", description, e),
    })?;

    if metadata.is_symlink() {
        return Err(DependencyError::SecurityError {
            path: path.to_path_buf(),
            reason: format!("{} is a symbolic link", description),
            hint: "Point the tool at the real file instead of a link".to_string(),
        });
    }

    if !metadata.is_file() {
        return Err(DependencyError::FileReadError {
            path: path.to_path_buf(),
            details: format!("{} is not a regular file", description),
        });
    }

    let size = metadata.len();
    if size > max_size {
        return Err(DependencyError::SecurityError {
            path: path.to_path_buf(),
            reason: format!(
                "{} is too large ({} bytes, maximum {} bytes)",
                description, size, max_size
            ),
            hint: "Check that the path refers to a NuGet assets file".to_string(),
        });
    }

    Ok(size)
}
