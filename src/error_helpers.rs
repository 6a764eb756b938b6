//! Error helper functions for creating actionable error messages

use std::io;
use std::path::Path;

/// Check if an IO error is a permission denied error
pub fn is_permission_denied(err: &io::Error) -> bool {
    err.kind() == io::ErrorKind::PermissionDenied
}

/// Check if an IO error is a "not found" error
pub fn is_not_found(err: &io::Error) -> bool {
    err.kind() == io::ErrorKind::NotFound
}

/// Hint lines appended when a file could not be read or rewritten due to
/// permissions. The failure itself was already reported; this is advice only.
pub fn permission_hint(path: &Path) -> String {
    let parent_dir = path
        .parent()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| ".".to_string());

    format!(
        "Possible fixes:\n\
         1. Check file permissions: ls -l '{}'\n\
         2. Rewrites need write access to the directory: ls -ld '{}'",
        path.display(),
        parent_dir
    )
}

/// Hint line for a file that vanished between being listed and being read.
pub fn not_found_hint(path: &Path) -> String {
    format!(
        "Note: '{}' disappeared while the scan was running (removed by another process?)",
        path.display()
    )
}
