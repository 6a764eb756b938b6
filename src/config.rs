//! Invocation settings
//!
//! Everything the rewriter needs is fixed at invocation time and carried in
//! one [`Settings`] value. There is no configuration file; the command line
//! is the whole configuration surface.

use std::path::{Path, PathBuf};

use crate::encoding::TextPolicy;

#[derive(Debug, Clone)]
pub struct Settings {
    /// Directory tree to scan. A root that does not exist or is not a
    /// directory yields zero visited files, not an error.
    pub root: PathBuf,
    /// Fragment to replace, in either slash style.
    pub old_fragment: String,
    /// Replacement fragment.
    pub new_fragment: String,
    /// Report what would change without writing anything.
    pub dry_run: bool,
    /// How non-UTF-8 bytes are handled.
    pub text_policy: TextPolicy,
    /// User additions to the binary-extension denylist.
    pub extra_skip_exts: Vec<String>,
    /// Skip files larger than this many bytes. `None` means no limit.
    pub max_file_size: Option<u64>,
    /// Follow symbolic links during the walk.
    pub follow_symlinks: bool,
}

impl Settings {
    /// Settings for a plain run: lossy decoding, no extra skips, no size
    /// limit, symlinks not followed.
    pub fn new(root: &Path, old_fragment: &str, new_fragment: &str) -> Self {
        Self {
            root: root.to_path_buf(),
            old_fragment: old_fragment.to_string(),
            new_fragment: new_fragment.to_string(),
            dry_run: false,
            text_policy: TextPolicy::Lossy,
            extra_skip_exts: Vec::new(),
            max_file_size: None,
            follow_symlinks: false,
        }
    }
}
