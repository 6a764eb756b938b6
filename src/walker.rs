//! Directory traversal and the binary-extension denylist

use std::path::Path;
use walkdir::WalkDir;

/// Extensions presumed binary; files carrying them are never opened.
pub const BINARY_EXTENSIONS: [&str; 7] =
    [".exe", ".dll", ".lib", ".obj", ".pdb", ".exp", ".bin"];

/// Case-insensitive filename-suffix denylist.
///
/// Matching is on the full file name, not a parsed extension, so a file
/// named exactly `.exe` is skipped as well.
#[derive(Debug, Clone)]
pub struct ExtensionFilter {
    suffixes: Vec<String>,
}

impl ExtensionFilter {
    /// Build the filter from the fixed denylist plus user-supplied extras.
    ///
    /// Extras are lowercased and given a leading dot when missing; the
    /// fixed denylist is always in force.
    pub fn with_extras<I, S>(extras: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut suffixes: Vec<String> = BINARY_EXTENSIONS
            .iter()
            .map(|ext| ext.to_string())
            .collect();

        for extra in extras {
            let trimmed = extra.as_ref().trim();
            if trimmed.is_empty() {
                continue;
            }
            let lowered = trimmed.to_lowercase();
            let suffix = if lowered.starts_with('.') {
                lowered
            } else {
                format!(".{}", lowered)
            };
            if !suffixes.contains(&suffix) {
                suffixes.push(suffix);
            }
        }

        Self { suffixes }
    }

    pub fn is_binary(&self, file_name: &str) -> bool {
        let lowered = file_name.to_lowercase();
        self.suffixes.iter().any(|suffix| lowered.ends_with(suffix))
    }
}

impl Default for ExtensionFilter {
    fn default() -> Self {
        Self::with_extras(std::iter::empty::<&str>())
    }
}

/// Walk the tree under `root` depth-first.
///
/// Symlinks are not followed unless `follow_symlinks` is set; with it set,
/// broken links surface as error entries rather than being silently
/// dropped. Entry order is whatever the directory listing yields.
pub fn walk(root: &Path, follow_symlinks: bool) -> walkdir::IntoIter {
    WalkDir::new(root).follow_links(follow_symlinks).into_iter()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_denylist_matches_case_insensitively() {
        let filter = ExtensionFilter::default();
        assert!(filter.is_binary("app.exe"));
        assert!(filter.is_binary("APP.EXE"));
        assert!(filter.is_binary("Library.DlL"));
        assert!(!filter.is_binary("notes.txt"));
        assert!(!filter.is_binary("Makefile"));
    }

    #[test]
    fn test_denylist_covers_all_builtin_extensions() {
        let filter = ExtensionFilter::default();
        for ext in BINARY_EXTENSIONS {
            let name = format!("artifact{}", ext);
            assert!(filter.is_binary(&name), "{} should be skipped", name);
        }
    }

    #[test]
    fn test_bare_dotfile_named_like_extension_is_skipped() {
        // Suffix matching, same as endswith: a file named ".exe" has no
        // stem but still matches
        let filter = ExtensionFilter::default();
        assert!(filter.is_binary(".exe"));
    }

    #[test]
    fn test_extension_must_match_at_a_dot_boundary() {
        let filter = ExtensionFilter::default();
        assert!(!filter.is_binary("my.exe.txt"));
        assert!(!filter.is_binary("flexe"));
    }

    #[test]
    fn test_extras_are_normalized() {
        let filter = ExtensionFilter::with_extras(["dat", ".IDX", "  log  "]);
        assert!(filter.is_binary("dump.dat"));
        assert!(filter.is_binary("index.idx"));
        assert!(filter.is_binary("run.LOG"));
        // Builtins stay in force
        assert!(filter.is_binary("app.exe"));
    }

    #[test]
    fn test_blank_extras_are_ignored() {
        let filter = ExtensionFilter::with_extras(["", "   "]);
        assert!(!filter.is_binary("file.txt"));
        assert!(filter.is_binary("file.bin"));
    }

    #[test]
    fn test_walk_finds_nested_files() {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir_all(temp_dir.path().join("a/b")).unwrap();
        fs::write(temp_dir.path().join("top.txt"), "x").unwrap();
        fs::write(temp_dir.path().join("a/mid.txt"), "x").unwrap();
        fs::write(temp_dir.path().join("a/b/deep.txt"), "x").unwrap();

        let mut names: Vec<String> = walk(temp_dir.path(), false)
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .map(|entry| entry.file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();

        assert_eq!(names, vec!["deep.txt", "mid.txt", "top.txt"]);
    }

    #[test]
    fn test_walk_of_missing_root_yields_single_error() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("does-not-exist");

        let entries: Vec<_> = walk(&missing, false).collect();
        assert_eq!(entries.len(), 1);
        assert!(entries[0].is_err());
    }

    #[cfg(unix)]
    #[test]
    fn test_walk_does_not_follow_symlinked_dirs_by_default() {
        let temp_dir = TempDir::new().unwrap();
        let real = temp_dir.path().join("real");
        fs::create_dir(&real).unwrap();
        fs::write(real.join("inside.txt"), "x").unwrap();
        std::os::unix::fs::symlink(&real, temp_dir.path().join("link")).unwrap();

        let file_count = walk(temp_dir.path(), false)
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .count();
        // inside.txt is reached through "real" only, not again through "link"
        assert_eq!(file_count, 1);

        let followed_count = walk(temp_dir.path(), true)
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .count();
        assert_eq!(followed_count, 2);
    }
}
