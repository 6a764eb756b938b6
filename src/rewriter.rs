use anyhow::{Context, Result};
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

use crate::config::Settings;
use crate::encoding::decode_text;
use crate::fragment::FragmentPair;
use crate::report::Reporter;
use crate::walker::{self, ExtensionFilter};

/// What happened to one scanned file.
#[derive(Debug, PartialEq, Eq)]
enum FileOutcome {
    Fixed { replacements: usize },
    Unchanged,
    SkippedNonText,
}

/// Counters accumulated over one traversal.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Regular files visited by the walk.
    pub scanned: usize,
    /// Files whose content changed (or would change, in dry-run mode).
    pub fixed: usize,
    /// Files skipped by the denylist, the text policy, or the size limit.
    pub skipped: usize,
    /// Files that failed to read or rewrite, plus unreadable directories.
    pub errors: usize,
}

/// Walks a root directory and rewrites stale path fragments in place.
pub struct PathRewriter {
    settings: Settings,
    fragments: FragmentPair,
    filter: ExtensionFilter,
}

impl PathRewriter {
    pub fn new(settings: Settings) -> Self {
        let fragments = FragmentPair::new(&settings.old_fragment, &settings.new_fragment);
        let filter = ExtensionFilter::with_extras(&settings.extra_skip_exts);
        Self {
            settings,
            fragments,
            filter,
        }
    }

    /// Scan the root and rewrite every file containing the old fragment.
    ///
    /// Per-file failures are reported and counted; they never stop the
    /// traversal. A root that does not exist or is not a directory yields
    /// an all-zero summary.
    pub fn run(&self, reporter: &Reporter) -> RunSummary {
        let mut summary = RunSummary::default();

        if !self.settings.root.is_dir() {
            info!(
                root = %self.settings.root.display(),
                "root is not a directory, nothing to scan"
            );
            return summary;
        }

        info!(root = %self.settings.root.display(), "starting scan");

        for entry in walker::walk(&self.settings.root, self.settings.follow_symlinks) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    warn!(error = %err, "walk error");
                    reporter.walk_error(&err);
                    summary.errors += 1;
                    continue;
                }
            };

            if !entry.file_type().is_file() {
                continue;
            }
            summary.scanned += 1;

            let path = entry.path();
            let name = entry.file_name().to_string_lossy();
            if self.filter.is_binary(&name) {
                debug!(path = %path.display(), "skipped: binary extension");
                summary.skipped += 1;
                continue;
            }

            if let Some(limit) = self.settings.max_file_size {
                match entry.metadata() {
                    Ok(metadata) if metadata.len() > limit => {
                        debug!(
                            path = %path.display(),
                            size = metadata.len(),
                            "skipped: over size limit"
                        );
                        summary.skipped += 1;
                        continue;
                    }
                    Ok(_) => {}
                    Err(err) => {
                        warn!(path = %path.display(), error = %err, "metadata read failed");
                        reporter.walk_error(&err);
                        summary.errors += 1;
                        continue;
                    }
                }
            }

            match self.process_file(path) {
                Ok(FileOutcome::Fixed { replacements }) => {
                    debug!(path = %path.display(), replacements, "fixed");
                    reporter.fixed(path, replacements);
                    summary.fixed += 1;
                }
                Ok(FileOutcome::Unchanged) => {}
                Ok(FileOutcome::SkippedNonText) => {
                    debug!(path = %path.display(), "skipped: not valid UTF-8");
                    summary.skipped += 1;
                }
                Err(err) => {
                    warn!(path = %path.display(), error = %err, "processing failed");
                    reporter.file_error(path, &err);
                    summary.errors += 1;
                }
            }
        }

        info!(
            scanned = summary.scanned,
            fixed = summary.fixed,
            skipped = summary.skipped,
            errors = summary.errors,
            "scan complete"
        );

        summary
    }

    /// Read, substitute, and (unless unchanged or in dry-run mode) rewrite
    /// one file.
    fn process_file(&self, path: &Path) -> Result<FileOutcome> {
        let bytes = fs::read(path)
            .with_context(|| format!("Failed to read file: {}", path.display()))?;

        let content = match decode_text(&bytes, self.settings.text_policy) {
            Some(content) => content,
            None => return Ok(FileOutcome::SkippedNonText),
        };

        let rewrite = match self.fragments.apply(&content) {
            Some(rewrite) => rewrite,
            None => return Ok(FileOutcome::Unchanged),
        };

        if !self.settings.dry_run {
            self.write_atomic(path, &rewrite.content)?;
        }

        Ok(FileOutcome::Fixed {
            replacements: rewrite.replacements,
        })
    }

    /// Replace `path` with `content` through a temp file in the same
    /// directory, so the swap is an atomic rename on the same filesystem.
    fn write_atomic(&self, path: &Path, content: &str) -> Result<()> {
        let parent = path.parent().unwrap_or(Path::new("."));

        let mut temp_file = NamedTempFile::new_in(parent)
            .with_context(|| format!("Failed to create temp file in {}", parent.display()))?;

        temp_file
            .write_all(content.as_bytes())
            .with_context(|| format!("Failed to write temp file for {}", path.display()))?;

        // The rename must not change the file's permission bits
        let permissions = fs::metadata(path)
            .with_context(|| format!("Failed to read file metadata: {}", path.display()))?
            .permissions();
        fs::set_permissions(temp_file.path(), permissions).with_context(|| {
            format!("Failed to set permissions on temp file for {}", path.display())
        })?;

        temp_file
            .persist(path)
            .with_context(|| format!("Failed to persist temp file to {}", path.display()))?;

        Ok(())
    }
}
