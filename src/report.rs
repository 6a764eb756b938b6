use colored::*;
use std::io::{self, IsTerminal};
use std::path::Path;
use std::time::Duration;

use crate::error_helpers;
use crate::rewriter::RunSummary;

/// Formats and prints the human-readable run output.
///
/// Progress goes to stdout, per-file failures to stderr. Everything is
/// available as a `format_*` method returning a `String`, so tests can
/// assert on output without capturing streams.
pub struct Reporter {
    use_color: bool,
    dry_run: bool,
}

impl Reporter {
    pub fn new(dry_run: bool) -> Self {
        Self {
            use_color: Self::should_use_color(),
            dry_run,
        }
    }

    /// A reporter that never emits ANSI escapes, for tests and plain logs.
    pub fn plain(dry_run: bool) -> Self {
        Self {
            use_color: false,
            dry_run,
        }
    }

    /// Auto-detect if we should use colors
    fn should_use_color() -> bool {
        // Check NO_COLOR env var (https://no-color.org/)
        if std::env::var("NO_COLOR").is_ok() {
            return false;
        }

        io::stdout().is_terminal()
    }

    pub fn format_header(&self, root: &Path, old: &str, new: &str) -> String {
        let scanning = format!("Scanning {}...", root.display());
        let replacing = format!("Replacing '{}' with '{}'", old, new);

        if self.use_color {
            format!("{}\n{}", scanning.bold(), replacing)
        } else {
            format!("{}\n{}", scanning, replacing)
        }
    }

    pub fn format_fixed(&self, path: &Path, replacements: usize) -> String {
        let verb = if self.dry_run { "Would fix" } else { "Fixing" };
        let occurrences = if replacements == 1 {
            "1 occurrence".to_string()
        } else {
            format!("{} occurrences", replacements)
        };
        let shown = path.display().to_string();

        if self.use_color {
            format!(
                "{}: {} ({})",
                verb.green().bold(),
                shown.cyan(),
                occurrences.dimmed()
            )
        } else {
            format!("{}: {} ({})", verb, shown, occurrences)
        }
    }

    pub fn format_file_error(&self, path: &Path, err: &anyhow::Error) -> String {
        let line = format!("Error processing {}: {:#}", path.display(), err);

        let hint = err
            .root_cause()
            .downcast_ref::<io::Error>()
            .and_then(|io_err| {
                if error_helpers::is_permission_denied(io_err) {
                    Some(error_helpers::permission_hint(path))
                } else if error_helpers::is_not_found(io_err) {
                    Some(error_helpers::not_found_hint(path))
                } else {
                    None
                }
            });

        match hint {
            Some(hint) if self.use_color => format!("{}\n{}", line.red(), hint.dimmed()),
            Some(hint) => format!("{}\n{}", line, hint),
            None if self.use_color => line.red().to_string(),
            None => line,
        }
    }

    pub fn format_walk_error(&self, err: &walkdir::Error) -> String {
        let line = match (err.path(), err.io_error()) {
            (Some(path), Some(io_err)) => {
                format!("Error processing {}: {}", path.display(), io_err)
            }
            _ => format!("Error during scan: {}", err),
        };

        if self.use_color {
            line.red().to_string()
        } else {
            line
        }
    }

    pub fn format_summary(&self, summary: &RunSummary, elapsed: Duration) -> String {
        let verb = if self.dry_run { "Would fix" } else { "Fixed" };
        let files = if summary.fixed == 1 { "file" } else { "files" };
        let headline = format!(
            "Done. {} {} {}. Errors: {}",
            verb, summary.fixed, files, summary.errors
        );

        let mut stats = format!(
            "Scanned {} files in {:.2}s",
            summary.scanned,
            elapsed.as_secs_f64()
        );
        if summary.skipped > 0 {
            stats.push_str(&format!(" ({} skipped)", summary.skipped));
        }

        // The "Done." line is the last thing the user sees
        if self.use_color {
            let headline = if summary.errors > 0 {
                headline.yellow().bold()
            } else {
                headline.green().bold()
            };
            format!("{}\n{}", stats.dimmed(), headline)
        } else {
            format!("{}\n{}", stats, headline)
        }
    }

    pub fn announce(&self, root: &Path, old: &str, new: &str) {
        println!("{}", self.format_header(root, old, new));
    }

    pub fn fixed(&self, path: &Path, replacements: usize) {
        println!("{}", self.format_fixed(path, replacements));
    }

    pub fn file_error(&self, path: &Path, err: &anyhow::Error) {
        eprintln!("{}", self.format_file_error(path, err));
    }

    pub fn walk_error(&self, err: &walkdir::Error) {
        eprintln!("{}", self.format_walk_error(err));
    }

    pub fn summarize(&self, summary: &RunSummary, elapsed: Duration) {
        println!("{}", self.format_summary(summary, elapsed));
    }
}
