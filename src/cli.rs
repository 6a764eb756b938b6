use clap::Parser;
use std::path::PathBuf;

use crate::config::Settings;
use crate::encoding::TextPolicy;

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    "

Copyright (c) 2025 InkyQuill
License: MIT
Source: https://github.com/InkyQuill/pathfix
Rust Edition: 2024"
);

#[derive(Parser)]
#[command(name = "pathfix")]
#[command(about = "Rewrite stale path fragments across a directory tree")]
#[command(long_about = "PathFix repairs absolute paths left behind in generated files after a
project directory is moved or renamed.

It walks a directory tree and replaces every occurrence of an old path
fragment with a new one, in both slash styles: an occurrence written as
C:/old/proj gets the forward-slash replacement, one written as C:\\old\\proj
gets the backslash replacement. Changed files are rewritten in place through
an atomic temp-file rename; files that need no change are never opened for
writing. Per-file failures are counted and reported, never fatal.

FEATURES:
  • Both slash styles matched, each preserved on replacement
  • Binary artifacts skipped by extension (.exe .dll .lib .obj .pdb .exp .bin)
  • Dry-run mode to preview changes
  • Atomic in-place rewrites that keep file permissions
  • Errors never abort the scan; the exit status stays 0

EXAMPLES:
  pathfix build C:/Users/me/old/proj D:/src/proj      Fix a relocated tree
  pathfix . /home/ci/old /srv/new --dry-run           Preview only
  pathfix out old/sdk new/sdk --skip-ext .dat         Extend the denylist
  pathfix vendor C:/old C:/new --strict               Skip non-UTF-8 files
  pathfix build old new --max-file-size 10000000      Skip files over ~10 MB
  pathfix build old new --debug                       Write a debug log")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_version = LONG_VERSION)]
struct Cli {
    /// Directory tree to scan
    #[arg(value_name = "ROOT")]
    root: PathBuf,

    /// Path fragment to replace (either slash style)
    #[arg(value_name = "OLD")]
    old: String,

    /// Replacement path fragment
    #[arg(value_name = "NEW")]
    new: String,

    /// Preview changes without applying them
    #[arg(short = 'd', long)]
    #[arg(help = "Report every file that would change without writing anything")]
    dry_run: bool,

    /// Skip files that are not valid UTF-8
    #[arg(short = 's', long)]
    #[arg(help = "Skip files that are not valid UTF-8 instead of decoding them\nlossily (malformed bytes become U+FFFD in rewritten files)")]
    strict: bool,

    /// Additional extension to skip (repeatable)
    #[arg(long, value_name = "EXT")]
    #[arg(help = "Extend the binary-extension denylist\nCase-insensitive, leading dot optional. May be given multiple times.")]
    skip_ext: Vec<String>,

    /// Skip files larger than this many bytes
    #[arg(long, value_name = "BYTES")]
    #[arg(help = "Skip files larger than BYTES instead of loading them whole\nDefault: no limit")]
    max_file_size: Option<u64>,

    /// Follow symbolic links during the walk
    #[arg(long)]
    #[arg(help = "Follow symbolic links\nBroken links are then reported as errors instead of being ignored")]
    follow_symlinks: bool,

    /// Write a debug log file
    #[arg(long)]
    #[arg(help = "Log per-file decisions to /var/log/pathfix.log if writable,\notherwise ~/.pathfix/pathfix.log")]
    debug: bool,

    /// Custom debug log location (implies --debug)
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

/// Everything a run needs, straight from the command line.
pub struct Invocation {
    pub settings: Settings,
    pub debug: bool,
    pub log_file: Option<PathBuf>,
}

pub fn parse_args() -> Invocation {
    let cli = Cli::parse();

    let mut settings = Settings::new(&cli.root, &cli.old, &cli.new);
    settings.dry_run = cli.dry_run;
    settings.text_policy = if cli.strict {
        TextPolicy::Strict
    } else {
        TextPolicy::Lossy
    };
    settings.extra_skip_exts = cli.skip_ext;
    settings.max_file_size = cli.max_file_size;
    settings.follow_symlinks = cli.follow_symlinks;

    Invocation {
        settings,
        debug: cli.debug,
        log_file: cli.log_file,
    }
}
