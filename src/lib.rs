//! PathFix: rewrite stale path fragments across a directory tree
//!
//! This library exposes PathFix's core functionality for use in property-based tests.
//! The main binary is at src/main.rs.

pub mod cli;
pub mod config;
pub mod encoding;
pub mod error_helpers;
pub mod fragment;
pub mod logger;
pub mod report;
pub mod rewriter;
pub mod walker;

// Re-export commonly used types for convenience
pub use config::Settings;
pub use encoding::TextPolicy;
pub use fragment::{FragmentPair, Rewrite};
pub use report::Reporter;
pub use rewriter::{PathRewriter, RunSummary};
pub use walker::{BINARY_EXTENSIONS, ExtensionFilter};
