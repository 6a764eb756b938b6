use anyhow::Result;
use std::time::Instant;

use pathfix::cli;
use pathfix::logger;
use pathfix::report::Reporter;
use pathfix::rewriter::PathRewriter;

fn main() -> Result<()> {
    let invocation = cli::parse_args();

    // The guard inside the handle keeps the log writer flushing until exit
    let log_handle = logger::init_debug_logging(invocation.debug, invocation.log_file)?;
    if let Some(handle) = &log_handle {
        tracing::debug!(log = %handle.path.display(), "debug logging enabled");
    }

    let settings = invocation.settings;
    let reporter = Reporter::new(settings.dry_run);
    reporter.announce(&settings.root, &settings.old_fragment, &settings.new_fragment);

    let started = Instant::now();
    let rewriter = PathRewriter::new(settings);
    let summary = rewriter.run(&reporter);
    reporter.summarize(&summary, started.elapsed());

    // Per-file errors are already counted in the summary; they never turn
    // into a failing exit status
    Ok(())
}
