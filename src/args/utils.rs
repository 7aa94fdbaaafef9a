//! Shared utilities for argument processing.

/// What: Determine the log level based on command-line arguments and environment variables.
///
/// Inputs:
/// - `args`: Parsed command-line arguments.
///
/// Output:
/// - Log filter directive (trace, debug, info, warn, error).
///
/// Details:
/// - Verbose flag overrides `log_level` argument.
/// - `TRANSCHECK_TRACE=1` enables TRACE level for per-file parsing details.
/// - An empty `log_level` falls back to `warn`.
#[must_use]
pub fn determine_log_level(args: &crate::args::Args) -> String {
    if args.verbose {
        "debug".to_string()
    } else if std::env::var("TRANSCHECK_TRACE").ok().as_deref() == Some("1") {
        "trace".to_string()
    } else if args.log_level.trim().is_empty() {
        "warn".to_string()
    } else {
        args.log_level.clone()
    }
}
