//! transcheck binary entrypoint kept minimal. The full run lives in `args::run`.

use std::fmt;
use std::fs::OpenOptions;
use std::process::ExitCode;
use std::sync::OnceLock;

use clap::Parser;

use transcheck::args::{self, Args, run::EXIT_FATAL};

/// Local-time timestamps for log lines (`%Y-%m-%dT%H:%M:%S`).
struct CheckTimer;

impl tracing_subscriber::fmt::time::FormatTime for CheckTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> fmt::Result {
        write!(w, "{}", chrono::Local::now().format("%Y-%m-%dT%H:%M:%S"))
    }
}

/// Keeps the non-blocking log file writer flushing until the process exits.
static LOG_GUARD: OnceLock<tracing_appender::non_blocking::WorkerGuard> = OnceLock::new();

/// `RUST_LOG` when set, otherwise `level`.
fn env_filter(level: &str) -> tracing_subscriber::EnvFilter {
    tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level))
}

/// Initialize tracing, writing to `--log-file` when given and stderr otherwise.
fn init_logging(args: &Args) {
    let level = args::determine_log_level(args);
    if let Some(log_path) = &args.log_file {
        match OpenOptions::new().create(true).append(true).open(log_path) {
            Ok(file) => {
                let (non_blocking, guard) = tracing_appender::non_blocking(file);
                tracing_subscriber::fmt()
                    .with_env_filter(env_filter(&level))
                    .with_target(false)
                    .with_ansi(false)
                    .with_writer(non_blocking)
                    .with_timer(CheckTimer)
                    .init();
                let _ = LOG_GUARD.set(guard);
                tracing::info!(path = %log_path.display(), "logging initialized");
                return;
            }
            Err(e) => {
                // Fall through to stderr so the check still runs
                init_stderr_logging(&level);
                tracing::warn!(error = %e, path = %log_path.display(), "failed to open log file; using stderr");
                return;
            }
        }
    }
    init_stderr_logging(&level);
}

/// Install the fmt subscriber on stderr.
fn init_stderr_logging(level: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(level))
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_timer(CheckTimer)
        .init();
}

/// Run the check and map the outcome to an exit code.
fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(&args);

    tracing::debug!(?args, "transcheck starting");
    match args::process_args(&args) {
        Ok((rendered, outcome)) => {
            print!("{rendered}");
            if !rendered.ends_with('\n') {
                println!();
            }
            outcome.exit_code()
        }
        Err(err) => {
            tracing::error!(error = %err, "check aborted");
            eprintln!("error: {err}");
            ExitCode::from(EXIT_FATAL)
        }
    }
}
