//! Running a check: resolve options, grade every candidate, build the report.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use thiserror::Error;

use crate::args::Args;
use crate::discovery;
use crate::error::LanguageFileError;
use crate::language_file::LanguageFile;
use crate::report::{self, FileReport, ReportFormat, RunReport};
use crate::settings::Settings;

/// Exit code when the run completed but did not meet the quality bar.
pub const EXIT_CHECK_FAILED: u8 = 1;
/// Exit code when the run could not complete.
pub const EXIT_FATAL: u8 = 2;

/// Errors that abort a run.
#[derive(Debug, Error)]
pub enum RunError {
    /// Neither `--base` nor `base_file` in the config names a base file.
    #[error("no base file given; pass --base or set base_file in the config")]
    MissingBase,

    /// An explicitly requested config file could not be read.
    #[error("failed to read config {}: {source}", .path.display())]
    Config {
        /// Config file path.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// A language file could not be loaded or graded.
    #[error(transparent)]
    LanguageFile(#[from] LanguageFileError),
}

/// Fully resolved options of a run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunOptions {
    /// Base language file.
    pub base: PathBuf,
    /// Directory scanned for candidates.
    pub dir: PathBuf,
    /// Candidate file extension.
    pub extension: String,
    /// Lowest acceptable completion.
    pub min_completion: Option<f64>,
    /// Whether violations fail the run.
    pub fail_on_violations: bool,
    /// Whether a broken candidate is recorded instead of aborting.
    pub keep_going: bool,
    /// Report format.
    pub format: ReportFormat,
    /// List missing keys in text output.
    pub show_missing: bool,
}

impl RunOptions {
    /// What: Merge command-line arguments over config settings.
    ///
    /// Inputs:
    /// - `args`: Parsed command line
    /// - `settings`: Loaded configuration
    ///
    /// Output:
    /// - Options for [`execute`]
    ///
    /// # Errors
    /// - `MissingBase` when no base file is configured anywhere
    ///
    /// Details:
    /// - Flags only switch boolean settings on; they cannot turn a config
    ///   `true` off
    /// - Without a directory, the base file's directory is scanned
    pub fn resolve(args: &Args, settings: &Settings) -> Result<Self, RunError> {
        let base = args
            .base
            .clone()
            .or_else(|| settings.base_file.clone())
            .ok_or(RunError::MissingBase)?;
        let dir = args
            .dir
            .clone()
            .or_else(|| settings.locales_dir.clone())
            .unwrap_or_else(|| parent_dir(&base));
        let extension = args
            .extension
            .as_deref()
            .map(|ext| ext.trim_start_matches('.').to_string())
            .filter(|ext| !ext.is_empty())
            .unwrap_or_else(|| settings.extension.clone());

        Ok(Self {
            base,
            dir,
            extension,
            min_completion: args.min_completion.or(settings.min_completion),
            fail_on_violations: args.fail_on_violations || settings.fail_on_violations,
            keep_going: args.keep_going || settings.keep_going,
            format: args.format.unwrap_or(settings.format),
            show_missing: args.show_missing,
        })
    }
}

/// Directory of `path`, `.` for bare file names.
fn parent_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Result of a completed run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunOutcome {
    /// What was found.
    pub report: RunReport,
    /// Whether the quality bar was met.
    pub passed: bool,
}

impl RunOutcome {
    /// Numeric exit status for this outcome.
    #[must_use]
    pub const fn status(&self) -> u8 {
        if self.passed { 0 } else { EXIT_CHECK_FAILED }
    }

    /// Process exit code for this outcome.
    #[must_use]
    pub fn exit_code(&self) -> ExitCode {
        ExitCode::from(self.status())
    }
}

/// What: Grade every candidate in the directory against the base file.
///
/// Inputs:
/// - `options`: Resolved run options
///
/// Output:
/// - Report and pass/fail verdict
///
/// # Errors
/// - Any load error of the base file, or a base file without keys
/// - `EmptyOrUnreadable` when the directory cannot be listed
/// - The first candidate error, unless `keep_going` is set
pub fn execute(options: &RunOptions) -> Result<RunOutcome, RunError> {
    let base = LanguageFile::new(&options.base);
    let base_keys = base.data()?.len();
    if base_keys == 0 {
        return Err(LanguageFileError::invalid_input(
            &options.base,
            "base file has no keys to compare against",
        )
        .into());
    }
    tracing::info!(base = %options.base.display(), keys = base_keys, "loaded base file");

    let mut files = Vec::new();
    for path in discovery::candidates(&options.dir, &options.base, &options.extension)? {
        let candidate = LanguageFile::new(&path);
        match FileReport::from_comparison(&candidate, &base) {
            Ok(file) => {
                tracing::debug!(
                    file = %file.name,
                    completion = ?file.completion,
                    violations = file.violations.len(),
                    "graded file"
                );
                files.push(file);
            }
            Err(e) if options.keep_going => {
                tracing::warn!(file = %path.display(), error = %e, "skipping file");
                files.push(FileReport::failed(&path, &e));
            }
            Err(e) => return Err(e.into()),
        }
    }

    let report = RunReport::new(&options.base, base_keys, files);
    let passed = report.passes(options.min_completion, options.fail_on_violations);
    tracing::info!(
        files = report.summary.files,
        failed = report.summary.failed,
        violations = report.summary.violations,
        passed,
        "check finished"
    );
    Ok(RunOutcome { report, passed })
}

/// What: Run the whole command: settings, options, grading, rendering.
///
/// Inputs:
/// - `args`: Parsed command line
///
/// Output:
/// - Rendered report and the outcome it came from
///
/// # Errors
/// - `Config` when `--config` names an unreadable file
/// - Any error from [`RunOptions::resolve`] or [`execute`]
pub fn process_args(args: &Args) -> Result<(String, RunOutcome), RunError> {
    let settings = match &args.config {
        Some(path) => Settings::load(path).map_err(|source| RunError::Config {
            path: path.clone(),
            source,
        })?,
        None => Settings::discover(),
    };
    let options = RunOptions::resolve(args, &settings)?;
    tracing::debug!(?options, "resolved options");

    let outcome = execute(&options)?;
    let rendered = report::render(&outcome.report, options.format, options.show_missing);
    Ok((rendered, outcome))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_requires_a_base() {
        let err = RunOptions::resolve(&Args::default(), &Settings::default())
            .expect_err("no base configured");
        assert!(matches!(err, RunError::MissingBase));
    }

    #[test]
    fn resolve_defaults_dir_to_base_parent() {
        let args = Args {
            base: Some(PathBuf::from("locales/en_app.json")),
            ..Args::default()
        };
        let options = RunOptions::resolve(&args, &Settings::default()).expect("base given");
        assert_eq!(options.dir, PathBuf::from("locales"));
        assert_eq!(options.extension, "json");
        assert_eq!(options.format, ReportFormat::Text);

        let args = Args {
            base: Some(PathBuf::from("en_app.json")),
            ..Args::default()
        };
        let options = RunOptions::resolve(&args, &Settings::default()).expect("base given");
        assert_eq!(options.dir, PathBuf::from("."));
    }

    #[test]
    fn resolve_prefers_args_over_settings() {
        let settings = Settings {
            base_file: Some(PathBuf::from("conf/en_app.json")),
            locales_dir: Some(PathBuf::from("conf")),
            extension: "i18n".to_string(),
            min_completion: Some(50.0),
            fail_on_violations: true,
            keep_going: false,
            format: ReportFormat::Json,
        };
        let args = Args {
            base: Some(PathBuf::from("cli/en_app.json")),
            dir: Some(PathBuf::from("cli")),
            extension: Some(".json".to_string()),
            min_completion: Some(75.0),
            keep_going: true,
            format: Some(ReportFormat::Text),
            ..Args::default()
        };
        let options = RunOptions::resolve(&args, &settings).expect("base given");
        assert_eq!(
            options,
            RunOptions {
                base: PathBuf::from("cli/en_app.json"),
                dir: PathBuf::from("cli"),
                extension: "json".to_string(),
                min_completion: Some(75.0),
                fail_on_violations: true,
                keep_going: true,
                format: ReportFormat::Text,
                show_missing: false,
            }
        );
    }

    #[test]
    fn resolve_falls_back_to_settings() {
        let settings = Settings {
            base_file: Some(PathBuf::from("conf/en_app.json")),
            locales_dir: Some(PathBuf::from("translations")),
            format: ReportFormat::Json,
            ..Settings::default()
        };
        let options = RunOptions::resolve(&Args::default(), &settings).expect("base in config");
        assert_eq!(options.base, PathBuf::from("conf/en_app.json"));
        assert_eq!(options.dir, PathBuf::from("translations"));
        assert_eq!(options.format, ReportFormat::Json);
    }

    #[test]
    fn config_error_names_the_file() {
        let args = Args {
            config: Some(PathBuf::from("/definitely/not/here/transcheck.conf")),
            ..Args::default()
        };
        let err = process_args(&args).expect_err("config is missing");
        assert!(matches!(err, RunError::Config { .. }));
        assert!(err.to_string().contains("/definitely/not/here/transcheck.conf"));
    }
}
