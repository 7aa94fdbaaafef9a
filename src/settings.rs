//! Run settings loaded from a `transcheck.conf` file.
//!
//! The file uses `key = value` lines; `#`, `//` and `;` start comments.
//! Recognised keys:
//!
//! ```text
//! base_file          = locales/en_app.json
//! locales_dir        = locales
//! extension          = json
//! min_completion     = 90
//! fail_on_violations = true
//! keep_going         = false
//! format             = text        # or json
//! ```
//!
//! Relative paths are resolved against the directory holding the config
//! file. Command-line flags take precedence over every value here.

use std::fs;
use std::path::{Path, PathBuf};

use crate::report::ReportFormat;
use crate::util::config::{parse_bool, parse_key_value, skip_comment_or_empty};

/// Config file looked up in the working directory when none is given.
pub const DEFAULT_CONFIG_FILE: &str = "transcheck.conf";

/// Settings for one check run.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Base (reference) language file.
    pub base_file: Option<PathBuf>,
    /// Directory holding the language files to grade.
    pub locales_dir: Option<PathBuf>,
    /// Extension of language files, without the dot.
    pub extension: String,
    /// Files below this completion fail the run.
    pub min_completion: Option<f64>,
    /// Any placeholder violation fails the run.
    pub fail_on_violations: bool,
    /// Record unparsable files and continue instead of aborting.
    pub keep_going: bool,
    /// Report output format.
    pub format: ReportFormat,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_file: None,
            locales_dir: None,
            extension: "json".to_string(),
            min_completion: None,
            fail_on_violations: false,
            keep_going: false,
            format: ReportFormat::Text,
        }
    }
}

impl Settings {
    /// What: Load settings from a config file.
    ///
    /// Inputs:
    /// - `path`: Config file
    ///
    /// Output:
    /// - Parsed settings on top of the defaults
    ///
    /// # Errors
    /// - Returns the I/O error when the file cannot be read
    pub fn load(path: &Path) -> std::io::Result<Self> {
        let content = fs::read_to_string(path)?;
        let base_dir = path.parent().unwrap_or_else(|| Path::new(""));
        let settings = Self::parse(&content, base_dir);
        tracing::debug!(path = %path.display(), ?settings, "loaded settings");
        Ok(settings)
    }

    /// What: Load `transcheck.conf` from the working directory if it exists.
    ///
    /// Output:
    /// - Settings from the file, or defaults when it is missing or unreadable
    #[must_use]
    pub fn discover() -> Self {
        let path = Path::new(DEFAULT_CONFIG_FILE);
        if !path.is_file() {
            return Self::default();
        }
        Self::load(path).unwrap_or_else(|e| {
            tracing::warn!(path = %path.display(), error = %e, "failed to read config; using defaults");
            Self::default()
        })
    }

    /// What: Parse config file content.
    ///
    /// Inputs:
    /// - `content`: File content
    /// - `base_dir`: Directory relative paths are resolved against
    ///
    /// Details:
    /// - Unknown keys and invalid values are logged and ignored
    #[must_use]
    pub fn parse(content: &str, base_dir: &Path) -> Self {
        let mut out = Self::default();
        for line in content.lines() {
            if skip_comment_or_empty(line) {
                continue;
            }
            let Some((key, val)) = parse_key_value(line) else {
                tracing::warn!(line, "ignoring malformed config line");
                continue;
            };
            match key.as_str() {
                "base_file" | "base" => {
                    out.base_file = non_empty(&val).map(|v| base_dir.join(v));
                }
                "locales_dir" | "dir" => {
                    out.locales_dir = non_empty(&val).map(|v| base_dir.join(v));
                }
                "extension" => {
                    let ext = val.trim_start_matches('.');
                    if ext.is_empty() {
                        tracing::warn!("empty extension in config; keeping default");
                    } else {
                        out.extension = ext.to_string();
                    }
                }
                "min_completion" => match val.parse::<f64>() {
                    Ok(v) if (0.0..=100.0).contains(&v) => out.min_completion = Some(v),
                    _ => tracing::warn!(value = %val, "min_completion must be between 0 and 100"),
                },
                "fail_on_violations" => match parse_bool(&val) {
                    Some(v) => out.fail_on_violations = v,
                    None => tracing::warn!(value = %val, "fail_on_violations expects a boolean"),
                },
                "keep_going" => match parse_bool(&val) {
                    Some(v) => out.keep_going = v,
                    None => tracing::warn!(value = %val, "keep_going expects a boolean"),
                },
                "format" => match ReportFormat::from_config_key(&val) {
                    Some(format) => out.format = format,
                    None => tracing::warn!(value = %val, "unknown report format"),
                },
                _ => tracing::warn!(key = %key, "unknown config key"),
            }
        }
        out
    }
}

fn non_empty(val: &str) -> Option<&str> {
    (!val.is_empty()).then_some(val)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn defaults_when_empty() {
        assert_eq!(Settings::parse("", Path::new("")), Settings::default());
    }

    #[test]
    fn parses_every_key() {
        let content = "\
# transcheck settings
base_file = locales/en_app.json
locales-dir = locales
extension = .i18n
min_completion = 87.5
fail_on_violations = yes
keep_going = on
format = JSON
";
        let s = Settings::parse(content, Path::new("/repo"));
        assert_eq!(s.base_file, Some(PathBuf::from("/repo/locales/en_app.json")));
        assert_eq!(s.locales_dir, Some(PathBuf::from("/repo/locales")));
        assert_eq!(s.extension, "i18n");
        assert_eq!(s.min_completion, Some(87.5));
        assert!(s.fail_on_violations);
        assert!(s.keep_going);
        assert_eq!(s.format, ReportFormat::Json);
    }

    #[test]
    fn invalid_values_keep_defaults() {
        let content = "\
min_completion = 140
fail_on_violations = sometimes
format = xml
unknown = 1
this line has no separator
";
        assert_eq!(Settings::parse(content, Path::new("")), Settings::default());
    }

    #[test]
    fn absolute_paths_are_kept() {
        let s = Settings::parse("base_file = /abs/en_app.json", Path::new("/repo"));
        assert_eq!(s.base_file, Some(PathBuf::from("/abs/en_app.json")));
    }

    #[test]
    fn hash_inside_path_is_not_a_comment() {
        let s = Settings::parse(
            "base_file = locales/#v2/en_app.json # pinned\n",
            Path::new("/repo"),
        );
        assert_eq!(
            s.base_file,
            Some(PathBuf::from("/repo/locales/#v2/en_app.json"))
        );
    }

    #[test]
    fn load_resolves_against_config_dir() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory for test");
        let path = temp_dir.path().join("transcheck.conf");
        fs::write(&path, "locales_dir = i18n\n").expect("Failed to write test config");

        let s = Settings::load(&path).expect("config is readable");
        assert_eq!(s.locales_dir, Some(temp_dir.path().join("i18n")));
    }

    #[test]
    fn load_missing_file_fails() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory for test");
        assert!(Settings::load(&temp_dir.path().join("missing.conf")).is_err());
    }
}
