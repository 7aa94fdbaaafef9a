//! Results of grading a set of language files against one base file.
//!
//! [`FileReport`] captures what a [`LanguageFile`] learned about itself,
//! [`RunReport`] collects them with a summary, and [`render`] turns the
//! whole thing into text or JSON.

pub mod render;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::{LanguageFileError, Result};
use crate::language_file::LanguageFile;

pub use render::{render, render_json, render_text};

/// Output format of a report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum ReportFormat {
    /// Human-readable table.
    #[default]
    Text,
    /// Pretty-printed JSON document.
    Json,
}

impl ReportFormat {
    /// Parse a config file value (`text` or `json`, any case).
    #[must_use]
    pub fn from_config_key(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "text" | "txt" => Some(Self::Text),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Outcome of grading one candidate file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileReport {
    /// Location of the file.
    pub path: PathBuf,
    /// Final path segment.
    pub name: String,
    /// Name prefix before the first `_`; `None` when grading failed first.
    pub group: Option<String>,
    /// Completion percentage; `None` when grading failed.
    pub completion: Option<f64>,
    /// Base keys absent or empty in this file.
    pub missing_keys: Vec<String>,
    /// Placeholder violations.
    pub violations: Vec<String>,
    /// Why grading failed, if it did.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl FileReport {
    /// What: Grade `file` against `base` and capture the results.
    ///
    /// # Errors
    /// - `InvalidInput` when the file name has no group separator or the base
    ///   is empty
    /// - Any load error of `file` or `base`
    pub fn from_comparison(file: &LanguageFile, base: &LanguageFile) -> Result<Self> {
        let group = file.group()?;
        let completion = file.completion(base)?;
        let missing_keys = file.missing_keys(base)?.to_vec();
        Ok(Self {
            path: file.path().to_path_buf(),
            name: file.name(),
            group: Some(group),
            completion: Some(completion),
            missing_keys,
            violations: file.violations(),
            error: None,
        })
    }

    /// Report for a file that could not be graded.
    #[must_use]
    pub fn failed(path: &Path, error: &LanguageFileError) -> Self {
        let file = LanguageFile::new(path);
        Self {
            path: path.to_path_buf(),
            name: file.name(),
            group: file.group().ok(),
            completion: None,
            missing_keys: Vec::new(),
            violations: Vec::new(),
            error: Some(error.to_string()),
        }
    }

    /// Whether any placeholder violation was found.
    #[must_use]
    pub fn has_violations(&self) -> bool {
        !self.violations.is_empty()
    }
}

/// Average completion of the files sharing a group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupSummary {
    /// Group name.
    pub group: String,
    /// Number of graded files in the group.
    pub files: usize,
    /// Mean completion of those files.
    pub average_completion: f64,
}

/// Totals over every file of a run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    /// Files looked at.
    pub files: usize,
    /// Files that could not be graded.
    pub failed: usize,
    /// Violations over all files.
    pub violations: usize,
    /// Mean completion of graded files; `None` when nothing was graded.
    pub average_completion: Option<f64>,
    /// Per-group averages, ordered by group name.
    pub groups: Vec<GroupSummary>,
}

impl Summary {
    #[allow(clippy::cast_precision_loss)]
    fn from_files(files: &[FileReport]) -> Self {
        let mut groups: BTreeMap<&str, (usize, f64)> = BTreeMap::new();
        let mut graded = 0usize;
        let mut total = 0.0;
        for file in files {
            if let (Some(group), Some(completion)) = (&file.group, file.completion) {
                let entry = groups.entry(group.as_str()).or_default();
                entry.0 += 1;
                entry.1 += completion;
                graded += 1;
                total += completion;
            }
        }

        Self {
            files: files.len(),
            failed: files.iter().filter(|f| f.error.is_some()).count(),
            violations: files.iter().map(|f| f.violations.len()).sum(),
            average_completion: (graded > 0).then(|| total / graded as f64),
            groups: groups
                .into_iter()
                .map(|(group, (count, sum))| GroupSummary {
                    group: group.to_string(),
                    files: count,
                    average_completion: sum / count as f64,
                })
                .collect(),
        }
    }
}

/// Everything a run found.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunReport {
    /// Base file every candidate was compared against.
    pub base: PathBuf,
    /// Number of keys in the base file.
    pub base_keys: usize,
    /// When the report was produced (RFC 3339, UTC).
    pub generated_at: String,
    /// One entry per candidate, in discovery order.
    pub files: Vec<FileReport>,
    /// Totals.
    pub summary: Summary,
}

impl RunReport {
    /// Build a report and its summary.
    #[must_use]
    pub fn new(base: &Path, base_keys: usize, files: Vec<FileReport>) -> Self {
        let summary = Summary::from_files(&files);
        Self {
            base: base.to_path_buf(),
            base_keys,
            generated_at: chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
            files,
            summary,
        }
    }

    /// What: Decide whether the run meets the quality bar.
    ///
    /// Inputs:
    /// - `min_completion`: Lowest acceptable completion, if any
    /// - `fail_on_violations`: Whether placeholder violations fail the run
    ///
    /// Output:
    /// - `false` when a file failed to grade, is below `min_completion`, or
    ///   has violations while `fail_on_violations` is set
    #[must_use]
    pub fn passes(&self, min_completion: Option<f64>, fail_on_violations: bool) -> bool {
        self.files.iter().all(|file| {
            if file.error.is_some() {
                return false;
            }
            if fail_on_violations && file.has_violations() {
                return false;
            }
            match (min_completion, file.completion) {
                (Some(min), Some(completion)) => completion >= min,
                _ => true,
            }
        })
    }
}
