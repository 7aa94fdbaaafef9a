//! Comparison of one language file against a base language file.
//!
//! # Overview
//!
//! A [`LanguageFile`] wraps one translation file on disk (or already loaded
//! text). Comparing it against a base file yields:
//! - **Missing keys**: base keys that are absent or empty in this file
//! - **Completion**: `100 - floor(missing / base_total * 100)`
//! - **Violations**: translated strings that dropped a `{{variable}}` of the
//!   base string
//!
//! Content is parsed on first use and cached per instance, as are the
//! missing keys. Everything is computed in place, on the calling thread.
//!
//! # Usage
//!
//! ```rust,no_run
//! use transcheck::language_file::LanguageFile;
//!
//! # fn main() -> transcheck::error::Result<()> {
//! let base = LanguageFile::new("locales/en_app.json");
//! let german = LanguageFile::new("locales/de_app.json");
//!
//! println!("{} ({})", german.name(), german.group()?);
//! println!("{}% complete", german.completion(&base)?);
//! for key in german.missing_keys(&base)? {
//!     println!("missing: {key}");
//! }
//! for violation in german.violations() {
//!     println!("{violation}");
//! }
//! # Ok(())
//! # }
//! ```

pub mod parser;
pub mod placeholders;

use std::cell::{OnceCell, RefCell};
use std::path::{Path, PathBuf};

pub use parser::{TranslationMap, lint, parse};

use crate::error::{LanguageFileError, Result};

/// One language file and the lazily computed results of grading it.
#[derive(Debug)]
pub struct LanguageFile {
    /// Location of the file.
    path: PathBuf,
    /// Preloaded content; `None` means read `path` on first access.
    content: Option<String>,
    /// Parsed content.
    data: OnceCell<TranslationMap>,
    /// Base keys this file lacks.
    missing_keys: OnceCell<Vec<String>>,
    /// Path of the base file `missing_keys` was computed against.
    compared_with: OnceCell<PathBuf>,
    /// Placeholder findings, append-only.
    violations: RefCell<Vec<String>>,
}

impl LanguageFile {
    /// What: Create a `LanguageFile` backed by a file on disk.
    ///
    /// Inputs:
    /// - `path`: File location
    ///
    /// Details:
    /// - Nothing is read until the content is first needed
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            content: None,
            data: OnceCell::new(),
            missing_keys: OnceCell::new(),
            compared_with: OnceCell::new(),
            violations: RefCell::new(Vec::new()),
        }
    }

    /// What: Create a `LanguageFile` from text that is already loaded.
    ///
    /// Inputs:
    /// - `path`: Location the text belongs to (naming and error messages)
    /// - `content`: File content
    #[must_use]
    pub fn from_content(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            ..Self::new(path)
        }
    }

    /// Location this file was created from.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Final path segment, e.g. `de_app.json`.
    #[must_use]
    pub fn name(&self) -> String {
        self.path.file_name().map_or_else(
            || self.path.to_string_lossy().into_owned(),
            |name| name.to_string_lossy().into_owned(),
        )
    }

    /// What: Group of the file: the part of its name before the first `_`.
    ///
    /// Output:
    /// - `de` for `de_app.json`
    ///
    /// # Errors
    /// - `InvalidInput` when the name has no `_`
    pub fn group(&self) -> Result<String> {
        let name = self.name();
        name.split_once('_')
            .map(|(group, _)| group.to_string())
            .ok_or_else(|| {
                LanguageFileError::invalid_input(
                    &self.path,
                    format!("file name '{name}' has no '_' group separator"),
                )
            })
    }

    /// What: Parsed key -> string content, loaded on first call.
    ///
    /// # Errors
    /// - `EmptyOrUnreadable` when the file cannot be read or is empty
    /// - `Syntax` when the content is not a flat JSON object of strings or a
    ///   key is duplicated
    ///
    /// Details:
    /// - A failed load is not cached; the next call tries again
    pub fn data(&self) -> Result<&TranslationMap> {
        if let Some(map) = self.data.get() {
            return Ok(map);
        }
        let map = match &self.content {
            Some(content) => parser::parse(content, &self.path)?,
            None => parser::read(&self.path)?,
        };
        Ok(self.data.get_or_init(|| map))
    }

    /// What: Base keys that are absent or empty in this file.
    ///
    /// Inputs:
    /// - `base`: Reference language file
    ///
    /// Output:
    /// - Keys in the order they appear in `base`
    ///
    /// # Errors
    /// - Any error from loading `base` or this file (see [`Self::data`])
    ///
    /// Details:
    /// - Keys that are translated get their placeholders checked; each
    ///   dropped `{{variable}}` is recorded as a violation
    /// - An instance is compared against one base only: the first result is
    ///   cached and returned for every later call, whatever `base` is passed
    pub fn missing_keys(&self, base: &Self) -> Result<&[String]> {
        if let Some(keys) = self.missing_keys.get() {
            if self.compared_with.get().is_some_and(|p| p != &base.path) {
                tracing::warn!(
                    file = %self.path.display(),
                    base = %base.path.display(),
                    "missing keys already computed against another base; returning cached result"
                );
            }
            return Ok(keys);
        }

        let base_data = base.data()?;
        let data = self.data()?;
        let mut missing = Vec::new();
        for (key, base_string) in base_data {
            match data.get(key) {
                Some(localized) if !localized.is_empty() => {
                    self.find_string_violations(key, base_string, localized);
                }
                _ => missing.push(key.clone()),
            }
        }
        tracing::debug!(
            file = %self.path.display(),
            base = %base.path.display(),
            missing = missing.len(),
            "compared against base"
        );

        let _ = self.compared_with.set(base.path.clone());
        Ok(self.missing_keys.get_or_init(|| missing))
    }

    /// What: Percentage of the base file this file translates.
    ///
    /// Inputs:
    /// - `base`: Reference language file
    ///
    /// Output:
    /// - `100 - floor(missing / base_total * 100)`, rounding in favour of
    ///   the translation
    ///
    /// # Errors
    /// - `InvalidInput` when the base file has no keys
    /// - Any error from [`Self::missing_keys`]
    pub fn completion(&self, base: &Self) -> Result<f64> {
        let total = base.data()?.len();
        if total == 0 {
            return Err(LanguageFileError::invalid_input(
                &base.path,
                "base file has no keys to compare against",
            ));
        }
        let missing = self.missing_keys(base)?.len();
        Ok(completion_percent(missing, total))
    }

    /// Record a diagnostic for this file.
    pub fn add_violation(&self, message: impl Into<String>) {
        self.violations.borrow_mut().push(message.into());
    }

    /// Whether any violation has been recorded.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.violations.borrow().is_empty()
    }

    /// Violations recorded so far, oldest first.
    #[must_use]
    pub fn violations(&self) -> Vec<String> {
        self.violations.borrow().clone()
    }

    fn find_string_violations(&self, key: &str, base_string: &str, localized: &str) {
        for placeholder in placeholders::missing(base_string, localized) {
            self.add_violation(placeholders::violation_message(key, placeholder));
        }
    }
}

/// Floor is applied to the missing share, not to the completion.
#[allow(clippy::cast_precision_loss)]
fn completion_percent(missing: usize, total: usize) -> f64 {
    100.0 - (missing as f64 / total as f64 * 100.0).floor()
}
