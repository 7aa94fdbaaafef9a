//! Error types for loading and comparing language files.
//!
//! Placeholder violations are not errors: they are collected on the
//! [`LanguageFile`](crate::language_file::LanguageFile) and reported, while
//! the variants below stop the operation that raised them.

use std::path::PathBuf;

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, LanguageFileError>;

/// Fatal problems with a single language file.
#[derive(Debug, Error)]
pub enum LanguageFileError {
    /// The file name or file content cannot be used for a comparison
    /// (no `_` group separator, empty base file).
    #[error("Invalid input {}: {reason}", .path.display())]
    InvalidInput {
        /// File the problem was found in.
        path: PathBuf,
        /// What is wrong with it.
        reason: String,
    },

    /// The file could not be read, or it has no content.
    #[error("{} is not readable or empty{}", .path.display(), .source.as_ref().map(|e| format!(": {e}")).unwrap_or_default())]
    EmptyOrUnreadable {
        /// File that could not be loaded.
        path: PathBuf,
        /// Underlying I/O failure, `None` when the file was simply empty.
        #[source]
        source: Option<std::io::Error>,
    },

    /// The content is not a flat JSON object of unique string keys and
    /// string values.
    #[error("{}: {message}", .path.display())]
    Syntax {
        /// File that failed to parse.
        path: PathBuf,
        /// Parser diagnostic, including line and column.
        message: String,
    },
}

impl LanguageFileError {
    /// Build an `InvalidInput` error.
    #[must_use]
    pub fn invalid_input(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Build an `EmptyOrUnreadable` error for an empty file.
    #[must_use]
    pub fn empty(path: impl Into<PathBuf>) -> Self {
        Self::EmptyOrUnreadable {
            path: path.into(),
            source: None,
        }
    }

    /// Build an `EmptyOrUnreadable` error wrapping an I/O failure.
    #[must_use]
    pub fn unreadable(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::EmptyOrUnreadable {
            path: path.into(),
            source: Some(source),
        }
    }

    /// Build a `Syntax` error.
    #[must_use]
    pub fn syntax(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Syntax {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Path of the file the error refers to.
    #[must_use]
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::InvalidInput { path, .. }
            | Self::EmptyOrUnreadable { path, .. }
            | Self::Syntax { path, .. } => path,
        }
    }
}
