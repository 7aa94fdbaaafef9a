//! Library entry for transcheck exposing the comparison engine for the binary and integration tests.

pub mod args;
pub mod discovery;
pub mod error;
pub mod language_file;
pub mod report;
pub mod settings;
pub mod util;

pub use error::{LanguageFileError, Result};
pub use language_file::LanguageFile;
