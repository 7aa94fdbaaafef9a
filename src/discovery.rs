//! Finding language files in a directory.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{LanguageFileError, Result};

/// What: List language files directly inside a directory.
///
/// Inputs:
/// - `dir`: Directory to scan (not recursive)
/// - `extension`: File extension to keep, without the dot (e.g. `json`)
///
/// Output:
/// - Paths of regular files with that extension, sorted by file name
///
/// # Errors
/// - `EmptyOrUnreadable` when the directory cannot be listed
///
/// Details:
/// - Extension matching ignores ASCII case
/// - Entries that cannot be inspected are skipped with a warning
pub fn find_language_files(dir: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir).map_err(|e| LanguageFileError::unreadable(dir, e))?;

    let mut files: Vec<PathBuf> = entries
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry.path()),
            Err(e) => {
                tracing::warn!(dir = %dir.display(), error = %e, "skipping unreadable entry");
                None
            }
        })
        .filter(|path| path.is_file())
        .filter(|path| {
            path.extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext.eq_ignore_ascii_case(extension))
        })
        .collect();
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    tracing::debug!(dir = %dir.display(), count = files.len(), "found language files");
    Ok(files)
}

/// What: List the files to grade against `base`.
///
/// Inputs:
/// - `dir`: Directory to scan
/// - `base`: Base language file, excluded from the result when it lives in `dir`
/// - `extension`: File extension to keep
///
/// Output:
/// - Candidate paths, sorted by file name
///
/// # Errors
/// - `EmptyOrUnreadable` when the directory cannot be listed
pub fn candidates(dir: &Path, base: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    let base_id = identity(base);
    Ok(find_language_files(dir, extension)?
        .into_iter()
        .filter(|path| identity(path) != base_id)
        .collect())
}

/// Canonical path when it resolves, the path as given otherwise.
fn identity(path: &Path) -> PathBuf {
    fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}
