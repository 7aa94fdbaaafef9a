//! Language file parsing.
//!
//! A language file is a single JSON object whose values are all strings.
//! Keys keep their source order and may appear only once.

use std::fmt;
use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use serde::de::{self, Deserializer, MapAccess, Visitor};

use crate::error::{LanguageFileError, Result};

/// Ordered key -> translated string mapping of one language file.
pub type TranslationMap = IndexMap<String, String>;

/// Top-level object wrapper so serde can drive our own map visitor.
struct FlatObject(TranslationMap);

impl<'de> serde::Deserialize<'de> for FlatObject {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(FlatObjectVisitor)
    }
}

/// Collects entries in order and rejects key conflicts.
struct FlatObjectVisitor;

impl<'de> Visitor<'de> for FlatObjectVisitor {
    type Value = FlatObject;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a JSON object mapping keys to strings")
    }

    fn visit_map<A>(self, mut access: A) -> std::result::Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut map = TranslationMap::with_capacity(access.size_hint().unwrap_or(0));
        while let Some(key) = access.next_key::<String>()? {
            if map.contains_key(&key) {
                return Err(de::Error::custom(format_args!("duplicate key \"{key}\"")));
            }
            let value: String = access.next_value()?;
            map.insert(key, value);
        }
        Ok(FlatObject(map))
    }
}

/// What: Parse language file text into an ordered `TranslationMap`.
///
/// Inputs:
/// - `content`: Raw file content
/// - `path`: File the content came from (used in error messages only)
///
/// Output:
/// - `Ok(TranslationMap)` with entries in source order
///
/// # Errors
/// - `EmptyOrUnreadable` when the content is empty
/// - `Syntax` when the content is not a JSON object of string values, a
///   key appears twice, or the text starts with a byte order mark
///
/// Details:
/// - Whitespace-only content is not empty; it fails as a syntax error
/// - Nested objects, arrays, numbers, booleans and `null` are rejected
pub fn parse(content: &str, path: &Path) -> Result<TranslationMap> {
    if content.is_empty() {
        return Err(LanguageFileError::empty(path));
    }
    if content.starts_with('\u{feff}') {
        return Err(LanguageFileError::syntax(
            path,
            "BOM detected, make sure your input does not include a Unicode Byte-Order-Mark",
        ));
    }

    serde_json::from_str::<FlatObject>(content)
        .map(|FlatObject(map)| map)
        .map_err(|e| LanguageFileError::syntax(path, e.to_string()))
}

/// What: Check language file text without keeping the parsed result.
///
/// Inputs:
/// - `content`: Raw file content
/// - `path`: File the content came from
///
/// Output:
/// - `None` when the content would parse, otherwise the error `parse` would
///   return
#[must_use]
pub fn lint(content: &str, path: &Path) -> Option<LanguageFileError> {
    parse(content, path).err()
}

/// What: Read a language file from disk and parse it.
///
/// Inputs:
/// - `path`: File to read
///
/// Output:
/// - Parsed `TranslationMap`
///
/// # Errors
/// - `EmptyOrUnreadable` when the file cannot be read (including invalid
///   UTF-8) or is empty
/// - `Syntax` as for [`parse`]
pub fn read(path: &Path) -> Result<TranslationMap> {
    let content =
        fs::read_to_string(path).map_err(|e| LanguageFileError::unreadable(path, e))?;
    let map = parse(&content, path)?;
    tracing::debug!(path = %path.display(), keys = map.len(), "parsed language file");
    Ok(map)
}
