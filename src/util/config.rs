//! Configuration file parsing utilities.
//!
//! Helpers for `key = value` files: comment skipping, key normalisation and
//! value parsing.

/// What: Check if a line should be skipped (empty or comment).
///
/// Inputs:
/// - `line`: Line to check
///
/// Output:
/// - `true` if the line should be skipped, `false` otherwise
///
/// Details:
/// - Skips empty lines and lines starting with `#`, `//`, or `;`
#[must_use]
pub fn skip_comment_or_empty(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.is_empty()
        || trimmed.starts_with('#')
        || trimmed.starts_with("//")
        || trimmed.starts_with(';')
}

/// What: Parse a key-value pair from a line.
///
/// Inputs:
/// - `line`: Line containing key=value format
///
/// Output:
/// - `Some((key, value))` if parsing succeeds, `None` otherwise
///
/// Details:
/// - Splits on the first `=` character
/// - Key is lowercased with `-`, `.` and spaces turned into `_`
/// - Trailing `#` or `//` comments are removed from the value
#[must_use]
pub fn parse_key_value(line: &str) -> Option<(String, String)> {
    let (raw_key, raw_value) = line.trim().split_once('=')?;
    let key = raw_key.trim().to_lowercase().replace(['.', '-', ' '], "_");
    if key.is_empty() {
        return None;
    }
    Some((key, strip_inline_comment(raw_value).to_string()))
}

/// Remove a trailing `// ...` or `# ...` comment from a value.
///
/// A marker only starts a comment after whitespace, so `locales/#v2` and
/// `a//b` are kept whole.
fn strip_inline_comment(s: &str) -> &str {
    let mut after_space = false;
    for (i, c) in s.char_indices() {
        if after_space && (c == '#' || (c == '/' && s[i..].starts_with("//"))) {
            return s[..i].trim();
        }
        after_space = c.is_whitespace();
    }
    s.trim()
}

/// What: Parse a boolean config value.
///
/// Output:
/// - `Some(true)` for `true`/`1`/`yes`/`on`, `Some(false)` for
///   `false`/`0`/`no`/`off` (any case), `None` otherwise
#[must_use]
pub fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skips_comments_and_blank_lines() {
        assert!(skip_comment_or_empty(""));
        assert!(skip_comment_or_empty("   "));
        assert!(skip_comment_or_empty("# comment"));
        assert!(skip_comment_or_empty("// comment"));
        assert!(skip_comment_or_empty("; comment"));
        assert!(!skip_comment_or_empty("base_file = en_app.json"));
    }

    #[test]
    fn parses_and_normalises_keys() {
        assert_eq!(
            parse_key_value("  Min-Completion = 80 # at least"),
            Some(("min_completion".to_string(), "80".to_string()))
        );
        assert_eq!(
            parse_key_value("locales.dir=i18n // dev"),
            Some(("locales_dir".to_string(), "i18n".to_string()))
        );
        assert_eq!(parse_key_value("no separator"), None);
        assert_eq!(parse_key_value(" = value"), None);
    }

    #[test]
    fn value_may_contain_equals() {
        assert_eq!(
            parse_key_value("base_file = a=b.json"),
            Some(("base_file".to_string(), "a=b.json".to_string()))
        );
    }

    #[test]
    fn comment_markers_inside_values_are_kept() {
        assert_eq!(
            parse_key_value("base_file = locales/#v2/en_app.json"),
            Some(("base_file".to_string(), "locales/#v2/en_app.json".to_string()))
        );
        assert_eq!(
            parse_key_value("locales_dir = a//b # trailing"),
            Some(("locales_dir".to_string(), "a//b".to_string()))
        );
        assert_eq!(
            parse_key_value("extension =\tjson\t// tab before marker"),
            Some(("extension".to_string(), "json".to_string()))
        );
    }

    #[test]
    fn parses_booleans() {
        assert_eq!(parse_bool("YES"), Some(true));
        assert_eq!(parse_bool("off"), Some(false));
        assert_eq!(parse_bool("maybe"), None);
    }
}
