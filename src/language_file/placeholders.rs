//! `{{variable}}` placeholder extraction and comparison.

use std::sync::LazyLock;

use regex::Regex;

/// Non-greedy `{{...}}`; does not span lines.
static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{(.*?)\}\}").expect("placeholder pattern is valid"));

/// What: Extract every placeholder of a string, braces included.
///
/// Inputs:
/// - `text`: Translatable string
///
/// Output:
/// - Placeholders in order of appearance, duplicates kept
#[must_use]
pub fn extract(text: &str) -> Vec<&str> {
    PLACEHOLDER.find_iter(text).map(|m| m.as_str()).collect()
}

/// What: List the base placeholders that the localized string lacks.
///
/// Inputs:
/// - `base`: String from the base language file
/// - `localized`: Translation of the same key
///
/// Output:
/// - Base placeholders with no exact match in `localized`, in base order
///
/// Details:
/// - Comparison is case-sensitive and literal, whitespace inside the braces
///   included
/// - Extra placeholders in `localized` are ignored
/// - A base placeholder repeated and missing is reported once per occurrence
#[must_use]
pub fn missing<'a>(base: &'a str, localized: &str) -> Vec<&'a str> {
    let wanted = extract(base);
    if wanted.is_empty() {
        return Vec::new();
    }
    let present = extract(localized);
    wanted
        .into_iter()
        .filter(|placeholder| !present.iter().any(|p| p == placeholder))
        .collect()
}

/// Violation message for a translated key that dropped a variable.
#[must_use]
pub fn violation_message(key: &str, placeholder: &str) -> String {
    format!("Key {key} was translated but is missing variable {placeholder}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extract_is_non_greedy() {
        assert_eq!(
            extract("{{a}} and {{b}} then {{ c }}"),
            ["{{a}}", "{{b}}", "{{ c }}"]
        );
        assert!(extract("no variables { here }").is_empty());
        assert_eq!(extract("{{}}"), ["{{}}"]);
    }

    #[test]
    fn extract_does_not_cross_lines() {
        assert!(extract("{{first\nsecond}}").is_empty());
    }

    #[test]
    fn missing_none_when_base_has_no_placeholders() {
        assert!(missing("Plain text", "{{extra}}").is_empty());
    }

    #[test]
    fn missing_ignores_extra_localized_placeholders() {
        assert!(missing("Hi {{name}}", "Hallo {{name}}, {{count}}").is_empty());
    }

    #[test]
    fn missing_reports_each_absent_placeholder() {
        assert_eq!(
            missing("{{a}} {{b}} {{c}}", "{{b}}"),
            ["{{a}}", "{{c}}"]
        );
    }

    #[test]
    fn missing_is_case_and_whitespace_sensitive() {
        assert_eq!(missing("{{Name}}", "{{name}}"), ["{{Name}}"]);
        assert_eq!(missing("{{name}}", "{{ name }}"), ["{{name}}"]);
    }

    #[test]
    fn missing_requires_braces_not_bare_text() {
        assert_eq!(missing("{{name}}", "name {name}"), ["{{name}}"]);
    }

    #[test]
    fn message_format() {
        assert_eq!(
            violation_message("greeting", "{{name}}"),
            "Key greeting was translated but is missing variable {{name}}"
        );
    }
}
