//! Text and JSON rendering of a [`RunReport`].

use std::fmt::Write;

use unicode_width::UnicodeWidthStr;

use super::{FileReport, ReportFormat, RunReport};
use crate::util::pad_to_width;

/// Render a report in the requested format.
#[must_use]
pub fn render(report: &RunReport, format: ReportFormat, show_missing: bool) -> String {
    match format {
        ReportFormat::Text => render_text(report, show_missing),
        ReportFormat::Json => render_json(report),
    }
}

/// What: Render a report as pretty-printed JSON.
///
/// Details:
/// - Serialization of these plain types cannot fail; should it ever, the
///   error is returned as a JSON string so the output stays parseable
#[must_use]
pub fn render_json(report: &RunReport) -> String {
    serde_json::to_string_pretty(report).unwrap_or_else(|e| {
        tracing::error!(error = %e, "failed to serialize report");
        serde_json::Value::String(format!("failed to serialize report: {e}")).to_string()
    })
}

/// What: Render a report as a human-readable table.
///
/// Inputs:
/// - `report`: Report to render
/// - `show_missing`: List every missing key under its file
///
/// Output:
/// - Multi-line string ending with a newline
///
/// Details:
/// - Violations are always listed under their file
/// - Columns are aligned by display width
#[must_use]
pub fn render_text(report: &RunReport, show_missing: bool) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Base: {} ({} keys)",
        report.base.display(),
        report.base_keys
    );

    if report.files.is_empty() {
        out.push_str("\nNo language files to compare.\n");
        return out;
    }

    let name_width = report
        .files
        .iter()
        .map(|f| f.name.width())
        .chain(std::iter::once("FILE".len()))
        .max()
        .unwrap_or(0);
    let group_width = report
        .files
        .iter()
        .filter_map(|f| f.group.as_deref().map(UnicodeWidthStr::width))
        .chain(std::iter::once("GROUP".len()))
        .max()
        .unwrap_or(0);

    let _ = writeln!(
        out,
        "\n{}  {}  {:>8}  {:>7}  {:>10}",
        pad_to_width("FILE", name_width),
        pad_to_width("GROUP", group_width),
        "COMPLETE",
        "MISSING",
        "VIOLATIONS"
    );
    for file in &report.files {
        write_file_row(&mut out, file, name_width, group_width, show_missing);
    }

    write_summary(&mut out, report);
    out
}

/// Append one table row for `file`, plus its missing keys when requested.
fn write_file_row(
    out: &mut String,
    file: &FileReport,
    name_width: usize,
    group_width: usize,
    show_missing: bool,
) {
    let name = pad_to_width(&file.name, name_width);
    let group = pad_to_width(file.group.as_deref().unwrap_or("-"), group_width);

    if let Some(error) = &file.error {
        let _ = writeln!(out, "{name}  {group}  error: {error}");
        return;
    }

    let completion = file
        .completion
        .map_or_else(|| "-".to_string(), |c| format!("{c}%"));
    let _ = writeln!(
        out,
        "{name}  {group}  {completion:>8}  {:>7}  {:>10}",
        file.missing_keys.len(),
        file.violations.len()
    );
    for violation in &file.violations {
        let _ = writeln!(out, "    ! {violation}");
    }
    if show_missing {
        for key in &file.missing_keys {
            let _ = writeln!(out, "    - missing: {key}");
        }
    }
}

/// Append the totals line and per-group averages.
fn write_summary(out: &mut String, report: &RunReport) {
    let summary = &report.summary;
    let _ = write!(
        out,
        "\nSummary: {} file{}, {} failed, {} violation{}",
        summary.files,
        plural(summary.files),
        summary.failed,
        summary.violations,
        plural(summary.violations)
    );
    match summary.average_completion {
        Some(avg) => {
            let _ = writeln!(out, ", average completion {avg:.1}%");
        }
        None => out.push('\n'),
    }
    for group in &summary.groups {
        let _ = writeln!(
            out,
            "  {}: {:.1}% over {} file{}",
            group.group,
            group.average_completion,
            group.files,
            plural(group.files)
        );
    }
}

/// `"s"` unless `count` is exactly one.
const fn plural(count: usize) -> &'static str {
    if count == 1 { "" } else { "s" }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LanguageFileError;
    use std::path::Path;

    fn sample() -> RunReport {
        let mut de = super::super::tests::graded("de_app.json", 50.0, &[
            "Key greeting was translated but is missing variable {{name}}",
        ]);
        de.missing_keys = vec!["farewell".to_string()];
        let err = LanguageFileError::syntax("fr_app.json", "duplicate key \"a\" at line 3 column 6");
        RunReport::new(
            Path::new("locales/en_app.json"),
            2,
            vec![de, FileReport::failed(Path::new("fr_app.json"), &err)],
        )
    }

    #[test]
    fn text_lists_files_violations_and_summary() {
        let text = render_text(&sample(), false);
        assert!(text.starts_with("Base: locales/en_app.json (2 keys)\n"));
        assert!(text.contains("FILE"));
        assert!(text.contains("de_app.json  de   "));
        assert!(text.contains("50%"));
        assert!(text.contains("    ! Key greeting was translated but is missing variable {{name}}"));
        assert!(text.contains("fr_app.json  fr     error: fr_app.json: duplicate key"));
        assert!(!text.contains("missing: farewell"));
        assert!(text.contains("Summary: 2 files, 1 failed, 1 violation, average completion 50.0%"));
        assert!(text.contains("  de: 50.0% over 1 file\n"));
    }

    #[test]
    fn text_can_show_missing_keys() {
        let text = render_text(&sample(), true);
        assert!(text.contains("    - missing: farewell"));
    }

    #[test]
    fn text_without_files() {
        let report = RunReport::new(Path::new("en_app.json"), 3, Vec::new());
        assert_eq!(
            render_text(&report, false),
            "Base: en_app.json (3 keys)\n\nNo language files to compare.\n"
        );
    }

    #[test]
    fn json_is_machine_readable() {
        let json = render(&sample(), ReportFormat::Json, false);
        let value: serde_json::Value = serde_json::from_str(&json).expect("valid JSON output");
        assert_eq!(value["base_keys"], 2);
        assert_eq!(value["files"][0]["name"], "de_app.json");
        assert_eq!(value["files"][0]["completion"], 50.0);
        assert_eq!(value["files"][0]["missing_keys"][0], "farewell");
        assert!(value["files"][0].get("error").is_none());
        assert_eq!(value["files"][1]["completion"], serde_json::Value::Null);
        assert_eq!(value["summary"]["failed"], 1);
        assert_eq!(value["summary"]["groups"][0]["group"], "de");
    }
}
