//! Small utility helpers shared by the CLI and report code.

pub mod config;

use unicode_width::UnicodeWidthStr;

/// What: Pad a string with spaces to a display width.
///
/// Inputs:
/// - `text`: String to pad
/// - `width`: Target width in terminal columns
///
/// Output:
/// - `text` followed by enough spaces to fill `width`; unchanged when it is
///   already wider
///
/// Details:
/// - Uses Unicode display width so CJK file names line up in tables
#[must_use]
pub fn pad_to_width(text: &str, width: usize) -> String {
    let current = text.width();
    if current >= width {
        return text.to_string();
    }
    let mut out = String::with_capacity(text.len() + width - current);
    out.push_str(text);
    out.extend(std::iter::repeat_n(' ', width - current));
    out
}
