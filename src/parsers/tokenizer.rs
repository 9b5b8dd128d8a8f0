//! Quote-aware splitting of a single CSV line.

const DELIMITER: char = ',';
const QUOTE: char = '"';

/// Splits one line on commas that are not enclosed in a double-quote pair.
///
/// A comma is a separator only when an even number of quote characters
/// follow it on the same line. For balanced lines this is the usual
/// "comma inside quotes" rule; for unbalanced lines the trailing quote
/// count decides.
///
/// An empty line yields a single empty field.
pub fn split_line(line: &str) -> Vec<&str> {
    let mut quotes_after = line.chars().filter(|&c| c == QUOTE).count();
    let mut parts = Vec::new();
    let mut start = 0;

    for (pos, ch) in line.char_indices() {
        match ch {
            QUOTE => quotes_after -= 1,
            DELIMITER if quotes_after % 2 == 0 => {
                parts.push(&line[start..pos]);
                start = pos + DELIMITER.len_utf8();
            }
            _ => {}
        }
    }
    parts.push(&line[start..]);

    parts
}

/// Trims a raw field and strips one enclosing pair of double quotes if present.
///
/// Interior `""` sequences are left untouched.
pub fn normalize_field(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.len() >= 2 && trimmed.starts_with(QUOTE) && trimmed.ends_with(QUOTE) {
        return trimmed[1..trimmed.len() - 1].to_string();
    }
    trimmed.to_string()
}

/// Splits and normalizes one line into field values.
pub fn tokenize_line(line: &str) -> Vec<String> {
    split_line(line).into_iter().map(normalize_field).collect()
}
