//! Delimited-text parsing: header row + positional field rows.

use std::collections::HashMap;

/// A raw row: header name to field value, as decoded from the source.
pub type RawRow = HashMap<String, String>;

/// Field delimiter for the tabular input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    Tab,
    Comma,
}

impl Default for Delimiter {
    fn default() -> Self {
        Delimiter::Tab
    }
}

impl Delimiter {
    /// Parse a delimiter label from configuration.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.to_ascii_lowercase().as_str() {
            "tab" | "\t" => Some(Delimiter::Tab),
            "comma" | "," => Some(Delimiter::Comma),
            _ => None,
        }
    }

    fn as_char(&self) -> char {
        match self {
            Delimiter::Tab => '\t',
            Delimiter::Comma => ',',
        }
    }
}

/// Parse decoded text into an ordered sequence of field-to-value rows.
///
/// The first line provides header names; each subsequent line is split
/// positionally and zipped with the headers. A line with more fields than
/// headers loses the excess; a line with fewer leaves the trailing headers
/// absent from the row. Rows that decode to an empty key set (blank lines,
/// typically a trailing newline) are dropped.
pub fn parse_table(text: &str, delimiter: Delimiter) -> Vec<RawRow> {
    let sep = delimiter.as_char();
    let mut lines = text.lines();

    let headers: Vec<&str> = match lines.next() {
        Some(header_line) => header_line.split(sep).collect(),
        None => return Vec::new(),
    };

    let mut rows = Vec::new();
    for line in lines {
        let mut row = RawRow::new();
        for (header, value) in headers.iter().zip(line.split(sep)) {
            if header.is_empty() && value.is_empty() {
                continue;
            }
            row.insert(header.to_string(), value.to_string());
        }
        // A blank line zips to a single empty cell under the first header;
        // treat an all-empty row the same as an empty key set.
        if row.is_empty() || row.values().all(|v| v.is_empty()) {
            continue;
        }
        rows.push(row);
    }
    rows
}
