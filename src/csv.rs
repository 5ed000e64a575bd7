//! Minimal CSV/TSV reader that produces a [`GridDocument`].
//!
//! The first non-empty line is the header; header names become column keys.

use serde_json::{Number, Value};

use crate::document::{GridDocument, Record};
use crate::error::Result;
use crate::types::Column;

/// Field separator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    Comma,
    Tab,
}

impl Delimiter {
    /// Pick a delimiter from a file extension (`tsv` → tab, anything else → comma)
    pub fn from_extension(ext: &str) -> Self {
        if ext.eq_ignore_ascii_case("tsv") {
            Delimiter::Tab
        } else {
            Delimiter::Comma
        }
    }

    fn as_char(self) -> char {
        match self {
            Delimiter::Comma => ',',
            Delimiter::Tab => '\t',
        }
    }
}

/// Parse CSV/TSV bytes into a document with no span requests.
pub(crate) fn parse_delimited(data: &[u8], delim: Delimiter) -> Result<GridDocument> {
    let text = String::from_utf8_lossy(data);
    let sep = delim.as_char();

    let mut lines = text.lines().filter(|line| !line.is_empty());
    let Some(header) = lines.next() else {
        return Ok(GridDocument::default());
    };

    let columns: Vec<Column> = split_csv_line(header, sep)
        .into_iter()
        .map(|name| Column::new(name.trim()))
        .collect();

    let mut rows = Vec::new();
    for line in lines {
        let mut record = Record::new();
        for (column, field) in columns.iter().zip(split_csv_line(line, sep)) {
            let value = field.trim();
            if value.is_empty() {
                continue;
            }
            record.insert(column.key.clone(), detect_value(value));
        }
        rows.push(record);
    }

    Ok(GridDocument {
        columns,
        rows,
        ..GridDocument::default()
    })
}

/// Numbers stay numbers, everything else is text.
fn detect_value(value: &str) -> Value {
    if let Ok(n) = value.parse::<i64>() {
        return Value::from(n);
    }
    if let Some(n) = value.parse::<f64>().ok().and_then(Number::from_f64) {
        return Value::Number(n);
    }
    Value::String(value.to_string())
}

/// Split a CSV line respecting quoted fields.
fn split_csv_line(line: &str, sep: char) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        if in_quotes {
            if ch == '"' {
                if chars.peek() == Some(&'"') {
                    // Escaped quote
                    current.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            } else {
                current.push(ch);
            }
        } else if ch == '"' {
            in_quotes = true;
        } else if ch == sep {
            fields.push(std::mem::take(&mut current));
        } else {
            current.push(ch);
        }
    }
    fields.push(current);
    fields
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_csv_basic() {
        let data = b"Name,Age,City\nAlice,30,NYC\nBob,25,LA";
        let doc = parse_delimited(data, Delimiter::Comma).unwrap();
        let keys: Vec<_> = doc.columns.iter().map(|c| c.key.as_str()).collect();
        assert_eq!(keys, vec!["Name", "Age", "City"]);
        assert_eq!(doc.rows.len(), 2);
        assert_eq!(doc.rows[0]["Name"], "Alice");
        // "30" is kept as a number
        assert_eq!(doc.rows[0]["Age"], 30);
    }

    #[test]
    fn test_parse_tsv() {
        let data = b"A\tB\n1\t2.5";
        let doc = parse_delimited(data, Delimiter::Tab).unwrap();
        assert_eq!(doc.columns.len(), 2);
        assert_eq!(doc.rows[0]["B"], 2.5);
    }

    #[test]
    fn test_quoted_csv() {
        let data = b"greeting,n\n\"Hello, World\",42\n\"She said \"\"hi\"\"\",0";
        let doc = parse_delimited(data, Delimiter::Comma).unwrap();
        assert_eq!(doc.rows[0]["greeting"], "Hello, World");
        assert_eq!(doc.rows[1]["greeting"], "She said \"hi\"");
    }

    #[test]
    fn test_short_rows_leave_cells_empty() {
        let data = b"a,b,c\n1\n";
        let doc = parse_delimited(data, Delimiter::Comma).unwrap();
        assert_eq!(doc.rows.len(), 1);
        assert!(doc.rows[0].get("b").is_none());
    }

    #[test]
    fn test_empty_csv() {
        let doc = parse_delimited(b"", Delimiter::Comma).unwrap();
        assert!(doc.columns.is_empty());
        assert!(doc.rows.is_empty());
    }

    #[test]
    fn test_delimiter_from_extension() {
        assert_eq!(Delimiter::from_extension("TSV"), Delimiter::Tab);
        assert_eq!(Delimiter::from_extension("csv"), Delimiter::Comma);
    }
}
