//! # CSV Codec
//!
//! Pure conversion between the flat CSV dialect and record sequences.
//!
//! Parsing splits on newlines and commas positionally: the first non-empty
//! line is the header (cells trimmed), every later line is a row. A short
//! row pads its missing trailing columns with empty strings; extra fields
//! beyond the header count are dropped. Cell values are kept exactly as
//! split, untrimmed. Serialization infers the column order from the first
//! record and never quotes.

use super::record::Record;

/// Parse CSV text into records
pub fn parse(content: &str) -> Vec<Record> {
    let mut lines = content.trim().lines().filter(|line| !line.is_empty());

    let headers: Vec<String> = match lines.next() {
        Some(header_line) => header_line
            .split(',')
            .map(|cell| cell.trim().to_string())
            .collect(),
        None => return Vec::new(),
    };

    lines
        .map(|line| {
            let values: Vec<&str> = line.split(',').collect();
            headers
                .iter()
                .enumerate()
                .map(|(i, header)| {
                    let value = values.get(i).copied().unwrap_or("");
                    (header.clone(), value.to_string())
                })
                .collect()
        })
        .collect()
}

/// Serialize records to CSV text
///
/// Column order comes from the first record's keys; a record missing one of
/// those keys emits an empty cell. An empty slice yields the empty string.
pub fn serialize(records: &[Record]) -> String {
    let first = match records.first() {
        Some(first) => first,
        None => return String::new(),
    };

    let headers: Vec<&str> = first.keys().collect();
    let mut lines = Vec::with_capacity(records.len() + 1);
    lines.push(headers.join(","));

    for record in records {
        let row: Vec<&str> = headers
            .iter()
            .map(|header| record.get(header).unwrap_or(""))
            .collect();
        lines.push(row.join(","));
    }

    lines.join("\n")
}
