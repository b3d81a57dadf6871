//! CSV parsing for study exports.
//!
//! The exports are plain comma-separated files with a header row. Fields may
//! be double-quoted (with `""` escaping inside quotes); embedded newlines in
//! quoted fields are not supported by these exports and are rejected as a
//! column-count mismatch.

use std::io::BufRead;
use std::path::Path;

use super::DataError;
use crate::types::{Table, Value};

/// Parse CSV text into a table with the given name.
///
/// The first line is the header; every subsequent non-empty line must have
/// exactly as many fields as the header.
pub fn parse_csv(text: &str, name: &str, path: &Path) -> Result<Table, DataError> {
    parse_csv_reader(text.as_bytes(), name, path)
}

/// Parse CSV from a buffered reader into a table with the given name.
pub fn parse_csv_reader(
    reader: impl BufRead,
    name: &str,
    path: &Path,
) -> Result<Table, DataError> {
    let mut lines = reader.lines().enumerate();

    let columns = loop {
        match lines.next() {
            Some((_, line)) => {
                let line = line?;
                if line.trim().is_empty() {
                    continue;
                }
                break split_record(&line);
            }
            None => {
                // A file with no header at all is an empty, column-less table.
                return Ok(Table::new(name, Vec::new()));
            }
        }
    };

    let mut table = Table::new(name, columns);
    for (line_num, line) in lines {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let fields = split_record(&line);
        if fields.len() != table.columns().len() {
            return Err(DataError::Parse {
                path: path.to_path_buf(),
                line: line_num + 1,
                message: format!(
                    "expected {} fields, got {}",
                    table.columns().len(),
                    fields.len()
                ),
            });
        }
        table.push_row(fields.iter().map(|f| Value::parse(f)).collect());
    }
    Ok(table)
}

/// Split one CSV record into fields, honoring double-quote quoting.
fn split_record(line: &str) -> Vec<String> {
    let line = line.strip_suffix('\r').unwrap_or(line);
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    field.push('"');
                } else {
                    in_quotes = false;
                }
            }
            '"' => in_quotes = true,
            ',' if !in_quotes => {
                fields.push(std::mem::take(&mut field));
            }
            _ => field.push(c),
        }
    }
    fields.push(field);
    fields
}
