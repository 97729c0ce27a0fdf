//! Tabular parser — splits raw CSV text into a header and records
//!
//! Fields are split on a literal `,` with no quote awareness, so a quoted
//! field containing a comma spills into the next column. Blank and
//! whitespace-only lines are skipped wherever they appear. A leading UTF-8
//! byte order mark is dropped before the header is read.
//!
//! # Guarantees
//! - Every record has exactly one value per header column
//! - Missing trailing fields become empty strings, extra fields are dropped
//! - Deterministic: same input always produces the same table

pub mod table;

use crate::{Error, Result};
use table::{Record, Table};

/// Parse CSV text into a [`Table`]
///
/// # Errors
/// Returns `EmptyInput` when the text has no non-blank lines and
/// `NoHeaders` when every header cell is empty.
pub fn parse(input: &str) -> Result<Table> {
    let input = input.strip_prefix('\u{feff}').unwrap_or(input);
    let mut lines = input
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty());

    let (_, header_line) = lines.next().ok_or(Error::EmptyInput)?;
    let header = parse_header(header_line)?;

    let records = lines
        .map(|(idx, line)| parse_row(line, header.len(), idx + 1))
        .collect();

    Ok(Table { header, records })
}

fn parse_header(line: &str) -> Result<Vec<String>> {
    let header: Vec<String> = line.split(',').map(|h| h.trim().to_string()).collect();
    if header.iter().all(String::is_empty) {
        return Err(Error::NoHeaders);
    }
    Ok(header)
}

fn parse_row(line: &str, width: usize, source_line: usize) -> Record {
    let mut fields = line.split(',');
    let values = (0..width)
        .map(|_| fields.next().map(str::trim).unwrap_or("").to_string())
        .collect();
    Record::new(values, source_line)
}
