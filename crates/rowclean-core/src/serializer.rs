//! Tabular serializer — renders a header and records back to CSV text
//!
//! Values are written verbatim with no quoting, mirroring the parser. Lines
//! are joined with `\n` and there is no trailing newline.

use crate::parser::table::Record;

/// Serialize records in header column order
pub fn serialize(header: &[String], records: &[Record]) -> String {
    let mut out = String::new();
    write_row(&mut out, header.iter().map(String::as_str));
    for record in records {
        out.push('\n');
        write_row(&mut out, (0..header.len()).map(|idx| record.get(idx)));
    }
    out
}

fn write_row<'a>(out: &mut String, values: impl Iterator<Item = &'a str>) {
    for (i, value) in values.enumerate() {
        if i > 0 {
            out.push(',');
        }
        out.push_str(value);
    }
}
