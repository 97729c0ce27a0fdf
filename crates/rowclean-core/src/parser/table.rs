//! Table types shared by the parser, the cleaning pipeline and the serializer

use serde::Serialize;

/// A parsed CSV table: header plus data records
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Table {
    pub header: Vec<String>,
    pub records: Vec<Record>,
}

impl Table {
    /// Index of the first column with this exact name
    pub fn column_index(&self, name: &str) -> Option<usize> {
        column_index(&self.header, name)
    }

    /// Render the table back to CSV text
    pub fn to_csv(&self) -> String {
        crate::serializer::serialize(&self.header, &self.records)
    }
}

/// One data row, stored positionally against the header
///
/// A record parsed from input always carries exactly one value per header
/// column. Reads past the end yield the empty string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Record {
    pub values: Vec<String>,
    /// 1-based line number in the source text, 0 for constructed records
    pub source_line: usize,
}

impl Record {
    pub fn new(values: Vec<String>, source_line: usize) -> Self {
        Self {
            values,
            source_line,
        }
    }

    /// Value at a column index, empty when absent
    pub fn get(&self, index: usize) -> &str {
        self.values.get(index).map(String::as_str).unwrap_or("")
    }

    /// Overwrite the value at a column index, padding with empty values if needed
    pub fn set(&mut self, index: usize, value: String) {
        if index >= self.values.len() {
            self.values.resize(index + 1, String::new());
        }
        self.values[index] = value;
    }
}

pub(crate) fn column_index(header: &[String], name: &str) -> Option<usize> {
    header.iter().position(|column| column.trim() == name)
}
