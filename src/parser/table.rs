//! Table records and the streaming row reader.

use std::io;

use csv::{ReaderBuilder, StringRecord, StringRecordsIntoIter};

use super::normalize_column_name;

/// A fully parsed table
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParsedTable {
    /// Normalized header names in file order
    pub headers: Vec<String>,
    /// Data rows in file order
    pub rows: Vec<Row>,
}

/// One data record keyed by normalized column name
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    /// 1-based row number; the header occupies row 1
    pub number: usize,
    /// `(column, value)` pairs in header order, values trimmed
    pub cells: Vec<(String, String)>,
}

impl Row {
    /// Value of a column, if the file has that column
    pub fn get(&self, column: &str) -> Option<&str> {
        self.cells
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value.as_str())
    }

    /// Value of a column, empty when the column is absent
    pub fn value(&self, column: &str) -> &str {
        self.get(column).unwrap_or("")
    }
}

/// Streaming reader that yields one [`Row`] at a time.
///
/// The first non-blank record becomes the header. Blank records are
/// skipped and do not consume a row number. A read error ends the
/// stream instead of propagating, so callers always get a (possibly
/// partial) table.
pub struct RowReader<R: io::Read> {
    records: StringRecordsIntoIter<R>,
    headers: Vec<String>,
    next_number: usize,
    finished: bool,
}

impl<R: io::Read> RowReader<R> {
    pub fn new(reader: R) -> Self {
        let records = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(reader)
            .into_records();

        let mut row_reader = Self {
            records,
            headers: Vec::new(),
            next_number: 2,
            finished: false,
        };

        if let Some(record) = row_reader.next_non_blank() {
            row_reader.headers = record.iter().map(normalize_column_name).collect();
        }

        row_reader
    }

    /// Normalized headers; empty when the input had no non-blank record
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    fn next_non_blank(&mut self) -> Option<StringRecord> {
        if self.finished {
            return None;
        }

        loop {
            match self.records.next() {
                Some(Ok(record)) if is_blank(&record) => continue,
                Some(Ok(record)) => return Some(record),
                Some(Err(e)) => {
                    log::warn!("Stopped reading table after malformed record: {}", e);
                    self.finished = true;
                    return None;
                }
                None => {
                    self.finished = true;
                    return None;
                }
            }
        }
    }
}

impl<R: io::Read> Iterator for RowReader<R> {
    type Item = Row;

    fn next(&mut self) -> Option<Self::Item> {
        if self.headers.is_empty() {
            return None;
        }

        let record = self.next_non_blank()?;
        let cells = self
            .headers
            .iter()
            .enumerate()
            .map(|(idx, header)| {
                let value = record.get(idx).map(str::trim).unwrap_or("");
                (header.clone(), value.to_string())
            })
            .collect();

        let row = Row {
            number: self.next_number,
            cells,
        };
        self.next_number += 1;

        Some(row)
    }
}

/// A record is blank only when its line held nothing but whitespace.
/// Separator-only lines such as `,,` are data rows with empty cells.
fn is_blank(record: &StringRecord) -> bool {
    record.len() == 1 && record[0].trim().is_empty()
}
