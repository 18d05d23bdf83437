//! Tabular Parser
//!
//! Turns raw delimited text into normalized headers and row records.
//! No validation logic here - pure data extraction.

pub mod table;

pub use table::{ParsedTable, Row, RowReader};

/// Normalize a column name for case-insensitive matching.
///
/// This is the only place column names are normalized. Headers are
/// normalized once when parsed and template columns once when the
/// template is built.
pub fn normalize_column_name(name: &str) -> String {
    name.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}')
        .to_uppercase()
}

/// Parse a complete text into a header list and its data rows.
///
/// This is the main entry point for parsing. It never fails: broken
/// input degrades to an empty header list and/or zero rows.
pub fn parse_table(text: &str) -> ParsedTable {
    let mut reader = RowReader::new(text.as_bytes());
    let rows: Vec<Row> = reader.by_ref().collect();

    ParsedTable {
        headers: reader.headers().to_vec(),
        rows,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_column_name() {
        assert_eq!(normalize_column_name("  Account Number "), "ACCOUNT NUMBER");
        assert_eq!(normalize_column_name("\u{feff}uom"), "UOM");
        assert_eq!(normalize_column_name(""), "");
    }

    #[test]
    fn test_parse_simple_table() {
        let table = parse_table("account,uom\nA-1,kwh\nA-2,therm\n");

        assert_eq!(table.headers, vec!["ACCOUNT", "UOM"]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0].number, 2);
        assert_eq!(table.rows[0].get("ACCOUNT"), Some("A-1"));
        assert_eq!(table.rows[1].get("UOM"), Some("therm"));
    }

    #[test]
    fn test_parse_empty_text() {
        let table = parse_table("");
        assert!(table.headers.is_empty());
        assert!(table.rows.is_empty());
    }

    #[test]
    fn test_parse_header_only() {
        let table = parse_table("a,b,c");
        assert_eq!(table.headers, vec!["A", "B", "C"]);
        assert!(table.rows.is_empty());
    }

    #[test]
    fn test_leading_blank_lines_are_skipped() {
        let table = parse_table("\n\n  \nname\nx\n");
        assert_eq!(table.headers, vec!["NAME"]);
        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.rows[0].value("NAME"), "x");
    }
}
