//! Markdown table parsing.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// A delimiter cell: dashes, colons and whitespace only.
static DELIMITER_CELL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[-:\s]+$").expect("delimiter cell pattern"));

/// A markdown table split into header and data rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedTable {
    /// Header cells, in order
    pub columns: Vec<String>,

    /// Data rows; none is longer than `columns`
    pub rows: Vec<Vec<String>>,
}

impl ParsedTable {
    /// Number of columns.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Number of data rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// A table is worth rendering only with a header and at least one data row.
    pub fn is_renderable(&self) -> bool {
        !self.columns.is_empty() && !self.rows.is_empty()
    }
}

/// Outcome of best-effort table parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableParse<'a> {
    /// A usable table
    Parsed(ParsedTable),

    /// Not a usable table; render the raw text instead
    Fallback(&'a str),
}

/// Parse a markdown table chunk.
///
/// Returns `None` when fewer than two non-empty pipe-prefixed lines exist.
/// A header-only table yields its columns and no rows.
///
/// # Example
///
/// ```
/// use techspec::parser::parse_markdown_table;
///
/// let table = parse_markdown_table("| A | B |\n|---|---|\n| 1 | 2 |").unwrap();
/// assert_eq!(table.columns, vec!["A", "B"]);
/// assert_eq!(table.rows, vec![vec!["1", "2"]]);
/// ```
pub fn parse_markdown_table(raw: &str) -> Option<ParsedTable> {
    let mut rows: Vec<Vec<String>> = raw
        .lines()
        .map(str::trim)
        .filter(|line| line.starts_with('|'))
        .map(split_row)
        .collect();

    if rows.len() < 2 {
        return None;
    }

    if is_delimiter_cells(&rows[1]) {
        rows.remove(1);
    }

    let columns = rows.remove(0);
    let width = columns.len();
    for row in &mut rows {
        if row.len() > width {
            log::debug!(
                "Truncating table row from {} to {} cells",
                row.len(),
                width
            );
            row.truncate(width);
        }
    }

    Some(ParsedTable { columns, rows })
}

/// Parse a table chunk, falling back to the raw text when it is not usable.
pub fn classify_table(raw: &str) -> TableParse<'_> {
    match parse_markdown_table(raw) {
        Some(table) if table.is_renderable() => TableParse::Parsed(table),
        _ => TableParse::Fallback(raw),
    }
}

/// Split a row on `|`, dropping every leading and trailing pipe.
fn split_row(line: &str) -> Vec<String> {
    line.trim_matches('|')
        .split('|')
        .map(|cell| cell.trim().to_string())
        .collect()
}

fn is_delimiter_cells(cells: &[String]) -> bool {
    cells.iter().all(|cell| DELIMITER_CELL.is_match(cell))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_well_formed_table() {
        let raw = "| Field | Type | Length |\n|:------|:----:|-------:|\n| MATNR | CHAR | 40 |\n| MENGE | QUAN | 13 |";
        let table = parse_markdown_table(raw).unwrap();
        assert_eq!(table.columns, vec!["Field", "Type", "Length"]);
        assert_eq!(
            table.rows,
            vec![vec!["MATNR", "CHAR", "40"], vec!["MENGE", "QUAN", "13"]]
        );
        assert!(table.is_renderable());
    }

    #[test]
    fn test_too_few_lines() {
        assert!(parse_markdown_table("| only header |").is_none());
        assert!(parse_markdown_table("").is_none());
        assert!(parse_markdown_table("no pipes\nat all").is_none());
    }

    #[test]
    fn test_header_only() {
        let table = parse_markdown_table("| H1 | H2 |\n|----|----|").unwrap();
        assert_eq!(table.columns, vec!["H1", "H2"]);
        assert!(table.rows.is_empty());
        assert!(!table.is_renderable());
        assert_eq!(
            classify_table("| H1 | H2 |\n|----|----|"),
            TableParse::Fallback("| H1 | H2 |\n|----|----|")
        );
    }

    #[test]
    fn test_missing_delimiter_row() {
        let table = parse_markdown_table("| A | B |\n| 1 | 2 |\n| 3 | 4 |").unwrap();
        assert_eq!(table.columns, vec!["A", "B"]);
        assert_eq!(table.row_count(), 2);
    }

    #[test]
    fn test_short_and_long_rows() {
        let raw = "| A | B | C |\n|---|---|---|\n| 1 |\n| 1 | 2 | 3 | 4 |";
        let table = parse_markdown_table(raw).unwrap();
        assert_eq!(table.rows[0], vec!["1"]);
        assert_eq!(table.rows[1], vec!["1", "2", "3"]);
        assert!(table.rows.iter().all(|r| r.len() <= table.column_count()));
    }

    #[test]
    fn test_repeated_outer_pipes_stripped() {
        let table = parse_markdown_table("| A | B |\n|---|---||\n| 1 | 2 |").unwrap();
        assert_eq!(table.columns, vec!["A", "B"]);
        assert_eq!(table.rows, vec![vec!["1", "2"]]);

        let table = parse_markdown_table("|| A | B |\n|---|---|\n| x ||").unwrap();
        assert_eq!(table.columns, vec!["A", "B"]);
        assert_eq!(table.rows[0], vec!["x"]);
    }

    #[test]
    fn test_non_pipe_lines_ignored() {
        let raw = "| A | B |\nstray text\n|---|---|\n| 1 | 2 |";
        let table = parse_markdown_table(raw).unwrap();
        assert_eq!(table.rows, vec![vec!["1", "2"]]);
    }

    #[test]
    fn test_classify_parsed() {
        match classify_table("|Col1|Col2|\n|--|--|\n|a|b|") {
            TableParse::Parsed(table) => {
                assert_eq!(table.columns, vec!["Col1", "Col2"]);
                assert_eq!(table.rows, vec![vec!["a", "b"]]);
            }
            other => panic!("expected parsed table, got {:?}", other),
        }
    }
}
