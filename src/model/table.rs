//! Table types.

use serde::{Deserialize, Serialize};

/// A table structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Table {
    /// Rows in the table
    pub rows: Vec<TableRow>,

    /// Number of header rows (0 = no header)
    pub header_rows: u8,

    /// Visual style
    pub style: TableStyle,
}

impl Table {
    /// Create a new empty table.
    pub fn new() -> Self {
        Self {
            rows: Vec::new(),
            header_rows: 0,
            style: TableStyle::default(),
        }
    }

    /// Build a table from a header and data rows.
    ///
    /// Every data row is padded with empty cells (or cut) to the header width.
    pub fn with_columns<S: AsRef<str>>(columns: &[S], rows: &[Vec<S>]) -> Self {
        let width = columns.len();
        let mut table = Self {
            header_rows: 1,
            ..Self::new()
        };
        table.add_row(TableRow::header(
            columns.iter().map(|c| TableCell::text(c.as_ref())).collect(),
        ));
        for row in rows {
            let mut cells: Vec<TableCell> = row
                .iter()
                .take(width)
                .map(|c| TableCell::text(c.as_ref()))
                .collect();
            cells.resize_with(width, TableCell::empty);
            table.add_row(TableRow::new(cells));
        }
        table
    }

    /// Set the visual style and return self.
    pub fn styled(mut self, style: TableStyle) -> Self {
        self.style = style;
        self
    }

    /// Add a row to the table.
    pub fn add_row(&mut self, row: TableRow) {
        self.rows.push(row);
    }

    /// Get the number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Get the number of columns (based on first row).
    pub fn column_count(&self) -> usize {
        self.rows.first().map(|r| r.cells.len()).unwrap_or(0)
    }

    /// Check if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Get header rows.
    pub fn header(&self) -> &[TableRow] {
        let n = (self.header_rows as usize).min(self.rows.len());
        &self.rows[..n]
    }

    /// Get body rows (non-header).
    pub fn body(&self) -> &[TableRow] {
        let n = (self.header_rows as usize).min(self.rows.len());
        &self.rows[n..]
    }

    /// Get plain text representation of the table.
    pub fn plain_text(&self) -> String {
        self.rows
            .iter()
            .map(|row| row.plain_text())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Default for Table {
    fn default() -> Self {
        Self::new()
    }
}

/// Named table styles understood by the renderers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableStyle {
    /// Shaded header, horizontal rules between rows
    #[default]
    LightList,
    /// Full grid borders
    Grid,
    /// No borders
    Plain,
}

impl TableStyle {
    /// Style id used in the word-processing package.
    pub fn style_id(&self) -> &'static str {
        match self {
            TableStyle::LightList => "LightList",
            TableStyle::Grid => "TableGrid",
            TableStyle::Plain => "TableNormal",
        }
    }
}

/// A table row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableRow {
    /// Cells in the row
    pub cells: Vec<TableCell>,

    /// Whether this is a header row
    pub is_header: bool,
}

impl TableRow {
    /// Create a new row with cells.
    pub fn new(cells: Vec<TableCell>) -> Self {
        Self {
            cells,
            is_header: false,
        }
    }

    /// Create a header row.
    pub fn header(cells: Vec<TableCell>) -> Self {
        Self {
            cells,
            is_header: true,
        }
    }

    /// Create a row from text values.
    pub fn from_strings<S: Into<String>>(values: impl IntoIterator<Item = S>) -> Self {
        Self::new(values.into_iter().map(TableCell::text).collect())
    }

    /// Get plain text representation.
    pub fn plain_text(&self) -> String {
        self.cells
            .iter()
            .map(|c| c.text.as_str())
            .collect::<Vec<_>>()
            .join("\t")
    }
}

/// A table cell.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TableCell {
    /// Cell text
    pub text: String,
}

impl TableCell {
    /// Create a new cell with text content.
    pub fn text(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Create an empty cell.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Check if the cell is empty.
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_new() {
        let table = Table::new();
        assert!(table.is_empty());
        assert_eq!(table.row_count(), 0);
        assert_eq!(table.column_count(), 0);
        assert!(table.header().is_empty());
    }

    #[test]
    fn test_with_columns_pads_and_truncates() {
        let columns = vec!["Name", "Age", "City"];
        let rows = vec![vec!["Alice", "30"], vec!["Bob", "25", "Oslo", "extra"]];
        let table = Table::with_columns(&columns, &rows);

        assert_eq!(table.row_count(), 3);
        assert_eq!(table.column_count(), 3);
        assert_eq!(table.header().len(), 1);
        assert_eq!(table.body().len(), 2);
        assert_eq!(table.body()[0].plain_text(), "Alice\t30\t");
        assert!(table.body()[0].cells[2].is_empty());
        assert_eq!(table.body()[1].cells.len(), 3);
        assert_eq!(table.style, TableStyle::LightList);
    }

    #[test]
    fn test_style_ids() {
        assert_eq!(TableStyle::LightList.style_id(), "LightList");
        assert_eq!(TableStyle::Grid.style_id(), "TableGrid");
    }

    #[test]
    fn test_row_from_strings() {
        let row = TableRow::from_strings(["a", "b"]);
        assert!(!row.is_header);
        assert_eq!(row.plain_text(), "a\tb");
    }
}
