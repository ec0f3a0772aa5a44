//! Table types.

use serde::{Deserialize, Serialize};

/// Separator between the lines of a flattened cell.
///
/// Lists inside table cells are flattened into one text value, one item per
/// line with `•` (top level) or `◦` (nested) markers. Renderers translate the
/// separator into their own line break.
pub const CELL_LINE_SEPARATOR: char = '\n';

/// A table structure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    /// Rows in DOM order
    pub rows: Vec<TableRow>,

    /// Table caption
    pub caption: Option<String>,
}

impl Table {
    /// Create a new empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a row to the table.
    pub fn add_row(&mut self, row: TableRow) {
        self.rows.push(row);
    }

    /// Get the number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Get the number of columns (widest row, counting spans).
    pub fn column_count(&self) -> usize {
        self.rows.iter().map(TableRow::width).max().unwrap_or(0)
    }

    /// Check if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Check if any row is marked as a header.
    pub fn has_header(&self) -> bool {
        self.rows.iter().any(|r| r.is_header)
    }

    /// Get the leading header rows.
    pub fn header(&self) -> &[TableRow] {
        let count = self.rows.iter().take_while(|r| r.is_header).count();
        &self.rows[..count]
    }

    /// Get the rows after the leading header rows.
    pub fn body(&self) -> &[TableRow] {
        &self.rows[self.header().len()..]
    }

    /// Get plain text representation of the table.
    pub fn plain_text(&self) -> String {
        self.rows
            .iter()
            .map(|row| row.plain_text())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Check if the table has complex structure (merged cells).
    pub fn has_merged_cells(&self) -> bool {
        self.rows
            .iter()
            .flat_map(|r| &r.cells)
            .any(TableCell::is_merged)
    }
}

/// A table row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
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

    /// Number of grid columns this row occupies.
    pub fn width(&self) -> usize {
        self.cells.iter().map(|c| c.colspan.max(1) as usize).sum()
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
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableCell {
    /// Cell text (may contain [`CELL_LINE_SEPARATOR`])
    pub text: String,

    /// Number of rows this cell spans
    pub rowspan: u16,

    /// Number of columns this cell spans
    pub colspan: u16,
}

impl TableCell {
    /// Create a new cell with text content.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            rowspan: 1,
            colspan: 1,
        }
    }

    /// Create an empty cell.
    pub fn empty() -> Self {
        Self::text("")
    }

    /// Set colspan and return self.
    pub fn colspan(mut self, span: u16) -> Self {
        self.colspan = span.max(1);
        self
    }

    /// Set rowspan and return self.
    pub fn rowspan(mut self, span: u16) -> Self {
        self.rowspan = span.max(1);
        self
    }

    /// Iterate over the lines of a flattened cell.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.text.split(CELL_LINE_SEPARATOR)
    }

    /// Check if the cell is empty.
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Check if this cell spans multiple rows or columns.
    pub fn is_merged(&self) -> bool {
        self.rowspan > 1 || self.colspan > 1
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
    }

    #[test]
    fn test_table_with_data() {
        let mut table = Table::new();
        table.add_row(TableRow::header(vec![
            TableCell::text("Drug"),
            TableCell::text("Dose"),
        ]));
        table.add_row(TableRow::from_strings(["Aspirin", "100 mg"]));
        table.add_row(TableRow::from_strings(["Heparin", "5000 IU"]));

        assert_eq!(table.row_count(), 3);
        assert_eq!(table.column_count(), 2);
        assert!(table.has_header());
        assert_eq!(table.header().len(), 1);
        assert_eq!(table.body().len(), 2);
    }

    #[test]
    fn test_column_count_uses_widest_row() {
        let mut table = Table::new();
        table.add_row(TableRow::new(vec![TableCell::text("Merged").colspan(3)]));
        table.add_row(TableRow::from_strings(["a", "b"]));

        assert_eq!(table.column_count(), 3);
        assert!(table.has_merged_cells());
    }

    #[test]
    fn test_cell_lines() {
        let cell = TableCell::text("• Fever\n◦ > 38 °C");
        assert_eq!(cell.lines().collect::<Vec<_>>(), vec!["• Fever", "◦ > 38 °C"]);
        assert!(!cell.is_empty());
        assert!(TableCell::empty().is_empty());
    }
}
