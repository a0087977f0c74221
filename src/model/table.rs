//! Table types for the word-processing model.

use super::run::{runs_text, Run, StyleDefaults};
use super::Alignment;
use serde::{Deserialize, Serialize};

/// A grid built from pipe-delimited markup.
///
/// The column count is fixed by `headers`: every row holds exactly
/// `headers.len()` cells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    /// Header cell texts
    pub headers: Vec<String>,

    /// Data rows
    pub rows: Vec<TableRow>,

    /// Font used for the header row
    pub header_style: StyleDefaults,

    /// Border drawn around every header and data cell
    pub border: Border,
}

impl Table {
    /// Create a table with the given headers and no rows.
    pub fn new(headers: Vec<String>, header_style: StyleDefaults) -> Self {
        Self {
            headers,
            rows: Vec::new(),
            header_style,
            border: Border::single(),
        }
    }

    /// Add a row to the table.
    pub fn add_row(&mut self, row: TableRow) {
        self.rows.push(row);
    }

    /// Number of columns (fixed by the header).
    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// Number of data rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Check if the table has no data rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Header cells as bold runs.
    pub fn header_runs(&self) -> Vec<Run> {
        self.headers
            .iter()
            .map(|h| Run::bold(h.clone(), &self.header_style))
            .collect()
    }

    /// Alignment of header cells.
    pub fn header_alignment(&self) -> Alignment {
        Alignment::Center
    }

    /// Get plain text representation of the table.
    pub fn plain_text(&self) -> String {
        std::iter::once(self.headers.join("\t"))
            .chain(self.rows.iter().map(|row| row.plain_text()))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// A data row of a table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRow {
    /// Cells in the row
    pub cells: Vec<TableCell>,
}

impl TableRow {
    /// Create a new row with cells.
    pub fn new(cells: Vec<TableCell>) -> Self {
        Self { cells }
    }

    /// Get plain text representation.
    pub fn plain_text(&self) -> String {
        self.cells
            .iter()
            .map(|c| c.plain_text())
            .collect::<Vec<_>>()
            .join("\t")
    }
}

/// A data cell holding inline-formatted runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableCell {
    /// Cell content
    pub runs: Vec<Run>,
}

impl TableCell {
    /// Create a cell from runs.
    pub fn new(runs: Vec<Run>) -> Self {
        Self { runs }
    }

    /// Create an empty cell.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Get plain text content.
    pub fn plain_text(&self) -> String {
        runs_text(&self.runs)
    }

    /// Check if the cell is empty.
    pub fn is_empty(&self) -> bool {
        self.runs.iter().all(Run::is_empty)
    }
}

/// A uniform border applied to all four sides of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Border {
    /// Line style
    pub style: BorderStyle,

    /// Line width in units of the target format's thinnest line
    pub width: u8,

    /// Line color as `RRGGBB`
    pub color: [u8; 3],
}

impl Border {
    /// A 1-unit solid black border.
    pub const fn single() -> Self {
        Self {
            style: BorderStyle::Single,
            width: 1,
            color: [0, 0, 0],
        }
    }
}

impl Default for Border {
    fn default() -> Self {
        Self::single()
    }
}

/// Line style for borders.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BorderStyle {
    /// Solid line
    #[default]
    Single,
}
