//! Spreadsheet model: workbook, sheets and styled cells.

use super::{Alignment, Border, StyleDefaults};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A spreadsheet workbook.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Workbook {
    /// Sheets in creation order
    pub sheets: Vec<Sheet>,
}

impl Workbook {
    /// Create a new empty workbook.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a sheet and return a mutable reference to it.
    pub fn add_sheet(&mut self, sheet: Sheet) -> &mut Sheet {
        self.sheets.push(sheet);
        let last = self.sheets.len() - 1;
        &mut self.sheets[last]
    }

    /// Find a sheet by name.
    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|s| s.name == name)
    }

    /// Check whether a sheet with this name exists.
    ///
    /// Case-insensitive, as spreadsheet applications treat `Sales` and
    /// `sales` as the same sheet.
    pub fn contains_sheet(&self, name: &str) -> bool {
        let name = name.to_lowercase();
        self.sheets.iter().any(|s| s.name.to_lowercase() == name)
    }

    /// Sheet names in order.
    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(|s| s.name.as_str()).collect()
    }

    /// Check if the workbook has no sheets.
    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }
}

/// A single worksheet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Sheet {
    /// Sheet title
    pub name: String,

    /// Populated cells, ordered by row then column
    pub cells: Vec<Cell>,

    /// Column widths in character units, keyed by 1-based column index
    pub column_widths: BTreeMap<u32, f64>,
}

impl Sheet {
    /// Create an empty sheet.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cells: Vec::new(),
            column_widths: BTreeMap::new(),
        }
    }

    /// Insert or replace the cell at `(cell.row, cell.column)`.
    pub fn set_cell(&mut self, cell: Cell) {
        let key = (cell.row, cell.column);
        match self.cells.binary_search_by_key(&key, |c| (c.row, c.column)) {
            Ok(idx) => self.cells[idx] = cell,
            Err(idx) => self.cells.insert(idx, cell),
        }
    }

    /// Get the cell at a 1-based position.
    pub fn cell(&self, row: u32, column: u32) -> Option<&Cell> {
        self.cells
            .binary_search_by_key(&(row, column), |c| (c.row, c.column))
            .ok()
            .map(|idx| &self.cells[idx])
    }

    /// Last used row (0 for an empty sheet).
    pub fn max_row(&self) -> u32 {
        self.cells.last().map(|c| c.row).unwrap_or(0)
    }

    /// Last used column (0 for an empty sheet).
    pub fn max_column(&self) -> u32 {
        self.cells.iter().map(|c| c.column).max().unwrap_or(0)
    }

    /// Set a column width.
    pub fn set_column_width(&mut self, column: u32, width: f64) {
        self.column_widths.insert(column, width);
    }

    /// Check if the sheet has no cells.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Tab-separated plain text of the used range.
    pub fn plain_text(&self) -> String {
        let columns = self.max_column();
        (1..=self.max_row())
            .map(|row| {
                (1..=columns)
                    .map(|col| {
                        self.cell(row, col)
                            .map(|c| c.value.to_string())
                            .unwrap_or_default()
                    })
                    .collect::<Vec<_>>()
                    .join("\t")
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// A positioned, styled cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    /// 1-based row index
    pub row: u32,

    /// 1-based column index
    pub column: u32,

    /// Cell value
    pub value: CellValue,

    /// Cell formatting
    pub style: CellStyle,
}

impl Cell {
    /// Create a cell.
    pub fn new(row: u32, column: u32, value: CellValue, style: CellStyle) -> Self {
        Self {
            row,
            column,
            value,
            style,
        }
    }

    /// A1-style reference of this cell.
    pub fn reference(&self) -> String {
        format!("{}{}", column_letter(self.column), self.row)
    }
}

/// A typed cell value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum CellValue {
    /// No value
    #[default]
    Empty,
    /// Boolean
    Bool(bool),
    /// Integer
    Int(i64),
    /// Floating point number
    Float(f64),
    /// Text
    Text(String),
}

impl CellValue {
    /// Check if the value is empty.
    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }
}

impl std::fmt::Display for CellValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Bool(b) => write!(f, "{}", b),
            CellValue::Int(i) => write!(f, "{}", i),
            CellValue::Float(v) => write!(f, "{}", v),
            CellValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

/// Cell formatting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellStyle {
    /// Font family name
    pub font_name: String,

    /// Font size in points
    pub font_size: u32,

    /// Bold text
    pub bold: bool,

    /// Italic text
    pub italic: bool,

    /// Font color as uppercase `RRGGBB`
    pub color: Option<String>,

    /// Horizontal alignment, `None` for the format's default
    pub alignment: Option<Alignment>,

    /// Border on all four sides
    pub border: Option<Border>,
}

impl CellStyle {
    /// Plain style with the given font.
    pub fn new(defaults: &StyleDefaults) -> Self {
        Self {
            font_name: defaults.font_name.clone(),
            font_size: defaults.font_size,
            bold: false,
            italic: false,
            color: None,
            alignment: None,
            border: None,
        }
    }

    /// Style used for table header cells: bold, centered, bordered.
    pub fn header(defaults: &StyleDefaults) -> Self {
        Self {
            bold: true,
            alignment: Some(Alignment::Center),
            border: Some(Border::single()),
            ..Self::new(defaults)
        }
    }

    /// Add a thin border and return self.
    pub fn bordered(mut self) -> Self {
        self.border = Some(Border::single());
        self
    }
}

impl Default for CellStyle {
    fn default() -> Self {
        Self::new(&StyleDefaults::default())
    }
}

/// Convert a 1-based column index to its letter form (1 -> A, 27 -> AA).
pub fn column_letter(column: u32) -> String {
    let mut n = column;
    let mut letters = Vec::new();
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.push(char::from(b'A' + rem as u8));
        n = (n - 1) / 26;
    }
    letters.iter().rev().collect()
}
