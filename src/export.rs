//! Query result export layout.
//!
//! Each executed query occupies one block on the `Results` sheet:
//!
//! ```text
//! row r      Query Executed        (header style)
//! row r+1    <query text>
//! row r+2    col1 | col2 | ...     (header style)
//! row r+3..  result rows
//! ```
//!
//! followed by ten empty rows before the next block. Running the queries is
//! the caller's business; this module only places their results.

use crate::model::{Cell, CellStyle, CellValue, Sheet, StyleDefaults, Workbook};
use serde::{Deserialize, Serialize};

/// Name of the sheet holding query results.
pub const RESULTS_SHEET: &str = "Results";

/// Empty rows left between two query blocks.
pub const BLOCK_GAP_ROWS: u32 = 10;

const QUERY_HEADER: &str = "Query Executed";

/// A tabular query result.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryResult {
    /// Column names in result order
    pub columns: Vec<String>,

    /// Result rows
    pub rows: Vec<Vec<CellValue>>,
}

impl QueryResult {
    /// Create an empty result with the given columns.
    pub fn new<S: Into<String>>(columns: impl IntoIterator<Item = S>) -> Self {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Append a row.
    pub fn add_row(&mut self, row: Vec<CellValue>) {
        self.rows.push(row);
    }

    /// Number of result rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

/// Lay out executed queries and their results on a single `Results` sheet.
pub fn layout_query_results<Q: AsRef<str>>(
    results: &[(Q, QueryResult)],
    style: &StyleDefaults,
) -> Workbook {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_sheet(Sheet::new(RESULTS_SHEET));
    let mut row = 1u32;

    for (query, result) in results {
        row = write_block(sheet, row, query.as_ref(), result, style);
    }
    workbook
}

/// Write one query block starting at `start`; returns the next block's row.
fn write_block(
    sheet: &mut Sheet,
    start: u32,
    query: &str,
    result: &QueryResult,
    style: &StyleDefaults,
) -> u32 {
    sheet.set_cell(Cell::new(
        start,
        1,
        CellValue::from(QUERY_HEADER),
        CellStyle::header(style),
    ));
    sheet.set_cell(Cell::new(start + 1, 1, CellValue::from(query), CellStyle::new(style)));

    let header_row = start + 2;
    for (col, name) in (1u32..).zip(&result.columns) {
        sheet.set_cell(Cell::new(
            header_row,
            col,
            CellValue::from(name.as_str()),
            CellStyle::header(style),
        ));
    }

    for (row, values) in (header_row + 1..).zip(&result.rows) {
        for (col, value) in (1u32..).zip(values) {
            if value.is_empty() {
                continue;
            }
            sheet.set_cell(Cell::new(row, col, value.clone(), CellStyle::new(style)));
        }
    }

    log::debug!(
        "Query block at row {} with {} result row(s)",
        start,
        result.row_count()
    );
    header_row + result.row_count() as u32 + 1 + BLOCK_GAP_ROWS
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> QueryResult {
        let mut result = QueryResult::new(["id", "name", "score"]);
        result.add_row(vec![CellValue::Int(1), "ann".into(), CellValue::Float(9.5)]);
        result.add_row(vec![CellValue::Int(2), CellValue::Empty, CellValue::Bool(true)]);
        result
    }

    #[test]
    fn test_single_block_layout() {
        let wb = layout_query_results(&[("SELECT * FROM t", sample())], &StyleDefaults::default());
        let sheet = wb.sheet(RESULTS_SHEET).unwrap();

        let header = sheet.cell(1, 1).unwrap();
        assert_eq!(header.value, CellValue::from("Query Executed"));
        assert!(header.style.bold);
        assert_eq!(sheet.cell(2, 1).unwrap().value, CellValue::from("SELECT * FROM t"));
        assert_eq!(sheet.cell(3, 2).unwrap().value, CellValue::from("name"));
        assert!(sheet.cell(3, 2).unwrap().style.bold);
        assert_eq!(sheet.cell(4, 3).unwrap().value, CellValue::Float(9.5));
        assert!(sheet.cell(5, 2).is_none());
        assert_eq!(sheet.cell(5, 3).unwrap().value, CellValue::Bool(true));
    }

    #[test]
    fn test_blocks_separated_by_gap() {
        let blocks = [("q1", sample()), ("q2", QueryResult::new(["x"]))];
        let wb = layout_query_results(&blocks, &StyleDefaults::default());
        let sheet = wb.sheet(RESULTS_SHEET).unwrap();

        // first block ends on row 5, then ten empty rows
        assert_eq!(sheet.cell(16, 1).unwrap().value, CellValue::from("Query Executed"));
        assert_eq!(sheet.cell(17, 1).unwrap().value, CellValue::from("q2"));
        assert_eq!(sheet.cell(18, 1).unwrap().value, CellValue::from("x"));
        assert!((6..16).all(|row| sheet.cell(row, 1).is_none()));
    }

    #[test]
    fn test_no_queries_still_has_sheet() {
        let wb = layout_query_results::<&str>(&[], &StyleDefaults::default());
        assert_eq!(wb.sheet_names(), vec![RESULTS_SHEET]);
    }
}
