//! Pipe-delimited table markup.
//!
//! ```text
//! |Header1|Header2|
//! |-------|-------|
//! |Cell 1 |Cell 2 |
//! ```

use super::inline::format_inline;
use crate::model::{StyleDefaults, Table, TableCell, TableRow};

/// Build a table from grouped pipe lines.
///
/// The first line holds the headers, the second is a separator and is
/// skipped without inspection, the rest are data rows. The header fixes the
/// column count: short rows are padded with empty cells, extra cells are
/// dropped. Rows with no text at all are skipped.
pub fn build_table<S: AsRef<str>>(lines: &[S], style: &StyleDefaults) -> Table {
    let mut lines = lines
        .iter()
        .map(|l| l.as_ref().trim())
        .filter(|l| !l.is_empty());

    let headers: Vec<String> = lines
        .next()
        .map(split_row)
        .unwrap_or_default()
        .into_iter()
        .map(str::to_string)
        .collect();
    let columns = headers.len();
    let mut table = Table::new(headers, style.clone());

    for line in lines.skip(1) {
        let cells = split_row(line);
        if cells.iter().all(|c| c.is_empty()) {
            continue;
        }
        if cells.len() > columns {
            log::debug!(
                "Table row has {} cells, dropping {} beyond the header",
                cells.len(),
                cells.len() - columns
            );
        }

        let mut row: Vec<TableCell> = cells
            .into_iter()
            .take(columns)
            .map(|text| TableCell::new(format_inline(text, style)))
            .collect();
        row.resize_with(columns, TableCell::empty);
        table.add_row(TableRow::new(row));
    }

    table
}

/// Split one pipe line into trimmed cell texts.
///
/// The empty pieces produced by the outer pipes are dropped, so `|a|b|`
/// yields `["a", "b"]`; inner empty cells are kept.
pub fn split_row(line: &str) -> Vec<&str> {
    let line = line.trim();
    let mut cells: Vec<&str> = line.split('|').map(str::trim).collect();
    if line.starts_with('|') {
        cells.remove(0);
    }
    if line.ends_with('|') && !cells.is_empty() {
        cells.pop();
    }
    cells
}

/// Check whether a (trimmed) line opens a table.
pub fn is_table_start(line: &str) -> bool {
    line.starts_with('|') && line[1..].contains('|')
}
