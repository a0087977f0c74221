//! Spreadsheet markup parser.
//!
//! ```text
//! # Sheet Name
//! |Header1|Header2|
//! |-------|-------|
//! |[BOLD]x[/BOLD]|y|
//! [COLOR:FF0000]free text goes to column A[/COLOR]
//! ```

use super::cell::format_cell;
use super::table::{is_table_start, split_row};
use crate::model::{Cell, CellStyle, CellValue, Sheet, StyleDefaults, Workbook};

/// Width given to every column spanned by a table header.
pub const TABLE_COLUMN_WIDTH: f64 = 15.0;

const MAX_SHEET_NAME_LEN: usize = 31;
const INVALID_SHEET_CHARS: [char; 7] = ['[', ']', ':', '*', '?', '/', '\\'];
const DEFAULT_SHEET_NAME: &str = "Sheet1";

/// Parse spreadsheet markup into a workbook.
///
/// Never fails and always returns at least one sheet.
pub fn parse_workbook(content: &str, style: &StyleDefaults) -> Workbook {
    let lines: Vec<&str> = content.split('\n').collect();
    let mut workbook = Workbook::new();
    let mut current: Option<usize> = None;
    let mut i = 0;

    while i < lines.len() {
        let line = lines[i].trim();
        if line.is_empty() {
            i += 1;
            continue;
        }

        if line.starts_with('#') {
            let name = unique_sheet_name(line.trim_start_matches('#').trim(), &workbook);
            workbook.add_sheet(Sheet::new(name));
            current = Some(workbook.sheets.len() - 1);
            i += 1;
            continue;
        }

        let idx = match current {
            Some(idx) => idx,
            None => {
                let name = unique_sheet_name(DEFAULT_SHEET_NAME, &workbook);
                workbook.add_sheet(Sheet::new(name));
                let idx = workbook.sheets.len() - 1;
                current = Some(idx);
                idx
            }
        };
        let sheet = &mut workbook.sheets[idx];

        if is_table_start(line) {
            let mut table_lines = vec![line];
            let mut j = i + 1;
            while j < lines.len() && lines[j].trim().starts_with('|') {
                table_lines.push(lines[j].trim());
                j += 1;
            }
            write_table(sheet, &table_lines, style);
            i = j;
            continue;
        }

        let row = next_row(sheet);
        let (text, cell_style) = format_cell(line, style);
        sheet.set_cell(Cell::new(row, 1, CellValue::Text(text), cell_style));
        i += 1;
    }

    if workbook.is_empty() {
        workbook.add_sheet(Sheet::new(DEFAULT_SHEET_NAME));
    }
    workbook
}

/// Row where the next block starts: 1 on an empty sheet, else below the last used row.
fn next_row(sheet: &Sheet) -> u32 {
    if sheet.is_empty() {
        1
    } else {
        sheet.max_row() + 1
    }
}

/// Write a pipe table onto a sheet below its existing content.
///
/// Unlike the word-processing table, every data cell is written, even beyond
/// the header's column count.
fn write_table(sheet: &mut Sheet, lines: &[&str], style: &StyleDefaults) {
    let Some((header_line, rest)) = lines.split_first() else {
        return;
    };
    let start_row = next_row(sheet);
    let headers = split_row(header_line);

    for (col, header) in (1u32..).zip(&headers) {
        sheet.set_cell(Cell::new(
            start_row,
            col,
            CellValue::from(*header),
            CellStyle::header(style),
        ));
    }

    let data_rows = rest
        .iter()
        .skip(1)
        .map(|line| split_row(line))
        .filter(|cells| cells.iter().any(|c| !c.is_empty()));

    for (row, cells) in (start_row + 1..).zip(data_rows) {
        for (col, raw) in (1u32..).zip(cells) {
            let (text, cell_style) = format_cell(raw, style);
            sheet.set_cell(Cell::new(row, col, CellValue::Text(text), cell_style.bordered()));
        }
    }

    for col in (1u32..).take(headers.len()) {
        sheet.set_column_width(col, TABLE_COLUMN_WIDTH);
    }
}

/// Make a title acceptable to spreadsheet applications and unique in the workbook.
fn unique_sheet_name(raw: &str, workbook: &Workbook) -> String {
    let cleaned: String = raw
        .chars()
        .map(|c| if INVALID_SHEET_CHARS.contains(&c) { '_' } else { c })
        .take(MAX_SHEET_NAME_LEN)
        .collect();
    let base = if cleaned.trim().is_empty() {
        format!("Sheet{}", workbook.sheets.len() + 1)
    } else {
        cleaned
    };
    if base != raw {
        log::warn!("Sheet name {:?} sanitized to {:?}", raw, base);
    }

    if !workbook.contains_sheet(&base) {
        return base;
    }
    (2..)
        .map(|n| {
            let suffix = format!(" ({})", n);
            let keep = MAX_SHEET_NAME_LEN.saturating_sub(suffix.chars().count());
            format!("{}{}", base.chars().take(keep).collect::<String>(), suffix)
        })
        .find(|candidate| !workbook.contains_sheet(candidate))
        .unwrap_or(base)
}
