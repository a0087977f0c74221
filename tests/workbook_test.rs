//! Integration tests for spreadsheet markup and query exports.

use officemark::export::{layout_query_results, QueryResult, RESULTS_SHEET};
use officemark::model::{Alignment, CellValue, StyleDefaults};
use officemark::parser::{format_cell, parse_workbook, scan_directives, DirectiveKind};
use officemark::render::to_text;

const BUDGET: &str = "\
# Budget 2024
[BOLD][COLOR:1f4e79]Overview[/COLOR][/BOLD]
|Item|Cost|
|----|----|
|Rent|[ALIGN:right]1200[/ALIGN]|
|||
|Food|300|extra|
[ITALIC]Totals follow[/ITALIC]

# Budget 2024
plain
";

fn defaults() -> StyleDefaults {
    StyleDefaults::new("Calibri", 11)
}

#[test]
fn test_sheets_are_unique() {
    let wb = parse_workbook(BUDGET, &defaults());
    assert_eq!(wb.sheet_names(), vec!["Budget 2024", "Budget 2024 (2)"]);
}

#[test]
fn test_free_text_goes_to_column_a() {
    let wb = parse_workbook(BUDGET, &defaults());
    let sheet = wb.sheet("Budget 2024").unwrap();

    let title = sheet.cell(1, 1).unwrap();
    assert_eq!(title.value, CellValue::from("Overview"));
    assert!(title.style.bold);
    assert_eq!(title.style.color.as_deref(), Some("1F4E79"));

    // header on 2, Rent on 3, Food on 4, text below the table
    let note = sheet.cell(5, 1).unwrap();
    assert_eq!(note.value, CellValue::from("Totals follow"));
    assert!(note.style.italic);
    assert!(note.style.border.is_none());
}

#[test]
fn test_table_cells_are_styled_and_bordered() {
    let wb = parse_workbook(BUDGET, &defaults());
    let sheet = wb.sheet("Budget 2024").unwrap();

    let header = sheet.cell(2, 2).unwrap();
    assert_eq!(header.value, CellValue::from("Cost"));
    assert!(header.style.bold);
    assert_eq!(header.style.alignment, Some(Alignment::Center));

    let amount = sheet.cell(3, 2).unwrap();
    assert_eq!(amount.value, CellValue::from("1200"));
    assert_eq!(amount.style.alignment, Some(Alignment::Right));
    assert!(amount.style.border.is_some());

    // all data cells are written, even past the header width
    assert_eq!(sheet.cell(4, 3).unwrap().value, CellValue::from("extra"));
    assert_eq!(sheet.cell(4, 3).unwrap().reference(), "C4");
}

#[test]
fn test_content_before_heading_uses_default_sheet() {
    let wb = parse_workbook("loose line\n# Named\nx", &defaults());
    assert_eq!(wb.sheet_names(), vec!["Sheet1", "Named"]);
    assert_eq!(
        wb.sheet("Sheet1").unwrap().cell(1, 1).unwrap().value,
        CellValue::from("loose line")
    );
}

#[test]
fn test_invalid_sheet_characters_replaced() {
    let wb = parse_workbook("# Q1/Q2: [draft]?", &defaults());
    assert_eq!(wb.sheet_names(), vec!["Q1_Q2_ _draft__"]);
}

#[test]
fn test_cell_formatter_strips_paired_tags_only() {
    let (text, style) = format_cell("[BOLD]a[/BOLD] [ITALIC]b", &defaults());
    assert_eq!(text, "a [ITALIC]b");
    assert!(style.bold);
    assert!(!style.italic);
}

#[test]
fn test_scan_directives_reports_spans() {
    let raw = "[BORDER]x[/BORDER]";
    let directives = scan_directives(raw);
    assert_eq!(directives.len(), 1);
    assert_eq!(directives[0].kind, DirectiveKind::Border);
    assert_eq!(directives[0].span, 0..raw.len());
}

#[test]
fn test_workbook_text() {
    let wb = parse_workbook("# A\nx\n# B\n|h|\n|-|\n|v|", &defaults());
    assert_eq!(to_text(&wb), "[A]\nx\n\n[B]\nh\nv");
}

#[test]
fn test_query_export_layout() {
    let mut first = QueryResult::new(["id", "name"]);
    first.add_row(vec![CellValue::Int(1), "ann".into()]);
    let second = QueryResult::new(["total"]);

    let wb = layout_query_results(
        &[("SELECT id, name FROM users", first), ("SELECT count(*) FROM users", second)],
        &defaults(),
    );
    let sheet = wb.sheet(RESULTS_SHEET).unwrap();

    assert_eq!(sheet.cell(1, 1).unwrap().value, CellValue::from("Query Executed"));
    assert_eq!(sheet.cell(3, 1).unwrap().value, CellValue::from("id"));
    assert_eq!(sheet.cell(4, 2).unwrap().value, CellValue::from("ann"));
    // 4 + 1 + 10
    assert_eq!(sheet.cell(15, 1).unwrap().value, CellValue::from("Query Executed"));
    assert_eq!(sheet.cell(16, 1).unwrap().value, CellValue::from("SELECT count(*) FROM users"));
}
