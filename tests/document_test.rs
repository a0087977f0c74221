//! Integration tests for word-processing markup.

use officemark::model::{runs_text, Block, StyleDefaults};
use officemark::parser::{build_table, format_inline, parse_document};
use officemark::render::{to_markup, to_markup_with_stats, to_text};
use officemark::Officemark;

const REPORT: &str = "\
# Quarterly Report
[FONT:Georgia,14]An **important** summary with *notes*

## Highlights
- Revenue up
* Costs [SIZE:9]flat[/SIZE]
1. Hire
2. Ship

|Region|Sales|
|------|-----|
|North|**120**|
|South|
";

fn defaults() -> StyleDefaults {
    StyleDefaults::new("Calibri", 11)
}

#[test]
fn test_report_structure() {
    let doc = parse_document(REPORT, &defaults());

    let kinds: Vec<&str> = doc
        .blocks
        .iter()
        .map(|b| match b {
            Block::Heading { .. } => "heading",
            Block::Paragraph { .. } => "paragraph",
            Block::BulletItem { .. } => "bullet",
            Block::NumberedItem { .. } => "numbered",
            Block::Table(_) => "table",
            Block::BlankLine => "blank",
        })
        .collect();
    assert_eq!(
        kinds,
        vec![
            "heading", "paragraph", "blank", "heading", "bullet", "bullet", "numbered",
            "numbered", "blank", "table", "blank"
        ]
    );
}

#[test]
fn test_line_font_directive_applies_to_whole_line() {
    let doc = parse_document(REPORT, &defaults());
    let runs = doc.blocks[1].runs().unwrap();

    assert_eq!(runs_text(runs), "An important summary with notes");
    assert!(runs.iter().all(|r| r.font_name == "Georgia" && r.font_size == 14));
    assert!(runs[1].bold);
    assert!(runs[3].italic);
}

#[test]
fn test_size_span_inside_bullet() {
    let doc = parse_document(REPORT, &defaults());
    let runs = doc.blocks[5].runs().unwrap();

    assert_eq!(runs.len(), 2);
    assert_eq!(runs[1].text, "flat");
    assert_eq!(runs[1].font_size, 9);
    assert_eq!(runs[1].font_name, "Calibri");
}

#[test]
fn test_table_rows_padded_to_header() {
    let doc = parse_document(REPORT, &defaults());
    let Block::Table(table) = &doc.blocks[9] else {
        panic!("expected a table");
    };

    assert_eq!(table.headers, vec!["Region", "Sales"]);
    assert_eq!(table.row_count(), 2);
    assert!(table.rows[0].cells[1].runs[0].bold);
    assert!(table.rows[1].cells[1].is_empty());
}

#[test]
fn test_build_table_from_owned_lines() {
    let lines = vec![
        String::from("| a | b |"),
        String::from("|---|---|"),
        String::from("|  |  |"),
        String::from("| 1 | 2 | 3 |"),
    ];
    let table = build_table(&lines, &defaults());

    assert_eq!(table.column_count(), 2);
    assert_eq!(table.row_count(), 1);
    assert_eq!(table.rows[0].plain_text(), "1\t2");
}

#[test]
fn test_markup_round_trip_is_stable() {
    let doc = parse_document(REPORT, &defaults());
    let markup = to_markup(&doc, &defaults());
    let reparsed = parse_document(&markup, &defaults());

    assert_eq!(reparsed.blocks, doc.blocks);
    assert_eq!(to_markup(&reparsed, &defaults()), markup);
}

#[test]
fn test_markup_stats() {
    let doc = parse_document(REPORT, &defaults());
    let result = to_markup_with_stats(&doc, &defaults());

    assert_eq!(result.stats.heading_count, 2);
    assert_eq!(result.stats.list_item_count, 4);
    assert_eq!(result.stats.table_count, 1);
    assert_eq!(result.stats.table_row_count, 2);
    assert!(result.content.starts_with("# Quarterly Report"));
}

#[test]
fn test_plain_text_drops_markup() {
    let doc = Officemark::new().document("# T\n**a** [FONT:Mono,8]b[/FONT]");
    assert_eq!(to_text(&doc), "T\na b");
}

#[test]
fn test_finalize_once() {
    let doc = Officemark::new().document("x");
    assert!(doc.is_finalized());
    let again = doc.clone().finalize();
    assert_eq!(again, doc);
}

#[test]
fn test_unterminated_span_is_literal() {
    let runs = format_inline("[FONT:Arial,12]never closed", &defaults());
    assert_eq!(runs.len(), 1);
    assert_eq!(runs[0].text, "[FONT:Arial,12]never closed");
    assert_eq!(runs[0].font_name, "Calibri");
}
