//! Line-oriented block parser for word-processing markup.
//!
//! Supported syntax, one construct per line:
//!
//! ```text
//! # Heading 1 / ## Heading 2 / ### Heading 3
//! - bullet item (or "* bullet item")
//! 1. numbered item
//! |Header1|Header2|      (table: consecutive lines starting with '|')
//! [FONT:Arial,14]text    (line-level default font for this block)
//! anything else          (paragraph)
//! ```

use super::inline::{format_inline, split_font_directive};
use super::table::{build_table, is_table_start};
use crate::model::{Block, Document, StyleDefaults};
use regex::Regex;
use std::sync::OnceLock;

fn numbered_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[0-9]+\.\s").unwrap())
}

/// Parse markup into a document.
///
/// Never fails: malformed constructs degrade to paragraphs or literal text.
/// The returned document is not finalized; call [`Document::finalize`]
/// before handing it to a serializer.
pub fn parse_document(content: &str, style: &StyleDefaults) -> Document {
    let lines: Vec<&str> = content.split('\n').collect();
    let mut doc = Document::new();
    let mut i = 0;

    while i < lines.len() {
        let line = lines[i].trim();
        if line.is_empty() {
            doc.add_block(Block::BlankLine);
            i += 1;
            continue;
        }

        let (line, directive) = split_font_directive(line);
        let effective = directive.unwrap_or_else(|| style.clone());

        if is_table_start(line) {
            let mut table_lines = vec![line];
            let mut j = i + 1;
            while j < lines.len() && lines[j].trim().starts_with('|') {
                table_lines.push(lines[j].trim());
                j += 1;
            }
            log::debug!("Table block at line {} spans {} lines", i + 1, j - i);
            doc.add_block(Block::Table(build_table(&table_lines, &effective)));
            i = j;
            continue;
        }

        doc.add_block(classify_line(line, &effective));
        i += 1;
    }

    doc
}

/// Classify a single non-blank, non-table line.
fn classify_line(line: &str, style: &StyleDefaults) -> Block {
    for (prefix, level) in [("###", 3), ("##", 2), ("#", 1)] {
        if let Some(rest) = line.strip_prefix(prefix) {
            return Block::heading(level, format_inline(rest, style));
        }
    }

    if let Some(rest) = line.strip_prefix("- ").or_else(|| line.strip_prefix("* ")) {
        return Block::BulletItem {
            runs: format_inline(rest, style),
        };
    }

    if let Some(m) = numbered_regex().find(line) {
        return Block::NumberedItem {
            runs: format_inline(&line[m.end()..], style),
        };
    }

    Block::Paragraph {
        runs: format_inline(line, style),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::runs_text;

    fn parse(content: &str) -> Document {
        parse_document(content, &StyleDefaults::new("Calibri", 11))
    }

    #[test]
    fn test_heading_precedence() {
        let doc = parse("### Title");
        assert_eq!(doc.blocks.len(), 1);
        assert_eq!(doc.blocks[0].heading_level(), Some(3));
        assert_eq!(doc.blocks[0].plain_text(), "Title");

        let doc = parse("## Sub\n# Top");
        assert_eq!(doc.blocks[0].heading_level(), Some(2));
        assert_eq!(doc.blocks[1].heading_level(), Some(1));
    }

    #[test]
    fn test_heading_is_inline_formatted() {
        let doc = parse("# A **bold** title");
        let runs = doc.blocks[0].runs().unwrap();
        assert_eq!(runs.len(), 3);
        assert!(runs[1].bold);
    }

    #[test]
    fn test_numbered_item_discards_numeral() {
        let doc = parse("2. Second");
        match &doc.blocks[0] {
            Block::NumberedItem { runs } => assert_eq!(runs_text(runs), "Second"),
            other => panic!("expected numbered item, got {:?}", other),
        }
    }

    #[test]
    fn test_numeral_without_space_is_paragraph() {
        let doc = parse("2.5 percent");
        assert!(matches!(doc.blocks[0], Block::Paragraph { .. }));
    }

    #[test]
    fn test_bullets() {
        let doc = parse("- one\n* two\n-three");
        assert!(matches!(doc.blocks[0], Block::BulletItem { .. }));
        assert!(matches!(doc.blocks[1], Block::BulletItem { .. }));
        assert_eq!(doc.blocks[1].plain_text(), "two");
        assert!(matches!(doc.blocks[2], Block::Paragraph { .. }));
    }

    #[test]
    fn test_blank_lines_preserved() {
        let doc = parse("a\n\n  \nb");
        assert_eq!(doc.blocks.len(), 4);
        assert_eq!(doc.blocks[1], Block::BlankLine);
        assert_eq!(doc.blocks[2], Block::BlankLine);
    }

    #[test]
    fn test_table_consumes_group() {
        let doc = parse("intro\n|A|B|\n|--|--|\n|1|2|\n|3|4|5|\nafter");
        assert_eq!(doc.blocks.len(), 3);
        match &doc.blocks[1] {
            Block::Table(t) => {
                assert_eq!(t.headers, vec!["A", "B"]);
                assert_eq!(t.rows.len(), 2);
                assert_eq!(t.rows[1].plain_text(), "3\t4");
            }
            other => panic!("expected table, got {:?}", other),
        }
        assert_eq!(doc.blocks[2].plain_text(), "after");
    }

    #[test]
    fn test_line_font_directive_sets_block_style() {
        let doc = parse("[FONT:Georgia,18]## Styled heading");
        assert_eq!(doc.blocks[0].heading_level(), Some(2));
        let runs = doc.blocks[0].runs().unwrap();
        assert_eq!(runs[0].font_name, "Georgia");
        assert_eq!(runs[0].font_size, 18);
    }

    #[test]
    fn test_line_font_directive_applies_to_table() {
        let doc = parse("[FONT:Mono,9]|A|\n|-|\n|x|");
        match &doc.blocks[0] {
            Block::Table(t) => {
                assert_eq!(t.header_style, StyleDefaults::new("Mono", 9));
                assert_eq!(t.rows[0].cells[0].runs[0].font_name, "Mono");
            }
            other => panic!("expected table, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_content() {
        let doc = parse("");
        assert_eq!(doc.blocks, vec![Block::BlankLine]);
    }
}
