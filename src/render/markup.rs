//! Markup rendering: turns a document back into the source dialect.
//!
//! Parsing the output again yields the same block sequence for documents
//! produced by the block parser.

use crate::model::{Block, Document, Run, StyleDefaults, Table};

use super::{DocumentStats, RenderResult};

/// Convert a document to markup.
pub fn to_markup(doc: &Document, defaults: &StyleDefaults) -> String {
    MarkupRenderer::new(defaults.clone()).render(doc)
}

/// Convert a document to markup with statistics.
pub fn to_markup_with_stats(doc: &Document, defaults: &StyleDefaults) -> RenderResult {
    MarkupRenderer::new(defaults.clone()).render_with_stats(doc)
}

/// Markup renderer.
pub struct MarkupRenderer {
    defaults: StyleDefaults,
    stats: DocumentStats,
    /// Ordinal of the next numbered item; reset by any other block.
    next_number: u32,
}

impl MarkupRenderer {
    /// Create a renderer for documents parsed with `defaults`.
    pub fn new(defaults: StyleDefaults) -> Self {
        Self {
            defaults,
            stats: DocumentStats::new(),
            next_number: 1,
        }
    }

    /// Render a document to markup.
    pub fn render(mut self, doc: &Document) -> String {
        self.render_internal(doc)
    }

    /// Render a document to markup with statistics.
    pub fn render_with_stats(mut self, doc: &Document) -> RenderResult {
        let content = self.render_internal(doc);
        self.stats.count_text(&doc.plain_text());
        RenderResult::new(content, self.stats)
    }

    fn render_internal(&mut self, doc: &Document) -> String {
        let lines: Vec<String> = doc.blocks.iter().map(|b| self.render_block(b)).collect();
        lines.join("\n")
    }

    fn render_block(&mut self, block: &Block) -> String {
        self.stats.add_block(block);
        if !matches!(block, Block::NumberedItem { .. }) {
            self.next_number = 1;
        }

        let Some(runs) = block.runs() else {
            return match block {
                Block::Table(table) => self.render_table(table),
                _ => String::new(),
            };
        };

        // A line-level font directive precedes the block marker.
        let (prefix, base) = match line_style(runs) {
            Some(style) if style != self.defaults => (font_open(&style), style),
            _ => (String::new(), self.defaults.clone()),
        };
        let marker = match block {
            Block::Heading { level, .. } => format!("{} ", "#".repeat(*level as usize)),
            Block::BulletItem { .. } => String::from("- "),
            Block::NumberedItem { .. } => {
                let number = self.next_number;
                self.next_number += 1;
                format!("{}. ", number)
            }
            _ => String::new(),
        };
        format!("{}{}{}", prefix, marker, self.render_runs(runs, &base))
    }

    fn render_table(&self, table: &Table) -> String {
        let style = &table.header_style;
        let mut output = String::new();
        if *style != self.defaults {
            output.push_str(&font_open(style));
        }

        output.push_str(&pipe_row(table.headers.iter().map(String::as_str)));
        output.push('\n');
        output.push_str(&pipe_row(table.headers.iter().map(|_| "---")));

        for row in &table.rows {
            let cells: Vec<String> = row
                .cells
                .iter()
                .map(|cell| self.render_runs(&cell.runs, style))
                .collect();
            output.push('\n');
            output.push_str(&pipe_row(cells.iter().map(String::as_str)));
        }
        output
    }

    /// Render runs relative to the style in effect for their block.
    fn render_runs(&self, runs: &[Run], base: &StyleDefaults) -> String {
        runs.iter().map(|run| render_run(run, base)).collect()
    }
}

/// The font shared by every run of a block, if there is one.
fn line_style(runs: &[Run]) -> Option<StyleDefaults> {
    let first = runs.first()?;
    runs.iter()
        .all(|r| r.font_name == first.font_name && r.font_size == first.font_size)
        .then(|| first.style())
}

fn render_run(run: &Run, base: &StyleDefaults) -> String {
    let text = match (run.bold, run.italic) {
        (true, true) => format!("***{}***", run.text),
        (true, false) => format!("**{}**", run.text),
        (false, true) => format!("*{}*", run.text),
        (false, false) => run.text.clone(),
    };

    if run.font_name != base.font_name {
        format!("{}{}[/FONT]", font_open(&run.style()), text)
    } else if run.font_size != base.font_size {
        format!("[SIZE:{}]{}[/SIZE]", run.font_size, text)
    } else {
        text
    }
}

fn font_open(style: &StyleDefaults) -> String {
    format!("[FONT:{},{}]", style.font_name, style.font_size)
}

fn pipe_row<'a>(cells: impl Iterator<Item = &'a str>) -> String {
    let mut row = String::from("|");
    for cell in cells {
        row.push_str(cell);
        row.push('|');
    }
    row
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_document;

    fn defaults() -> StyleDefaults {
        StyleDefaults::new("Calibri", 11)
    }

    #[test]
    fn test_render_blocks() {
        let source = "# Title\n\n- one\n1. first\n2. second\nplain **bold** text";
        let doc = parse_document(source, &defaults());
        assert_eq!(to_markup(&doc, &defaults()), source);
    }

    #[test]
    fn test_numbering_restarts_after_other_block() {
        let doc = parse_document("7. a\n9. b\n\n3. c", &defaults());
        assert_eq!(to_markup(&doc, &defaults()), "1. a\n2. b\n\n1. c");
    }

    #[test]
    fn test_style_wrappers() {
        let base = defaults();
        assert_eq!(render_run(&Run::plain("x", &base.with_size(16)), &base), "[SIZE:16]x[/SIZE]");
        assert_eq!(
            render_run(&Run::italic("y", &StyleDefaults::new("Mono", 9)), &base),
            "[FONT:Mono,9]*y*[/FONT]"
        );
    }

    #[test]
    fn test_table_with_block_font() {
        let source = "[FONT:Mono,9]|A|B|\n|-|-|\n|x||";
        let doc = parse_document(source, &defaults());
        let markup = to_markup(&doc, &defaults());
        assert_eq!(markup, "[FONT:Mono,9]|A|B|\n|---|---|\n|x||");
        assert_eq!(parse_document(&markup, &defaults()).blocks, doc.blocks);
    }

    #[test]
    fn test_line_font_directive_round_trip() {
        let source = "[FONT:Georgia,14]## A **b** c\n[FONT:Mono,9]- item";
        let doc = parse_document(source, &defaults());
        let markup = to_markup(&doc, &defaults());
        assert_eq!(markup, "[FONT:Georgia,14]## A **b** c\n[FONT:Mono,9]- item");
        assert_eq!(parse_document(&markup, &defaults()).blocks, doc.blocks);
    }

    #[test]
    fn test_render_with_stats() {
        let doc = parse_document("# H\n- a\n|A|\n|-|\n|1|", &defaults());
        let result = to_markup_with_stats(&doc, &defaults());
        assert_eq!(result.stats.heading_count, 1);
        assert_eq!(result.stats.list_item_count, 1);
        assert_eq!(result.stats.table_count, 1);
        assert!(result.content.starts_with("# H"));
    }
}
