//! Rendering result with statistics.

use crate::model::{Block, Document, Presentation, Shape, Workbook};
use serde::{Deserialize, Serialize};

/// Result of rendering a document, including content and statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderResult {
    /// The rendered content
    pub content: String,

    /// Content statistics
    pub stats: DocumentStats,
}

impl RenderResult {
    /// Create a new render result.
    pub fn new(content: String, stats: DocumentStats) -> Self {
        Self { content, stats }
    }

    /// Get the content length in bytes.
    pub fn content_len(&self) -> usize {
        self.content.len()
    }
}

/// Counters describing a generated model.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentStats {
    /// Number of headings
    pub heading_count: u32,

    /// Number of paragraphs
    pub paragraph_count: u32,

    /// Number of bullet and numbered items
    pub list_item_count: u32,

    /// Number of tables (document tables and slide grids)
    pub table_count: u32,

    /// Number of data rows across all tables
    pub table_row_count: u32,

    /// Number of blank lines
    pub blank_line_count: u32,

    /// Number of sheets
    pub sheet_count: u32,

    /// Number of written cells
    pub cell_count: u32,

    /// Number of slides
    pub slide_count: u32,

    /// Number of slide shapes
    pub shape_count: u32,

    /// Number of images
    pub image_count: u32,

    /// Approximate word count (whitespace-separated tokens)
    pub word_count: u32,

    /// Character count (excluding whitespace)
    pub char_count: u32,
}

impl DocumentStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Statistics of a word-processing document.
    pub fn from_document(doc: &Document) -> Self {
        let mut stats = Self::new();
        for block in &doc.blocks {
            stats.add_block(block);
        }
        stats.count_text(&doc.plain_text());
        stats
    }

    /// Statistics of a workbook.
    pub fn from_workbook(workbook: &Workbook) -> Self {
        let mut stats = Self::new();
        for sheet in &workbook.sheets {
            stats.sheet_count += 1;
            stats.cell_count += sheet.cells.len() as u32;
            stats.count_text(&sheet.plain_text());
        }
        stats
    }

    /// Statistics of a slide deck.
    pub fn from_presentation(deck: &Presentation) -> Self {
        let mut stats = Self::new();
        for slide in &deck.slides {
            stats.slide_count += 1;
            if slide.title.is_some() {
                stats.heading_count += 1;
            }
            for shape in &slide.shapes {
                stats.add_shape(shape);
            }
        }
        stats.count_text(&deck.plain_text());
        stats
    }

    /// Count one document block.
    pub fn add_block(&mut self, block: &Block) {
        match block {
            Block::Heading { .. } => self.heading_count += 1,
            Block::Paragraph { .. } => self.paragraph_count += 1,
            Block::BulletItem { .. } | Block::NumberedItem { .. } => self.list_item_count += 1,
            Block::Table(table) => {
                self.table_count += 1;
                self.table_row_count += table.row_count() as u32;
            }
            Block::BlankLine => self.blank_line_count += 1,
        }
    }

    /// Count one slide shape.
    pub fn add_shape(&mut self, shape: &Shape) {
        self.shape_count += 1;
        match shape {
            Shape::TextBlock(_) => self.paragraph_count += 1,
            Shape::List(list) => self.list_item_count += list.items.len() as u32,
            Shape::Image(_) => self.image_count += 1,
            Shape::Table(grid) => {
                self.table_count += 1;
                self.table_row_count += grid.rows as u32;
            }
        }
    }

    /// Add word and character counts from text.
    pub fn count_text(&mut self, text: &str) {
        self.word_count += text.split_whitespace().count() as u32;
        self.char_count += text.chars().filter(|c| !c.is_whitespace()).count() as u32;
    }

    /// Merge another stats instance into this one.
    pub fn merge(&mut self, other: &DocumentStats) {
        self.heading_count += other.heading_count;
        self.paragraph_count += other.paragraph_count;
        self.list_item_count += other.list_item_count;
        self.table_count += other.table_count;
        self.table_row_count += other.table_row_count;
        self.blank_line_count += other.blank_line_count;
        self.sheet_count += other.sheet_count;
        self.cell_count += other.cell_count;
        self.slide_count += other.slide_count;
        self.shape_count += other.shape_count;
        self.image_count += other.image_count;
        self.word_count += other.word_count;
        self.char_count += other.char_count;
    }
}
