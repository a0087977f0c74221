//! Block-level types.

use super::run::{runs_text, Run};
use super::Table;
use serde::{Deserialize, Serialize};

/// One structural unit of a word-processing document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    /// A heading (level 1-3)
    Heading {
        /// Heading level
        level: u8,
        /// Styled content
        runs: Vec<Run>,
    },

    /// A regular paragraph
    Paragraph {
        /// Styled content
        runs: Vec<Run>,
    },

    /// An item of a bulleted list
    BulletItem {
        /// Styled content
        runs: Vec<Run>,
    },

    /// An item of a numbered list; the renderer supplies the ordinal
    NumberedItem {
        /// Styled content
        runs: Vec<Run>,
    },

    /// A table
    Table(Table),

    /// An empty line
    BlankLine,
}

impl Block {
    /// Create a heading block, clamping the level to 1-3.
    pub fn heading(level: u8, runs: Vec<Run>) -> Self {
        Block::Heading {
            level: level.clamp(1, 3),
            runs,
        }
    }

    /// The runs of a text block, `None` for tables and blank lines.
    pub fn runs(&self) -> Option<&[Run]> {
        match self {
            Block::Heading { runs, .. }
            | Block::Paragraph { runs }
            | Block::BulletItem { runs }
            | Block::NumberedItem { runs } => Some(runs),
            Block::Table(_) | Block::BlankLine => None,
        }
    }

    /// Get plain text content of the block.
    pub fn plain_text(&self) -> String {
        match self {
            Block::Table(t) => t.plain_text(),
            Block::BlankLine => String::new(),
            _ => self.runs().map(runs_text).unwrap_or_default(),
        }
    }

    /// Heading level, if this is a heading.
    pub fn heading_level(&self) -> Option<u8> {
        match self {
            Block::Heading { level, .. } => Some(*level),
            _ => None,
        }
    }

    /// Check if this block is a list item.
    pub fn is_list_item(&self) -> bool {
        matches!(self, Block::BulletItem { .. } | Block::NumberedItem { .. })
    }

    /// Check if this block is a table.
    pub fn is_table(&self) -> bool {
        matches!(self, Block::Table(_))
    }
}
