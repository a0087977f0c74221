//! Document-level types.

use super::{Alignment, Block};
use serde::{Deserialize, Serialize};

/// A word-processing document: an ordered sequence of blocks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Content blocks in source order
    pub blocks: Vec<Block>,

    /// Footer added by [`Document::finalize`]
    pub footer: Option<Footer>,
}

impl Document {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a block to the document.
    pub fn add_block(&mut self, block: Block) {
        self.blocks.push(block);
    }

    /// Attach the page-number footer. Calling it twice has no further effect.
    pub fn finalize(mut self) -> Self {
        if self.footer.is_none() {
            self.footer = Some(Footer::PageNumber {
                alignment: Alignment::Center,
            });
        }
        self
    }

    /// Check if the document has been finalized.
    pub fn is_finalized(&self) -> bool {
        self.footer.is_some()
    }

    /// Get the number of blocks.
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Check if the document has any blocks.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Get plain text content of the entire document.
    pub fn plain_text(&self) -> String {
        self.blocks
            .iter()
            .map(|block| block.plain_text())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Page footer content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Footer {
    /// A `PAGE` field showing the current page number
    PageNumber {
        /// Footer paragraph alignment
        alignment: Alignment,
    },
}
