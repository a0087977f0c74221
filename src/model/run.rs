//! Run-level types shared by every output format.

use serde::{Deserialize, Serialize};

/// A contiguous fragment of text with a single style.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Run {
    /// The text content
    pub text: String,

    /// Bold text
    pub bold: bool,

    /// Italic text
    pub italic: bool,

    /// Font family name
    pub font_name: String,

    /// Font size in points
    pub font_size: u32,
}

impl Run {
    /// Create a plain run in the given style.
    pub fn plain(text: impl Into<String>, style: &StyleDefaults) -> Self {
        Self {
            text: text.into(),
            bold: false,
            italic: false,
            font_name: style.font_name.clone(),
            font_size: style.font_size,
        }
    }

    /// Create a bold run in the given style.
    pub fn bold(text: impl Into<String>, style: &StyleDefaults) -> Self {
        Self {
            bold: true,
            ..Self::plain(text, style)
        }
    }

    /// Create an italic run in the given style.
    pub fn italic(text: impl Into<String>, style: &StyleDefaults) -> Self {
        Self {
            italic: true,
            ..Self::plain(text, style)
        }
    }

    /// Check if this run is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Check if any emphasis is applied.
    pub fn has_emphasis(&self) -> bool {
        self.bold || self.italic
    }

    /// The font/size pair of this run.
    pub fn style(&self) -> StyleDefaults {
        StyleDefaults::new(self.font_name.clone(), self.font_size)
    }
}

/// Concatenate the text of a run sequence.
pub fn runs_text(runs: &[Run]) -> String {
    runs.iter().map(|r| r.text.as_str()).collect()
}

/// Font name and size applied to text that carries no explicit override.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StyleDefaults {
    /// Font family name
    pub font_name: String,

    /// Font size in points
    pub font_size: u32,
}

impl StyleDefaults {
    /// Create a style from a font name and size.
    pub fn new(font_name: impl Into<String>, font_size: u32) -> Self {
        Self {
            font_name: font_name.into(),
            font_size,
        }
    }

    /// Same font, different size.
    pub fn with_size(&self, font_size: u32) -> Self {
        Self {
            font_name: self.font_name.clone(),
            font_size,
        }
    }
}

impl Default for StyleDefaults {
    fn default() -> Self {
        Self::new("Calibri", 11)
    }
}

/// Horizontal alignment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    /// Left alignment (default)
    #[default]
    Left,
    /// Center alignment
    Center,
    /// Right alignment
    Right,
}

impl Alignment {
    /// Parse an alignment keyword (`left`, `center`, `right`).
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "left" => Some(Alignment::Left),
            "center" => Some(Alignment::Center),
            "right" => Some(Alignment::Right),
            _ => None,
        }
    }

    /// The keyword form of this alignment.
    pub fn keyword(self) -> &'static str {
        match self {
            Alignment::Left => "left",
            Alignment::Center => "center",
            Alignment::Right => "right",
        }
    }
}
