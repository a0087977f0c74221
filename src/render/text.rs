//! Plain text rendering.

use crate::model::{Document, Presentation, Workbook};

/// Models that can be flattened to plain text.
pub trait PlainText {
    /// Text content with all styling dropped.
    fn plain_text(&self) -> String;
}

impl PlainText for Document {
    fn plain_text(&self) -> String {
        Document::plain_text(self)
    }
}

impl PlainText for Workbook {
    fn plain_text(&self) -> String {
        self.sheets
            .iter()
            .map(|sheet| format!("[{}]\n{}", sheet.name, sheet.plain_text()))
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

impl PlainText for Presentation {
    fn plain_text(&self) -> String {
        Presentation::plain_text(self)
    }
}

/// Convert a model to plain text.
pub fn to_text<T: PlainText + ?Sized>(value: &T) -> String {
    value.plain_text().trim().to_string()
}
