//! # officemark
//!
//! Markup-to-office-document engine for Rust.
//!
//! This library turns a lightweight markup dialect (headings, emphasis,
//! lists, font directives, pipe tables) and simple HTML slide markup into
//! structured document models for word-processing, spreadsheet and
//! slide-deck output.
//!
//! ## Quick Start
//!
//! ```
//! use officemark::{render, Officemark};
//!
//! let doc = Officemark::new()
//!     .with_font("Arial")
//!     .document("# Quarterly report\n\nSales were **up** this quarter.");
//!
//! assert!(doc.is_finalized());
//! println!("{}", render::to_text(&doc));
//! ```
//!
//! ## Features
//!
//! - **Word-processing markup**: headings, bullet and numbered items, pipe tables
//! - **Inline styling**: `**bold**`, `*italic*`, `[FONT:name,size]` and `[SIZE:n]` spans
//! - **Spreadsheet markup**: sheets per `#` heading, `[BOLD]`/`[COLOR:..]`/`[ALIGN:..]` cell tags
//! - **Slide decks**: HTML mapped to positioned text, list, image and table shapes
//! - **Query exports**: result sets laid out under their query text
//! - **Parallel batches**: Uses Rayon for many inputs at once

pub mod convert;
pub mod error;
pub mod export;
pub mod model;
pub mod parser;
pub mod render;
pub mod store;

// Re-export commonly used types
pub use convert::{convert, convert_batch, generate_filename, object_name, Generated, OutputKind};
pub use error::{Error, Result};
pub use export::{layout_query_results, QueryResult};
pub use model::{
    Alignment, Block, Cell, CellStyle, CellValue, Document, Presentation, Run, Shape, Sheet,
    Slide, StyleDefaults, Table, Workbook,
};
pub use parser::{ImageFetcher, OfflineFetcher, ParseOptions};
pub use render::{DocumentStats, JsonFormat};
pub use store::DatedStore;

/// Parse word-processing markup with default options.
///
/// The returned document is finalized.
///
/// # Example
///
/// ```
/// use officemark::parse_document;
///
/// let doc = parse_document("# Title\n- item");
/// assert_eq!(doc.block_count(), 2);
/// ```
pub fn parse_document(content: &str) -> Document {
    Officemark::new().document(content)
}

/// Parse spreadsheet markup with default options.
///
/// # Example
///
/// ```
/// use officemark::parse_workbook;
///
/// let wb = parse_workbook("# Sales\n[BOLD]Total[/BOLD]");
/// assert_eq!(wb.sheet_names(), vec!["Sales"]);
/// ```
pub fn parse_workbook(content: &str) -> Workbook {
    Officemark::new().workbook(content)
}

/// Map slide markup with default options, downloading remote images.
///
/// # Example
///
/// ```no_run
/// use officemark::parse_slides;
///
/// let deck = parse_slides(r#"<div class="slide"><h1>Hello</h1></div>"#);
/// assert_eq!(deck.slide_count(), 1);
/// ```
pub fn parse_slides(html: &str) -> Presentation {
    Officemark::new().presentation(html)
}

/// Convert markup to plain text.
///
/// # Example
///
/// ```
/// use officemark::{extract_text, OutputKind};
///
/// let text = extract_text(OutputKind::Document, "Some **bold** words").unwrap();
/// assert_eq!(text, "Some bold words");
/// ```
pub fn extract_text(kind: OutputKind, content: &str) -> Result<String> {
    Ok(Officemark::new().offline().convert(kind, content)?.to_text())
}

/// Convert markup to its model's JSON form.
///
/// # Example
///
/// ```
/// use officemark::{to_json, JsonFormat, OutputKind};
///
/// let json = to_json(OutputKind::Workbook, "a", JsonFormat::Compact).unwrap();
/// assert!(json.contains("Sheet1"));
/// ```
pub fn to_json(kind: OutputKind, content: &str, format: JsonFormat) -> Result<String> {
    Officemark::new().offline().convert(kind, content)?.to_json(format)
}

/// Builder for parsing and converting markup.
///
/// # Example
///
/// ```
/// use officemark::{Officemark, OfflineFetcher};
///
/// let deck = Officemark::new()
///     .with_size(14)
///     .with_slide_marker("page")
///     .with_fetcher(OfflineFetcher)
///     .presentation(r#"<div class="page"><h2>Intro</h2><p>Hi</p></div>"#);
/// assert_eq!(deck.slides[0].title.as_ref().unwrap().font_size, 18);
/// ```
pub struct Officemark {
    options: ParseOptions,
    fetcher: Option<Box<dyn ImageFetcher>>,
}

impl Officemark {
    /// Create a new builder with default options.
    pub fn new() -> Self {
        Self {
            options: ParseOptions::default(),
            fetcher: None,
        }
    }

    /// Use the given parse options.
    pub fn with_options(mut self, options: ParseOptions) -> Self {
        self.options = options;
        self
    }

    /// Set the default font family.
    pub fn with_font(mut self, name: impl Into<String>) -> Self {
        self.options = self.options.with_font(name);
        self
    }

    /// Set the default font size.
    pub fn with_size(mut self, size: u32) -> Self {
        self.options = self.options.with_size(size);
        self
    }

    /// Set the CSS class marking slides.
    pub fn with_slide_marker(mut self, class: impl Into<String>) -> Self {
        self.options = self.options.with_slide_marker(class);
        self
    }

    /// Set the remote image timeout.
    pub fn with_image_timeout(mut self, timeout: std::time::Duration) -> Self {
        self.options = self.options.with_image_timeout(timeout);
        self
    }

    /// Disable parallel batch processing.
    pub fn sequential(mut self) -> Self {
        self.options = self.options.sequential();
        self
    }

    /// Fetch remote images with `fetcher`.
    pub fn with_fetcher(mut self, fetcher: impl ImageFetcher + 'static) -> Self {
        self.fetcher = Some(Box::new(fetcher));
        self
    }

    /// Never download remote images; they are left out of slides.
    pub fn offline(self) -> Self {
        self.with_fetcher(OfflineFetcher)
    }

    /// The options in effect.
    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Parse word-processing markup into a finalized document.
    pub fn document(&self, content: &str) -> Document {
        parser::parse_document(content, &self.options.style()).finalize()
    }

    /// Parse spreadsheet markup.
    pub fn workbook(&self, content: &str) -> Workbook {
        parser::parse_workbook(content, &self.options.style())
    }

    /// Map slide markup.
    pub fn presentation(&self, html: &str) -> Presentation {
        self.with_active_fetcher(|fetcher| parser::map_slides(html, &self.options, fetcher))
    }

    /// Convert markup of the given kind.
    pub fn convert(&self, kind: OutputKind, content: &str) -> Result<Generated> {
        self.with_active_fetcher(|fetcher| convert::convert(kind, content, &self.options, fetcher))
    }

    /// Convert many inputs, keeping their order.
    pub fn convert_batch<S: AsRef<str> + Sync>(
        &self,
        inputs: &[(OutputKind, S)],
    ) -> Vec<Result<Generated>> {
        self.with_active_fetcher(|fetcher| convert::convert_batch(inputs, &self.options, fetcher))
    }

    fn with_active_fetcher<T>(&self, f: impl FnOnce(&dyn ImageFetcher) -> T) -> T {
        match &self.fetcher {
            Some(fetcher) => f(&**fetcher),
            None => {
                let fetcher = parser::default_fetcher(self.options.image_timeout);
                f(&*fetcher)
            }
        }
    }
}

impl Default for Officemark {
    fn default() -> Self {
        Self::new()
    }
}
