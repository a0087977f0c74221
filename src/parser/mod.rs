//! Markup parsing module.
//!
//! Every parser here is infallible: malformed markup degrades to literal
//! text or plain paragraphs instead of producing an error.

mod cell;
mod document;
mod image;
mod inline;
mod options;
mod slides;
mod table;
mod workbook;

pub use cell::{format_cell, scan_directives, DirectiveKind, FormattingDirective};
pub use document::parse_document;
#[cfg(feature = "remote-images")]
pub use image::HttpImageFetcher;
pub use image::{default_fetcher, ImageFetcher, OfflineFetcher};
pub use inline::{format_inline, split_font_directive};
pub use options::{ParseOptions, DEFAULT_FONT_NAME, DEFAULT_FONT_SIZE};
pub use slides::{map_slides, DEFAULT_IMAGE_HEIGHT, DEFAULT_IMAGE_WIDTH, MAX_IMAGE_DIMENSION};
pub use table::{build_table, is_table_start, split_row};
pub use workbook::{parse_workbook, TABLE_COLUMN_WIDTH};
