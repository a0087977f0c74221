//! Document model types for generated office content.
//!
//! This module defines the in-memory representation produced by the parsers
//! and consumed by serializers. The models are request-scoped plain data:
//! built once, handed on, then dropped.

mod block;
mod document;
mod run;
mod slide;
mod table;
mod workbook;

pub use block::Block;
pub use document::{Document, Footer};
pub use run::{runs_text, Alignment, Run, StyleDefaults};
pub use slide::{
    Emu, Frame, GridCell, GridTable, ImageShape, ImageSource, ListBlock, Presentation, Rgb, Shape,
    Slide, TextBlock, EMU_PER_INCH,
};
pub use table::{Border, BorderStyle, Table, TableCell, TableRow};
pub use workbook::{column_letter, Cell, CellStyle, CellValue, Sheet, Workbook};
