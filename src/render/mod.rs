//! Rendering module for turning generated models into text formats.

mod json;
mod markup;
mod result;
mod text;

pub use json::{to_json, JsonFormat};
pub use markup::{to_markup, to_markup_with_stats, MarkupRenderer};
pub use result::{DocumentStats, RenderResult};
pub use text::{to_text, PlainText};
