//! Conversion entry points: markup in, generated model out.
//!
//! # Example
//!
//! ```
//! use officemark::convert::{convert, Generated, OutputKind};
//! use officemark::parser::{OfflineFetcher, ParseOptions};
//!
//! let generated = convert(
//!     OutputKind::Document,
//!     "# Report\n- first point",
//!     &ParseOptions::default(),
//!     &OfflineFetcher,
//! )?;
//! assert!(matches!(generated, Generated::Document(_)));
//! # Ok::<(), officemark::Error>(())
//! ```

mod naming;

pub use naming::{generate_filename, object_name, OutputKind};

use crate::error::{Error, Result};
use crate::model::{Document, Presentation, Workbook};
use crate::parser::{map_slides, parse_document, parse_workbook, ImageFetcher, ParseOptions};
use crate::render::{to_json, to_text, DocumentStats, JsonFormat};
use rayon::prelude::*;
use serde::Serialize;

/// Inputs at or above this count are converted in parallel.
pub const PARALLEL_THRESHOLD: usize = 2;

/// A generated model, ready for a serializer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "model", rename_all = "snake_case")]
pub enum Generated {
    /// A finalized word-processing document
    Document(Document),
    /// A workbook
    Workbook(Workbook),
    /// A slide deck
    Presentation(Presentation),
}

impl Generated {
    /// The kind of file this model becomes.
    pub fn kind(&self) -> OutputKind {
        match self {
            Generated::Document(_) => OutputKind::Document,
            Generated::Workbook(_) => OutputKind::Workbook,
            Generated::Presentation(_) => OutputKind::Presentation,
        }
    }

    /// Content statistics.
    pub fn stats(&self) -> DocumentStats {
        match self {
            Generated::Document(doc) => DocumentStats::from_document(doc),
            Generated::Workbook(wb) => DocumentStats::from_workbook(wb),
            Generated::Presentation(deck) => DocumentStats::from_presentation(deck),
        }
    }

    /// Plain text content.
    pub fn to_text(&self) -> String {
        match self {
            Generated::Document(doc) => to_text(doc),
            Generated::Workbook(wb) => to_text(wb),
            Generated::Presentation(deck) => to_text(deck),
        }
    }

    /// JSON form of the model.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        to_json(self, format)
    }
}

/// Convert markup of the given kind.
///
/// Documents come back finalized. Query exports are built from result sets
/// with [`crate::export::layout_query_results`], not from markup, and are
/// rejected here.
pub fn convert(
    kind: OutputKind,
    content: &str,
    options: &ParseOptions,
    fetcher: &dyn ImageFetcher,
) -> Result<Generated> {
    log::debug!("Converting {} bytes of {} markup", content.len(), kind);
    match kind {
        OutputKind::Document => Ok(Generated::Document(
            parse_document(content, &options.style()).finalize(),
        )),
        OutputKind::Workbook => Ok(Generated::Workbook(parse_workbook(content, &options.style()))),
        OutputKind::Presentation => Ok(Generated::Presentation(map_slides(content, options, fetcher))),
        OutputKind::QueryExport => Err(Error::Other(
            "query exports are built from query results, not markup".to_string(),
        )),
    }
}

/// Convert many inputs, keeping their order in the output.
///
/// Runs on the rayon pool when `options.parallel` is set and there is more
/// than one input.
pub fn convert_batch<S>(
    inputs: &[(OutputKind, S)],
    options: &ParseOptions,
    fetcher: &dyn ImageFetcher,
) -> Vec<Result<Generated>>
where
    S: AsRef<str> + Sync,
{
    let run = |(kind, content): &(OutputKind, S)| convert(*kind, content.as_ref(), options, fetcher);

    if options.parallel && inputs.len() >= PARALLEL_THRESHOLD {
        inputs.par_iter().map(run).collect()
    } else {
        inputs.iter().map(run).collect()
    }
}
