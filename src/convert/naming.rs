//! Output kinds and file/object naming.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of office file a conversion produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputKind {
    /// Word-processing document from block markup
    Document,
    /// Spreadsheet from sheet markup
    Workbook,
    /// Slide deck from HTML
    Presentation,
    /// Spreadsheet holding query results
    QueryExport,
}

impl OutputKind {
    /// All kinds.
    pub const ALL: [OutputKind; 4] = [
        OutputKind::Document,
        OutputKind::Workbook,
        OutputKind::Presentation,
        OutputKind::QueryExport,
    ];

    /// File extension without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            OutputKind::Document => "docx",
            OutputKind::Workbook | OutputKind::QueryExport => "xlsx",
            OutputKind::Presentation => "pptx",
        }
    }

    /// MIME type of the produced file.
    pub fn mime_type(self) -> &'static str {
        match self {
            OutputKind::Document => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
            OutputKind::Workbook | OutputKind::QueryExport => {
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
            }
            OutputKind::Presentation => {
                "application/vnd.openxmlformats-officedocument.presentationml.presentation"
            }
        }
    }

    /// Filename stem used when the caller gives no name.
    pub fn default_stem(self) -> &'static str {
        match self {
            OutputKind::Document => "document",
            OutputKind::Workbook => "excel",
            OutputKind::Presentation => "presentation",
            OutputKind::QueryExport => "sql_results",
        }
    }
}

impl fmt::Display for OutputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OutputKind::Document => "document",
            OutputKind::Workbook => "workbook",
            OutputKind::Presentation => "presentation",
            OutputKind::QueryExport => "query_export",
        };
        f.write_str(name)
    }
}

/// Pick the filename for a generated file.
///
/// An absent or empty `requested` name becomes `<stem>_<YYYYMMDD_HHMMSS>`.
/// The kind's extension is appended unless the name already ends with it.
pub fn generate_filename(kind: OutputKind, requested: Option<&str>, now: NaiveDateTime) -> String {
    let mut filename = match requested.filter(|name| !name.is_empty()) {
        Some(name) => name.to_string(),
        None => format!("{}_{}", kind.default_stem(), now.format("%Y%m%d_%H%M%S")),
    };

    let suffix = format!(".{}", kind.extension());
    if !filename.ends_with(&suffix) {
        filename.push_str(&suffix);
    }
    filename
}

/// Date-partitioned object name: `YYYY/MM/DD/filename`.
pub fn object_name(filename: &str, date: NaiveDate) -> String {
    format!("{}/{}", date.format("%Y/%m/%d"), filename)
}
