//! Error types for officemark library.

use std::io;
use thiserror::Error;

/// Result type alias for officemark operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while generating documents.
///
/// Malformed markup is never reported here: the parsers degrade gracefully
/// and always return a model. Errors come from the edges (I/O, network,
/// serialization).
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A remote image could not be downloaded.
    #[error("Image fetch error: {0}")]
    ImageFetch(String),

    /// An explicit image dimension could not be parsed.
    #[error("Invalid dimension: {0}")]
    InvalidDimension(String),

    /// A store object name escapes the store root or is otherwise unusable.
    #[error("Invalid object name: {0}")]
    InvalidObjectName(String),

    /// Error during rendering (markup, text, JSON).
    #[error("Rendering error: {0}")]
    Render(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

#[cfg(feature = "remote-images")]
impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::ImageFetch(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Render(format!("JSON serialization error: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InvalidObjectName("../etc/passwd".to_string());
        assert_eq!(err.to_string(), "Invalid object name: ../etc/passwd");

        let err = Error::ImageFetch("timed out".to_string());
        assert_eq!(err.to_string(), "Image fetch error: timed out");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
