//! Error types for amboss-extract.

use std::io;
use thiserror::Error;

/// Result type alias for amboss-extract operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while extracting or rendering an article.
///
/// Recoverable problems found while walking the page (unknown nodes,
/// images without a source) are not errors; they are reported as
/// [`ExtractionWarning`](crate::extract::ExtractionWarning)s.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The page has no recognizable article content container.
    #[error("No article content found in {0}")]
    ContentNotFound(String),

    /// The requested output format is not recognized.
    #[error("Unsupported output format: {0}")]
    UnsupportedFormat(String),

    /// The source identifier could not be interpreted.
    #[error("Invalid source identifier: {0}")]
    InvalidSource(String),

    /// Error during rendering (JSON serialization).
    #[error("Rendering error: {0}")]
    Render(String),
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
        let err = Error::ContentNotFound("page.html".to_string());
        assert_eq!(err.to_string(), "No article content found in page.html");

        let err = Error::UnsupportedFormat("pdf".to_string());
        assert_eq!(err.to_string(), "Unsupported output format: pdf");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
