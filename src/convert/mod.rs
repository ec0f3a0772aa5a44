//! One-call conversion from saved article HTML to an output format.
//!
//! Chains extraction and rendering and bundles the output with metadata,
//! statistics and extraction warnings.
//!
//! # Example
//!
//! ```no_run
//! use amboss_extract::convert::{convert_file, ConvertOptions};
//! use amboss_extract::OutputFormat;
//!
//! fn main() -> amboss_extract::Result<()> {
//!     let options = ConvertOptions::new().with_format(OutputFormat::Markdown);
//!     let result = convert_file("saved/appendicitis.html", &options)?;
//!     println!("{}", result.content);
//!     Ok(())
//! }
//! ```

use std::fs;
use std::path::Path;

use crate::error::Result;
use crate::extract::{extract_with_options, ExtractOptions, ExtractionWarning};
use crate::model::Metadata;
use crate::render::{render_with_options, ExtractionStats, OutputFormat, RenderOptions};

/// Options for document conversion.
#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    /// Extraction options
    pub extract: ExtractOptions,

    /// Rendering options
    pub render: RenderOptions,

    /// Output format
    pub output_format: OutputFormat,
}

impl ConvertOptions {
    /// Create new conversion options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set extraction options.
    pub fn with_extract_options(mut self, options: ExtractOptions) -> Self {
        self.extract = options;
        self
    }

    /// Set rendering options.
    pub fn with_render_options(mut self, options: RenderOptions) -> Self {
        self.render = options;
        self
    }

    /// Set output format.
    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.output_format = format;
        self
    }
}

/// Result of document conversion.
#[derive(Debug, Clone)]
pub struct ConvertResult {
    /// Converted content
    pub content: String,

    /// Article metadata
    pub metadata: Metadata,

    /// Block and text statistics
    pub stats: ExtractionStats,

    /// Non-fatal problems found while extracting
    pub warnings: Vec<ExtractionWarning>,

    /// MIME type of the output
    pub mime_type: &'static str,
}

impl ConvertResult {
    /// Get content length in bytes.
    pub fn content_len(&self) -> usize {
        self.content.len()
    }

    /// Suggested output filename for position `index` in a batch.
    pub fn suggested_filename(&self, index: usize, format: OutputFormat) -> String {
        self.metadata.suggested_filename(index, format.extension())
    }
}

/// Convert an HTML string.
///
/// `source_id` is the URL or path the HTML was saved from.
pub fn convert_html(html: &str, source_id: &str, options: &ConvertOptions) -> Result<ConvertResult> {
    let extraction = extract_with_options(html, source_id, &options.extract)?;
    let content = render_with_options(&extraction.document, options.output_format, &options.render)?;
    let stats = ExtractionStats::from_document(&extraction.document);
    let (metadata, _) = extraction.document.into_parts();

    Ok(ConvertResult {
        content,
        metadata,
        stats,
        warnings: extraction.warnings,
        mime_type: options.output_format.mime_type(),
    })
}

/// Convert raw bytes; invalid UTF-8 sequences are replaced.
pub fn convert_bytes(bytes: &[u8], source_id: &str, options: &ConvertOptions) -> Result<ConvertResult> {
    let html = String::from_utf8_lossy(bytes);
    convert_html(&html, source_id, options)
}

/// Read and convert a saved HTML file.
pub fn convert_file<P: AsRef<Path>>(path: P, options: &ConvertOptions) -> Result<ConvertResult> {
    let path = path.as_ref();
    let bytes = fs::read(path)?;
    log::debug!("Read {} bytes from {}", bytes.len(), path.display());
    convert_bytes(&bytes, &path.to_string_lossy(), options)
}
