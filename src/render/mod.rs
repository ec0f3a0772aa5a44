//! Rendering module for converting documents to output formats.

mod html;
mod json;
mod markdown;
mod options;
pub mod renderer;
mod stats;
mod text;

pub use html::{to_html, HtmlRenderer};
pub use json::{to_json, JsonFormat};
pub use markdown::{parse_pipe_tables, to_markdown, MarkdownRenderer};
pub use options::{RenderOptions, TableFallback};
pub use renderer::{render_document, BlockRenderer};
pub use stats::ExtractionStats;
pub use text::{to_text, TextRenderer};

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::model::Document;

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OutputFormat {
    /// Plain text with underlined headings
    #[default]
    Text,
    /// Markdown
    Markdown,
    /// Standalone HTML page
    Html,
    /// Serialized document model
    Json,
}

impl OutputFormat {
    /// All formats, in display order.
    pub const ALL: [OutputFormat; 4] = [
        OutputFormat::Text,
        OutputFormat::Markdown,
        OutputFormat::Html,
        OutputFormat::Json,
    ];

    /// Canonical name.
    pub fn name(&self) -> &'static str {
        match self {
            OutputFormat::Text => "text",
            OutputFormat::Markdown => "markdown",
            OutputFormat::Html => "html",
            OutputFormat::Json => "json",
        }
    }

    /// File extension without the dot.
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Text => "txt",
            OutputFormat::Markdown => "md",
            OutputFormat::Html => "html",
            OutputFormat::Json => "json",
        }
    }

    /// MIME type of the rendered output.
    pub fn mime_type(&self) -> &'static str {
        match self {
            OutputFormat::Text => "text/plain",
            OutputFormat::Markdown => "text/markdown",
            OutputFormat::Html => "text/html",
            OutputFormat::Json => "application/json",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" | "txt" => Ok(OutputFormat::Text),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            "html" => Ok(OutputFormat::Html),
            "json" => Ok(OutputFormat::Json),
            _ => Err(Error::UnsupportedFormat(s.to_string())),
        }
    }
}

/// Render a document with default options.
pub fn render(doc: &Document, format: OutputFormat) -> Result<String> {
    render_with_options(doc, format, &RenderOptions::default())
}

/// Render a document with custom options.
pub fn render_with_options(
    doc: &Document,
    format: OutputFormat,
    options: &RenderOptions,
) -> Result<String> {
    match format {
        OutputFormat::Text => to_text(doc, options),
        OutputFormat::Markdown => to_markdown(doc, options),
        OutputFormat::Html => to_html(doc, options),
        OutputFormat::Json => to_json(doc, options.json_format),
    }
}
