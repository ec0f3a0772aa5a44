//! # amboss-extract
//!
//! Structured content extraction for saved AMBOSS article pages.
//!
//! This library takes the HTML of a fully rendered article page, extracts its
//! content (headings, paragraphs, tables, images, callout boxes, nested
//! lists) into a [`Document`], and renders that document as plain text,
//! Markdown, standalone HTML, or JSON.
//!
//! ## Quick Start
//!
//! ```no_run
//! use amboss_extract::{extract, render, OutputFormat};
//!
//! fn main() -> amboss_extract::Result<()> {
//!     let html = std::fs::read_to_string("saved/appendicitis.html")?;
//!
//!     let doc = extract(&html, "saved/appendicitis.html")?;
//!     let markdown = render(&doc, OutputFormat::Markdown)?;
//!     println!("{}", markdown);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Multiple output formats**: plain text, Markdown, HTML, JSON
//! - **Structure preservation**: section headings, tables with header rows,
//!   nested lists, color-coded content boxes, captioned images
//! - **Fail-soft extraction**: unknown markup degrades to paragraphs and is
//!   reported as [`ExtractionWarning`]s instead of errors
//! - **Text cleanup**: citation markers and site UI labels are removed,
//!   text is NFC-normalized

pub mod convert;
pub mod error;
pub mod extract;
pub mod model;
pub mod render;

// Re-export commonly used types
pub use convert::{ConvertOptions, ConvertResult};
pub use error::{Error, Result};
pub use extract::{extract, extract_with_options, ExtractOptions, Extraction, ExtractionWarning};
pub use model::{
    Block, BoxKind, ContentBox, Document, Heading, Image, List, ListItem, Metadata, Paragraph,
    Table, TableCell, TableRow,
};
pub use render::{
    render, render_with_options, ExtractionStats, JsonFormat, OutputFormat, RenderOptions,
    TableFallback,
};

use std::fs;
use std::path::Path;

/// Extract a document from a saved HTML file.
///
/// # Example
///
/// ```no_run
/// use amboss_extract::extract_file;
///
/// let doc = extract_file("saved/sepsis.html").unwrap();
/// println!("Blocks: {}", doc.block_count());
/// ```
pub fn extract_file<P: AsRef<Path>>(path: P) -> Result<Document> {
    let path = path.as_ref();
    let html = fs::read_to_string(path)?;
    extract(&html, &path.to_string_lossy())
}

/// Convert article HTML to plain text.
///
/// # Example
///
/// ```
/// let html = r#"<div class="baseStyles"><h2>Causes</h2><p>Obstruction</p></div>"#;
/// let text = amboss_extract::to_text(html, "appendicitis").unwrap();
/// assert!(text.contains("Causes\n------"));
/// ```
pub fn to_text(html: &str, source_id: &str) -> Result<String> {
    let doc = extract(html, source_id)?;
    render::to_text(&doc, &RenderOptions::default())
}

/// Convert article HTML to Markdown.
///
/// # Example
///
/// ```
/// let html = r#"<div class="baseStyles"><h2>Causes</h2><ul><li>A</li></ul></div>"#;
/// let markdown = amboss_extract::to_markdown(html, "appendicitis").unwrap();
/// assert!(markdown.contains("## Causes\n- A"));
/// ```
pub fn to_markdown(html: &str, source_id: &str) -> Result<String> {
    let doc = extract(html, source_id)?;
    render::to_markdown(&doc, &RenderOptions::default())
}

/// Convert article HTML to a standalone HTML page.
pub fn to_html(html: &str, source_id: &str) -> Result<String> {
    let doc = extract(html, source_id)?;
    render::to_html(&doc, &RenderOptions::default())
}

/// Convert article HTML to JSON.
///
/// # Example
///
/// ```no_run
/// use amboss_extract::{to_json, JsonFormat};
///
/// let html = std::fs::read_to_string("saved/sepsis.html").unwrap();
/// let json = to_json(&html, "sepsis", JsonFormat::Pretty).unwrap();
/// std::fs::write("sepsis.json", json).unwrap();
/// ```
pub fn to_json(html: &str, source_id: &str, format: JsonFormat) -> Result<String> {
    let doc = extract(html, source_id)?;
    render::to_json(&doc, format)
}

/// Builder for extracting and rendering articles.
///
/// # Example
///
/// ```
/// use amboss_extract::ArticleExtractor;
///
/// let html = r#"<div class="baseStyles"><h2>Causes</h2><p>Obstruction [1]</p></div>"#;
/// let markdown = ArticleExtractor::new()
///     .with_title("Appendicitis")
///     .with_frontmatter()
///     .extract(html, "appendicitis.html")?
///     .to_markdown()?;
/// assert!(markdown.contains("# Appendicitis"));
/// # Ok::<(), amboss_extract::Error>(())
/// ```
pub struct ArticleExtractor {
    extract_options: ExtractOptions,
    render_options: RenderOptions,
}

impl ArticleExtractor {
    /// Create a new builder with default options.
    pub fn new() -> Self {
        Self {
            extract_options: ExtractOptions::default(),
            render_options: RenderOptions::default(),
        }
    }

    /// Set the base URL for relative image sources.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.extract_options = self.extract_options.with_base_url(base_url);
        self
    }

    /// Set the maximum nesting depth.
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.extract_options = self.extract_options.with_max_depth(depth);
        self
    }

    /// Override the article title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.extract_options = self.extract_options.with_title(title);
        self
    }

    /// Log every node classification at debug level.
    pub fn with_trace(mut self) -> Self {
        self.extract_options = self.extract_options.with_trace(true);
        self
    }

    /// Enable frontmatter in Markdown output.
    pub fn with_frontmatter(mut self) -> Self {
        self.render_options = self.render_options.with_frontmatter(true);
        self
    }

    /// Leave the title heading out of rendered output.
    pub fn without_title_heading(mut self) -> Self {
        self.render_options = self.render_options.with_title(false);
        self
    }

    /// Set table fallback mode.
    pub fn with_table_fallback(mut self, fallback: TableFallback) -> Self {
        self.render_options = self.render_options.with_table_fallback(fallback);
        self
    }

    /// Replace the extraction options.
    pub fn with_extract_options(mut self, options: ExtractOptions) -> Self {
        self.extract_options = options;
        self
    }

    /// Replace the render options.
    pub fn with_render_options(mut self, options: RenderOptions) -> Self {
        self.render_options = options;
        self
    }

    /// Extract an article from HTML.
    pub fn extract(self, html: &str, source_id: &str) -> Result<ArticleResult> {
        let extraction = extract_with_options(html, source_id, &self.extract_options)?;
        Ok(ArticleResult {
            document: extraction.document,
            warnings: extraction.warnings,
            render_options: self.render_options,
        })
    }

    /// Extract an article from a saved HTML file.
    pub fn extract_file<P: AsRef<Path>>(self, path: P) -> Result<ArticleResult> {
        let path = path.as_ref();
        let html = fs::read_to_string(path)?;
        self.extract(&html, &path.to_string_lossy())
    }
}

impl Default for ArticleExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// An extracted article ready to render.
pub struct ArticleResult {
    /// The extracted document
    pub document: Document,
    /// Warnings raised during extraction
    pub warnings: Vec<ExtractionWarning>,
    render_options: RenderOptions,
}

impl ArticleResult {
    /// Render in the given format.
    pub fn render(&self, format: OutputFormat) -> Result<String> {
        render_with_options(&self.document, format, &self.render_options)
    }

    /// Convert to plain text.
    pub fn to_text(&self) -> Result<String> {
        self.render(OutputFormat::Text)
    }

    /// Convert to Markdown.
    pub fn to_markdown(&self) -> Result<String> {
        self.render(OutputFormat::Markdown)
    }

    /// Convert to HTML.
    pub fn to_html(&self) -> Result<String> {
        self.render(OutputFormat::Html)
    }

    /// Convert to JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        render::to_json(&self.document, format)
    }

    /// Block and text statistics.
    pub fn stats(&self) -> ExtractionStats {
        ExtractionStats::from_document(&self.document)
    }

    /// Get the document.
    pub fn document(&self) -> &Document {
        &self.document
    }
}
