//! Rendering options and configuration.

use super::JsonFormat;

/// Options for rendering a document.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Emit the document title as a top-level heading
    pub include_title: bool,

    /// Include YAML frontmatter with metadata (Markdown only)
    pub include_frontmatter: bool,

    /// Maximum heading level (1-6); deeper headings are capped
    pub max_heading_level: u8,

    /// Character to use for unordered Markdown list markers
    pub list_marker: char,

    /// How to render tables with merged cells in Markdown
    pub table_fallback: TableFallback,

    /// Escape special Markdown characters
    pub escape_special_chars: bool,

    /// Layout of JSON output
    pub json_format: JsonFormat,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable the title heading.
    pub fn with_title(mut self, include: bool) -> Self {
        self.include_title = include;
        self
    }

    /// Enable or disable frontmatter.
    pub fn with_frontmatter(mut self, include: bool) -> Self {
        self.include_frontmatter = include;
        self
    }

    /// Set the maximum heading level.
    pub fn with_max_heading(mut self, level: u8) -> Self {
        self.max_heading_level = level.clamp(1, 6);
        self
    }

    /// Set the list marker character.
    pub fn with_list_marker(mut self, marker: char) -> Self {
        self.list_marker = marker;
        self
    }

    /// Set the table fallback mode.
    pub fn with_table_fallback(mut self, fallback: TableFallback) -> Self {
        self.table_fallback = fallback;
        self
    }

    /// Enable or disable Markdown escaping.
    pub fn with_escaping(mut self, escape: bool) -> Self {
        self.escape_special_chars = escape;
        self
    }

    /// Set the JSON layout.
    pub fn with_json_format(mut self, format: JsonFormat) -> Self {
        self.json_format = format;
        self
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            include_title: true,
            include_frontmatter: false,
            max_heading_level: 6,
            list_marker: '-',
            table_fallback: TableFallback::Markdown,
            escape_special_chars: true,
            json_format: JsonFormat::Pretty,
        }
    }
}

/// How to render tables that can't be expressed in simple Markdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TableFallback {
    /// Use pipe table syntax; merged cells are padded with empty cells
    #[default]
    Markdown,
    /// Use HTML table tags for tables with merged cells
    Html,
}
