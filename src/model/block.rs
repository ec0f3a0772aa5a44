//! Block-level content types.

use super::{List, Table};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One classified unit of extracted content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    /// A section or subsection heading
    Heading(Heading),

    /// A paragraph of text
    Paragraph(Paragraph),

    /// A table
    Table(Table),

    /// An image with optional caption
    Image(Image),

    /// A color-coded callout box
    ContentBox(ContentBox),

    /// An ordered or unordered list
    List(List),
}

impl Block {
    /// Create a heading block.
    pub fn heading(level: u8, text: impl Into<String>) -> Self {
        Block::Heading(Heading::new(level, text))
    }

    /// Create a paragraph block.
    pub fn paragraph(text: impl Into<String>) -> Self {
        Block::Paragraph(Paragraph::new(text))
    }

    /// Check if this block is a table.
    pub fn is_table(&self) -> bool {
        matches!(self, Block::Table(_))
    }

    /// Check if this block is an image.
    pub fn is_image(&self) -> bool {
        matches!(self, Block::Image(_))
    }

    /// Get plain text content of the block.
    pub fn plain_text(&self) -> String {
        match self {
            Block::Heading(h) => h.text.clone(),
            Block::Paragraph(p) => p.text.clone(),
            Block::Table(t) => t.plain_text(),
            Block::Image(img) => img
                .caption
                .clone()
                .or_else(|| img.alt.clone())
                .unwrap_or_default(),
            Block::ContentBox(b) => b.plain_text(),
            Block::List(l) => l.plain_text(),
        }
    }
}

/// A heading with a level between 1 and 6.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Heading {
    /// Heading level (1-6)
    pub level: u8,

    /// Heading text
    pub text: String,
}

impl Heading {
    /// Create a heading, clamping the level into 1..=6.
    pub fn new(level: u8, text: impl Into<String>) -> Self {
        Self {
            level: level.clamp(1, 6),
            text: text.into(),
        }
    }
}

/// A paragraph of cleaned text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paragraph {
    /// Paragraph text
    pub text: String,
}

impl Paragraph {
    /// Create a paragraph.
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Check if the paragraph has no visible text.
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// An image reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    /// Absolute image URL
    pub url: String,

    /// Alternative text
    pub alt: Option<String>,

    /// Caption shown below the image
    pub caption: Option<String>,
}

impl Image {
    /// Create an image with just a URL.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            alt: None,
            caption: None,
        }
    }

    /// Set alt text.
    pub fn with_alt(mut self, alt: impl Into<String>) -> Self {
        self.alt = Some(alt.into());
        self
    }

    /// Set caption.
    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }

    /// Text used where an image cannot be shown.
    pub fn alt_or_caption(&self) -> &str {
        self.alt
            .as_deref()
            .or(self.caption.as_deref())
            .unwrap_or("Image")
    }
}

/// Semantic kind of a content box.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoxKind {
    /// Informational note (default for unknown color tokens)
    #[default]
    Note,
    /// Warning / caution
    Warning,
    /// Practical tip
    Tip,
}

impl BoxKind {
    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            BoxKind::Note => "Note",
            BoxKind::Warning => "Warning",
            BoxKind::Tip => "Tip",
        }
    }

    /// Icon shown in front of the label.
    pub fn icon(&self) -> &'static str {
        match self {
            BoxKind::Note => "💡",
            BoxKind::Warning => "⚠️",
            BoxKind::Tip => "📝",
        }
    }

    /// CSS class name used by the HTML renderer.
    pub fn css_class(&self) -> &'static str {
        match self {
            BoxKind::Note => "note",
            BoxKind::Warning => "warning",
            BoxKind::Tip => "tip",
        }
    }
}

impl fmt::Display for BoxKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.css_class())
    }
}

/// A color-coded callout with nested content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentBox {
    /// Semantic kind
    pub kind: BoxKind,

    /// Optional box title
    pub title: Option<String>,

    /// Nested blocks
    pub body: Vec<Block>,
}

impl ContentBox {
    /// Create an empty box of the given kind.
    pub fn new(kind: BoxKind) -> Self {
        Self {
            kind,
            title: None,
            body: Vec::new(),
        }
    }

    /// Set the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Append a body block.
    pub fn with_block(mut self, block: Block) -> Self {
        self.body.push(block);
        self
    }

    /// Get plain text of the title and body.
    pub fn plain_text(&self) -> String {
        self.title
            .iter()
            .cloned()
            .chain(self.body.iter().map(Block::plain_text))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
