//! Document-level types.

use super::Block;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Maximum length of the name part of a suggested filename.
const MAX_FILENAME_STEM: usize = 50;

/// An extracted article.
///
/// Built once by the assembler and read-only afterwards: blocks are in
/// source DOM order and no API exists to reorder or mutate them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    metadata: Metadata,
    blocks: Vec<Block>,
}

impl Document {
    /// Create a document from metadata and ordered blocks.
    pub fn new(metadata: Metadata, blocks: Vec<Block>) -> Self {
        Self { metadata, blocks }
    }

    /// Create a document without metadata.
    pub fn from_blocks(blocks: Vec<Block>) -> Self {
        Self::new(Metadata::default(), blocks)
    }

    /// Document metadata.
    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// Blocks in document order.
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Article title, if known.
    pub fn title(&self) -> Option<&str> {
        self.metadata.title.as_deref()
    }

    /// Article identifier, if known.
    pub fn identifier(&self) -> Option<&str> {
        self.metadata.identifier.as_deref()
    }

    /// Number of top-level blocks.
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Check if the document has no blocks.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Get plain text content of the entire document.
    pub fn plain_text(&self) -> String {
        self.blocks
            .iter()
            .map(Block::plain_text)
            .filter(|text| !text.is_empty())
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// Consume the document, returning its parts.
    pub fn into_parts(self) -> (Metadata, Vec<Block>) {
        (self.metadata, self.blocks)
    }
}

/// Document metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    /// Article title
    pub title: Option<String>,

    /// Article identifier (URL slug or file stem)
    pub identifier: Option<String>,

    /// Source URL or path as supplied by the caller
    pub source: Option<String>,

    /// Extraction time
    pub extracted_at: Option<DateTime<Utc>>,
}

impl Metadata {
    /// Convert metadata to YAML frontmatter format.
    pub fn to_yaml_frontmatter(&self) -> String {
        let mut lines = vec!["---".to_string()];

        if let Some(ref title) = self.title {
            lines.push(format!("title: \"{}\"", escape_yaml(title)));
        }
        if let Some(ref identifier) = self.identifier {
            lines.push(format!("id: \"{}\"", escape_yaml(identifier)));
        }
        if let Some(ref source) = self.source {
            lines.push(format!("source: \"{}\"", escape_yaml(source)));
        }
        if let Some(ref extracted_at) = self.extracted_at {
            lines.push(format!("extracted: {}", extracted_at.to_rfc3339()));
        }

        lines.push("---".to_string());
        lines.push(String::new());

        lines.join("\n")
    }

    /// Suggest an output filename such as `page_003_Acute_appendicitis.md`.
    ///
    /// The title is preferred; the identifier is used when there is no
    /// title, and `article` when neither yields a usable name.
    pub fn suggested_filename(&self, index: usize, extension: &str) -> String {
        let name = self
            .title
            .as_deref()
            .map(slug_from_title)
            .filter(|s| !s.is_empty())
            .or_else(|| {
                self.identifier
                    .as_deref()
                    .map(slug_from_identifier)
                    .filter(|s| !s.is_empty())
            })
            .unwrap_or_else(|| "article".to_string());

        format!("page_{:03}_{}.{}", index, name, extension)
    }
}

/// Keep word characters, collapse whitespace and hyphen runs into `_`.
fn slug_from_title(title: &str) -> String {
    let mut slug = String::new();
    let mut pending_sep = false;
    for c in title.chars() {
        if c.is_alphanumeric() || c == '_' {
            if pending_sep && !slug.is_empty() {
                slug.push('_');
            }
            pending_sep = false;
            slug.push(c);
        } else if c.is_whitespace() || c == '-' {
            pending_sep = true;
        }
    }
    let slug = slug.trim_matches('_');
    slug.chars().take(MAX_FILENAME_STEM).collect()
}

fn slug_from_identifier(identifier: &str) -> String {
    identifier
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .take(MAX_FILENAME_STEM)
        .collect()
}

/// Escape special characters for YAML strings.
fn escape_yaml(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}
