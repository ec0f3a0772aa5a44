//! Document statistics.

use crate::model::{Block, Document, List};
use serde::{Deserialize, Serialize};

/// Block and text counts of an extracted document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionStats {
    /// Number of headings (inside content boxes too)
    pub heading_count: u32,

    /// Number of paragraphs
    pub paragraph_count: u32,

    /// Number of tables
    pub table_count: u32,

    /// Number of images
    pub image_count: u32,

    /// Number of content boxes, nested ones included
    pub content_box_count: u32,

    /// Number of lists (nested sub-lists are counted as items, not lists)
    pub list_count: u32,

    /// Number of list items, nested ones included
    pub list_item_count: u32,

    /// Approximate word count (whitespace-separated tokens)
    pub word_count: u32,

    /// Character count (excluding whitespace)
    pub char_count: u32,
}

impl ExtractionStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect statistics by walking a document.
    pub fn from_document(doc: &Document) -> Self {
        let mut stats = Self::new();
        stats.add_blocks(doc.blocks());
        stats
    }

    fn add_blocks(&mut self, blocks: &[Block]) {
        for block in blocks {
            match block {
                Block::Heading(h) => {
                    self.heading_count += 1;
                    self.count_text(&h.text);
                }
                Block::Paragraph(p) => {
                    self.paragraph_count += 1;
                    self.count_text(&p.text);
                }
                Block::Table(t) => {
                    self.table_count += 1;
                    self.count_text(&t.plain_text());
                }
                Block::Image(_) => self.image_count += 1,
                Block::ContentBox(b) => {
                    self.content_box_count += 1;
                    if let Some(ref title) = b.title {
                        self.count_text(title);
                    }
                    self.add_blocks(&b.body);
                }
                Block::List(l) => {
                    self.list_count += 1;
                    self.list_item_count += l.item_count() as u32;
                    self.count_list_text(l);
                }
            }
        }
    }

    fn count_list_text(&mut self, list: &List) {
        for item in &list.items {
            self.count_text(&item.text);
            if let Some(ref nested) = item.nested {
                self.count_list_text(nested);
            }
        }
    }

    /// Add word and character counts from text.
    pub fn count_text(&mut self, text: &str) {
        self.word_count += text.split_whitespace().count() as u32;
        self.char_count += text.chars().filter(|c| !c.is_whitespace()).count() as u32;
    }

    /// Total number of top-level and nested blocks counted.
    pub fn block_count(&self) -> u32 {
        self.heading_count
            + self.paragraph_count
            + self.table_count
            + self.image_count
            + self.content_box_count
            + self.list_count
    }

    /// Merge another stats instance into this one.
    pub fn merge(&mut self, other: &ExtractionStats) {
        self.heading_count += other.heading_count;
        self.paragraph_count += other.paragraph_count;
        self.table_count += other.table_count;
        self.image_count += other.image_count;
        self.content_box_count += other.content_box_count;
        self.list_count += other.list_count;
        self.list_item_count += other.list_item_count;
        self.word_count += other.word_count;
        self.char_count += other.char_count;
    }
}
