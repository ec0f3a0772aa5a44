//! Shared rendering driver.
//!
//! Every output format implements [`BlockRenderer`], one method per block
//! variant. [`render_document`] walks the document in order and calls the
//! matching method, so formats differ only in their per-block templates.
//! Content box bodies are rendered through the same renderer first and
//! handed to [`BlockRenderer::content_box`] as a finished string.
//!
//! # Example
//!
//! ```
//! use amboss_extract::model::{Block, Document, Heading, Image, List, Paragraph, Table, ContentBox};
//! use amboss_extract::render::renderer::{render_document, BlockRenderer};
//!
//! /// Emits only headings, one per line.
//! struct Outline;
//!
//! impl BlockRenderer for Outline {
//!     fn heading(&mut self, heading: &Heading, out: &mut String) {
//!         out.push_str(&"  ".repeat(heading.level as usize - 1));
//!         out.push_str(&heading.text);
//!         out.push('\n');
//!     }
//!     fn paragraph(&mut self, _: &Paragraph, _: &mut String) {}
//!     fn table(&mut self, _: &Table, _: &mut String) {}
//!     fn image(&mut self, _: &Image, _: &mut String) {}
//!     fn list(&mut self, _: &List, _: &mut String) {}
//!     fn content_box(&mut self, _: &ContentBox, body: &str, out: &mut String) {
//!         out.push_str(body);
//!     }
//! }
//!
//! let doc = Document::from_blocks(vec![Block::heading(1, "Sepsis"), Block::heading(2, "Causes")]);
//! assert_eq!(render_document(&mut Outline, &doc), "Sepsis\n  Causes\n");
//! ```

use crate::model::{Block, ContentBox, Document, Heading, Image, List, Paragraph, Table};

/// Per-block templates of an output format.
pub trait BlockRenderer {
    /// Called once before the first block.
    fn begin_document(&mut self, doc: &Document, out: &mut String) {
        let _ = (doc, out);
    }

    /// Called once after the last block.
    fn end_document(&mut self, doc: &Document, out: &mut String) {
        let _ = (doc, out);
    }

    fn heading(&mut self, heading: &Heading, out: &mut String);

    fn paragraph(&mut self, paragraph: &Paragraph, out: &mut String);

    fn table(&mut self, table: &Table, out: &mut String);

    fn image(&mut self, image: &Image, out: &mut String);

    fn list(&mut self, list: &List, out: &mut String);

    /// Render a content box around its already rendered `body`.
    fn content_box(&mut self, content_box: &ContentBox, body: &str, out: &mut String);
}

/// Render a whole document with `renderer`.
pub fn render_document<R: BlockRenderer + ?Sized>(renderer: &mut R, doc: &Document) -> String {
    let mut out = String::new();
    renderer.begin_document(doc, &mut out);
    render_blocks(renderer, doc.blocks(), &mut out);
    renderer.end_document(doc, &mut out);
    out
}

/// Render a block sequence in order, recursing into content boxes.
pub fn render_blocks<R: BlockRenderer + ?Sized>(renderer: &mut R, blocks: &[Block], out: &mut String) {
    for block in blocks {
        match block {
            Block::Heading(heading) => renderer.heading(heading, out),
            Block::Paragraph(paragraph) => {
                if !paragraph.is_empty() {
                    renderer.paragraph(paragraph, out);
                }
            }
            Block::Table(table) => {
                if !table.is_empty() {
                    renderer.table(table, out);
                }
            }
            Block::Image(image) => renderer.image(image, out),
            Block::List(list) => {
                if !list.is_empty() {
                    renderer.list(list, out);
                }
            }
            Block::ContentBox(content_box) => {
                let mut body = String::new();
                render_blocks(renderer, &content_box.body, &mut body);
                renderer.content_box(content_box, &body, out);
            }
        }
    }
}
