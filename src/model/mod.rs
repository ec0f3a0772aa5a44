//! Document model types for extracted article content.
//!
//! This module defines the intermediate representation (IR) that bridges
//! HTML extraction and rendering. Every renderer consumes the same
//! [`Document`], so a block extracted once renders identically in order
//! across text, Markdown, HTML, and JSON output.

mod block;
mod document;
mod list;
mod table;

pub use block::{Block, BoxKind, ContentBox, Heading, Image, Paragraph};
pub use document::{Document, Metadata};
pub use list::{List, ListItem};
pub use table::{Table, TableCell, TableRow, CELL_LINE_SEPARATOR};
