//! Document assembly and metadata.

use chrono::Utc;
use scraper::Html;
use std::path::Path;
use url::Url;

use super::{traverse, ExtractOptions};
use crate::error::{Error, Result};
use crate::model::{Block, Document, Metadata};

/// Wraps extracted blocks into a [`Document`].
pub(crate) struct Assembler<'o> {
    options: &'o ExtractOptions,
}

impl<'o> Assembler<'o> {
    pub(crate) fn new(options: &'o ExtractOptions) -> Self {
        Self { options }
    }

    /// Blocks are kept exactly in the order given.
    pub(crate) fn assemble(&self, page: &Html, source_id: &str, blocks: Vec<Block>) -> Document {
        let title = self
            .options
            .title_override
            .clone()
            .filter(|t| !t.trim().is_empty())
            .or_else(|| traverse::page_title(page).map(|t| collapse(&t)))
            .or_else(|| first_heading(&blocks));

        let metadata = Metadata {
            title,
            identifier: identifier_from_source(source_id),
            source: Some(source_id.to_string()).filter(|s| !s.is_empty()),
            extracted_at: Some(Utc::now()),
        };
        Document::new(metadata, blocks)
    }
}

fn collapse(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn first_heading(blocks: &[Block]) -> Option<String> {
    blocks.iter().find_map(|block| match block {
        Block::Heading(heading) => Some(heading.text.clone()),
        _ => None,
    })
}

/// Derive a short identifier from a page URL or file path.
///
/// URLs yield their last non-empty path segment (or the host when the path
/// is empty); paths yield the file stem.
///
/// ```
/// use amboss_extract::extract::identifier_from_source;
///
/// assert_eq!(
///     identifier_from_source("https://next.amboss.com/us/article/Rh0L9S/").as_deref(),
///     Some("Rh0L9S")
/// );
/// assert_eq!(identifier_from_source("saved/sepsis.html").as_deref(), Some("sepsis"));
/// ```
pub fn identifier_from_source(source: &str) -> Option<String> {
    let source = source.trim();
    if source.is_empty() {
        return None;
    }

    if let Ok(url) = Url::parse(source) {
        match url.scheme() {
            "http" | "https" => {
                let segment = url
                    .path_segments()
                    .and_then(|mut segments| segments.rfind(|s| !s.is_empty()))
                    .map(str::to_string);
                return segment.or_else(|| url.host_str().map(str::to_string));
            }
            "file" => {
                return url
                    .to_file_path()
                    .ok()
                    .and_then(|path| file_stem(&path));
            }
            _ => {}
        }
    }

    file_stem(Path::new(source))
}

/// Like [`identifier_from_source`], but an unusable source is an error.
pub fn require_identifier(source: &str) -> Result<String> {
    identifier_from_source(source).ok_or_else(|| Error::InvalidSource(source.to_string()))
}

fn file_stem(path: &Path) -> Option<String> {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .filter(|stem| !stem.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifier_from_url() {
        assert_eq!(
            identifier_from_source("https://next.amboss.com/us/article/Rh0L9S").as_deref(),
            Some("Rh0L9S")
        );
        assert_eq!(
            identifier_from_source("https://next.amboss.com/").as_deref(),
            Some("next.amboss.com")
        );
    }

    #[test]
    fn test_identifier_from_path() {
        assert_eq!(
            identifier_from_source("/tmp/pages/acute_abdomen.html").as_deref(),
            Some("acute_abdomen")
        );
        assert_eq!(identifier_from_source("").as_deref(), None);
    }

    #[test]
    fn test_require_identifier() {
        assert_eq!(require_identifier("saved/gout.html").unwrap(), "gout");
        assert!(matches!(
            require_identifier("   "),
            Err(Error::InvalidSource(ref s)) if s == "   "
        ));
    }

    #[test]
    fn test_title_precedence() {
        let page = Html::parse_document(
            "<html><head><title>Sepsis - AMBOSS</title></head><body></body></html>",
        );
        let blocks = vec![Block::heading(2, "Overview")];

        let options = ExtractOptions::default();
        let doc = Assembler::new(&options).assemble(&page, "x.html", blocks.clone());
        assert_eq!(doc.title(), Some("Sepsis"));
        assert_eq!(doc.identifier(), Some("x"));
        assert!(doc.metadata().extracted_at.is_some());

        let options = ExtractOptions::new().with_title("Septic shock");
        let doc = Assembler::new(&options).assemble(&page, "x.html", blocks.clone());
        assert_eq!(doc.title(), Some("Septic shock"));

        let bare = Html::parse_document("<html><body></body></html>");
        let options = ExtractOptions::default();
        let doc = Assembler::new(&options).assemble(&bare, "x.html", blocks);
        assert_eq!(doc.title(), Some("Overview"));
    }
}
