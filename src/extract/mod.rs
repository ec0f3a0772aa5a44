//! Article extraction from rendered HTML.
//!
//! Extraction runs in three stages: [`traverse`] locates the content
//! containers, [`classify`] decides what each element is, and the per-kind
//! extractors turn elements into [`Block`]s. The assembler then wraps the
//! blocks in a [`Document`] with metadata.
//!
//! Unknown or malformed shapes never fail extraction. They degrade to
//! paragraphs (or are dropped) and are reported as [`ExtractionWarning`]s.

mod assemble;
mod classify;
mod content_box;
mod dom;
mod image;
mod list;
mod options;
mod table;
mod text;
mod traverse;

pub use assemble::{identifier_from_source, require_identifier};
pub use options::{ExtractOptions, DEFAULT_BASE_URL, DEFAULT_MAX_DEPTH};
pub use text::TextCleaner;

use ego_tree::NodeRef;
use scraper::{ElementRef, Html, Node};
use serde::Serialize;
use std::fmt;
use url::Url;

use crate::error::{Error, Result};
use crate::model::{Block, Document};
use classify::NodeKind;
use traverse::ContentRoot;

/// A non-fatal problem found while extracting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ExtractionWarning {
    /// No rule matched the element; its text became a paragraph.
    Unclassified { tag: String },
    /// An image had no usable source and was dropped.
    MissingImageSource,
    /// A table (or table wrapper) had no rows and was dropped.
    EmptyTable,
    /// Nesting exceeded the depth cap; the subtree was flattened to text.
    DepthLimit { tag: String, depth: usize },
}

impl fmt::Display for ExtractionWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtractionWarning::Unclassified { tag } => {
                write!(f, "unclassified <{}> kept as paragraph", tag)
            }
            ExtractionWarning::MissingImageSource => write!(f, "image without source dropped"),
            ExtractionWarning::EmptyTable => write!(f, "empty table dropped"),
            ExtractionWarning::DepthLimit { tag, depth } => {
                write!(f, "<{}> at depth {} flattened to text", tag, depth)
            }
        }
    }
}

/// A document together with the warnings raised while building it.
#[derive(Debug, Clone)]
pub struct Extraction {
    pub document: Document,
    pub warnings: Vec<ExtractionWarning>,
}

/// Extract a document from rendered article HTML with default options.
///
/// `source_id` is the page URL or file path the HTML came from; it only
/// feeds the document metadata.
///
/// # Errors
///
/// Returns [`Error::ContentNotFound`] when the page has no recognizable
/// article container.
///
/// # Example
///
/// ```
/// let html = r#"<div class="baseStyles"><h2>Causes</h2><p>Obstruction</p></div>"#;
/// let doc = amboss_extract::extract(html, "appendicitis.html").unwrap();
/// assert_eq!(doc.block_count(), 2);
/// ```
pub fn extract(html: &str, source_id: &str) -> Result<Document> {
    extract_with_options(html, source_id, &ExtractOptions::default())
        .map(|extraction| extraction.document)
}

/// Extract a document and its warnings with custom options.
pub fn extract_with_options(
    html: &str,
    source_id: &str,
    options: &ExtractOptions,
) -> Result<Extraction> {
    let page = Html::parse_document(html);
    let root = traverse::locate(&page).ok_or_else(|| Error::ContentNotFound(source_id.to_string()))?;

    let mut extractor = BlockExtractor::new(options);
    let blocks = match root {
        ContentRoot::Sections(sections) => {
            let mut blocks = Vec::new();
            for (index, section) in sections.into_iter().enumerate() {
                let title = section
                    .title
                    .as_deref()
                    .map(|raw| extractor.cleaner.clean(raw))
                    .filter(|title| !title.is_empty())
                    .unwrap_or_else(|| format!("Section {}", index + 1));

                if options.skips_section(&title) {
                    log::debug!("Skipping section '{}'", title);
                    continue;
                }
                let Some(content) = section.content else {
                    log::debug!("Section '{}' has no content container", title);
                    continue;
                };

                let body = extractor.extract_children(content, 0, Flow::Block);
                if body.is_empty() {
                    log::debug!("Section '{}' has no content", title);
                    continue;
                }
                blocks.push(Block::heading(2, title));
                blocks.extend(body);
            }
            blocks
        }
        ContentRoot::Containers(containers) => containers
            .into_iter()
            .flat_map(|container| extractor.extract_children(container, 0, Flow::Block))
            .collect(),
    };

    let document = assemble::Assembler::new(options).assemble(&page, source_id, blocks);
    log::debug!(
        "Extracted {} blocks from {} ({} warnings)",
        document.block_count(),
        source_id,
        extractor.warnings.len()
    );

    Ok(Extraction {
        document,
        warnings: extractor.warnings,
    })
}

/// How loose text and unknown elements are treated while walking children.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    /// Between blocks: unknown elements become their own paragraph.
    Block,
    /// Inside a paragraph: unknown elements without block children are
    /// phrasing content.
    Paragraph,
}

/// Extraction context shared by the per-kind extractors.
pub(crate) struct BlockExtractor<'o> {
    options: &'o ExtractOptions,
    cleaner: TextCleaner,
    base_url: Option<Url>,
    warnings: Vec<ExtractionWarning>,
}

impl<'o> BlockExtractor<'o> {
    pub(crate) fn new(options: &'o ExtractOptions) -> Self {
        let base_url = match Url::parse(&options.base_url) {
            Ok(url) => Some(url),
            Err(e) => {
                log::warn!("Ignoring invalid base URL '{}': {}", options.base_url, e);
                None
            }
        };
        Self {
            options,
            cleaner: TextCleaner::new(options),
            base_url,
            warnings: Vec::new(),
        }
    }

    fn warn(&mut self, warning: ExtractionWarning) {
        log::warn!("{}", warning);
        self.warnings.push(warning);
    }

    fn clean(&self, raw: &str) -> String {
        self.cleaner.clean(raw)
    }

    /// Extract the children of `parent` in DOM order.
    fn extract_children(&mut self, parent: ElementRef<'_>, depth: usize, flow: Flow) -> Vec<Block> {
        self.extract_nodes(parent.children(), depth, flow)
    }

    /// Extract sibling nodes in order.
    ///
    /// Consecutive text nodes and inline elements are merged into one
    /// paragraph.
    fn extract_nodes<'a>(
        &mut self,
        nodes: impl Iterator<Item = NodeRef<'a, Node>>,
        depth: usize,
        flow: Flow,
    ) -> Vec<Block> {
        let mut blocks = Vec::new();
        let mut run = String::new();

        for child in nodes {
            let Some(el) = ElementRef::wrap(child) else {
                if let Some(text) = child.value().as_text() {
                    run.push_str(text);
                }
                continue;
            };

            let kind = classify::classify(el);
            if self.options.trace {
                log::debug!("{:indent$}<{}> -> {:?}", "", dom::tag(el), kind, indent = depth * 2);
            }

            let inline = match kind {
                NodeKind::Ignored => continue,
                NodeKind::Inline => true,
                NodeKind::Unknown => flow == Flow::Paragraph && !dom::has_block_children(el),
                _ => false,
            };
            if inline {
                self.push_inline(el, &mut run, &mut blocks, depth);
            } else {
                self.flush_run(&mut run, &mut blocks);
                blocks.extend(self.extract_element(el, kind, depth));
            }
        }

        self.flush_run(&mut run, &mut blocks);
        blocks
    }

    /// Append phrasing content to the current run. Images inside inline
    /// elements break the run.
    ///
    /// Past the depth cap the rest of the subtree is appended as plain text.
    fn push_inline(
        &mut self,
        el: ElementRef<'_>,
        run: &mut String,
        blocks: &mut Vec<Block>,
        depth: usize,
    ) {
        if depth > self.options.max_depth {
            self.warn(ExtractionWarning::DepthLimit {
                tag: dom::tag(el).to_string(),
                depth,
            });
            run.push(' ');
            run.push_str(&dom::visible_text(el));
            return;
        }

        for child in el.children() {
            let Some(child_el) = ElementRef::wrap(child) else {
                if let Some(text) = child.value().as_text() {
                    run.push_str(text);
                }
                continue;
            };

            if dom::is_ignored(child_el) {
                continue;
            }
            if dom::tag(child_el) == "br" {
                run.push(' ');
            } else if classify::is_image(child_el) {
                self.flush_run(run, blocks);
                blocks.extend(self.extract_image(child_el).map(Block::Image));
            } else if dom::is_block(child_el) {
                self.flush_run(run, blocks);
                let kind = classify::classify(child_el);
                blocks.extend(self.extract_element(child_el, kind, depth + 1));
            } else {
                self.push_inline(child_el, run, blocks, depth + 1);
            }
        }
    }

    fn flush_run(&self, run: &mut String, blocks: &mut Vec<Block>) {
        let text = self.clean(run);
        if !text.is_empty() {
            blocks.push(Block::paragraph(text));
        }
        run.clear();
    }

    /// Build the blocks for one classified element.
    fn extract_element(&mut self, el: ElementRef<'_>, kind: NodeKind, depth: usize) -> Vec<Block> {
        if depth > self.options.max_depth {
            self.warn(ExtractionWarning::DepthLimit {
                tag: dom::tag(el).to_string(),
                depth,
            });
            return self.text_block(el).into_iter().collect();
        }

        match kind {
            NodeKind::Ignored => Vec::new(),
            NodeKind::Heading => {
                let text = self.clean(&dom::visible_text(el));
                match dom::heading_level(el) {
                    Some(level) if !text.is_empty() => vec![Block::heading(level, text)],
                    _ => Vec::new(),
                }
            }
            NodeKind::Table => self.extract_table(el).map(Block::Table).into_iter().collect(),
            NodeKind::Image => self.extract_image(el).map(Block::Image).into_iter().collect(),
            NodeKind::ContentBox => self
                .extract_content_box(el, depth)
                .map(Block::ContentBox)
                .into_iter()
                .collect(),
            NodeKind::List => self.extract_list(el, depth).map(Block::List).into_iter().collect(),
            NodeKind::Paragraph => self.extract_children(el, depth + 1, Flow::Paragraph),
            NodeKind::Inline => self.text_block(el).into_iter().collect(),
            NodeKind::Container => self.extract_children(el, depth + 1, Flow::Block),
            NodeKind::Unknown => {
                let block = self.text_block(el);
                if block.is_some() {
                    self.warn(ExtractionWarning::Unclassified {
                        tag: dom::tag(el).to_string(),
                    });
                }
                block.into_iter().collect()
            }
        }
    }

    /// Best-effort paragraph holding all visible text of `el`.
    fn text_block(&self, el: ElementRef<'_>) -> Option<Block> {
        let text = self.clean(&dom::visible_text(el));
        (!text.is_empty()).then(|| Block::paragraph(text))
    }
}
