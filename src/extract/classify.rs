//! Node classification.
//!
//! Each element is matched against a fixed, ordered rule table. The first
//! rule whose predicate holds decides the node kind; elements no rule
//! matches are [`NodeKind::Unknown`] and degrade to paragraphs.

use scraper::ElementRef;

use super::dom;
use super::list::is_list;

/// Shape of a DOM element as far as extraction is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum NodeKind {
    /// Non-content element (scripts, buttons, navigation)
    Ignored,
    /// `h1`..`h6`
    Heading,
    /// `table` or a table wrapper
    Table,
    /// `img`, `figure`, or an image thumbnail
    Image,
    /// Color-coded callout box
    ContentBox,
    /// `ul` / `ol`
    List,
    /// Paragraph-like text block, possibly holding images
    Paragraph,
    /// Phrasing content merged into the surrounding paragraph
    Inline,
    /// Wrapper whose children are extracted in its place
    Container,
    /// Nothing matched
    Unknown,
}

type Predicate = fn(ElementRef<'_>) -> bool;

/// Classification rules in priority order.
const RULES: &[(Predicate, NodeKind)] = &[
    (dom::is_ignored, NodeKind::Ignored),
    (is_heading, NodeKind::Heading),
    (is_table, NodeKind::Table),
    (is_image, NodeKind::Image),
    (is_content_box, NodeKind::ContentBox),
    (is_list, NodeKind::List),
    (is_paragraph, NodeKind::Paragraph),
    (dom::is_inline, NodeKind::Inline),
    (is_container, NodeKind::Container),
];

/// Class tokens that always mark a content box.
const BOX_TOKENS: &[&str] = &["content-box", "merke", "cave", "callout"];

/// Elements that can wrap other blocks.
const CONTAINER_TAGS: &[&str] = &[
    "div", "section", "article", "main", "aside", "header", "footer", "details", "dl",
];

/// Classify an element.
pub(crate) fn classify(el: ElementRef<'_>) -> NodeKind {
    RULES
        .iter()
        .find(|(matches, _)| matches(el))
        .map(|(_, kind)| *kind)
        .unwrap_or(NodeKind::Unknown)
}

fn is_heading(el: ElementRef<'_>) -> bool {
    dom::heading_level(el).is_some()
}

fn is_table(el: ElementRef<'_>) -> bool {
    dom::tag(el) == "table" || dom::has_class(el, "table-wrapper")
}

/// Image thumbnails and bare image elements.
pub(crate) fn is_image(el: ElementRef<'_>) -> bool {
    matches!(dom::tag(el), "img" | "figure" | "picture")
        || (dom::tag(el) == "span" && dom::has_class(el, "thumbnail__image"))
}

/// Whether the element's classes mark it as a callout box.
pub(crate) fn is_content_box(el: ElementRef<'_>) -> bool {
    dom::class_tokens(el).iter().any(|token| {
        BOX_TOKENS.contains(&token.as_str()) || token.split(['-', '_']).any(|part| part == "box")
    })
}

fn is_paragraph(el: ElementRef<'_>) -> bool {
    match dom::tag(el) {
        "p" | "blockquote" | "pre" => true,
        "div" => dom::has_class(el, "paragraph") || !dom::has_block_children(el),
        _ => false,
    }
}

fn is_container(el: ElementRef<'_>) -> bool {
    dom::is_tag(el, CONTAINER_TAGS) && dom::has_block_children(el)
}
