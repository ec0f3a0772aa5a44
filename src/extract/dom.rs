//! Small helpers over `scraper`'s element tree.

use ego_tree::iter::Edge;
use ego_tree::{NodeId, NodeRef};
use scraper::{ElementRef, Node};

/// Elements that never carry article content.
const IGNORED_TAGS: &[&str] = &[
    "script", "style", "noscript", "button", "svg", "template", "nav", "input", "select",
];

/// Elements that start a new block of content.
const BLOCK_TAGS: &[&str] = &[
    "address",
    "article",
    "aside",
    "blockquote",
    "details",
    "div",
    "dl",
    "figcaption",
    "figure",
    "footer",
    "h1",
    "h2",
    "h3",
    "h4",
    "h5",
    "h6",
    "header",
    "hr",
    "li",
    "main",
    "ol",
    "p",
    "pre",
    "section",
    "table",
    "tbody",
    "td",
    "tfoot",
    "th",
    "thead",
    "tr",
    "ul",
];

/// Phrasing elements that merge into the surrounding paragraph.
const INLINE_TAGS: &[&str] = &[
    "a", "abbr", "b", "bdi", "bdo", "br", "cite", "code", "data", "dfn", "em", "font", "i",
    "kbd", "label", "mark", "q", "s", "samp", "small", "span", "strong", "sub", "sup", "time",
    "u", "var", "wbr",
];

/// Lowercase tag name.
pub(crate) fn tag<'a>(el: ElementRef<'a>) -> &'a str {
    el.value().name()
}

pub(crate) fn is_tag(el: ElementRef<'_>, names: &[&str]) -> bool {
    names.contains(&tag(el))
}

pub(crate) fn is_ignored(el: ElementRef<'_>) -> bool {
    is_tag(el, IGNORED_TAGS) || el.value().attr("aria-hidden") == Some("true")
}

pub(crate) fn is_block(el: ElementRef<'_>) -> bool {
    is_tag(el, BLOCK_TAGS)
}

pub(crate) fn is_inline(el: ElementRef<'_>) -> bool {
    is_tag(el, INLINE_TAGS)
}

/// Heading level for `h1`..`h6`.
pub(crate) fn heading_level(el: ElementRef<'_>) -> Option<u8> {
    match tag(el) {
        "h1" => Some(1),
        "h2" => Some(2),
        "h3" => Some(3),
        "h4" => Some(4),
        "h5" => Some(5),
        "h6" => Some(6),
        _ => None,
    }
}

/// Exact class token match.
pub(crate) fn has_class(el: ElementRef<'_>, name: &str) -> bool {
    el.value().classes().any(|c| c == name)
}

/// Any class token containing `needle` (case-insensitive).
pub(crate) fn class_contains(el: ElementRef<'_>, needle: &str) -> bool {
    let needle = needle.to_ascii_lowercase();
    el.value()
        .classes()
        .any(|c| c.to_ascii_lowercase().contains(&needle))
}

/// Lowercased class tokens in attribute order.
pub(crate) fn class_tokens(el: ElementRef<'_>) -> Vec<String> {
    el.value()
        .classes()
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Non-empty attribute value.
pub(crate) fn attr<'a>(el: ElementRef<'a>, name: &str) -> Option<&'a str> {
    el.value()
        .attr(name)
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

pub(crate) fn child_elements<'a>(el: ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> {
    el.children().filter_map(ElementRef::wrap)
}

/// First descendant (excluding `el` itself) matching `pred`, depth-first.
pub(crate) fn find_descendant<'a>(
    el: ElementRef<'a>,
    pred: impl Fn(ElementRef<'a>) -> bool,
) -> Option<ElementRef<'a>> {
    el.descendants()
        .skip(1)
        .filter_map(ElementRef::wrap)
        .find(|e| pred(*e))
}

pub(crate) fn has_block_children(el: ElementRef<'_>) -> bool {
    child_elements(el).any(|c| is_block(c) && !is_ignored(c))
}

/// Visible text of `el`, skipping ignored elements and any subtree for
/// which `skip` returns true. Block boundaries and `<br>` become spaces.
pub(crate) fn text_excluding(el: ElementRef<'_>, skip: &dyn Fn(ElementRef<'_>) -> bool) -> String {
    let mut out = String::new();
    for child in el.children() {
        collect_text(child, &mut out, skip);
    }
    out
}

/// Visible text of `el`.
pub(crate) fn visible_text(el: ElementRef<'_>) -> String {
    text_excluding(el, &|_| false)
}

/// Append the visible text of `node` to `out`.
///
/// Walks the subtree with an explicit open/close edge iterator, so
/// arbitrarily deep markup does not grow the call stack.
pub(crate) fn collect_text(
    node: NodeRef<'_, Node>,
    out: &mut String,
    skip: &dyn Fn(ElementRef<'_>) -> bool,
) {
    let mut skipped: Option<NodeId> = None;
    for edge in node.traverse() {
        match edge {
            Edge::Open(node) => {
                if skipped.is_some() {
                    continue;
                }
                if let Some(el) = ElementRef::wrap(node) {
                    if is_ignored(el) || skip(el) {
                        skipped = Some(node.id());
                    } else if is_text_boundary(el) {
                        out.push(' ');
                    }
                } else if let Some(text) = node.value().as_text() {
                    out.push_str(text);
                }
            }
            Edge::Close(node) => match skipped {
                Some(id) if id == node.id() => skipped = None,
                Some(_) => {}
                None => {
                    if ElementRef::wrap(node).is_some_and(is_text_boundary) {
                        out.push(' ');
                    }
                }
            },
        }
    }
}

fn is_text_boundary(el: ElementRef<'_>) -> bool {
    is_block(el) || tag(el) == "br"
}

/// Outermost descendants of `el` matching `pred`, in DOM order.
///
/// Matches are not descended into; ignored subtrees are skipped.
pub(crate) fn outermost<'a>(
    el: ElementRef<'a>,
    pred: impl Fn(ElementRef<'a>) -> bool,
) -> Vec<ElementRef<'a>> {
    let mut found = Vec::new();
    let mut stack: Vec<ElementRef<'a>> = child_elements(el).collect();
    stack.reverse();
    while let Some(e) = stack.pop() {
        if pred(e) {
            found.push(e);
        } else if !is_ignored(e) {
            let mark = stack.len();
            stack.extend(child_elements(e));
            stack[mark..].reverse();
        }
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    fn first<'a>(html: &'a Html, name: &str) -> ElementRef<'a> {
        html.root_element()
            .descendants()
            .filter_map(ElementRef::wrap)
            .find(|e| tag(*e) == name)
            .unwrap()
    }

    #[test]
    fn test_visible_text_skips_ignored() {
        let html = Html::parse_fragment(
            "<div>Fever<script>var x;</script> <button>Collapse</button><p>and chills</p></div>",
        );
        let div = first(&html, "div");
        let text = visible_text(div);
        assert!(text.contains("Fever"));
        assert!(text.contains("and chills"));
        assert!(!text.contains("var x"));
        assert!(!text.contains("Collapse"));
    }

    #[test]
    fn test_block_boundaries_become_spaces() {
        let html = Html::parse_fragment("<div><p>A</p><p>B</p></div>");
        let div = first(&html, "div");
        let words: Vec<String> = visible_text(div)
            .split_whitespace()
            .map(String::from)
            .collect();
        assert_eq!(words, vec!["A", "B"]);
    }

    #[test]
    fn test_class_helpers() {
        let html = Html::parse_fragment(r#"<div class="baseStyles-x1 Box-Yellow">x</div>"#);
        let div = first(&html, "div");
        assert!(class_contains(div, "basestyles"));
        assert!(has_class(div, "Box-Yellow"));
        assert_eq!(class_tokens(div), vec!["basestyles-x1", "box-yellow"]);
    }

    #[test]
    fn test_deep_nesting_does_not_recurse() {
        let depth = 5_000;
        let fragment = format!("<div>{}deep{}</div>", "<span>".repeat(depth), "</span>".repeat(depth));
        let html = Html::parse_fragment(&fragment);
        assert_eq!(visible_text(first(&html, "div")).trim(), "deep");
    }

    #[test]
    fn test_outermost_skips_matched_subtrees() {
        let html = Html::parse_fragment(
            "<div><ul><li>a<ul><li>b</li></ul></li></ul><p><span><ol><li>c</li></ol></span></p></div>",
        );
        let found = outermost(first(&html, "div"), |e| matches!(tag(e), "ul" | "ol"));
        let tags: Vec<&str> = found.iter().map(|e| tag(*e)).collect();
        assert_eq!(tags, vec!["ul", "ol"]);
    }

    #[test]
    fn test_heading_level() {
        let html = Html::parse_fragment("<h4>x</h4>");
        assert_eq!(heading_level(first(&html, "h4")), Some(4));
    }
}
