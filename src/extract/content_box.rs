//! Content box (callout) extraction.

use scraper::ElementRef;

use super::{dom, BlockExtractor, Flow};
use crate::model::{BoxKind, ContentBox};

/// Class tokens (or token parts) that decide the box kind.
const KIND_TOKENS: &[(&str, BoxKind)] = &[
    ("info", BoxKind::Note),
    ("blue", BoxKind::Note),
    ("merke", BoxKind::Note),
    ("warning", BoxKind::Warning),
    ("yellow", BoxKind::Warning),
    ("cave", BoxKind::Warning),
    ("red", BoxKind::Warning),
    ("tip", BoxKind::Tip),
    ("green", BoxKind::Tip),
];

fn lookup(part: &str) -> Option<BoxKind> {
    KIND_TOKENS
        .iter()
        .find(|(token, _)| *token == part)
        .map(|(_, kind)| *kind)
}

/// Kind from the first class token (or `-`/`_` part) with a known meaning.
pub(super) fn box_kind(el: ElementRef<'_>) -> BoxKind {
    dom::class_tokens(el)
        .iter()
        .find_map(|token| {
            lookup(token).or_else(|| token.split(['-', '_']).find_map(lookup))
        })
        .unwrap_or_default()
}

/// Leading heading, or a child whose class names it a title or header.
fn title_element(el: ElementRef<'_>) -> Option<ElementRef<'_>> {
    let mut children = dom::child_elements(el).filter(|c| !dom::is_ignored(*c));
    let first = children.next()?;
    if dom::heading_level(first).is_some() {
        return Some(first);
    }
    std::iter::once(first)
        .chain(children)
        .find(|c| dom::class_contains(*c, "title") || dom::class_contains(*c, "header"))
}

impl BlockExtractor<'_> {
    /// Build a content box; the body goes through the regular extraction
    /// one level deeper.
    pub(super) fn extract_content_box(
        &mut self,
        el: ElementRef<'_>,
        depth: usize,
    ) -> Option<ContentBox> {
        let kind = box_kind(el);
        let title_el = title_element(el);
        let title = title_el
            .map(|t| self.clean(&dom::visible_text(t)))
            .filter(|t| !t.is_empty());

        let title_id = title_el.map(|t| t.id());
        let body = self.extract_nodes(
            el.children().filter(|node| Some(node.id()) != title_id),
            depth + 1,
            Flow::Block,
        );

        if title.is_none() && body.is_empty() {
            log::debug!("Dropping empty {} box", kind);
            return None;
        }
        Some(ContentBox { kind, title, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::ExtractOptions;
    use crate::model::Block;
    use scraper::Html;

    fn extract_root(fragment: &str) -> Option<ContentBox> {
        let html = Html::parse_fragment(fragment);
        let el = dom::child_elements(html.root_element()).next().unwrap();
        let options = ExtractOptions::default();
        BlockExtractor::new(&options).extract_content_box(el, 0)
    }

    fn kind_of(class: &str) -> BoxKind {
        extract_root(&format!(r#"<div class="{}">x</div>"#, class))
            .unwrap()
            .kind
    }

    #[test]
    fn test_kind_table() {
        assert_eq!(kind_of("box box-blue"), BoxKind::Note);
        assert_eq!(kind_of("infobox"), BoxKind::Note);
        assert_eq!(kind_of("content-box warning"), BoxKind::Warning);
        assert_eq!(kind_of("box_yellow"), BoxKind::Warning);
        assert_eq!(kind_of("cave"), BoxKind::Warning);
        assert_eq!(kind_of("box-green"), BoxKind::Tip);
        assert_eq!(kind_of("merke"), BoxKind::Note);
        assert_eq!(kind_of("box box-purple"), BoxKind::Note);
    }

    #[test]
    fn test_title_and_body() {
        let content_box = extract_root(
            r#"<div class="box box-yellow"><h4>Caution</h4><p>Avoid NSAIDs</p><ul><li>Renal failure</li></ul></div>"#,
        )
        .unwrap();
        assert_eq!(content_box.kind, BoxKind::Warning);
        assert_eq!(content_box.title.as_deref(), Some("Caution"));
        assert_eq!(content_box.body.len(), 2);
        assert_eq!(content_box.body[0], Block::paragraph("Avoid NSAIDs"));
        assert!(matches!(content_box.body[1], Block::List(_)));
    }

    #[test]
    fn test_title_by_class() {
        let content_box = extract_root(
            r#"<div class="merke"><span class="box__header">Remember</span>Appendicitis is a <em>clinical</em> diagnosis</div>"#,
        )
        .unwrap();
        assert_eq!(content_box.title.as_deref(), Some("Remember"));
        assert_eq!(
            content_box.body,
            vec![Block::paragraph("Appendicitis is a clinical diagnosis")]
        );
    }

    #[test]
    fn test_nested_box() {
        let content_box = extract_root(
            r#"<div class="box-green"><p>Outer</p><div class="box-red"><p>Inner</p></div></div>"#,
        )
        .unwrap();
        let Block::ContentBox(inner) = &content_box.body[1] else {
            panic!("expected nested box");
        };
        assert_eq!(inner.kind, BoxKind::Warning);
    }

    #[test]
    fn test_empty_box_dropped() {
        assert!(extract_root(r#"<div class="box"><button>Close</button></div>"#).is_none());
    }
}
