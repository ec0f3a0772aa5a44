//! List extraction.

use scraper::ElementRef;

use super::{dom, BlockExtractor, ExtractionWarning};
use crate::model::{List, ListItem};

pub(super) fn is_list(el: ElementRef<'_>) -> bool {
    matches!(dom::tag(el), "ul" | "ol")
}

/// Outermost `ul`/`ol` elements below `el`, in DOM order.
pub(super) fn nested_lists(el: ElementRef<'_>) -> Vec<ElementRef<'_>> {
    dom::outermost(el, is_list)
}

/// `li` text up to, but excluding, nested lists.
pub(super) fn item_text(li: ElementRef<'_>) -> String {
    dom::text_excluding(li, &is_list)
}

impl BlockExtractor<'_> {
    /// Build a list from a `ul`/`ol` element.
    ///
    /// All sub-lists of an item are merged into its `nested` list. Past the
    /// depth cap, sub-lists are appended to the item text instead.
    pub(super) fn extract_list(&mut self, el: ElementRef<'_>, depth: usize) -> Option<List> {
        let mut list = if dom::tag(el) == "ol" {
            List::ordered()
        } else {
            List::unordered()
        };

        for li in dom::child_elements(el).filter(|c| dom::tag(*c) == "li") {
            let mut text = self.clean(&item_text(li));
            let sublists = nested_lists(li);

            let mut nested: Option<List> = None;
            if !sublists.is_empty() {
                if depth + 1 > self.options.max_depth {
                    self.warn(ExtractionWarning::DepthLimit {
                        tag: dom::tag(sublists[0]).to_string(),
                        depth: depth + 1,
                    });
                    for sublist in &sublists {
                        let flat = self.clean(&dom::visible_text(*sublist));
                        if !flat.is_empty() {
                            if !text.is_empty() {
                                text.push(' ');
                            }
                            text.push_str(&flat);
                        }
                    }
                } else {
                    for sublist in sublists {
                        let Some(child) = self.extract_list(sublist, depth + 1) else {
                            continue;
                        };
                        match nested.as_mut() {
                            Some(merged) => merged.items.extend(child.items),
                            None => nested = Some(child),
                        }
                    }
                }
            }

            if text.is_empty() && nested.is_none() {
                continue;
            }
            let mut item = ListItem::new(text);
            item.nested = nested;
            list.items.push(item);
        }

        (!list.is_empty()).then_some(list)
    }
}
