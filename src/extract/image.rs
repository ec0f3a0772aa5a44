//! Image extraction and URL resolution.

use scraper::ElementRef;

use super::{dom, BlockExtractor, ExtractionWarning};
use crate::model::Image;

/// Lazy-loading attributes tried when `src` is a placeholder.
const LAZY_SOURCE_ATTRS: &[&str] = &["data-src", "data-lazy-src", "data-original"];

const CAPTION_CLASS: &str = "thumbnail__image__title";

fn is_placeholder(src: &str) -> bool {
    let lower = src.to_ascii_lowercase();
    lower.is_empty()
        || lower.starts_with("data:")
        || lower.contains("placeholder")
        || lower.contains("blank.gif")
}

/// First URL of a `srcset` value.
fn first_srcset_candidate(srcset: &str) -> Option<&str> {
    srcset
        .split(',')
        .filter_map(|candidate| candidate.split_whitespace().next())
        .find(|url| !url.is_empty())
}

/// Best source URL of an `img` (or `source`) element.
fn image_source(img: ElementRef<'_>) -> Option<&str> {
    dom::attr(img, "src")
        .filter(|src| !is_placeholder(src))
        .or_else(|| {
            LAZY_SOURCE_ATTRS
                .iter()
                .filter_map(|name| dom::attr(img, name))
                .find(|src| !is_placeholder(src))
        })
        .or_else(|| dom::attr(img, "srcset").and_then(first_srcset_candidate))
        .filter(|src| !is_placeholder(src))
}

impl BlockExtractor<'_> {
    /// Build an image from an `img`, `figure`, `picture`, or thumbnail span.
    ///
    /// Returns `None` (with a warning) when no usable source is found.
    pub(super) fn extract_image(&mut self, el: ElementRef<'_>) -> Option<Image> {
        let img = if dom::tag(el) == "img" {
            Some(el)
        } else {
            dom::find_descendant(el, |e| dom::tag(e) == "img")
        };

        let source = img.and_then(image_source).or_else(|| {
            dom::find_descendant(el, |e| dom::tag(e) == "source").and_then(image_source)
        });
        let Some(source) = source else {
            self.warn(ExtractionWarning::MissingImageSource);
            return None;
        };

        let mut image = Image::new(self.resolve_url(source));
        image.alt = img
            .and_then(|img| dom::attr(img, "alt").or_else(|| dom::attr(img, "title")))
            .map(|alt| self.clean(alt))
            .filter(|alt| !alt.is_empty());
        image.caption = self.image_caption(el, img);
        Some(image)
    }

    fn image_caption(&self, el: ElementRef<'_>, img: Option<ElementRef<'_>>) -> Option<String> {
        dom::find_descendant(el, |e| dom::has_class(e, CAPTION_CLASS) || dom::tag(e) == "figcaption")
            .map(dom::visible_text)
            .or_else(|| img.and_then(|img| dom::attr(img, "title")).map(str::to_string))
            .map(|caption| self.clean(&caption))
            .filter(|caption| !caption.is_empty())
    }

    /// Resolve relative and protocol-relative URLs against the base URL.
    pub(super) fn resolve_url(&self, src: &str) -> String {
        match self.base_url.as_ref().map(|base| base.join(src)) {
            Some(Ok(url)) => url.to_string(),
            Some(Err(e)) => {
                log::debug!("Keeping unresolvable image URL '{}': {}", src, e);
                src.to_string()
            }
            None => src.to_string(),
        }
    }
}
