//! Locating article content in a rendered page.

use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;

use super::dom;

static SECTION_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(r#"section[data-e2e-test-id="section-with-header"]"#)
        .expect("BUG: hardcoded section selector is invalid")
});

static PARTICLE_HEADER_H3_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(r#"[data-e2e-test-id="particle-header"] h3"#)
        .expect("BUG: hardcoded particle header selector is invalid")
});

static H3_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("h3").expect("BUG: hardcoded selector 'h3' is invalid"));

static SECTION_CONTENT_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(
        r#"[data-e2e-test-id="section-content-is-shown"], [data-e2e-test-id="section-content-is-hidden"]"#,
    )
    .expect("BUG: hardcoded section content selector is invalid")
});

static ANY_SECTION_CONTENT_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(r#"[data-e2e-test-id^="section-content-is-"]"#)
        .expect("BUG: hardcoded section content prefix selector is invalid")
});

static BASE_STYLES_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(r#"div[class*="baseStyles"]"#)
        .expect("BUG: hardcoded baseStyles selector is invalid")
});

static ARTICLE_HEADER_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(r#"[data-e2e-test-id="articleHeader"]"#)
        .expect("BUG: hardcoded article header selector is invalid")
});

static HEADER_TITLE_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("h1, h2").expect("BUG: hardcoded selector 'h1, h2' is invalid")
});

static TITLE_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("title").expect("BUG: hardcoded selector 'title' is invalid")
});

/// Suffix the site appends to page titles.
const SITE_TITLE_SUFFIX: &str = " - AMBOSS";

/// Where the article content lives.
#[derive(Debug)]
pub(crate) enum ContentRoot<'a> {
    /// Collapsible article sections, each with a header
    Sections(Vec<ArticleSection<'a>>),
    /// Plain content containers in document order
    Containers(Vec<ElementRef<'a>>),
}

/// One collapsible section of an article.
#[derive(Debug)]
pub(crate) struct ArticleSection<'a> {
    /// Raw title text, if the section has one
    pub title: Option<String>,
    /// Element whose children are the section's content
    pub content: Option<ElementRef<'a>>,
}

/// Locate the article content in a parsed page.
pub(crate) fn locate(html: &Html) -> Option<ContentRoot<'_>> {
    let sections: Vec<ArticleSection<'_>> = html
        .select(&SECTION_SELECTOR)
        .map(|section| ArticleSection {
            title: section_title(section),
            content: section
                .select(&SECTION_CONTENT_SELECTOR)
                .next()
                .map(prefer_base_styles),
        })
        .collect();
    if !sections.is_empty() {
        return Some(ContentRoot::Sections(sections));
    }

    let containers: Vec<ElementRef<'_>> = html
        .select(&ANY_SECTION_CONTENT_SELECTOR)
        .map(prefer_base_styles)
        .collect();
    if !containers.is_empty() {
        return Some(ContentRoot::Containers(containers));
    }

    html.select(&BASE_STYLES_SELECTOR)
        .next()
        .map(|el| ContentRoot::Containers(vec![el]))
}

/// Inside a content container, the `baseStyles` wrapper holds the blocks.
fn prefer_base_styles(container: ElementRef<'_>) -> ElementRef<'_> {
    if dom::class_contains(container, "baseStyles") {
        return container;
    }
    container
        .select(&BASE_STYLES_SELECTOR)
        .next()
        .unwrap_or(container)
}

fn section_title(section: ElementRef<'_>) -> Option<String> {
    section
        .select(&PARTICLE_HEADER_H3_SELECTOR)
        .chain(section.select(&H3_SELECTOR))
        .map(dom::visible_text)
        .find(|text| !text.trim().is_empty())
}

/// Article title as presented by the page itself.
///
/// Prefers the article header, then the document `<title>` without the site
/// suffix.
pub(crate) fn page_title(html: &Html) -> Option<String> {
    let from_header = html
        .select(&ARTICLE_HEADER_SELECTOR)
        .next()
        .and_then(|header| header.select(&HEADER_TITLE_SELECTOR).next())
        .map(dom::visible_text)
        .filter(|text| !text.trim().is_empty());
    if from_header.is_some() {
        return from_header;
    }

    html.select(&TITLE_SELECTOR)
        .next()
        .map(|title| title.text().collect::<String>())
        .map(|text| {
            let text = text.trim();
            text.strip_suffix(SITE_TITLE_SUFFIX)
                .unwrap_or(text)
                .trim()
                .to_string()
        })
        .filter(|text| !text.is_empty())
}
