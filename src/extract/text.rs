//! Text normalization for extracted content.

use regex::Regex;
use std::sync::LazyLock;
use unicode_normalization::UnicodeNormalization;

use super::ExtractOptions;

/// Inline citation markers such as `[1]` or `[3][12]`.
static REFERENCE_MARKERS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[\d+\](?:\[\d+\])*").expect("BUG: hardcoded reference regex is invalid")
});

static WHITESPACE_BEFORE_PUNCT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\s+([,.;:!?)])").expect("BUG: hardcoded punctuation regex is invalid")
});

/// Cleans raw DOM text into display text.
#[derive(Debug, Clone)]
pub struct TextCleaner {
    noise_phrases: Vec<String>,
    strip_reference_markers: bool,
}

impl TextCleaner {
    /// Create a cleaner from extraction options.
    pub fn new(options: &ExtractOptions) -> Self {
        Self {
            noise_phrases: options.noise_phrases.clone(),
            strip_reference_markers: options.strip_reference_markers,
        }
    }

    /// Normalize `raw` into a single trimmed line.
    ///
    /// Collapses whitespace, drops citation markers and normalizes to NFC.
    /// Text made up only of site UI phrases becomes empty; phrases inside
    /// real text are kept.
    pub fn clean(&self, raw: &str) -> String {
        let mut text: String = raw.nfc().collect();
        text = collapse_whitespace(&text);

        if self.strip_reference_markers && text.contains('[') {
            text = REFERENCE_MARKERS.replace_all(&text, "").into_owned();
            // Removals can leave double spaces or a space before punctuation.
            text = collapse_whitespace(&text);
        }

        if self.is_noise(&text) {
            return String::new();
        }
        WHITESPACE_BEFORE_PUNCT
            .replace_all(&text, "$1")
            .trim()
            .to_string()
    }

    /// Whether `text` consists of nothing but configured noise phrases,
    /// e.g. `"Maximize table Table Quiz"`.
    pub fn is_noise(&self, text: &str) -> bool {
        let mut rest = text.trim();
        if rest.is_empty() {
            return false;
        }
        while !rest.is_empty() {
            let Some(tail) = self
                .noise_phrases
                .iter()
                .filter(|phrase| !phrase.is_empty())
                .find_map(|phrase| strip_phrase(rest, phrase))
            else {
                return false;
            };
            rest = tail;
        }
        true
    }
}

/// `text` without a leading `phrase`, if the phrase ends at a word boundary.
fn strip_phrase<'a>(text: &'a str, phrase: &str) -> Option<&'a str> {
    let tail = text.strip_prefix(phrase)?;
    if tail.is_empty() {
        Some(tail)
    } else if tail.starts_with(char::is_whitespace) {
        Some(tail.trim_start())
    } else {
        None
    }
}

impl Default for TextCleaner {
    fn default() -> Self {
        Self::new(&ExtractOptions::default())
    }
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapses_whitespace() {
        let cleaner = TextCleaner::default();
        assert_eq!(cleaner.clean("  Acute \n\t abdomen  "), "Acute abdomen");
    }

    #[test]
    fn test_strips_reference_markers() {
        let cleaner = TextCleaner::default();
        assert_eq!(
            cleaner.clean("Most common in adults [1][2]. Rare in infants [3]."),
            "Most common in adults. Rare in infants."
        );
    }

    #[test]
    fn test_keeps_markers_when_disabled() {
        let options = ExtractOptions::new().with_reference_markers(true);
        let cleaner = TextCleaner::new(&options);
        assert_eq!(cleaner.clean("Sepsis [4]"), "Sepsis [4]");
    }

    #[test]
    fn test_removes_noise_phrases() {
        let cleaner = TextCleaner::default();
        assert_eq!(cleaner.clean("Collapse"), "");
        assert_eq!(cleaner.clean("  Maximize table \n Table Quiz "), "");
        assert_eq!(cleaner.clean("Feedback [2]"), "");
    }

    #[test]
    fn test_keeps_noise_words_in_text() {
        let cleaner = TextCleaner::default();
        assert_eq!(
            cleaner.clean("Collapsed lung after Feedback inhibition"),
            "Collapsed lung after Feedback inhibition"
        );
        assert_eq!(cleaner.clean("Table Quiz Etiology"), "Table Quiz Etiology");
        assert!(!cleaner.is_noise("Collapsed"));
        assert!(!cleaner.is_noise(""));
    }

    #[test]
    fn test_nfc_normalization() {
        let cleaner = TextCleaner::default();
        // "e" + combining acute accent
        assert_eq!(cleaner.clean("Me\u{301}nie\u{300}re"), "Ménière");
    }
}
