//! Extraction options and configuration.

/// Default origin used to resolve relative image URLs.
pub const DEFAULT_BASE_URL: &str = "https://next.amboss.com";

/// Default nesting cap for boxes, lists, and wrapper elements.
pub const DEFAULT_MAX_DEPTH: usize = 24;

/// Options for extracting article content.
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// Origin used to resolve relative and protocol-relative image URLs
    pub base_url: String,

    /// Maximum element nesting followed before content is flattened
    pub max_depth: usize,

    /// Title to use instead of the one found on the page
    pub title_override: Option<String>,

    /// Sections whose title contains any of these phrases are skipped
    /// (case-insensitive)
    pub skip_sections: Vec<String>,

    /// Site UI phrases removed from extracted text
    pub noise_phrases: Vec<String>,

    /// Remove inline citation markers such as `[1][2]`
    pub strip_reference_markers: bool,

    /// Log every node classification at debug level
    pub trace: bool,
}

impl ExtractOptions {
    /// Create new extract options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the base URL for image resolution.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the maximum nesting depth (at least 1).
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth.max(1);
        self
    }

    /// Override the article title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title_override = Some(title.into());
        self
    }

    /// Replace the list of skipped section phrases.
    pub fn with_skip_sections<S: Into<String>>(
        mut self,
        phrases: impl IntoIterator<Item = S>,
    ) -> Self {
        self.skip_sections = phrases.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the list of noise phrases.
    pub fn with_noise_phrases<S: Into<String>>(
        mut self,
        phrases: impl IntoIterator<Item = S>,
    ) -> Self {
        self.noise_phrases = phrases.into_iter().map(Into::into).collect();
        self
    }

    /// Keep (`true`) or strip (`false`) citation markers.
    pub fn with_reference_markers(mut self, keep: bool) -> Self {
        self.strip_reference_markers = !keep;
        self
    }

    /// Enable per-node trace logging.
    pub fn with_trace(mut self, trace: bool) -> Self {
        self.trace = trace;
        self
    }

    /// Check whether a section with this title should be skipped.
    pub fn skips_section(&self, title: &str) -> bool {
        let title = title.to_lowercase();
        self.skip_sections
            .iter()
            .any(|phrase| title.contains(&phrase.to_lowercase()))
    }
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            max_depth: DEFAULT_MAX_DEPTH,
            title_override: None,
            skip_sections: vec!["references".to_string()],
            noise_phrases: ["Maximize table", "Table Quiz", "Collapse", "Feedback"]
                .into_iter()
                .map(String::from)
                .collect(),
            strip_reference_markers: true,
            trace: false,
        }
    }
}
