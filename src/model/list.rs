//! List types.

use serde::{Deserialize, Serialize};

/// An ordered or unordered list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct List {
    /// Whether items are numbered
    pub ordered: bool,

    /// Items in DOM order
    pub items: Vec<ListItem>,
}

impl List {
    /// Create an empty unordered list.
    pub fn unordered() -> Self {
        Self {
            ordered: false,
            items: Vec::new(),
        }
    }

    /// Create an empty ordered list.
    pub fn ordered() -> Self {
        Self {
            ordered: true,
            items: Vec::new(),
        }
    }

    /// Append an item and return self.
    pub fn with_item(mut self, item: ListItem) -> Self {
        self.items.push(item);
        self
    }

    /// Check if the list has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total number of items, nested ones included.
    pub fn item_count(&self) -> usize {
        self.items
            .iter()
            .map(|item| 1 + item.nested.as_ref().map_or(0, List::item_count))
            .sum()
    }

    /// Deepest nesting level (1 for a flat list).
    pub fn depth(&self) -> usize {
        1 + self
            .items
            .iter()
            .filter_map(|item| item.nested.as_ref())
            .map(List::depth)
            .max()
            .unwrap_or(0)
    }

    /// Get plain text, one item per line.
    pub fn plain_text(&self) -> String {
        let mut lines = Vec::new();
        self.collect_lines(&mut lines);
        lines.join("\n")
    }

    fn collect_lines(&self, lines: &mut Vec<String>) {
        for item in &self.items {
            lines.push(item.text.clone());
            if let Some(ref nested) = item.nested {
                nested.collect_lines(lines);
            }
        }
    }
}

/// A single list item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListItem {
    /// Item text (excluding nested list content)
    pub text: String,

    /// Nested sub-list
    pub nested: Option<List>,
}

impl ListItem {
    /// Create an item without a sub-list.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            nested: None,
        }
    }

    /// Attach a nested list.
    pub fn with_nested(mut self, nested: List) -> Self {
        self.nested = Some(nested);
        self
    }
}
