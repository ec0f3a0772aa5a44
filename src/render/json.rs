//! JSON rendering for extracted articles.

use crate::error::Result;
use crate::model::Document;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Convert a document to JSON.
pub fn to_json(doc: &Document, format: JsonFormat) -> Result<String> {
    let json = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(doc)?,
        JsonFormat::Compact => serde_json::to_string(doc)?,
    };
    Ok(json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Block, Metadata};

    #[test]
    fn test_to_json_pretty() {
        let metadata = Metadata {
            title: Some("Test".to_string()),
            ..Default::default()
        };
        let doc = Document::new(metadata, vec![Block::heading(2, "Causes")]);

        let json = to_json(&doc, JsonFormat::Pretty).unwrap();
        assert!(json.contains("\"title\": \"Test\""));
        assert!(json.contains("\"type\": \"heading\""));
        assert!(json.contains('\n'));
    }

    #[test]
    fn test_to_json_compact_empty() {
        let doc = Document::from_blocks(Vec::new());
        let json = to_json(&doc, JsonFormat::Compact).unwrap();
        assert!(!json.contains('\n'));
        assert!(json.contains("\"blocks\":[]"));
    }

    #[test]
    fn test_json_round_trip() {
        let doc = Document::from_blocks(vec![Block::paragraph("Fever")]);
        let json = to_json(&doc, JsonFormat::Compact).unwrap();
        let back: Document = serde_json::from_str(&json).unwrap();
        assert_eq!(back, doc);
    }
}
