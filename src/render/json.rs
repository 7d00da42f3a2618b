//! JSON renderer implementation.

use crate::error::Result;
use crate::model::Document;

/// JSON output format options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum JsonFormat {
    /// Compact single-line JSON
    Compact,
    /// Pretty-printed with 2-space indentation
    #[default]
    Pretty,
}

/// Convert a Document to JSON.
pub fn to_json(doc: &Document, format: JsonFormat) -> Result<String> {
    match format {
        JsonFormat::Compact => doc.to_json_compact(),
        JsonFormat::Pretty => doc.to_json(),
    }
}

/// Convert a Document to JSON with default formatting.
pub fn to_json_default(doc: &Document) -> Result<String> {
    to_json(doc, JsonFormat::Pretty)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::DocumentBuilder;
    use crate::model::Paragraph;
    use crate::numbering::{Level, NumberFormat};

    #[test]
    fn test_to_json_pretty() {
        let mut doc = Document::new();
        doc.add_paragraph(Paragraph::with_text("Hello"));

        let json = to_json(&doc, JsonFormat::Pretty).unwrap();
        assert!(json.contains("\"Hello\""));
        assert!(json.contains('\n'));
    }

    #[test]
    fn test_to_json_compact() {
        let doc = Document::new();
        let json = to_json(&doc, JsonFormat::Compact).unwrap();
        assert!(!json.contains('\n'));
    }

    #[test]
    fn test_document_roundtrip() {
        let mut builder = DocumentBuilder::new();
        let list = builder
            .define_list(vec![Level::numbered(0, NumberFormat::UpperRoman, "%1.")])
            .unwrap();
        builder.paragraph(Paragraph::heading(1, "Heading"));
        builder.list_item(list, 0, Paragraph::with_text("first")).unwrap();
        builder.footnote(vec![Paragraph::with_text("note")]);
        let doc = builder.finish();

        let json = to_json_default(&doc).unwrap();
        assert!(json.contains("\"label\": \"I.\""));
        let parsed: Document = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, doc);
    }
}
