//! Footnote model.

use super::Paragraph;
use serde::{Deserialize, Serialize};

/// Role of a footnote entry in the footnotes part.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FootnoteKind {
    /// A note referenced from body text
    #[default]
    Normal,
    /// Line separating notes from body text (always ID 0)
    Separator,
    /// Separator used when a note continues on the next page (always ID 1)
    ContinuationSeparator,
}

impl FootnoteKind {
    /// The `w:type` value, `None` for content notes.
    pub fn as_ooxml(&self) -> Option<&'static str> {
        match self {
            FootnoteKind::Normal => None,
            FootnoteKind::Separator => Some("separator"),
            FootnoteKind::ContinuationSeparator => Some("continuationSeparator"),
        }
    }
}

/// An out-of-flow note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Footnote {
    /// Footnote ID, unique within the document
    pub id: u32,

    /// Entry kind
    #[serde(default, skip_serializing_if = "is_normal")]
    pub kind: FootnoteKind,

    /// Note body
    #[serde(default)]
    pub content: Vec<Paragraph>,
}

fn is_normal(kind: &FootnoteKind) -> bool {
    *kind == FootnoteKind::Normal
}

impl Footnote {
    /// The two separator entries every footnotes part starts with.
    pub fn separators() -> [Footnote; 2] {
        [
            Footnote {
                id: 0,
                kind: FootnoteKind::Separator,
                content: Vec::new(),
            },
            Footnote {
                id: 1,
                kind: FootnoteKind::ContinuationSeparator,
                content: Vec::new(),
            },
        ]
    }

    /// Get the plain text content.
    pub fn plain_text(&self) -> String {
        self.content
            .iter()
            .map(|p| p.plain_text())
            .collect::<Vec<_>>()
            .join("\n")
    }
}
