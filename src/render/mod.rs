//! Outline rendering for built documents.
//!
//! The outline is a reading-order preview: list paragraphs carry the labels
//! resolved when they were appended, table cells are tab-separated, and
//! footnote references show as `[n]`.
//!
//! # Example
//!
//! ```
//! use docxforge::render::{to_json, to_outline, JsonFormat, OutlineOptions};
//! use docxforge::{Document, Paragraph};
//!
//! let mut doc = Document::new();
//! doc.add_paragraph(Paragraph::with_text("Hello"));
//!
//! let text = to_outline(&doc, &OutlineOptions::default());
//! assert_eq!(text, "Hello");
//!
//! let json = to_json(&doc, JsonFormat::Compact)?;
//! assert!(json.contains("\"Hello\""));
//! # Ok::<(), docxforge::Error>(())
//! ```

mod json;
mod options;
mod text;

pub use json::{to_json, to_json_default, JsonFormat};
pub use options::{OutlineOptions, TableLayout};
pub use text::to_outline;
