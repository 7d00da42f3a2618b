//! DOCX (Word) document writer.
//!
//! This module renders the document model into the WordprocessingML parts
//! of an Office Open XML (.docx) package: `document.xml`, `styles.xml`,
//! `numbering.xml`, and `footnotes.xml`.

mod content;
mod document;
mod footnotes;
mod numbering;
mod properties;
mod styles;
mod writer;
pub mod xml;

pub use document::{section_properties, write_document};
pub use footnotes::write_footnotes;
pub use numbering::{parse_numbering, write_numbering};
pub use styles::write_styles;
pub use writer::{DocxWriter, DOCUMENT_PATH, FOOTNOTES_PATH, NUMBERING_PATH, STYLES_PATH};
