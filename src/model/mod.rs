//! Document model for WordprocessingML packages.
//!
//! Callers build a [`Document`] out of sections, paragraphs, tables, and
//! footnotes; the writers in [`crate::docx`] turn it into package parts.

mod document;
mod footnote;
mod paragraph;
mod style;
mod table;

pub use document::*;
pub use footnote::*;
pub use paragraph::*;
pub use style::*;
pub use table::*;
