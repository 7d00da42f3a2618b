//! # docxforge
//!
//! Build WordprocessingML (.docx) packages from a typed document model.
//!
//! This library assembles documents paragraph by paragraph, resolves
//! multi-level list labels as list items are appended, and writes the
//! result as a deterministic Office Open XML package whose cross-part
//! references are checked before any byte is produced.
//!
//! ## Quick Start
//!
//! ```
//! use docxforge::numbering::{Level, NumberFormat};
//! use docxforge::{DocumentBuilder, Paragraph, WriteOptions};
//!
//! let mut builder = DocumentBuilder::new();
//! let list = builder.define_list(vec![
//!     Level::numbered(0, NumberFormat::Decimal, "%1."),
//!     Level::numbered(1, NumberFormat::LowerLetter, "%1.%2"),
//! ])?;
//!
//! builder.paragraph(Paragraph::heading(1, "Agenda"));
//! assert_eq!(builder.list_item(list, 0, Paragraph::with_text("Budget"))?, "1.");
//! assert_eq!(builder.list_item(list, 1, Paragraph::with_text("Review"))?, "1.a");
//!
//! let doc = builder.finish();
//! let bytes = docxforge::build_package(&doc, &WriteOptions::default())?;
//! assert_eq!(&bytes[..2], b"PK");
//! # Ok::<(), docxforge::Error>(())
//! ```
//!
//! ## Modules
//!
//! - [`model`]: document, section, paragraph, run, table, footnote, styles
//! - [`numbering`]: list definitions and the label resolver
//! - [`docx`]: part writers for document, styles, numbering, footnotes
//! - [`package`]: parts, relationships, content types, zip assembly and reading
//! - [`render`]: plain text outline and JSON
//! - [`fixtures`]: built-in documents exercising each formatting feature

pub mod builder;
pub mod docx;
pub mod error;
pub mod fixtures;
pub mod model;
pub mod numbering;
pub mod package;
pub mod render;

// Re-exports
pub use builder::{build_package, DocumentBuilder};
pub use docx::DocxWriter;
pub use error::{Error, Result};
pub use model::{
    Alignment, Block, Cell, CellRange, Color, Columns, Document, Footnote, Margins, Orientation,
    PageGeometry, Paragraph, ParagraphProperties, Row, Run, RunProperties, Section, StyleSheet,
    Table,
};
pub use numbering::{Level, NumId, NumberFormat, NumberingModel, NumberingResolver};
pub use package::{Package, PackageReader, WriteOptions};

use std::path::Path;

/// Write a document to a .docx file with default options.
///
/// # Example
///
/// ```no_run
/// use docxforge::{Document, Paragraph};
///
/// let mut doc = Document::new();
/// doc.add_paragraph(Paragraph::with_text("Hello"));
/// docxforge::write_file(&doc, "hello.docx")?;
/// # Ok::<(), docxforge::Error>(())
/// ```
pub fn write_file(doc: &Document, path: impl AsRef<Path>) -> Result<()> {
    DocxWriter::new(doc).save(path, &WriteOptions::default())
}

/// Render a document as a plain text outline with default options.
pub fn to_outline(doc: &Document) -> String {
    render::to_outline(doc, &render::OutlineOptions::default())
}

/// Read the numbering definitions of a .docx file, if it has any.
///
/// # Example
///
/// ```no_run
/// let model = docxforge::read_numbering("lists.docx")?;
/// println!("{} list instances", model.instances.len());
/// # Ok::<(), docxforge::Error>(())
/// ```
pub fn read_numbering(path: impl AsRef<Path>) -> Result<NumberingModel> {
    let reader = PackageReader::open(path)?;
    let main = reader.main_document_path()?;
    match reader.read_related(&main, package::part::rel_type::NUMBERING)? {
        Some(xml) => docx::parse_numbering(&xml),
        None => Ok(NumberingModel::new()),
    }
}
