//! DOCX package writer.

use super::document::write_document;
use super::footnotes::write_footnotes;
use super::numbering::write_numbering;
use super::styles::write_styles;
use crate::error::{Error, Result};
use crate::model::{Block, Document, FootnoteKind, Paragraph, StyleKind, FIRST_FOOTNOTE_ID};
use crate::package::part::{content_type, rel_type};
use crate::package::{Package, Part, Relationships, TargetMode, WriteOptions};
use std::collections::BTreeSet;
use std::path::Path;

/// Main document part path.
pub const DOCUMENT_PATH: &str = "word/document.xml";
/// Styles part path.
pub const STYLES_PATH: &str = "word/styles.xml";
/// Numbering part path.
pub const NUMBERING_PATH: &str = "word/numbering.xml";
/// Footnotes part path.
pub const FOOTNOTES_PATH: &str = "word/footnotes.xml";

/// Writer for DOCX (Word) documents.
pub struct DocxWriter<'a> {
    document: &'a Document,
}

impl<'a> DocxWriter<'a> {
    /// Create a writer for a document.
    pub fn new(document: &'a Document) -> Self {
        Self { document }
    }

    /// Check cross-part references of the document model: list references,
    /// footnote references, and style IDs.
    pub fn validate(&self) -> Result<()> {
        let doc = self.document;
        doc.validate()?;
        doc.styles.validate()?;

        let mut footnote_ids = BTreeSet::new();
        for footnote in &doc.footnotes {
            if footnote.kind != FootnoteKind::Normal {
                return Err(Error::integrity(format!(
                    "footnote {} is a separator; separators are implied",
                    footnote.id
                )));
            }
            if footnote.id < FIRST_FOOTNOTE_ID {
                return Err(Error::integrity(format!(
                    "footnote id {} is reserved for separators",
                    footnote.id
                )));
            }
            if !footnote_ids.insert(footnote.id) {
                return Err(Error::integrity(format!(
                    "duplicate footnote id {}",
                    footnote.id
                )));
            }
        }

        for para in doc.paragraphs() {
            self.check_paragraph(para)?;
            for id in para.footnote_references() {
                if !footnote_ids.contains(&id) {
                    return Err(Error::integrity(format!(
                        "footnote reference {} has no footnote",
                        id
                    )));
                }
            }
        }
        for para in doc.footnotes.iter().flat_map(|f| f.content.iter()) {
            self.check_paragraph(para)?;
        }

        for section in &doc.sections {
            for block in &section.content {
                if let Block::Table(table) = block {
                    if let Some(style) = &table.style_id {
                        self.check_style(style, StyleKind::Table)?;
                    }
                }
            }
        }
        Ok(())
    }

    fn check_paragraph(&self, para: &Paragraph) -> Result<()> {
        if let Some(list) = &para.properties.numbering {
            self.document.numbering.level(list.num_id, list.level)?;
        }
        if let Some(style) = &para.properties.style_id {
            self.check_style(style, StyleKind::Paragraph)?;
        }
        for run in para.runs() {
            if let Some(style) = &run.properties.style_id {
                self.check_style(style, StyleKind::Character)?;
            }
        }
        Ok(())
    }

    fn check_style(&self, id: &str, kind: StyleKind) -> Result<()> {
        if self.document.styles.has(id, kind) {
            Ok(())
        } else {
            Err(Error::integrity(format!(
                "undefined {} style {:?}",
                kind.as_ooxml(),
                id
            )))
        }
    }

    /// Render every part and assemble the package. The package is validated
    /// before it is returned.
    pub fn package(&self) -> Result<Package> {
        self.validate()?;
        let doc = self.document;
        let mut package = Package::new();

        let mut doc_rels = Relationships::new();
        doc_rels.add(rel_type::STYLES, "styles.xml", TargetMode::Internal);
        if !doc.numbering.is_empty() {
            doc_rels.add(rel_type::NUMBERING, "numbering.xml", TargetMode::Internal);
        }
        if !doc.footnotes.is_empty() {
            doc_rels.add(rel_type::FOOTNOTES, "footnotes.xml", TargetMode::Internal);
        }

        let (body, doc_rels) = write_document(doc, doc_rels)?;
        package.add_part(
            Part::new(DOCUMENT_PATH, content_type::DOCUMENT, body.to_part_bytes()?)
                .with_relationships(doc_rels),
        )?;

        let styles = write_styles(&doc.styles);
        package.add_part(Part::new(
            STYLES_PATH,
            content_type::STYLES,
            styles.to_part_bytes()?,
        ))?;

        if !doc.numbering.is_empty() {
            let numbering = write_numbering(&doc.numbering);
            package.add_part(Part::new(
                NUMBERING_PATH,
                content_type::NUMBERING,
                numbering.to_part_bytes()?,
            ))?;
        }

        if !doc.footnotes.is_empty() {
            let (footnotes, rels) = write_footnotes(&doc.footnotes);
            package.add_part(
                Part::new(FOOTNOTES_PATH, content_type::FOOTNOTES, footnotes.to_part_bytes()?)
                    .with_relationships(rels),
            )?;
        }

        package.declare_content_types();
        package
            .relationships_mut()
            .add(rel_type::OFFICE_DOCUMENT, DOCUMENT_PATH, TargetMode::Internal);

        package.validate()?;
        tracing::debug!(
            sections = doc.sections.len(),
            blocks = doc.total_blocks(),
            footnotes = doc.footnotes.len(),
            lists = doc.numbering.instances.len(),
            parts = package.parts().len(),
            "document package assembled"
        );
        Ok(package)
    }

    /// Assemble and serialize to archive bytes.
    pub fn to_bytes(&self, options: &WriteOptions) -> Result<Vec<u8>> {
        self.package()?.to_bytes(options)
    }

    /// Assemble and write to a file.
    pub fn save(&self, path: impl AsRef<Path>, options: &WriteOptions) -> Result<()> {
        let bytes = self.to_bytes(options)?;
        std::fs::write(path.as_ref(), bytes)?;
        tracing::info!(path = %path.as_ref().display(), "document written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ListReference, Paragraph, ParagraphProperties, Run, RunProperties};
    use crate::numbering::{Level, NumId, NumberFormat};
    use crate::package::PackageReader;

    fn list_paragraph(num_id: u32, level: u8) -> Paragraph {
        Paragraph::with_text("item").with_properties(ParagraphProperties {
            numbering: Some(ListReference {
                num_id: NumId(num_id),
                level,
                label: None,
            }),
            ..Default::default()
        })
    }

    #[test]
    fn test_minimal_package_parts() {
        let mut doc = Document::new();
        doc.add_paragraph(Paragraph::with_text("Hello"));
        let package = DocxWriter::new(&doc).package().unwrap();

        let names = package.entry_names();
        assert_eq!(
            names,
            vec![
                "[Content_Types].xml",
                "_rels/.rels",
                "word/document.xml",
                "word/_rels/document.xml.rels",
                "word/styles.xml",
            ]
        );
        let rels = package.part(DOCUMENT_PATH).unwrap().relationships();
        assert_eq!(rels.len(), 1);
        assert!(package.part(NUMBERING_PATH).is_none());
    }

    #[test]
    fn test_optional_parts_are_related() {
        let mut doc = Document::new();
        let list = doc
            .numbering
            .add_list(vec![Level::numbered(0, NumberFormat::Decimal, "%1.")])
            .unwrap();
        doc.add_paragraph(list_paragraph(list.0, 0));
        let id = doc.add_footnote(vec![Paragraph::with_text("Note")]);
        let mut para = Paragraph::with_text("See");
        para.add_run(Run::footnote_reference(id));
        doc.add_paragraph(para);

        let bytes = DocxWriter::new(&doc).to_bytes(&WriteOptions::default()).unwrap();
        let reader = PackageReader::from_bytes(bytes).unwrap();
        assert_eq!(reader.main_document_path().unwrap(), DOCUMENT_PATH);
        let numbering = reader
            .read_related(DOCUMENT_PATH, rel_type::NUMBERING)
            .unwrap()
            .unwrap();
        assert!(numbering.contains("<w:abstractNum "));
        let footnotes = reader
            .read_related(DOCUMENT_PATH, rel_type::FOOTNOTES)
            .unwrap()
            .unwrap();
        assert!(footnotes.contains(r#"w:id="2""#));
        let types = reader.content_types().unwrap();
        assert_eq!(
            types.content_type_for(FOOTNOTES_PATH),
            Some(content_type::FOOTNOTES)
        );
    }

    #[test]
    fn test_unknown_list_reference() {
        let mut doc = Document::new();
        doc.add_paragraph(list_paragraph(4, 0));
        assert!(matches!(
            DocxWriter::new(&doc).package(),
            Err(Error::UnknownInstance(4))
        ));
    }

    #[test]
    fn test_list_reference_beyond_levels() {
        let mut doc = Document::new();
        let list = doc
            .numbering
            .add_list(vec![Level::numbered(0, NumberFormat::Decimal, "%1.")])
            .unwrap();
        doc.add_paragraph(list_paragraph(list.0, 2));
        assert!(matches!(
            DocxWriter::new(&doc).validate(),
            Err(Error::InvalidLevel { level: 2, .. })
        ));
    }

    #[test]
    fn test_dangling_footnote_reference() {
        let mut doc = Document::new();
        let mut para = Paragraph::with_text("See");
        para.add_run(Run::footnote_reference(7));
        doc.add_paragraph(para);
        assert!(matches!(
            DocxWriter::new(&doc).validate(),
            Err(Error::Integrity(_))
        ));
    }

    #[test]
    fn test_reserved_footnote_id() {
        let mut doc = Document::new();
        doc.add_footnote(vec![Paragraph::with_text("Note")]);
        doc.footnotes[0].id = 1;
        assert!(matches!(
            DocxWriter::new(&doc).validate(),
            Err(Error::Integrity(_))
        ));
    }

    #[test]
    fn test_undefined_styles() {
        let mut doc = Document::new();
        doc.add_paragraph(Paragraph::with_text("x").style("Nope"));
        assert!(matches!(
            DocxWriter::new(&doc).validate(),
            Err(Error::Integrity(_))
        ));

        // A paragraph style used as a character style is rejected too.
        let mut doc = Document::new();
        doc.add_paragraph(Paragraph::with_runs([Run::styled(
            "x",
            RunProperties::new().style("Heading1"),
        )]));
        assert!(DocxWriter::new(&doc).validate().is_err());
    }

    #[test]
    fn test_save_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.docx");
        let doc = Document::new();
        DocxWriter::new(&doc)
            .save(&path, &WriteOptions::default())
            .unwrap();
        let reader = PackageReader::open(&path).unwrap();
        assert!(reader.exists(STYLES_PATH));
    }
}
