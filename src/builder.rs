//! Document build session.
//!
//! [`DocumentBuilder`] appends content to a [`Document`] in reading order and
//! resolves each list paragraph's label at the moment it is appended, so
//! labels follow the order in which the document will be read.

use crate::docx::DocxWriter;
use crate::error::Result;
use crate::model::{
    Document, ListReference, Paragraph, Section, StyleKind, StyleSheet, Table,
};
use crate::numbering::{Level, NumId, NumberingModel, NumberingResolver};
use crate::package::WriteOptions;

/// Paragraph style given to list items that have none.
const LIST_STYLE: &str = "ListParagraph";
/// Paragraph style given to footnote paragraphs that have none.
const FOOTNOTE_STYLE: &str = "FootnoteText";

/// Builds one document, owning the numbering counters for the session.
#[derive(Debug, Clone)]
pub struct DocumentBuilder {
    document: Document,
    resolver: NumberingResolver,
    labels: Vec<String>,
}

impl Default for DocumentBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentBuilder {
    /// Start a Letter-sized document with the standard styles.
    pub fn new() -> Self {
        Self::from_document(Document::new())
    }

    /// Continue building an existing document. Its numbering model moves
    /// into the session; counters start fresh.
    pub fn from_document(mut document: Document) -> Self {
        let model = std::mem::take(&mut document.numbering);
        Self {
            document,
            resolver: NumberingResolver::new(model),
            labels: Vec::new(),
        }
    }

    /// Replace the style sheet.
    pub fn styles(mut self, styles: StyleSheet) -> Self {
        self.document.styles = styles;
        self
    }

    /// Set the geometry and columns of the first section.
    ///
    /// The section is checked the same way as a [`section_break`](Self::section_break).
    pub fn first_section(mut self, section: Section) -> Result<Self> {
        section.validate()?;
        let content = std::mem::take(&mut self.document.current_section_mut().content);
        self.document.sections = vec![Section { content, ..section }];
        Ok(self)
    }

    /// The numbering model, for registering definitions and instances.
    pub fn numbering_mut(&mut self) -> &mut NumberingModel {
        self.resolver.model_mut()
    }

    /// Define a list and bind one instance to it.
    pub fn define_list(&mut self, levels: Vec<Level>) -> Result<NumId> {
        self.resolver.model_mut().add_list(levels)
    }

    /// Append a paragraph.
    pub fn paragraph(&mut self, para: Paragraph) -> &mut Self {
        self.document.add_paragraph(para);
        self
    }

    /// Append a list item at `level` of `num_id`, returning its label.
    ///
    /// Fails without appending anything if the instance or level is unknown.
    pub fn list_item(&mut self, num_id: NumId, level: u8, mut para: Paragraph) -> Result<String> {
        let label = self.resolver.advance(num_id, level)?;
        if para.properties.style_id.is_none()
            && self.document.styles.has(LIST_STYLE, StyleKind::Paragraph)
        {
            para.properties.style_id = Some(LIST_STYLE.to_string());
        }
        para.properties.numbering = Some(ListReference {
            num_id,
            level,
            label: Some(label.clone()),
        });
        self.document.add_paragraph(para);
        self.labels.push(label.clone());
        Ok(label)
    }

    /// Append a table. Merge regions are checked here.
    pub fn table(&mut self, table: Table) -> Result<&mut Self> {
        table.layout()?;
        self.document.add_table(table);
        Ok(self)
    }

    /// Add a footnote and return its ID for use in [`Run::footnote_reference`].
    ///
    /// [`Run::footnote_reference`]: crate::model::Run::footnote_reference
    pub fn footnote(&mut self, content: Vec<Paragraph>) -> u32 {
        let styled = self
            .document
            .styles
            .has(FOOTNOTE_STYLE, StyleKind::Paragraph);
        let content = content
            .into_iter()
            .map(|mut p| {
                if styled && p.properties.style_id.is_none() {
                    p.properties.style_id = Some(FOOTNOTE_STYLE.to_string());
                }
                p
            })
            .collect();
        self.document.add_footnote(content)
    }

    /// End the current section and start `section`.
    pub fn section_break(&mut self, section: Section) -> Result<&mut Self> {
        section.validate()?;
        self.document.add_section(section);
        Ok(self)
    }

    /// Labels resolved so far, in visitation order.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// The document built so far.
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Finish the session and return the document.
    pub fn finish(self) -> Document {
        let mut document = self.document;
        document.numbering = self.resolver.into_model();
        tracing::debug!(
            sections = document.sections.len(),
            labels = self.labels.len(),
            "document built"
        );
        document
    }
}

/// Assemble a document into archive bytes.
pub fn build_package(document: &Document, options: &WriteOptions) -> Result<Vec<u8>> {
    DocxWriter::new(document).to_bytes(options)
}
