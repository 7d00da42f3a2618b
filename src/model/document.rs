//! Document model structures.

use super::{Footnote, FootnoteKind, Paragraph, StyleSheet, Table};
use crate::error::{Error, Result};
use crate::numbering::NumberingModel;
use serde::{Deserialize, Serialize};

/// First ID handed out to content footnotes; 0 and 1 are the separators.
pub const FIRST_FOOTNOTE_ID: u32 = 2;

/// Page orientation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
}

/// Page margins in twips.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Margins {
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
    pub left: u32,
    pub header: u32,
    pub footer: u32,
}

impl Margins {
    /// The same margin on all four sides, with 0.5in header and footer.
    pub fn uniform(twips: u32) -> Self {
        Self {
            top: twips,
            right: twips,
            bottom: twips,
            left: twips,
            header: 720,
            footer: 720,
        }
    }
}

impl Default for Margins {
    fn default() -> Self {
        Self::uniform(1440)
    }
}

/// Page size, orientation, and margins of a section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageGeometry {
    /// Page width in twips
    pub width: u32,
    /// Page height in twips
    pub height: u32,
    #[serde(default)]
    pub orientation: Orientation,
    #[serde(default)]
    pub margins: Margins,
}

impl PageGeometry {
    /// US Letter, 8.5in x 11in.
    pub fn letter() -> Self {
        Self::portrait(12240, 15840)
    }

    /// ISO A4, 210mm x 297mm.
    pub fn a4() -> Self {
        Self::portrait(11906, 16838)
    }

    /// US Legal, 8.5in x 14in.
    pub fn legal() -> Self {
        Self::portrait(12240, 20160)
    }

    fn portrait(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            orientation: Orientation::Portrait,
            margins: Margins::default(),
        }
    }

    /// Rotate to landscape, swapping width and height.
    pub fn landscape(self) -> Self {
        if self.orientation == Orientation::Landscape {
            return self;
        }
        Self {
            width: self.height,
            height: self.width,
            orientation: Orientation::Landscape,
            margins: self.margins,
        }
    }

    /// Replace the margins.
    pub fn with_margins(mut self, margins: Margins) -> Self {
        self.margins = margins;
        self
    }

    /// Check that the page is usable: non-zero size, orientation agreeing
    /// with the aspect, and margins leaving room for text.
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(Error::InvalidSection(format!(
                "page size {}x{} has a zero dimension",
                self.width, self.height
            )));
        }
        let wide = self.width > self.height;
        if wide != (self.orientation == Orientation::Landscape) {
            return Err(Error::InvalidSection(format!(
                "{:?} orientation does not match page size {}x{}",
                self.orientation, self.width, self.height
            )));
        }
        let m = &self.margins;
        let fits = |a: u32, b: u32, extent: u32| a.checked_add(b).is_some_and(|sum| sum < extent);
        if !fits(m.left, m.right, self.width) || !fits(m.top, m.bottom, self.height) {
            return Err(Error::InvalidSection(format!(
                "margins leave no text area on a {}x{} page",
                self.width, self.height
            )));
        }
        Ok(())
    }
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self::letter()
    }
}

/// Multi-column text layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Columns {
    /// Number of columns
    pub count: u16,
    /// Gap between columns in twips
    #[serde(skip_serializing_if = "Option::is_none")]
    pub space: Option<u32>,
    /// Draw a line between columns
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub separator: bool,
}

impl Columns {
    pub fn new(count: u16) -> Self {
        Self {
            count,
            space: None,
            separator: false,
        }
    }

    pub fn with_space(mut self, twips: u32) -> Self {
        self.space = Some(twips);
        self
    }

    pub fn with_separator(mut self) -> Self {
        self.separator = true;
        self
    }
}

/// A content block within a section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Block {
    /// A paragraph of text
    Paragraph(Paragraph),
    /// A table
    Table(Table),
}

/// A run of content sharing one page geometry and column layout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Page geometry
    #[serde(default)]
    pub geometry: PageGeometry,

    /// Column layout
    #[serde(skip_serializing_if = "Option::is_none")]
    pub columns: Option<Columns>,

    /// Content blocks
    #[serde(default)]
    pub content: Vec<Block>,
}

impl Section {
    /// Create an empty section with the given geometry.
    pub fn new(geometry: PageGeometry) -> Self {
        Self {
            geometry,
            ..Default::default()
        }
    }

    /// Set the column layout.
    pub fn with_columns(mut self, columns: Columns) -> Self {
        self.columns = Some(columns);
        self
    }

    /// Add a content block to this section.
    pub fn add_block(&mut self, block: Block) {
        self.content.push(block);
    }

    /// Add a paragraph to this section.
    pub fn add_paragraph(&mut self, para: Paragraph) {
        self.content.push(Block::Paragraph(para));
    }

    /// Add a table to this section.
    pub fn add_table(&mut self, table: Table) {
        self.content.push(Block::Table(table));
    }

    /// Check if this section is empty.
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Get the number of content blocks.
    pub fn len(&self) -> usize {
        self.content.len()
    }

    /// All paragraphs, including those inside table cells.
    pub fn paragraphs(&self) -> Vec<&Paragraph> {
        let mut out = Vec::new();
        for block in &self.content {
            match block {
                Block::Paragraph(p) => out.push(p),
                Block::Table(t) => {
                    for row in &t.rows {
                        for cell in &row.cells {
                            out.extend(cell.content.iter());
                        }
                    }
                }
            }
        }
        out
    }

    /// Check geometry and column layout.
    pub fn validate(&self) -> Result<()> {
        self.geometry.validate()?;
        if let Some(cols) = &self.columns {
            if cols.count == 0 {
                return Err(Error::InvalidSection(
                    "column count must be at least 1".to_string(),
                ));
            }
        }
        Ok(())
    }
}

/// A document under construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Sections in order; never empty
    pub sections: Vec<Section>,

    /// Styles part content
    #[serde(default)]
    pub styles: StyleSheet,

    /// List definitions and instances
    #[serde(default, skip_serializing_if = "NumberingModel::is_empty")]
    pub numbering: NumberingModel,

    /// Content footnotes; separators are implied
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub footnotes: Vec<Footnote>,
}

impl Default for Document {
    fn default() -> Self {
        Self {
            sections: vec![Section::default()],
            styles: StyleSheet::default(),
            numbering: NumberingModel::default(),
            footnotes: Vec::new(),
        }
    }
}

impl Document {
    /// Create a document with one Letter-sized section and the standard styles.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new section; following content goes into it.
    pub fn add_section(&mut self, section: Section) {
        self.sections.push(section);
    }

    /// The section currently receiving content.
    pub fn current_section_mut(&mut self) -> &mut Section {
        if self.sections.is_empty() {
            self.sections.push(Section::default());
        }
        let last = self.sections.len() - 1;
        &mut self.sections[last]
    }

    /// Add a paragraph to the current section.
    pub fn add_paragraph(&mut self, para: Paragraph) {
        self.current_section_mut().add_paragraph(para);
    }

    /// Add a table to the current section.
    pub fn add_table(&mut self, table: Table) {
        self.current_section_mut().add_table(table);
    }

    /// Add a content footnote and return its ID.
    pub fn add_footnote(&mut self, content: Vec<Paragraph>) -> u32 {
        let id = self
            .footnotes
            .iter()
            .map(|f| f.id + 1)
            .max()
            .unwrap_or(FIRST_FOOTNOTE_ID)
            .max(FIRST_FOOTNOTE_ID);
        self.footnotes.push(Footnote {
            id,
            kind: FootnoteKind::Normal,
            content,
        });
        id
    }

    /// Get a footnote by ID.
    pub fn footnote(&self, id: u32) -> Option<&Footnote> {
        self.footnotes.iter().find(|f| f.id == id)
    }

    /// All body paragraphs, including those inside table cells.
    pub fn paragraphs(&self) -> Vec<&Paragraph> {
        self.sections.iter().flat_map(|s| s.paragraphs()).collect()
    }

    /// Get the total number of content blocks across all sections.
    pub fn total_blocks(&self) -> usize {
        self.sections.iter().map(|s| s.len()).sum()
    }

    /// Check if the document has no content.
    pub fn is_empty(&self) -> bool {
        self.sections.iter().all(|s| s.is_empty())
    }

    /// Check structure that does not depend on other parts: at least one
    /// section, and usable geometry in each.
    pub fn validate(&self) -> Result<()> {
        if self.sections.is_empty() {
            return Err(Error::InvalidSection(
                "document has no sections".to_string(),
            ));
        }
        for section in &self.sections {
            section.validate()?;
        }
        Ok(())
    }

    /// Extract all text content as a single string.
    pub fn plain_text(&self) -> String {
        let mut text = String::new();
        for section in &self.sections {
            for block in &section.content {
                match block {
                    Block::Paragraph(para) => {
                        text.push_str(&para.plain_text());
                        text.push('\n');
                    }
                    Block::Table(table) => {
                        text.push_str(&table.plain_text());
                        text.push('\n');
                    }
                }
            }
            text.push('\n');
        }
        text.trim().to_string()
    }

    /// Convert to JSON string.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Convert to JSON string (compact).
    pub fn to_json_compact(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Run, RunProperties};

    #[test]
    fn test_document_creation() {
        let mut doc = Document::new();
        assert!(doc.is_empty());
        assert_eq!(doc.sections.len(), 1);

        doc.add_paragraph(Paragraph::with_text("Hello, World!"));
        assert!(!doc.is_empty());
        assert_eq!(doc.total_blocks(), 1);
    }

    #[test]
    fn test_plain_text_extraction() {
        let mut doc = Document::new();
        doc.add_paragraph(Paragraph::with_runs([
            Run::text("Hello, "),
            Run::styled("World", RunProperties::new().bold()),
            Run::text("!"),
        ]));
        assert_eq!(doc.plain_text(), "Hello, World!");
    }

    #[test]
    fn test_footnote_ids_start_after_separators() {
        let mut doc = Document::new();
        assert_eq!(doc.add_footnote(vec![Paragraph::with_text("one")]), 2);
        assert_eq!(doc.add_footnote(vec![Paragraph::with_text("two")]), 3);
        assert_eq!(doc.footnote(3).unwrap().content[0].plain_text(), "two");
        assert!(doc.footnote(0).is_none());
    }

    #[test]
    fn test_page_presets() {
        let a4 = PageGeometry::a4().landscape();
        assert_eq!((a4.width, a4.height), (16838, 11906));
        assert_eq!(a4.orientation, Orientation::Landscape);
        assert!(a4.validate().is_ok());
        assert_eq!(a4.landscape(), a4);
        assert!(PageGeometry::legal().validate().is_ok());
    }

    #[test]
    fn test_invalid_geometry() {
        let mut page = PageGeometry::letter();
        page.orientation = Orientation::Landscape;
        assert!(matches!(page.validate(), Err(Error::InvalidSection(_))));

        let zero = PageGeometry {
            width: 0,
            ..PageGeometry::letter()
        };
        assert!(matches!(zero.validate(), Err(Error::InvalidSection(_))));

        let cramped = PageGeometry::letter().with_margins(Margins::uniform(8000));
        assert!(matches!(cramped.validate(), Err(Error::InvalidSection(_))));
    }

    #[test]
    fn test_huge_margins_are_rejected() {
        let wide = PageGeometry::letter().with_margins(Margins {
            left: 10,
            right: u32::MAX,
            ..Margins::default()
        });
        assert!(matches!(wide.validate(), Err(Error::InvalidSection(_))));

        let tall = PageGeometry::letter().with_margins(Margins {
            top: u32::MAX,
            bottom: u32::MAX,
            ..Margins::default()
        });
        assert!(matches!(tall.validate(), Err(Error::InvalidSection(_))));
    }

    #[test]
    fn test_document_requires_a_section() {
        let mut doc = Document::new();
        doc.sections.clear();
        assert!(matches!(doc.validate(), Err(Error::InvalidSection(_))));

        doc.add_paragraph(Paragraph::with_text("recovered"));
        assert!(doc.validate().is_ok());
    }

    #[test]
    fn test_paragraphs_include_table_cells() {
        let mut doc = Document::new();
        doc.add_paragraph(Paragraph::with_text("body"));
        let mut table = Table::grid(1, 2, 1000);
        table.set_text(0, 1, "cell");
        doc.add_table(table);

        let texts: Vec<String> = doc.paragraphs().iter().map(|p| p.plain_text()).collect();
        assert_eq!(texts, vec!["body", "cell"]);
    }

    #[test]
    fn test_json_omits_empty_parts() {
        let doc = Document::new();
        let json = doc.to_json_compact().unwrap();
        assert!(!json.contains("footnotes"));
        assert!(!json.contains("numbering"));
        assert!(json.contains("\"width\":12240"));
    }
}
