//! `word/document.xml`: body content and section breaks.

use super::content::ContentWriter;
use super::xml::{XmlElement, NS_R, NS_W};
use crate::error::Result;
use crate::model::{Block, Document, Orientation, Section};
use crate::package::Relationships;

/// Build the `w:document` element. Hyperlink relationships are appended to
/// `relationships`, which is returned with the element.
pub fn write_document(
    document: &Document,
    relationships: Relationships,
) -> Result<(XmlElement, Relationships)> {
    let mut writer = ContentWriter::new(relationships);
    let mut body = XmlElement::new("w:body");
    let last = document.sections.len().saturating_sub(1);

    for (index, section) in document.sections.iter().enumerate() {
        let mut carried = if index == last {
            None
        } else {
            Some(section_properties(section))
        };
        let count = section.content.len();

        for (i, block) in section.content.iter().enumerate() {
            match block {
                Block::Paragraph(para) => {
                    let sect_pr = if i + 1 == count { carried.take() } else { None };
                    body.push(writer.paragraph(para, sect_pr));
                }
                Block::Table(table) => body.push(writer.table(table)?),
            }
        }

        // Section ended with a table or was empty: carry the break on its own paragraph.
        if let Some(sect_pr) = carried {
            body.push(XmlElement::new("w:p").child(XmlElement::new("w:pPr").child(sect_pr)));
        }
    }

    if let Some(section) = document.sections.last() {
        body.push(section_properties(section));
    }

    let root = XmlElement::new("w:document")
        .attr("xmlns:w", NS_W)
        .attr("xmlns:r", NS_R)
        .child(body);
    Ok((root, writer.into_relationships()))
}

/// Build `w:sectPr` for a section.
pub fn section_properties(section: &Section) -> XmlElement {
    let geometry = &section.geometry;
    let mut pg_sz = XmlElement::new("w:pgSz")
        .attr("w:w", geometry.width)
        .attr("w:h", geometry.height);
    if geometry.orientation == Orientation::Landscape {
        pg_sz.push_attr("w:orient", "landscape");
    }

    let m = &geometry.margins;
    let pg_mar = XmlElement::new("w:pgMar")
        .attr("w:top", m.top)
        .attr("w:right", m.right)
        .attr("w:bottom", m.bottom)
        .attr("w:left", m.left)
        .attr("w:header", m.header)
        .attr("w:footer", m.footer)
        .attr("w:gutter", 0);

    let mut sect_pr = XmlElement::new("w:sectPr").child(pg_sz).child(pg_mar);
    if let Some(columns) = &section.columns {
        let mut cols = XmlElement::new("w:cols").attr("w:num", columns.count);
        if let Some(space) = columns.space {
            cols.push_attr("w:space", space);
        }
        if columns.separator {
            cols.push_attr("w:sep", 1);
        }
        sect_pr.push(cols);
    }
    sect_pr
}
