//! `word/footnotes.xml`.

use super::content::ContentWriter;
use super::xml::{XmlElement, NS_R, NS_W};
use super::properties::{paragraph_properties, run_properties};
use crate::model::{
    Footnote, FootnoteKind, Paragraph, ParagraphProperties, RunProperties, Spacing,
    VerticalPosition,
};
use crate::package::Relationships;

/// Build the `w:footnotes` element: the two separators, then each content
/// footnote in order. Returns the hyperlink relationships its content needs.
pub fn write_footnotes(footnotes: &[Footnote]) -> (XmlElement, Relationships) {
    let mut writer = ContentWriter::new(Relationships::new());
    let mut root = XmlElement::new("w:footnotes")
        .attr("xmlns:w", NS_W)
        .attr("xmlns:r", NS_R);

    for separator in Footnote::separators() {
        root.push(separator_element(&separator));
    }
    for footnote in footnotes {
        root.push(footnote_element(&mut writer, footnote));
    }

    (root, writer.into_relationships())
}

fn separator_element(footnote: &Footnote) -> XmlElement {
    let mark = match footnote.kind {
        FootnoteKind::ContinuationSeparator => "w:continuationSeparator",
        _ => "w:separator",
    };
    let props = ParagraphProperties {
        spacing: Some(Spacing {
            before: None,
            after: Some(0),
            line: Some(240),
        }),
        ..Default::default()
    };

    let mut p = XmlElement::new("w:p");
    p.push_opt(paragraph_properties(&props, None));
    p.push(XmlElement::new("w:r").child(XmlElement::new(mark)));
    footnote_open(footnote).child(p)
}

fn footnote_open(footnote: &Footnote) -> XmlElement {
    let mut el = XmlElement::new("w:footnote");
    if let Some(kind) = footnote.kind.as_ooxml() {
        el.push_attr("w:type", kind);
    }
    el.push_attr("w:id", footnote.id);
    el
}

/// A content footnote. The first paragraph opens with the footnote mark.
fn footnote_element(writer: &mut ContentWriter, footnote: &Footnote) -> XmlElement {
    let mut el = footnote_open(footnote);
    let empty = [Paragraph::new()];
    let paragraphs: &[Paragraph] = if footnote.content.is_empty() {
        &empty
    } else {
        &footnote.content
    };

    for (i, para) in paragraphs.iter().enumerate() {
        if i > 0 {
            el.push(writer.paragraph(para, None));
            continue;
        }
        let mut p = XmlElement::new("w:p");
        p.push_opt(paragraph_properties(&para.properties, None));
        p.push(footnote_mark());
        p.push(
            XmlElement::new("w:r").child(
                XmlElement::new("w:t")
                    .attr("xml:space", "preserve")
                    .text(" "),
            ),
        );
        writer.push_inlines(&mut p, &para.content);
        el.push(p);
    }
    el
}

fn footnote_mark() -> XmlElement {
    let props = RunProperties::new().vertical_position(VerticalPosition::Superscript);
    let mut r = XmlElement::new("w:r");
    r.push_opt(run_properties(&props));
    r.push(XmlElement::new("w:footnoteRef"));
    r
}
