//! Formatting properties to `w:rPr` / `w:pPr` elements.
//!
//! Child order follows the schema sequence. An option left at its default
//! produces no element, and a property container with no children is
//! dropped entirely.

use super::xml::XmlElement;
use crate::model::{
    Border, Borders, Indentation, ParagraphProperties, RunProperties, Shading, Spacing, Strike,
};

/// Build `w:rPr`, or `None` if nothing is set.
pub fn run_properties(props: &RunProperties) -> Option<XmlElement> {
    let mut rpr = XmlElement::new("w:rPr");

    if let Some(style) = &props.style_id {
        rpr.push(XmlElement::val("w:rStyle", style));
    }
    if let Some(font) = &props.font {
        rpr.push(
            XmlElement::new("w:rFonts")
                .attr("w:ascii", font)
                .attr("w:hAnsi", font)
                .attr("w:cs", font),
        );
    }
    if props.bold {
        rpr.push(XmlElement::new("w:b"));
    }
    if props.italic {
        rpr.push(XmlElement::new("w:i"));
    }
    match props.strike {
        Some(Strike::Single) => rpr.push(XmlElement::new("w:strike")),
        Some(Strike::Double) => rpr.push(XmlElement::new("w:dstrike")),
        None => {}
    }
    if let Some(color) = &props.color {
        rpr.push(XmlElement::val("w:color", color.to_hex()));
    }
    if let Some(spacing) = props.effective_spacing() {
        rpr.push(XmlElement::val("w:spacing", spacing));
    }
    if let Some(scale) = props.effective_scale() {
        rpr.push(XmlElement::val("w:w", scale));
    }
    if let Some(size) = props.size {
        rpr.push(XmlElement::val("w:sz", size));
        rpr.push(XmlElement::val("w:szCs", size));
    }
    if let Some(highlight) = &props.highlight {
        rpr.push(XmlElement::val("w:highlight", highlight.as_ooxml()));
    }
    if props.underline {
        rpr.push(XmlElement::val("w:u", "single"));
    }
    if let Some(position) = &props.vertical_position {
        rpr.push(XmlElement::val("w:vertAlign", position.as_ooxml()));
    }

    (!rpr.is_empty()).then_some(rpr)
}

/// Build `w:pPr`, or `None` if nothing is set and no section break rides on it.
pub fn paragraph_properties(
    props: &ParagraphProperties,
    section: Option<XmlElement>,
) -> Option<XmlElement> {
    let mut ppr = XmlElement::new("w:pPr");

    if let Some(style) = &props.style_id {
        ppr.push(XmlElement::val("w:pStyle", style));
    }
    if props.keep_next {
        ppr.push(XmlElement::new("w:keepNext"));
    }
    if props.keep_lines {
        ppr.push(XmlElement::new("w:keepLines"));
    }
    if props.page_break_before {
        ppr.push(XmlElement::new("w:pageBreakBefore"));
    }
    if let Some(list) = &props.numbering {
        ppr.push(
            XmlElement::new("w:numPr")
                .child(XmlElement::val("w:ilvl", list.level))
                .child(XmlElement::val("w:numId", list.num_id)),
        );
    }
    if let Some(borders) = &props.borders {
        ppr.push_opt(borders_element("w:pBdr", borders));
    }
    if let Some(shading) = &props.shading {
        ppr.push(shading_element(shading));
    }
    if let Some(spacing) = &props.spacing {
        ppr.push_opt(spacing_element(spacing));
    }
    if let Some(indent) = &props.indentation {
        ppr.push_opt(indentation_element(indent));
    }
    if let Some(alignment) = &props.alignment {
        ppr.push(XmlElement::val("w:jc", alignment.as_ooxml()));
    }
    ppr.push_opt(section);

    (!ppr.is_empty()).then_some(ppr)
}

/// One border side, e.g. `<w:top w:val="single" w:sz="4" w:space="1" w:color="auto"/>`.
pub fn border_element(name: &str, border: &Border) -> XmlElement {
    XmlElement::new(name)
        .attr("w:val", border.style.as_ooxml())
        .attr("w:sz", border.width)
        .attr("w:space", border.space)
        .attr("w:color", border.color.to_hex())
}

/// A border container (`w:pBdr`, `w:tcBorders`, `w:tblBorders`), or `None`
/// if no side is set.
pub fn borders_element(container: &str, borders: &Borders) -> Option<XmlElement> {
    let mut el = XmlElement::new(container);
    for (side, border) in borders.sides() {
        if let Some(border) = border {
            el.push(border_element(&format!("w:{}", side), border));
        }
    }
    (!el.is_empty()).then_some(el)
}

/// Solid background fill.
pub fn shading_element(shading: &Shading) -> XmlElement {
    XmlElement::new("w:shd")
        .attr("w:val", "clear")
        .attr("w:color", "auto")
        .attr("w:fill", shading.fill.to_hex())
}

fn spacing_element(spacing: &Spacing) -> Option<XmlElement> {
    let mut el = XmlElement::new("w:spacing");
    if let Some(before) = spacing.before {
        el.push_attr("w:before", before);
    }
    if let Some(after) = spacing.after {
        el.push_attr("w:after", after);
    }
    if let Some(line) = spacing.line {
        el.push_attr("w:line", line);
        el.push_attr("w:lineRule", "auto");
    }
    (!spacing.is_empty()).then_some(el)
}

/// `w:ind`, or `None` if no side is set.
pub fn indentation_element(indent: &Indentation) -> Option<XmlElement> {
    let mut el = XmlElement::new("w:ind");
    if let Some(left) = indent.left {
        el.push_attr("w:left", left);
    }
    if let Some(right) = indent.right {
        el.push_attr("w:right", right);
    }
    if let Some(first_line) = indent.first_line {
        el.push_attr("w:firstLine", first_line);
    }
    if let Some(hanging) = indent.hanging {
        el.push_attr("w:hanging", hanging);
    }
    (!indent.is_empty()).then_some(el)
}
