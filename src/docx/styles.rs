//! `word/styles.xml`.

use super::properties::{borders_element, paragraph_properties, run_properties};
use super::xml::{XmlElement, NS_W};
use crate::model::{Style, StyleKind, StyleSheet};

/// Build the `w:styles` element: document defaults, then each style.
pub fn write_styles(sheet: &StyleSheet) -> XmlElement {
    let mut root = XmlElement::new("w:styles").attr("xmlns:w", NS_W);

    let mut doc_defaults = XmlElement::new("w:docDefaults");
    if let Some(rpr) = run_properties(&sheet.default_run) {
        doc_defaults.push(XmlElement::new("w:rPrDefault").child(rpr));
    }
    if let Some(ppr) = paragraph_properties(&sheet.default_paragraph, None) {
        doc_defaults.push(XmlElement::new("w:pPrDefault").child(ppr));
    }
    if !doc_defaults.is_empty() {
        root.push(doc_defaults);
    }

    for style in &sheet.styles {
        root.push(style_element(style));
    }
    root
}

fn style_element(style: &Style) -> XmlElement {
    let mut el = XmlElement::new("w:style").attr("w:type", style.kind.as_ooxml());
    if style.is_default {
        el.push_attr("w:default", 1);
    }
    el.push_attr("w:styleId", &style.id);

    el.push(XmlElement::val("w:name", &style.name));
    if let Some(based_on) = &style.based_on {
        el.push(XmlElement::val("w:basedOn", based_on));
    }
    if let Some(next) = &style.next {
        el.push(XmlElement::val("w:next", next));
    }
    el.push(XmlElement::new("w:qFormat"));

    if style.kind != StyleKind::Character {
        el.push_opt(paragraph_properties(&style.paragraph, None));
    }
    el.push_opt(run_properties(&style.run));

    if style.kind == StyleKind::Table {
        if let Some(borders) = &style.table_borders {
            if let Some(tbl_borders) = borders_element("w:tblBorders", borders) {
                el.push(XmlElement::new("w:tblPr").child(tbl_borders));
            }
        }
    }
    el
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_styles() {
        let root = write_styles(&StyleSheet::standard());
        let defaults = root.find("w:docDefaults").unwrap();
        assert!(defaults.find("w:rPrDefault").is_some());

        let styles: Vec<&XmlElement> = root.elements().filter(|e| e.name() == "w:style").collect();
        let normal = styles
            .iter()
            .find(|s| s.attribute("w:styleId") == Some("Normal"))
            .unwrap();
        assert_eq!(normal.attribute("w:default"), Some("1"));
        assert!(normal.find("w:pPr").is_none());

        let heading = styles
            .iter()
            .find(|s| s.attribute("w:styleId") == Some("Heading1"))
            .unwrap();
        assert_eq!(heading.find("w:basedOn").unwrap().attribute("w:val"), Some("Normal"));
        assert!(heading.find("w:pPr").unwrap().find("w:keepNext").is_some());

        let grid = styles
            .iter()
            .find(|s| s.attribute("w:styleId") == Some("TableGrid"))
            .unwrap();
        assert_eq!(grid.attribute("w:type"), Some("table"));
        assert!(grid.find("w:tblPr").unwrap().find("w:tblBorders").is_some());
    }

    #[test]
    fn test_empty_sheet() {
        let root = write_styles(&StyleSheet::empty());
        assert!(root.is_empty());
    }
}
