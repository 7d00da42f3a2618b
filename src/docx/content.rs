//! Paragraph, run, and table elements shared by the body and footnotes.

use super::properties::{
    borders_element, paragraph_properties, run_properties, shading_element,
};
use super::xml::XmlElement;
use crate::error::Result;
use crate::model::{
    BreakKind, Cell, GridSlot, Inline, Paragraph, Run, RunContent, Table,
};
use crate::package::part::rel_type;
use crate::package::{Relationships, TargetMode};

/// Writes story content for one part, collecting the external hyperlink
/// relationships that content needs.
#[derive(Debug)]
pub struct ContentWriter {
    relationships: Relationships,
}

impl ContentWriter {
    /// Continue from relationships already attached to the part.
    pub fn new(relationships: Relationships) -> Self {
        Self { relationships }
    }

    /// Relationships collected so far.
    pub fn into_relationships(self) -> Relationships {
        self.relationships
    }

    /// Relationship ID for a hyperlink target; one per distinct URL.
    fn hyperlink_id(&mut self, url: &str) -> String {
        if let Some(rel) = self.relationships.find(rel_type::HYPERLINK, url) {
            return rel.id.clone();
        }
        self.relationships
            .add(rel_type::HYPERLINK, url, TargetMode::External)
    }

    /// Build a `w:p`. A section break, when given, rides in its `w:pPr`.
    pub fn paragraph(&mut self, para: &Paragraph, section: Option<XmlElement>) -> XmlElement {
        let mut p = XmlElement::new("w:p");
        p.push_opt(paragraph_properties(&para.properties, section));
        self.push_inlines(&mut p, &para.content);
        p
    }

    /// Append paragraph content to an element.
    pub fn push_inlines(&mut self, target: &mut XmlElement, content: &[Inline]) {
        for inline in content {
            match inline {
                Inline::Run(run) => target.push(self.run(run)),
                Inline::Hyperlink(link) => {
                    let id = self.hyperlink_id(&link.url);
                    let mut el = XmlElement::new("w:hyperlink").attr("r:id", id);
                    for run in &link.runs {
                        el.push(self.run(run));
                    }
                    target.push(el);
                }
            }
        }
    }

    /// Build a `w:r`.
    pub fn run(&self, run: &Run) -> XmlElement {
        let mut r = XmlElement::new("w:r");
        r.push_opt(run_properties(&run.properties));
        r.push(match &run.content {
            RunContent::Text(text) => XmlElement::new("w:t")
                .attr("xml:space", "preserve")
                .text(text.as_str()),
            RunContent::FootnoteReference(id) => {
                XmlElement::new("w:footnoteReference").attr("w:id", id)
            }
            RunContent::Break(BreakKind::Line) => XmlElement::new("w:br"),
            RunContent::Break(BreakKind::Column) => XmlElement::new("w:br").attr("w:type", "column"),
            RunContent::Break(BreakKind::Page) => XmlElement::new("w:br").attr("w:type", "page"),
            RunContent::Tab => XmlElement::new("w:tab"),
        });
        r
    }

    /// Build a `w:tbl`, laying out merges first.
    pub fn table(&mut self, table: &Table) -> Result<XmlElement> {
        let grid = table.layout()?;
        let mut tbl = XmlElement::new("w:tbl");

        let mut tbl_pr = XmlElement::new("w:tblPr");
        if let Some(style) = &table.style_id {
            tbl_pr.push(XmlElement::val("w:tblStyle", style));
        }
        tbl_pr.push(
            XmlElement::new("w:tblW")
                .attr("w:w", table.column_widths.iter().sum::<u32>())
                .attr("w:type", "dxa"),
        );
        if let Some(alignment) = &table.alignment {
            tbl_pr.push(XmlElement::val("w:jc", alignment.as_ooxml()));
        }
        if let Some(borders) = &table.borders {
            tbl_pr.push_opt(borders_element("w:tblBorders", borders));
        }
        tbl.push(tbl_pr);

        let mut tbl_grid = XmlElement::new("w:tblGrid");
        for width in &table.column_widths {
            tbl_grid.push(XmlElement::new("w:gridCol").attr("w:w", width));
        }
        tbl.push(tbl_grid);

        for (r, row) in table.rows.iter().enumerate() {
            let mut tr = XmlElement::new("w:tr");

            let mut tr_pr = XmlElement::new("w:trPr");
            if let Some(height) = &row.height {
                tr_pr.push(
                    XmlElement::new("w:trHeight")
                        .attr("w:val", height.value)
                        .attr("w:hRule", height.rule.as_ooxml()),
                );
            }
            if row.is_header {
                tr_pr.push(XmlElement::new("w:tblHeader"));
            }
            if !tr_pr.is_empty() {
                tr.push(tr_pr);
            }

            for c in 0..grid.cols() {
                let (region, restart) = match grid.slot(r, c) {
                    GridSlot::Covered => continue,
                    GridSlot::Origin(region) => (region, true),
                    GridSlot::VerticalContinue(region) => (region, false),
                };
                let width: u32 = table.column_widths[region.col..region.col + region.col_span]
                    .iter()
                    .sum();
                let owner = &table.rows[region.row].cells[region.col];

                let mut tc = XmlElement::new("w:tc");
                let mut tc_pr = cell_properties(owner, width);
                if region.col_span > 1 {
                    tc_pr.set_grid_span(XmlElement::val("w:gridSpan", region.col_span));
                }
                if region.row_span > 1 {
                    let v_merge = if restart {
                        XmlElement::val("w:vMerge", "restart")
                    } else {
                        XmlElement::new("w:vMerge")
                    };
                    tc_pr.set_v_merge(v_merge);
                }
                tc.push(tc_pr.finish());

                let content: &[Paragraph] = if restart { &owner.content } else { &[] };
                if content.is_empty() {
                    tc.push(XmlElement::new("w:p"));
                }
                for para in content {
                    tc.push(self.paragraph(para, None));
                }
                tr.push(tc);
            }
            tbl.push(tr);
        }

        Ok(tbl)
    }
}

/// `w:tcPr` pieces kept apart so merge markers land in schema order.
struct CellProperties {
    width: XmlElement,
    span: Option<XmlElement>,
    v_merge: Option<XmlElement>,
    rest: Vec<XmlElement>,
}

impl CellProperties {
    fn set_grid_span(&mut self, el: XmlElement) {
        self.span = Some(el);
    }

    fn set_v_merge(&mut self, el: XmlElement) {
        self.v_merge = Some(el);
    }

    fn finish(self) -> XmlElement {
        let mut tc_pr = XmlElement::new("w:tcPr").child(self.width);
        tc_pr.push_opt(self.span);
        tc_pr.push_opt(self.v_merge);
        for el in self.rest {
            tc_pr.push(el);
        }
        tc_pr
    }
}

fn cell_properties(cell: &Cell, width: u32) -> CellProperties {
    let mut rest = Vec::new();
    if let Some(borders) = &cell.borders {
        if let Some(el) = borders_element("w:tcBorders", borders) {
            rest.push(el);
        }
    }
    if let Some(shading) = &cell.shading {
        rest.push(shading_element(shading));
    }
    if let Some(alignment) = &cell.vertical_alignment {
        rest.push(XmlElement::val("w:vAlign", alignment.as_ooxml()));
    }
    CellProperties {
        width: XmlElement::new("w:tcW").attr("w:w", width).attr("w:type", "dxa"),
        span: None,
        v_merge: None,
        rest,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CellRange, HeightRule, Row, VerticalAlignment};

    fn cells(tr: &XmlElement) -> Vec<&XmlElement> {
        tr.elements().filter(|e| e.name() == "w:tc").collect()
    }

    #[test]
    fn test_text_run_preserves_whitespace() {
        let writer = ContentWriter::new(Relationships::new());
        let r = writer.run(&Run::text("  spaced  "));
        let t = r.find("w:t").unwrap();
        assert_eq!(t.attribute("xml:space"), Some("preserve"));
        assert_eq!(t.text_content(), "  spaced  ");
        assert!(r.find("w:rPr").is_none());
    }

    #[test]
    fn test_hyperlinks_share_relationship_per_url() {
        let mut writer = ContentWriter::new(Relationships::new());
        let mut para = Paragraph::new();
        para.add_hyperlink("https://example.com", vec![Run::text("one")]);
        para.add_hyperlink("https://example.com", vec![Run::text("two")]);
        para.add_hyperlink("https://example.org", vec![Run::text("three")]);

        let p = writer.paragraph(&para, None);
        let ids: Vec<&str> = p
            .elements()
            .filter_map(|e| e.attribute("r:id"))
            .collect();
        assert_eq!(ids, vec!["rId1", "rId1", "rId2"]);

        let rels = writer.into_relationships();
        assert_eq!(rels.len(), 2);
        assert!(rels.get("rId2").unwrap().is_external());
    }

    #[test]
    fn test_column_break() {
        let writer = ContentWriter::new(Relationships::new());
        let r = writer.run(&Run::break_of(BreakKind::Column));
        assert_eq!(r.find("w:br").unwrap().attribute("w:type"), Some("column"));
    }

    #[test]
    fn test_merged_table_cells() {
        let mut table = Table::grid(3, 3, 1000);
        table.set_text(0, 0, "wide");
        table.set_text(1, 0, "tall");
        table.merge(CellRange::new(0, 0, 1, 3));
        table.merge(CellRange::new(1, 0, 2, 1));
        table.rows[0].height = Some(crate::model::RowHeight {
            value: 720,
            rule: HeightRule::Exact,
        });
        table.rows[1].cells[0].vertical_alignment = Some(VerticalAlignment::Center);

        let mut writer = ContentWriter::new(Relationships::new());
        let tbl = writer.table(&table).unwrap();
        let rows: Vec<&XmlElement> = tbl.elements().filter(|e| e.name() == "w:tr").collect();
        assert_eq!(rows.len(), 3);

        let first = cells(rows[0]);
        assert_eq!(first.len(), 1);
        let tc_pr = first[0].find("w:tcPr").unwrap();
        assert_eq!(tc_pr.find("w:gridSpan").unwrap().attribute("w:val"), Some("3"));
        assert_eq!(tc_pr.find("w:tcW").unwrap().attribute("w:w"), Some("3000"));
        let height = rows[0].find("w:trPr").unwrap().find("w:trHeight").unwrap();
        assert_eq!(height.attribute("w:hRule"), Some("exact"));

        let second = cells(rows[1]);
        assert_eq!(second.len(), 3);
        let restart = second[0].find("w:tcPr").unwrap();
        assert_eq!(restart.find("w:vMerge").unwrap().attribute("w:val"), Some("restart"));
        assert_eq!(
            restart.elements().map(|e| e.name()).collect::<Vec<_>>(),
            vec!["w:tcW", "w:vMerge", "w:vAlign"]
        );

        let third = cells(rows[2]);
        let cont = third[0].find("w:tcPr").unwrap().find("w:vMerge").unwrap();
        assert_eq!(cont.attribute("w:val"), None);
        assert_eq!(third[0].text_content(), "");
    }

    #[test]
    fn test_table_merge_conflict_propagates() {
        let mut table = Table::new(vec![1000, 1000]);
        table.add_row(Row::with_texts(["a", "b"]));
        table.merge(CellRange::new(0, 0, 1, 2));
        let mut writer = ContentWriter::new(Relationships::new());
        assert!(writer.table(&table).is_err());
    }
}
