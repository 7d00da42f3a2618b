//! Plain text outline renderer implementation.

use crate::model::{Block, BreakKind, Document, Paragraph, RunContent, Table};

use super::options::{OutlineOptions, TableLayout};

/// Render a Document as a plain text outline.
pub fn to_outline(doc: &Document, options: &OutlineOptions) -> String {
    let mut output = String::new();

    for (i, section) in doc.sections.iter().enumerate() {
        if i > 0 && options.section_separators {
            output.push_str("---\n");
        }

        for block in &section.content {
            match block {
                Block::Paragraph(para) => {
                    let text = render_paragraph_text(para, options);
                    if !text.is_empty() || options.include_empty_paragraphs {
                        output.push_str(&text);
                        output.push('\n');
                    }
                }
                Block::Table(table) => {
                    let text = match options.table_layout {
                        TableLayout::Tabs => render_table_tabs(table),
                        TableLayout::Grid => render_table_grid(table),
                    };
                    output.push_str(&text);
                    output.push('\n');
                }
            }
        }
    }

    if options.include_footnotes && !doc.footnotes.is_empty() {
        output.push_str("\nFootnotes:\n");
        for footnote in &doc.footnotes {
            let body = footnote
                .content
                .iter()
                .map(inline_text)
                .collect::<Vec<_>>()
                .join(" ");
            output.push_str(&format!("[{}] {}\n", footnote.id, body));
        }
    }

    output.trim_end().to_string()
}

/// Render a paragraph, prefixed by its list label.
fn render_paragraph_text(para: &Paragraph, options: &OutlineOptions) -> String {
    let mut output = String::new();

    if let Some(list) = &para.properties.numbering {
        output.push_str(&options.indent.repeat(list.level as usize));
        if let Some(label) = &list.label {
            output.push_str(label);
            output.push(' ');
        }
    }

    output.push_str(&inline_text(para));
    output
}

/// Paragraph text with footnote references shown as `[n]`.
fn inline_text(para: &Paragraph) -> String {
    let mut text = String::new();
    for run in para.runs() {
        match &run.content {
            RunContent::Text(t) => text.push_str(t),
            RunContent::FootnoteReference(id) => text.push_str(&format!("[{}]", id)),
            RunContent::Tab => text.push('\t'),
            RunContent::Break(BreakKind::Line) => text.push('\n'),
            RunContent::Break(_) => {}
        }
    }
    text
}

fn cell_texts(table: &Table) -> Vec<Vec<String>> {
    table
        .rows
        .iter()
        .map(|row| {
            row.cells
                .iter()
                .map(|cell| {
                    cell.content
                        .iter()
                        .map(inline_text)
                        .collect::<Vec<_>>()
                        .join(" ")
                        .replace('\n', " ")
                })
                .collect()
        })
        .collect()
}

/// One line per row, cells separated by tabs.
fn render_table_tabs(table: &Table) -> String {
    cell_texts(table)
        .iter()
        .map(|row| row.join("\t"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render a table as an ASCII grid.
fn render_table_grid(table: &Table) -> String {
    let texts = cell_texts(table);
    let col_count = table
        .column_count()
        .max(texts.iter().map(Vec::len).max().unwrap_or(0));
    if col_count == 0 {
        return String::new();
    }

    // Minimum width of 3 for readability
    let mut widths = vec![3usize; col_count];
    for row in &texts {
        for (i, text) in row.iter().enumerate() {
            widths[i] = widths[i].max(text.chars().count());
        }
    }

    let rule = |fill: &str| {
        let mut line = String::from("+");
        for w in &widths {
            line.push_str(&fill.repeat(*w + 2));
            line.push('+');
        }
        line
    };

    let mut output = rule("-");
    output.push('\n');
    for (row_idx, row) in texts.iter().enumerate() {
        output.push('|');
        for (i, width) in widths.iter().enumerate() {
            let text = row.get(i).map(String::as_str).unwrap_or("");
            output.push_str(&format!(" {:width$} |", text, width = *width));
        }
        output.push('\n');

        // Separator after header row
        if row_idx == 0 && table.rows[0].is_header {
            output.push_str(&rule("="));
            output.push('\n');
        }
    }
    output.push_str(&rule("-"));

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::DocumentBuilder;
    use crate::model::{Cell, PageGeometry, Row, Run, Section};
    use crate::numbering::{Level, NumberFormat};

    #[test]
    fn test_basic_paragraph() {
        let para = Paragraph::with_text("Hello, World!");
        let text = render_paragraph_text(&para, &OutlineOptions::default());
        assert_eq!(text, "Hello, World!");
    }

    #[test]
    fn test_list_labels_and_indent() {
        let mut builder = DocumentBuilder::new();
        let list = builder
            .define_list(vec![
                Level::numbered(0, NumberFormat::Decimal, "%1."),
                Level::numbered(1, NumberFormat::LowerLetter, "%1.%2"),
            ])
            .unwrap();
        builder.list_item(list, 0, Paragraph::with_text("Fruit")).unwrap();
        builder.list_item(list, 1, Paragraph::with_text("Apple")).unwrap();
        let doc = builder.finish();

        let text = to_outline(&doc, &OutlineOptions::default());
        assert_eq!(text, "1. Fruit\n  1.a Apple");
    }

    #[test]
    fn test_footnote_markers() {
        let mut builder = DocumentBuilder::new();
        let id = builder.footnote(vec![Paragraph::with_text("Source.")]);
        let mut para = Paragraph::with_text("Claim");
        para.add_run(Run::footnote_reference(id));
        builder.paragraph(para);
        let doc = builder.finish();

        let text = to_outline(&doc, &OutlineOptions::default());
        assert_eq!(text, "Claim[2]\n\nFootnotes:\n[2] Source.");

        let text = to_outline(&doc, &OutlineOptions::new().with_footnotes(false));
        assert_eq!(text, "Claim[2]");
    }

    #[test]
    fn test_table_layouts() {
        let mut table = Table::new(vec![1000, 1000]);
        let mut header = Row::new(vec![Cell::with_text("A"), Cell::with_text("B")]);
        header.is_header = true;
        table.add_row(header);
        table.add_row(Row::new(vec![Cell::with_text("1"), Cell::with_text("2")]));

        assert_eq!(render_table_tabs(&table), "A\tB\n1\t2");

        let grid = render_table_grid(&table);
        assert!(grid.contains("| A   | B   |"));
        assert!(grid.contains("+=====+=====+"));
        assert!(grid.contains("| 1   | 2   |"));
    }

    #[test]
    fn test_section_separator() {
        let mut doc = Document::new();
        doc.add_paragraph(Paragraph::with_text("one"));
        doc.add_section(Section::new(PageGeometry::letter().landscape()));
        doc.add_paragraph(Paragraph::with_text("two"));

        assert_eq!(to_outline(&doc, &OutlineOptions::default()), "one\n---\ntwo");
        assert_eq!(
            to_outline(&doc, &OutlineOptions::new().with_section_separators(false)),
            "one\ntwo"
        );
    }
}
