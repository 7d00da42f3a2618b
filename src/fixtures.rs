//! Built-in fixture documents.
//!
//! Each fixture exercises one group of formatting features and is small
//! enough to inspect by eye once rendered by a word processor.

use crate::builder::DocumentBuilder;
use crate::error::Result;
use crate::model::{
    Alignment, Border, BorderStyle, Borders, BreakKind, Cell, CellRange, Color, Columns,
    Document, HeightRule, HighlightColor, Margins, PageGeometry, Paragraph, ParagraphProperties,
    Row, Run, RunProperties, Section, Shading, Spacing, Strike, Table, VerticalAlignment,
    VerticalPosition,
};
use crate::numbering::{Level, NumberFormat};

/// A named fixture document.
#[derive(Debug, Clone, Copy)]
pub struct Fixture {
    /// Short name used on the command line
    pub name: &'static str,
    /// One-line description
    pub description: &'static str,
    build: fn() -> Result<Document>,
}

impl Fixture {
    /// Build the fixture document.
    pub fn build(&self) -> Result<Document> {
        let doc = (self.build)()?;
        tracing::debug!(fixture = self.name, blocks = doc.total_blocks(), "fixture built");
        Ok(doc)
    }
}

const FIXTURES: &[Fixture] = &[
    Fixture {
        name: "shading",
        description: "Paragraph shading, full borders, and run highlighting",
        build: shading,
    },
    Fixture {
        name: "hyperlinks",
        description: "External hyperlinks, repeated and styled",
        build: hyperlinks,
    },
    Fixture {
        name: "tables",
        description: "Horizontal, vertical, and block merges, row heights, cell alignment",
        build: tables,
    },
    Fixture {
        name: "footnotes",
        description: "Footnote references, several per paragraph, formatted notes",
        build: footnotes,
    },
    Fixture {
        name: "nested-lists",
        description: "Nested numbered and bullet lists with restarts and custom starts",
        build: nested_lists,
    },
    Fixture {
        name: "outline-lists",
        description: "Roman/letter outlines, cross-level labels, independent lists",
        build: outline_lists,
    },
    Fixture {
        name: "two-columns",
        description: "Two equal columns with an explicit column break",
        build: two_columns,
    },
    Fixture {
        name: "three-columns",
        description: "Three columns with separator lines",
        build: three_columns,
    },
    Fixture {
        name: "char-spacing",
        description: "Character spacing, double strikethrough, text scale, keep-lines",
        build: character_spacing,
    },
    Fixture {
        name: "page-sizes",
        description: "Letter landscape, A4 portrait and landscape, Legal, per-section margins",
        build: page_sizes,
    },
];

/// All fixtures in catalogue order.
pub fn catalog() -> &'static [Fixture] {
    FIXTURES
}

/// Look up a fixture by name.
pub fn find(name: &str) -> Option<&'static Fixture> {
    FIXTURES.iter().find(|f| f.name == name)
}

const LOREM: &str = "Lorem ipsum dolor sit amet, consectetur adipiscing elit, sed do \
eiusmod tempor incididunt ut labore et dolore magna aliqua. Ut enim ad minim veniam, quis \
nostrud exercitation ullamco laboris nisi ut aliquip ex ea commodo consequat.";

fn rgb(hex: &str) -> Color {
    Color::from_hex(hex).unwrap_or(Color::Auto)
}

fn shaded(text: &str, fill: &str) -> Paragraph {
    Paragraph::with_text(text).with_properties(ParagraphProperties {
        shading: Some(Shading { fill: rgb(fill) }),
        spacing: Some(Spacing {
            before: Some(120),
            after: Some(120),
            line: None,
        }),
        ..Default::default()
    })
}

fn shading() -> Result<Document> {
    let mut b = DocumentBuilder::new();
    b.paragraph(Paragraph::heading(1, "Shading and Borders"));
    b.paragraph(shaded("Light blue background behind the whole paragraph.", "DEEAF6"));
    b.paragraph(shaded("Pale yellow background.", "FFF2CC"));

    let boxed = ParagraphProperties {
        borders: Some(Borders::all(Border::single(8, 4, rgb("2E74B5")))),
        ..Default::default()
    };
    b.paragraph(Paragraph::with_text("Boxed with a blue single border.").with_properties(boxed));

    let mut both = ParagraphProperties {
        shading: Some(Shading { fill: rgb("E2EFDA") }),
        borders: Some(Borders::all(Border {
            style: BorderStyle::Double,
            width: 6,
            space: 4,
            color: rgb("548235"),
        })),
        alignment: Some(Alignment::Center),
        ..Default::default()
    };
    both.keep_next = true;
    b.paragraph(Paragraph::with_text("Shaded, double border, centred.").with_properties(both));

    b.paragraph(Paragraph::heading(2, "Highlighting"));
    let mut para = Paragraph::with_text("Highlights: ");
    for (text, colour) in [
        ("yellow", HighlightColor::Yellow),
        ("green", HighlightColor::Green),
        ("cyan", HighlightColor::Cyan),
        ("light gray", HighlightColor::LightGray),
    ] {
        para.add_run(Run::styled(text, RunProperties::new().highlight(colour)));
        para.add_run(Run::text(" "));
    }
    para.add_run(Run::styled(
        "bold red on yellow",
        RunProperties::new()
            .bold()
            .color(rgb("C00000"))
            .highlight(HighlightColor::Yellow),
    ));
    b.paragraph(para);
    Ok(b.finish())
}

fn hyperlinks() -> Result<Document> {
    let mut b = DocumentBuilder::new();
    b.paragraph(Paragraph::heading(1, "Hyperlinks"));

    let link = |text: &str| Run::styled(text, RunProperties::new().style("Hyperlink"));
    let mut para = Paragraph::with_text("Visit ");
    para.add_hyperlink("https://www.rust-lang.org/", vec![link("the Rust website")]);
    para.add_run(Run::text(" or read "));
    para.add_hyperlink("https://doc.rust-lang.org/book/", vec![link("the book")]);
    para.add_run(Run::text("."));
    b.paragraph(para);

    // Same target twice: one relationship.
    let mut para = Paragraph::with_text("Again: ");
    para.add_hyperlink("https://www.rust-lang.org/", vec![link("rust-lang.org")]);
    b.paragraph(para);

    let mut para = Paragraph::new();
    para.add_hyperlink(
        "https://example.com/a?b=1&c=2",
        vec![Run::styled(
            "query string with ampersand",
            RunProperties::new().style("Hyperlink").bold(),
        )],
    );
    b.paragraph(para);
    Ok(b.finish())
}

fn tables() -> Result<Document> {
    let mut b = DocumentBuilder::new();

    b.paragraph(Paragraph::heading(2, "Horizontal Merged Cells"));
    let mut t = Table::grid(3, 4, 2160);
    t.style_id = Some("TableGrid".to_string());
    t.rows[0].is_header = true;
    t.set_text(0, 0, "Name");
    t.set_text(0, 2, "Contact");
    t.merge(CellRange::new(0, 0, 1, 2));
    t.merge(CellRange::new(0, 2, 1, 2));
    for (c, text) in ["First", "Last", "Email", "Phone"].iter().enumerate() {
        t.set_text(1, c, *text);
    }
    for (c, text) in ["Ada", "Lovelace", "ada@example.com", "555-0100"].iter().enumerate() {
        t.set_text(2, c, *text);
    }
    b.table(t)?;

    b.paragraph(Paragraph::heading(2, "Vertical Merged Cells"));
    let mut t = Table::new(vec![2880, 2880, 2880]);
    t.style_id = Some("TableGrid".to_string());
    t.add_row(Row::with_texts(["Region", "City", "Sales"]));
    t.add_row(Row::with_texts(["North", "Oslo", "120"]));
    t.add_row(Row::new(vec![
        Cell::new(),
        Cell::with_text("Bergen"),
        Cell::with_text("95"),
    ]));
    t.add_row(Row::with_texts(["South", "Rome", "140"]));
    t.merge(CellRange::new(1, 0, 2, 1));
    if let Some(cell) = t.cell_mut(1, 0) {
        cell.vertical_alignment = Some(VerticalAlignment::Center);
    }
    b.table(t)?;

    b.paragraph(Paragraph::heading(2, "Cell Vertical Alignment and Row Heights"));
    let mut t = Table::new(vec![2880, 2880, 2880]);
    t.style_id = Some("TableGrid".to_string());
    for (align, name) in [
        (VerticalAlignment::Top, "Top"),
        (VerticalAlignment::Center, "Center"),
        (VerticalAlignment::Bottom, "Bottom"),
    ] {
        let row = Row::new(vec![
            Cell::with_text(name).aligned(align),
            Cell::with_text("720 twips").aligned(align),
            Cell::with_text("at least").aligned(align),
        ])
        .with_height(720, HeightRule::AtLeast);
        t.add_row(row);
    }
    t.add_row(Row::with_texts(["Exact", "360", "row"]).with_height(360, HeightRule::Exact));
    b.table(t)?;

    b.paragraph(Paragraph::heading(2, "Complex Merge Pattern"));
    let mut t = Table::grid(4, 4, 2160);
    t.style_id = Some("TableGrid".to_string());
    t.alignment = Some(Alignment::Center);
    t.set_text(0, 0, "2x2 merged");
    t.merge(CellRange::new(0, 0, 2, 2));
    t.set_text(0, 2, "C");
    t.set_text(0, 3, "D");
    t.set_text(1, 2, "G");
    t.set_text(1, 3, "H");
    for c in 0..4 {
        t.set_text(2, c, format!("R3C{}", c + 1));
    }
    t.set_text(3, 0, "Full-width footer row");
    t.merge(CellRange::new(3, 0, 1, 4));
    b.table(t)?;

    b.paragraph(Paragraph::heading(2, "Border Colors and Widths"));
    let mut t = Table::grid(3, 3, 2880);
    let red = Borders::all(Border::single(12, 0, rgb("FF0000")));
    for c in 0..3 {
        t.set_text(0, c, format!("Header {}", c + 1));
        t.set_text(1, c, format!("Value {}", c + 1));
        t.set_text(2, c, "Footer");
        if let Some(cell) = t.cell_mut(0, c) {
            cell.borders = Some(red);
            cell.shading = Some(Shading { fill: rgb("FDE9E9") });
        }
        if let Some(cell) = t.cell_mut(2, c) {
            cell.borders = Some(Borders {
                bottom: Some(Border::single(24, 0, rgb("0070C0"))),
                ..Default::default()
            });
        }
    }
    t.borders = Some(Borders::all(Border::single(4, 0, Color::Auto)));
    b.table(t)?;

    Ok(b.finish())
}

fn footnotes() -> Result<Document> {
    let mut b = DocumentBuilder::new();
    b.paragraph(Paragraph::heading(1, "Footnotes"));

    let first = b.footnote(vec![Paragraph::with_text(
        "A single footnote attached to the first paragraph.",
    )]);
    let mut para = Paragraph::with_text("This sentence carries one footnote.");
    para.add_run(Run::footnote_reference(first));
    b.paragraph(para);

    let second = b.footnote(vec![Paragraph::with_text("First of two in one paragraph.")]);
    let third = b.footnote(vec![Paragraph::with_runs([
        Run::styled("Bold", RunProperties::new().bold()),
        Run::text(" and "),
        Run::styled("italic", RunProperties::new().italic()),
        Run::text(" footnote text."),
    ])]);
    let mut para = Paragraph::with_text("Two references");
    para.add_run(Run::footnote_reference(second));
    para.add_run(Run::text(" in the same paragraph"));
    para.add_run(Run::footnote_reference(third));
    para.add_run(Run::text("."));
    b.paragraph(para);

    b.paragraph(Paragraph::with_text("A paragraph without notes. ".repeat(4)));

    let fourth = b.footnote(vec![Paragraph::with_text(LOREM)]);
    let mut para = Paragraph::with_text("A longer note closes the document.");
    para.add_run(Run::footnote_reference(fourth));
    b.paragraph(para);
    Ok(b.finish())
}

fn nested_lists() -> Result<Document> {
    let mut b = DocumentBuilder::new();
    let numbered = b.define_list(vec![
        Level::numbered(0, NumberFormat::Decimal, "%1.").with_indent(720, 360),
        Level::numbered(1, NumberFormat::LowerLetter, "%2.").with_indent(1440, 360),
        Level::numbered(2, NumberFormat::LowerRoman, "%3.").with_indent(2160, 360),
    ])?;
    let bullets = b.define_list(vec![
        Level::bullet(0, "\u{2022}").with_indent(720, 360),
        Level::bullet(1, "o").with_indent(1440, 360),
        Level::bullet(2, "\u{25AA}").with_indent(2160, 360),
    ])?;
    let from_five = b.define_list(vec![
        Level::numbered(0, NumberFormat::Decimal, "%1)")
            .with_start(5)
            .with_indent(720, 360),
    ])?;

    b.paragraph(Paragraph::heading(2, "Numbered"));
    for (level, text) in [
        (0, "Prepare"),
        (1, "Gather materials"),
        (1, "Clear the bench"),
        (2, "Sweep"),
        (2, "Wipe"),
        (0, "Assemble"),
        (1, "Attach frame"),
        (0, "Finish"),
    ] {
        b.list_item(numbered, level, Paragraph::with_text(text))?;
    }

    b.paragraph(Paragraph::heading(2, "Bullets"));
    for (level, text) in [(0, "Fruit"), (1, "Apple"), (2, "Granny Smith"), (1, "Pear"), (0, "Vegetables")] {
        b.list_item(bullets, level, Paragraph::with_text(text))?;
    }

    b.paragraph(Paragraph::heading(2, "Custom start"));
    for text in ["Fifth", "Sixth", "Seventh"] {
        b.list_item(from_five, 0, Paragraph::with_text(text))?;
    }
    Ok(b.finish())
}

fn outline_lists() -> Result<Document> {
    let mut b = DocumentBuilder::new();
    let left = |level: Level| level.with_justification(Alignment::Left);

    let outline = b.define_list(vec![
        left(Level::numbered(0, NumberFormat::UpperRoman, "%1.").with_indent(720, 360)),
        left(Level::numbered(1, NumberFormat::UpperLetter, "%2.").with_indent(1440, 360)),
        left(Level::numbered(2, NumberFormat::Decimal, "%3.").with_indent(2160, 360)),
        left(Level::numbered(3, NumberFormat::LowerLetter, "%4)").with_indent(2880, 360)),
    ])?;
    let bullets = b.define_list(vec![
        left(Level::bullet(0, "\u{2022}").with_indent(720, 360)),
        left(Level::bullet(1, "\u{2013}").with_indent(1440, 360)),
        left(Level::bullet(2, "\u{203A}").with_indent(2160, 360)),
    ])?;
    let cross = b.define_list(vec![
        left(Level::numbered(0, NumberFormat::Decimal, "%1.").with_indent(720, 360)),
        left(Level::numbered(1, NumberFormat::LowerLetter, "%1.%2").with_indent(1440, 720)),
        left(Level::numbered(2, NumberFormat::LowerRoman, "%1.%2.%3").with_indent(2160, 1080)),
    ])?;
    let independent = b.define_list(vec![
        left(Level::numbered(0, NumberFormat::Decimal, "%1.").with_indent(720, 360)),
    ])?;

    b.paragraph(Paragraph::heading(2, "Outline Format"));
    for (level, text) in [
        (0, "Introduction"),
        (1, "Background"),
        (2, "Historical context"),
        (3, "Early developments"),
        (3, "Later developments"),
        (2, "Current state"),
        (1, "Motivation"),
        (0, "Methods"),
        (1, "Data collection"),
        (2, "Primary sources"),
        (2, "Secondary sources"),
        (1, "Analysis"),
        (0, "Results"),
    ] {
        b.list_item(outline, level, Paragraph::with_text(text))?;
    }

    b.paragraph(Paragraph::heading(2, "Bullet Variations"));
    for (level, text) in [
        (0, "Main point one"),
        (1, "Detail with dash"),
        (2, "Sub-detail with arrow"),
        (2, "Another sub-detail"),
        (1, "Another detail"),
        (0, "Main point two"),
        (1, "Single detail"),
    ] {
        b.list_item(bullets, level, Paragraph::with_text(text))?;
    }

    b.paragraph(Paragraph::heading(2, "Cross-Level Numbering"));
    for (level, text) in [
        (0, "Chapter one"),
        (1, "Section one-a"),
        (2, "Clause one-a-i"),
        (2, "Clause one-a-ii"),
        (1, "Section one-b"),
        (0, "Chapter two"),
        (1, "Section two-a"),
        (2, "Clause two-a-i"),
        (0, "Chapter three"),
    ] {
        b.list_item(cross, level, Paragraph::with_text(text))?;
    }

    b.paragraph(Paragraph::heading(2, "Independent List"));
    for text in ["Alpha list item one", "Alpha list item two", "Alpha list item three"] {
        b.list_item(independent, 0, Paragraph::with_text(text))?;
    }
    Ok(b.finish())
}

fn two_columns() -> Result<Document> {
    let section = Section::new(PageGeometry::letter()).with_columns(Columns::new(2).with_space(720));
    let mut b = DocumentBuilder::new().first_section(section)?;
    b.paragraph(Paragraph::heading(1, "Two Columns"));
    for i in 1..=3 {
        b.paragraph(Paragraph::with_text(format!("Left column paragraph {}. {}", i, LOREM)));
    }
    let mut para = Paragraph::with_text("Last words of the left column.");
    para.add_run(Run::break_of(BreakKind::Column));
    b.paragraph(para);
    for i in 1..=3 {
        b.paragraph(Paragraph::with_text(format!("Right column paragraph {}. {}", i, LOREM)));
    }
    Ok(b.finish())
}

fn three_columns() -> Result<Document> {
    let columns = Columns::new(3).with_space(360).with_separator();
    let mut b = DocumentBuilder::new()
        .first_section(Section::new(PageGeometry::letter()).with_columns(columns))?;
    b.paragraph(Paragraph::heading(1, "Three Columns"));
    for i in 1..=9 {
        b.paragraph(Paragraph::with_text(format!("Paragraph {}. {}", i, LOREM)));
    }
    Ok(b.finish())
}

fn character_spacing() -> Result<Document> {
    let mut b = DocumentBuilder::new();
    b.paragraph(Paragraph::heading(2, "Character Spacing"));
    for twips in [-20, 0, 20, 60, 100] {
        b.paragraph(Paragraph::with_runs([Run::styled(
            format!("Spacing {} twentieths of a point", twips),
            RunProperties::new().character_spacing(twips),
        )]));
    }

    b.paragraph(Paragraph::heading(2, "Strikethrough"));
    b.paragraph(Paragraph::with_runs([
        Run::styled("single strike", RunProperties::new().strike(Strike::Single)),
        Run::text(" and "),
        Run::styled("double strike", RunProperties::new().strike(Strike::Double)),
        Run::text(" and "),
        Run::styled(
            "double strike, spaced, red",
            RunProperties::new()
                .strike(Strike::Double)
                .character_spacing(40)
                .color(rgb("C00000")),
        ),
    ]));

    b.paragraph(Paragraph::heading(2, "Text Scale"));
    for percent in [50, 100, 150, 200] {
        b.paragraph(Paragraph::with_runs([Run::styled(
            format!("Scaled to {}%", percent),
            RunProperties::new().scale(percent),
        )]));
    }
    b.paragraph(Paragraph::with_runs([
        Run::text("H"),
        Run::styled("2", RunProperties::new().vertical_position(VerticalPosition::Subscript)),
        Run::text("O and E = mc"),
        Run::styled("2", RunProperties::new().vertical_position(VerticalPosition::Superscript)),
    ]));

    b.paragraph(Paragraph::heading(2, "Keep Lines Together"));
    let keep = ParagraphProperties {
        keep_lines: true,
        ..Default::default()
    };
    b.paragraph(Paragraph::with_text(LOREM.repeat(3)).with_properties(keep));
    Ok(b.finish())
}

fn page_sizes() -> Result<Document> {
    let mut b = DocumentBuilder::new()
        .first_section(Section::new(PageGeometry::letter().landscape()))?;
    b.paragraph(Paragraph::heading(1, "US Letter, landscape"));
    b.paragraph(Paragraph::with_text(LOREM));

    b.section_break(Section::new(PageGeometry::a4()))?;
    b.paragraph(Paragraph::heading(1, "A4, portrait"));
    b.paragraph(Paragraph::with_text(LOREM));

    b.section_break(Section::new(
        PageGeometry::a4().landscape().with_margins(Margins::uniform(720)),
    ))?;
    b.paragraph(Paragraph::heading(1, "A4, landscape, narrow margins"));
    let mut t = Table::grid(2, 4, 3400);
    t.style_id = Some("TableGrid".to_string());
    for c in 0..4 {
        t.set_text(0, c, format!("Column {}", c + 1));
    }
    b.table(t)?;

    b.section_break(Section::new(PageGeometry::legal().with_margins(Margins {
        top: 1440,
        right: 1800,
        bottom: 1440,
        left: 1800,
        header: 720,
        footer: 720,
    })))?;
    b.paragraph(Paragraph::heading(1, "US Legal, portrait, wide side margins"));
    b.paragraph(Paragraph::with_text(LOREM));
    Ok(b.finish())
}
