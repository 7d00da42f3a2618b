//! Style sheet model.

use super::{Alignment, Border, Borders, Color, Indentation, ParagraphProperties, RunProperties, Spacing, VerticalPosition};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Style type (paragraph, character, table).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StyleKind {
    Paragraph,
    Character,
    Table,
}

impl StyleKind {
    /// The `w:type` value.
    pub fn as_ooxml(&self) -> &'static str {
        match self {
            StyleKind::Paragraph => "paragraph",
            StyleKind::Character => "character",
            StyleKind::Table => "table",
        }
    }
}

/// A named style definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Style {
    /// Style ID (e.g., "Heading1")
    pub id: String,
    /// Style name (e.g., "heading 1")
    pub name: String,
    /// Style type
    pub kind: StyleKind,
    /// Default style of its type
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_default: bool,
    /// Based on another style
    #[serde(skip_serializing_if = "Option::is_none")]
    pub based_on: Option<String>,
    /// Style for the following paragraph
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
    /// Paragraph properties
    #[serde(default, skip_serializing_if = "ParagraphProperties::is_empty")]
    pub paragraph: ParagraphProperties,
    /// Run (text) properties
    #[serde(default, skip_serializing_if = "RunProperties::is_empty")]
    pub run: RunProperties,
    /// Borders applied to tables using this style
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_borders: Option<Borders>,
}

impl Style {
    /// Create a style with no properties.
    pub fn new(id: impl Into<String>, name: impl Into<String>, kind: StyleKind) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
            is_default: false,
            based_on: None,
            next: None,
            paragraph: ParagraphProperties::default(),
            run: RunProperties::default(),
            table_borders: None,
        }
    }

    pub fn based_on(mut self, id: impl Into<String>) -> Self {
        self.based_on = Some(id.into());
        self
    }

    pub fn next(mut self, id: impl Into<String>) -> Self {
        self.next = Some(id.into());
        self
    }

    pub fn with_paragraph(mut self, paragraph: ParagraphProperties) -> Self {
        self.paragraph = paragraph;
        self
    }

    pub fn with_run(mut self, run: RunProperties) -> Self {
        self.run = run;
        self
    }
}

/// Content of the styles part: document defaults plus named styles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleSheet {
    /// Default run properties (`w:rPrDefault`)
    #[serde(default, skip_serializing_if = "RunProperties::is_empty")]
    pub default_run: RunProperties,
    /// Default paragraph properties (`w:pPrDefault`)
    #[serde(default, skip_serializing_if = "ParagraphProperties::is_empty")]
    pub default_paragraph: ParagraphProperties,
    /// Named styles in output order
    #[serde(default)]
    pub styles: Vec<Style>,
}

impl Default for StyleSheet {
    fn default() -> Self {
        Self::standard()
    }
}

impl StyleSheet {
    /// A sheet with no defaults and no styles.
    pub fn empty() -> Self {
        Self {
            default_run: RunProperties::default(),
            default_paragraph: ParagraphProperties::default(),
            styles: Vec::new(),
        }
    }

    /// The built-in sheet: Normal, three headings, list, footnote,
    /// hyperlink, and table grid styles.
    pub fn standard() -> Self {
        let heading = |level: u8, size: f32| {
            Style::new(
                format!("Heading{}", level),
                format!("heading {}", level),
                StyleKind::Paragraph,
            )
            .based_on("Normal")
            .next("Normal")
            .with_paragraph(ParagraphProperties {
                keep_next: true,
                keep_lines: true,
                spacing: Some(Spacing {
                    before: Some(240),
                    after: Some(0),
                    line: None,
                }),
                ..Default::default()
            })
            .with_run(
                RunProperties::new()
                    .bold()
                    .size_pt(size)
                    .color(Color::Rgb(0x2F, 0x54, 0x96)),
            )
        };

        let mut normal = Style::new("Normal", "Normal", StyleKind::Paragraph);
        normal.is_default = true;

        let mut table_grid = Style::new("TableGrid", "Table Grid", StyleKind::Table)
            .with_paragraph(ParagraphProperties {
                spacing: Some(Spacing {
                    after: Some(0),
                    line: Some(240),
                    ..Default::default()
                }),
                ..Default::default()
            });
        table_grid.table_borders = Some(Borders::all(Border::single(4, 0, Color::Auto)));

        Self {
            default_run: RunProperties::new().font("Calibri").size_pt(11.0),
            default_paragraph: ParagraphProperties {
                spacing: Some(Spacing {
                    before: None,
                    after: Some(160),
                    line: Some(259),
                }),
                ..Default::default()
            },
            styles: vec![
                normal,
                heading(1, 16.0),
                heading(2, 13.0),
                heading(3, 12.0),
                Style::new("ListParagraph", "List Paragraph", StyleKind::Paragraph)
                    .based_on("Normal")
                    .with_paragraph(ParagraphProperties {
                        indentation: Some(Indentation {
                            left: Some(720),
                            ..Default::default()
                        }),
                        ..Default::default()
                    }),
                Style::new("FootnoteText", "footnote text", StyleKind::Paragraph)
                    .based_on("Normal")
                    .with_paragraph(ParagraphProperties {
                        spacing: Some(Spacing {
                            after: Some(0),
                            line: Some(240),
                            ..Default::default()
                        }),
                        ..Default::default()
                    })
                    .with_run(RunProperties::new().size_pt(10.0)),
                Style::new("FootnoteReference", "footnote reference", StyleKind::Character)
                    .with_run(
                        RunProperties::new().vertical_position(VerticalPosition::Superscript),
                    ),
                Style::new("Hyperlink", "Hyperlink", StyleKind::Character).with_run(
                    RunProperties::new()
                        .underline()
                        .color(Color::Rgb(0x05, 0x63, 0xC1)),
                ),
                Style::new("Title", "Title", StyleKind::Paragraph)
                    .based_on("Normal")
                    .next("Normal")
                    .with_paragraph(ParagraphProperties {
                        alignment: Some(Alignment::Center),
                        ..Default::default()
                    })
                    .with_run(RunProperties::new().size_pt(28.0)),
                table_grid,
            ],
        }
    }

    /// Get a style by ID.
    pub fn get(&self, id: &str) -> Option<&Style> {
        self.styles.iter().find(|s| s.id == id)
    }

    /// Check if a style ID is defined with the given kind.
    pub fn has(&self, id: &str, kind: StyleKind) -> bool {
        self.get(id).is_some_and(|s| s.kind == kind)
    }

    /// Add a style; fails if the ID is taken.
    pub fn add(&mut self, style: Style) -> Result<()> {
        if self.get(&style.id).is_some() {
            return Err(Error::integrity(format!("duplicate style id {:?}", style.id)));
        }
        self.styles.push(style);
        Ok(())
    }

    /// Check that IDs are unique and `basedOn`/`next` links resolve.
    pub fn validate(&self) -> Result<()> {
        for (i, style) in self.styles.iter().enumerate() {
            if self.styles[..i].iter().any(|s| s.id == style.id) {
                return Err(Error::integrity(format!("duplicate style id {:?}", style.id)));
            }
            for link in [&style.based_on, &style.next].into_iter().flatten() {
                if self.get(link).is_none() {
                    return Err(Error::integrity(format!(
                        "style {:?} refers to undefined style {:?}",
                        style.id, link
                    )));
                }
            }
        }
        Ok(())
    }
}
