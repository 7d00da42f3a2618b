//! Paragraph, run, and formatting models.

use crate::numbering::NumId;
use serde::{Deserialize, Serialize};

/// Horizontal alignment of a paragraph, table, or list label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    Left,
    Center,
    Right,
    Justify,
}

impl Alignment {
    /// The `w:jc` value.
    pub fn as_ooxml(&self) -> &'static str {
        match self {
            Alignment::Left => "left",
            Alignment::Center => "center",
            Alignment::Right => "right",
            Alignment::Justify => "both",
        }
    }

    /// Parse a `w:jc` value.
    pub fn from_ooxml(value: &str) -> Option<Self> {
        match value {
            "left" | "start" => Some(Alignment::Left),
            "center" => Some(Alignment::Center),
            "right" | "end" => Some(Alignment::Right),
            "both" | "distribute" => Some(Alignment::Justify),
            _ => None,
        }
    }
}

/// A colour value: `auto` or a 24-bit RGB triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Color {
    Auto,
    Rgb(u8, u8, u8),
}

impl Color {
    /// Parse `auto` or a six-digit hex colour such as `2E74B5`.
    pub fn from_hex(value: &str) -> Option<Self> {
        if value.eq_ignore_ascii_case("auto") {
            return Some(Color::Auto);
        }
        let hex = value.strip_prefix('#').unwrap_or(value);
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some(Color::Rgb(channel(0)?, channel(2)?, channel(4)?))
    }

    /// The attribute value written to the document (`auto` or `RRGGBB`).
    pub fn to_hex(&self) -> String {
        match self {
            Color::Auto => "auto".to_string(),
            Color::Rgb(r, g, b) => format!("{:02X}{:02X}{:02X}", r, g, b),
        }
    }
}

impl TryFrom<String> for Color {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Color::from_hex(&value).ok_or_else(|| format!("invalid colour {:?}", value))
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}

/// Run highlight colour. The palette is closed: these are the only
/// values a `w:highlight` element accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HighlightColor {
    Yellow,
    Green,
    Cyan,
    Magenta,
    Blue,
    Red,
    DarkBlue,
    DarkCyan,
    DarkGreen,
    DarkMagenta,
    DarkRed,
    DarkYellow,
    DarkGray,
    LightGray,
    Black,
    White,
}

impl HighlightColor {
    /// The `w:highlight` value.
    pub fn as_ooxml(&self) -> &'static str {
        match self {
            HighlightColor::Yellow => "yellow",
            HighlightColor::Green => "green",
            HighlightColor::Cyan => "cyan",
            HighlightColor::Magenta => "magenta",
            HighlightColor::Blue => "blue",
            HighlightColor::Red => "red",
            HighlightColor::DarkBlue => "darkBlue",
            HighlightColor::DarkCyan => "darkCyan",
            HighlightColor::DarkGreen => "darkGreen",
            HighlightColor::DarkMagenta => "darkMagenta",
            HighlightColor::DarkRed => "darkRed",
            HighlightColor::DarkYellow => "darkYellow",
            HighlightColor::DarkGray => "darkGray",
            HighlightColor::LightGray => "lightGray",
            HighlightColor::Black => "black",
            HighlightColor::White => "white",
        }
    }
}

/// Strikethrough variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strike {
    Single,
    Double,
}

/// Raised or lowered text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerticalPosition {
    Superscript,
    Subscript,
}

impl VerticalPosition {
    /// The `w:vertAlign` value.
    pub fn as_ooxml(&self) -> &'static str {
        match self {
            VerticalPosition::Superscript => "superscript",
            VerticalPosition::Subscript => "subscript",
        }
    }
}

/// Character formatting. Every field left at its default is omitted from
/// the written run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunProperties {
    /// Character style ID
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style_id: Option<String>,

    /// Bold text
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub bold: bool,

    /// Italic text
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub italic: bool,

    /// Single underline
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub underline: bool,

    /// Strikethrough
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strike: Option<Strike>,

    /// Text colour
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,

    /// Highlight colour
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlight: Option<HighlightColor>,

    /// Font family
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font: Option<String>,

    /// Font size in half-points (e.g., 24 = 12pt)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u32>,

    /// Character spacing in twentieths of a point; 0 is the default
    #[serde(skip_serializing_if = "Option::is_none")]
    pub character_spacing: Option<i32>,

    /// Horizontal scale in percent; 100 is the default
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale: Option<u16>,

    /// Superscript or subscript
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vertical_position: Option<VerticalPosition>,
}

impl RunProperties {
    /// Create empty run properties.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn style(mut self, id: impl Into<String>) -> Self {
        self.style_id = Some(id.into());
        self
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    pub fn underline(mut self) -> Self {
        self.underline = true;
        self
    }

    pub fn strike(mut self, strike: Strike) -> Self {
        self.strike = Some(strike);
        self
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    pub fn highlight(mut self, highlight: HighlightColor) -> Self {
        self.highlight = Some(highlight);
        self
    }

    pub fn font(mut self, font: impl Into<String>) -> Self {
        self.font = Some(font.into());
        self
    }

    /// Set the font size in points (stored as half-points).
    pub fn size_pt(mut self, points: f32) -> Self {
        self.size = Some((points * 2.0).round() as u32);
        self
    }

    pub fn character_spacing(mut self, twentieths: i32) -> Self {
        self.character_spacing = Some(twentieths);
        self
    }

    pub fn scale(mut self, percent: u16) -> Self {
        self.scale = Some(percent);
        self
    }

    pub fn vertical_position(mut self, position: VerticalPosition) -> Self {
        self.vertical_position = Some(position);
        self
    }

    /// Character spacing if it differs from the default.
    pub fn effective_spacing(&self) -> Option<i32> {
        self.character_spacing.filter(|&s| s != 0)
    }

    /// Scale if it differs from the default.
    pub fn effective_scale(&self) -> Option<u16> {
        self.scale.filter(|&s| s != 100)
    }

    /// Check if nothing would be written for these properties.
    pub fn is_empty(&self) -> bool {
        self.style_id.is_none()
            && !self.bold
            && !self.italic
            && !self.underline
            && self.strike.is_none()
            && self.color.is_none()
            && self.highlight.is_none()
            && self.font.is_none()
            && self.size.is_none()
            && self.effective_spacing().is_none()
            && self.effective_scale().is_none()
            && self.vertical_position.is_none()
    }
}

/// Kind of break inside a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BreakKind {
    Line,
    Column,
    Page,
}

/// What a run carries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum RunContent {
    /// Text, preserved verbatim
    Text(String),
    /// Reference mark to a footnote by ID
    FootnoteReference(u32),
    /// Line, column, or page break
    Break(BreakKind),
    /// Tab character
    Tab,
}

/// An inline span with uniform formatting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Run {
    /// Run content
    pub content: RunContent,

    /// Character formatting
    #[serde(default, skip_serializing_if = "RunProperties::is_empty")]
    pub properties: RunProperties,
}

impl Run {
    /// Create a plain text run.
    pub fn text(text: impl Into<String>) -> Self {
        Self::styled(text, RunProperties::default())
    }

    /// Create a formatted text run.
    pub fn styled(text: impl Into<String>, properties: RunProperties) -> Self {
        Self {
            content: RunContent::Text(text.into()),
            properties,
        }
    }

    /// Create a superscript footnote reference mark.
    pub fn footnote_reference(id: u32) -> Self {
        Self {
            content: RunContent::FootnoteReference(id),
            properties: RunProperties::new().vertical_position(VerticalPosition::Superscript),
        }
    }

    /// Create a break run.
    pub fn break_of(kind: BreakKind) -> Self {
        Self {
            content: RunContent::Break(kind),
            properties: RunProperties::default(),
        }
    }

    /// Create a tab run.
    pub fn tab() -> Self {
        Self {
            content: RunContent::Tab,
            properties: RunProperties::default(),
        }
    }

    /// Text carried by this run, if any.
    pub fn as_text(&self) -> Option<&str> {
        match &self.content {
            RunContent::Text(t) => Some(t),
            _ => None,
        }
    }
}

/// A run sequence linked to an external URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hyperlink {
    /// Target URL
    pub url: String,
    /// Linked runs
    pub runs: Vec<Run>,
}

/// An element of paragraph content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Inline {
    Run(Run),
    Hyperlink(Hyperlink),
}

/// Paragraph background fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shading {
    /// Fill colour
    pub fill: Color,
}

/// Border line style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BorderStyle {
    Single,
    Double,
    Dotted,
    Dashed,
    Thick,
}

impl BorderStyle {
    /// The border `w:val` value.
    pub fn as_ooxml(&self) -> &'static str {
        match self {
            BorderStyle::Single => "single",
            BorderStyle::Double => "double",
            BorderStyle::Dotted => "dotted",
            BorderStyle::Dashed => "dashed",
            BorderStyle::Thick => "thick",
        }
    }
}

/// One border side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Border {
    /// Line style
    pub style: BorderStyle,
    /// Width in eighths of a point
    pub width: u32,
    /// Distance from the text in points
    pub space: u32,
    /// Line colour
    pub color: Color,
}

impl Border {
    /// A single line border.
    pub fn single(width: u32, space: u32, color: Color) -> Self {
        Self {
            style: BorderStyle::Single,
            width,
            space,
            color,
        }
    }
}

/// Border per side; unset sides are omitted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Borders {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top: Option<Border>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left: Option<Border>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bottom: Option<Border>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub right: Option<Border>,
}

impl Borders {
    /// The same border on all four sides.
    pub fn all(border: Border) -> Self {
        Self {
            top: Some(border),
            left: Some(border),
            bottom: Some(border),
            right: Some(border),
        }
    }

    /// Check if no side is set.
    pub fn is_empty(&self) -> bool {
        self.top.is_none() && self.left.is_none() && self.bottom.is_none() && self.right.is_none()
    }

    /// Set sides in document order (top, left, bottom, right).
    pub fn sides(&self) -> [(&'static str, Option<&Border>); 4] {
        [
            ("top", self.top.as_ref()),
            ("left", self.left.as_ref()),
            ("bottom", self.bottom.as_ref()),
            ("right", self.right.as_ref()),
        ]
    }
}

/// Paragraph spacing in twips; `line` is in 240ths of a line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Spacing {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
}

impl Spacing {
    pub fn is_empty(&self) -> bool {
        self.before.is_none() && self.after.is_none() && self.line.is_none()
    }
}

/// Paragraph indentation in twips.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Indentation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub right: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_line: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hanging: Option<i32>,
}

impl Indentation {
    pub fn is_empty(&self) -> bool {
        self.left.is_none()
            && self.right.is_none()
            && self.first_line.is_none()
            && self.hanging.is_none()
    }
}

/// Membership of a paragraph in a list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListReference {
    /// Numbering instance
    pub num_id: NumId,
    /// Level within the instance (0-8)
    pub level: u8,
    /// Label resolved when the paragraph was appended
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// Paragraph formatting. Unset fields are omitted from the written paragraph.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParagraphProperties {
    /// Paragraph style ID
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style_id: Option<String>,

    /// Keep with next paragraph
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub keep_next: bool,

    /// Keep all lines on one page
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub keep_lines: bool,

    /// Start on a new page
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub page_break_before: bool,

    /// List membership
    #[serde(skip_serializing_if = "Option::is_none")]
    pub numbering: Option<ListReference>,

    /// Borders
    #[serde(skip_serializing_if = "Option::is_none")]
    pub borders: Option<Borders>,

    /// Background shading
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shading: Option<Shading>,

    /// Spacing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spacing: Option<Spacing>,

    /// Indentation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub indentation: Option<Indentation>,

    /// Alignment
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alignment: Option<Alignment>,
}

impl ParagraphProperties {
    /// Check if nothing would be written for these properties.
    pub fn is_empty(&self) -> bool {
        self.style_id.is_none()
            && !self.keep_next
            && !self.keep_lines
            && !self.page_break_before
            && self.numbering.is_none()
            && self.borders.is_none_or(|b| b.is_empty())
            && self.shading.is_none()
            && self.spacing.is_none_or(|s| s.is_empty())
            && self.indentation.is_none_or(|i| i.is_empty())
            && self.alignment.is_none()
    }
}

/// A paragraph.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paragraph {
    /// Runs and hyperlinks in order
    #[serde(default)]
    pub content: Vec<Inline>,

    /// Paragraph formatting
    #[serde(default, skip_serializing_if = "ParagraphProperties::is_empty")]
    pub properties: ParagraphProperties,
}

impl Paragraph {
    /// Create an empty paragraph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a paragraph with one plain run.
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            content: vec![Inline::Run(Run::text(text))],
            ..Default::default()
        }
    }

    /// Create a paragraph from runs.
    pub fn with_runs(runs: impl IntoIterator<Item = Run>) -> Self {
        Self {
            content: runs.into_iter().map(Inline::Run).collect(),
            ..Default::default()
        }
    }

    /// Create a paragraph using a `Heading{level}` style.
    pub fn heading(level: u8, text: impl Into<String>) -> Self {
        Self::with_text(text).style(format!("Heading{}", level))
    }

    /// Set the paragraph style.
    pub fn style(mut self, id: impl Into<String>) -> Self {
        self.properties.style_id = Some(id.into());
        self
    }

    /// Replace the paragraph properties.
    pub fn with_properties(mut self, properties: ParagraphProperties) -> Self {
        self.properties = properties;
        self
    }

    /// Append a run.
    pub fn add_run(&mut self, run: Run) {
        self.content.push(Inline::Run(run));
    }

    /// Append a hyperlink.
    pub fn add_hyperlink(&mut self, url: impl Into<String>, runs: Vec<Run>) {
        self.content.push(Inline::Hyperlink(Hyperlink {
            url: url.into(),
            runs,
        }));
    }

    /// All runs, including those inside hyperlinks.
    pub fn runs(&self) -> impl Iterator<Item = &Run> {
        self.content.iter().flat_map(|inline| match inline {
            Inline::Run(run) => std::slice::from_ref(run).iter(),
            Inline::Hyperlink(link) => link.runs.iter(),
        })
    }

    /// Hyperlink targets in order of appearance.
    pub fn hyperlinks(&self) -> impl Iterator<Item = &str> {
        self.content.iter().filter_map(|inline| match inline {
            Inline::Hyperlink(link) => Some(link.url.as_str()),
            Inline::Run(_) => None,
        })
    }

    /// Footnote IDs referenced by this paragraph.
    pub fn footnote_references(&self) -> impl Iterator<Item = u32> + '_ {
        self.runs().filter_map(|run| match run.content {
            RunContent::FootnoteReference(id) => Some(id),
            _ => None,
        })
    }

    /// Get the plain text content.
    pub fn plain_text(&self) -> String {
        let mut text = String::new();
        for run in self.runs() {
            match &run.content {
                RunContent::Text(t) => text.push_str(t),
                RunContent::Tab => text.push('\t'),
                RunContent::Break(BreakKind::Line) => text.push('\n'),
                RunContent::FootnoteReference(_) | RunContent::Break(_) => {}
            }
        }
        text
    }

    /// Check if this paragraph has no content.
    pub fn is_empty(&self) -> bool {
        self.content.iter().all(|inline| match inline {
            Inline::Run(run) => run.as_text().is_some_and(str::is_empty),
            Inline::Hyperlink(link) => link.runs.is_empty(),
        })
    }

    /// The resolved list label, if this is a list item.
    pub fn label(&self) -> Option<&str> {
        self.properties
            .numbering
            .as_ref()
            .and_then(|n| n.label.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_parsing() {
        assert_eq!(Color::from_hex("2E74B5"), Some(Color::Rgb(0x2E, 0x74, 0xB5)));
        assert_eq!(Color::from_hex("#ff0000"), Some(Color::Rgb(255, 0, 0)));
        assert_eq!(Color::from_hex("auto"), Some(Color::Auto));
        assert_eq!(Color::from_hex("12345"), None);
        assert_eq!(Color::from_hex("GGGGGG"), None);
        assert_eq!(Color::Rgb(0xcc, 0, 0).to_hex(), "CC0000");
    }

    #[test]
    fn test_default_run_properties_are_empty() {
        assert!(RunProperties::default().is_empty());
        assert!(RunProperties::new().scale(100).is_empty());
        assert!(RunProperties::new().character_spacing(0).is_empty());
        assert!(!RunProperties::new().scale(150).is_empty());
        assert!(!RunProperties::new().bold().is_empty());
    }

    #[test]
    fn test_size_in_half_points() {
        assert_eq!(RunProperties::new().size_pt(12.0).size, Some(24));
        assert_eq!(RunProperties::new().size_pt(10.5).size, Some(21));
    }

    #[test]
    fn test_paragraph_text_and_runs() {
        let mut para = Paragraph::with_text("  leading and trailing  ");
        para.add_run(Run::footnote_reference(2));
        para.add_hyperlink("https://example.com", vec![Run::text("link")]);

        assert_eq!(para.plain_text(), "  leading and trailing  link");
        assert_eq!(para.footnote_references().collect::<Vec<_>>(), vec![2]);
        assert_eq!(para.hyperlinks().collect::<Vec<_>>(), vec!["https://example.com"]);
        assert_eq!(para.runs().count(), 3);
        assert!(!para.is_empty());
        assert!(Paragraph::new().is_empty());
    }

    #[test]
    fn test_paragraph_properties_emptiness() {
        let mut props = ParagraphProperties::default();
        assert!(props.is_empty());

        props.spacing = Some(Spacing::default());
        assert!(props.is_empty());

        props.shading = Some(Shading {
            fill: Color::Rgb(0xFF, 0xFF, 0xCC),
        });
        assert!(!props.is_empty());
    }

    #[test]
    fn test_paragraph_serialization_omits_defaults() {
        let para = Paragraph::with_text("Test");
        let json = serde_json::to_string(&para).unwrap();
        assert!(!json.contains("properties"));

        let colored = Run::styled("x", RunProperties::new().color(Color::Rgb(1, 2, 3)));
        let json = serde_json::to_string(&colored).unwrap();
        assert!(json.contains("\"010203\""));
    }
}
