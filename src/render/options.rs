//! Outline rendering options.

/// How tables appear in a text outline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TableLayout {
    /// One line per row, cells separated by tabs
    #[default]
    Tabs,
    /// ASCII grid with padded columns
    Grid,
}

/// Options for rendering an outline.
#[derive(Debug, Clone)]
pub struct OutlineOptions {
    /// Indentation per list level
    pub indent: String,

    /// How to lay out tables
    pub table_layout: TableLayout,

    /// Append footnote bodies after the content
    pub include_footnotes: bool,

    /// Mark section boundaries with a `---` line
    pub section_separators: bool,

    /// Include empty paragraphs as blank lines
    pub include_empty_paragraphs: bool,
}

impl Default for OutlineOptions {
    fn default() -> Self {
        Self {
            indent: "  ".to_string(),
            table_layout: TableLayout::Tabs,
            include_footnotes: true,
            section_separators: true,
            include_empty_paragraphs: false,
        }
    }
}

impl OutlineOptions {
    /// Create new outline options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the per-level list indentation.
    pub fn with_indent(mut self, indent: impl Into<String>) -> Self {
        self.indent = indent.into();
        self
    }

    /// Set the table layout.
    pub fn with_table_layout(mut self, layout: TableLayout) -> Self {
        self.table_layout = layout;
        self
    }

    /// Include or omit footnote bodies.
    pub fn with_footnotes(mut self, include: bool) -> Self {
        self.include_footnotes = include;
        self
    }

    /// Include or omit section separators.
    pub fn with_section_separators(mut self, include: bool) -> Self {
        self.section_separators = include;
        self
    }
}
