//! Table model structures.

use super::{Alignment, Borders, Paragraph, Shading};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Vertical alignment for table cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerticalAlignment {
    Top,
    Center,
    Bottom,
}

impl VerticalAlignment {
    /// The `w:vAlign` value.
    pub fn as_ooxml(&self) -> &'static str {
        match self {
            VerticalAlignment::Top => "top",
            VerticalAlignment::Center => "center",
            VerticalAlignment::Bottom => "bottom",
        }
    }
}

/// How a row height hint is applied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HeightRule {
    #[default]
    AtLeast,
    Exact,
}

impl HeightRule {
    /// The `w:hRule` value.
    pub fn as_ooxml(&self) -> &'static str {
        match self {
            HeightRule::AtLeast => "atLeast",
            HeightRule::Exact => "exact",
        }
    }
}

/// Row height hint in twips.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowHeight {
    pub value: u32,
    #[serde(default)]
    pub rule: HeightRule,
}

/// A cell in a table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    /// Cell content (paragraphs)
    #[serde(default)]
    pub content: Vec<Paragraph>,

    /// Vertical alignment
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vertical_alignment: Option<VerticalAlignment>,

    /// Background shading
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shading: Option<Shading>,

    /// Cell borders
    #[serde(skip_serializing_if = "Option::is_none")]
    pub borders: Option<Borders>,
}

impl Cell {
    /// Create a new empty cell.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a cell with text content.
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            content: vec![Paragraph::with_text(text)],
            ..Default::default()
        }
    }

    /// Set the vertical alignment.
    pub fn aligned(mut self, alignment: VerticalAlignment) -> Self {
        self.vertical_alignment = Some(alignment);
        self
    }

    /// Get the plain text content.
    pub fn plain_text(&self) -> String {
        self.content
            .iter()
            .map(|p| p.plain_text())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Check if this cell is empty.
    pub fn is_empty(&self) -> bool {
        self.content.iter().all(|p| p.is_empty())
    }
}

/// A row in a table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    /// Cells in this row, one per grid column
    #[serde(default)]
    pub cells: Vec<Cell>,

    /// Repeat as header row
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_header: bool,

    /// Row height hint
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<RowHeight>,
}

impl Row {
    /// Create a row from cells.
    pub fn new(cells: Vec<Cell>) -> Self {
        Self {
            cells,
            ..Default::default()
        }
    }

    /// Create a row of text cells.
    pub fn with_texts<S: Into<String>>(texts: impl IntoIterator<Item = S>) -> Self {
        Self::new(texts.into_iter().map(Cell::with_text).collect())
    }

    /// Set the height hint.
    pub fn with_height(mut self, value: u32, rule: HeightRule) -> Self {
        self.height = Some(RowHeight { value, rule });
        self
    }
}

/// A rectangular merge region: the cell at (`row`, `col`) owns
/// `row_span` x `col_span` grid positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellRange {
    pub row: usize,
    pub col: usize,
    pub row_span: usize,
    pub col_span: usize,
}

impl CellRange {
    pub fn new(row: usize, col: usize, row_span: usize, col_span: usize) -> Self {
        Self {
            row,
            col,
            row_span,
            col_span,
        }
    }

    fn single(row: usize, col: usize) -> Self {
        Self::new(row, col, 1, 1)
    }

    /// Check if `(row, col)` lies inside this range.
    pub fn contains(&self, row: usize, col: usize) -> bool {
        row >= self.row
            && row < self.row + self.row_span
            && col >= self.col
            && col < self.col + self.col_span
    }

    /// Check if `(row, col)` is the owning (top-left) cell.
    pub fn is_origin(&self, row: usize, col: usize) -> bool {
        row == self.row && col == self.col
    }
}

/// A table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    /// Grid column widths in twips; defines the column count
    pub column_widths: Vec<u32>,

    /// Rows in this table
    #[serde(default)]
    pub rows: Vec<Row>,

    /// Merge regions, validated by [`Table::layout`]
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub merges: Vec<CellRange>,

    /// Table alignment on the page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alignment: Option<Alignment>,

    /// Table style ID
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style_id: Option<String>,

    /// Table borders
    #[serde(skip_serializing_if = "Option::is_none")]
    pub borders: Option<Borders>,
}

impl Table {
    /// Create an empty table over the given column grid.
    pub fn new(column_widths: Vec<u32>) -> Self {
        Self {
            column_widths,
            ..Default::default()
        }
    }

    /// Create a `rows` x `cols` table of empty cells with equal column widths.
    pub fn grid(rows: usize, cols: usize, column_width: u32) -> Self {
        let mut table = Self::new(vec![column_width; cols]);
        table.rows = (0..rows)
            .map(|_| Row::new(vec![Cell::new(); cols]))
            .collect();
        table
    }

    /// Add a row to this table.
    pub fn add_row(&mut self, row: Row) {
        self.rows.push(row);
    }

    /// Declare a merge region. Checked when the table is laid out.
    pub fn merge(&mut self, range: CellRange) {
        self.merges.push(range);
    }

    /// Get a cell mutably.
    pub fn cell_mut(&mut self, row: usize, col: usize) -> Option<&mut Cell> {
        self.rows.get_mut(row).and_then(|r| r.cells.get_mut(col))
    }

    /// Replace a cell's content with one text paragraph.
    pub fn set_text(&mut self, row: usize, col: usize, text: impl Into<String>) -> bool {
        match self.cell_mut(row, col) {
            Some(cell) => {
                cell.content = vec![Paragraph::with_text(text)];
                true
            }
            None => false,
        }
    }

    /// Get the number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Get the number of grid columns.
    pub fn column_count(&self) -> usize {
        self.column_widths.len()
    }

    /// Check if the table has merged cells.
    pub fn has_merged_cells(&self) -> bool {
        self.merges
            .iter()
            .any(|m| m.row_span > 1 || m.col_span > 1)
    }

    /// Resolve the merge declarations into an ownership grid.
    ///
    /// Every grid position ends up owned by exactly one region: declared
    /// merges first, then a 1x1 region for each remaining position. Spans
    /// that are empty, fall outside the grid, or overlap fail with
    /// [`Error::MergeConflict`], as does content in a covered cell.
    pub fn layout(&self) -> Result<TableGrid> {
        let cols = self.column_count();
        let rows = self.row_count();
        if rows > 0 && cols == 0 {
            return Err(Error::MergeConflict(
                "table has rows but no grid columns".to_string(),
            ));
        }
        for (r, row) in self.rows.iter().enumerate() {
            if row.cells.len() != cols {
                return Err(Error::MergeConflict(format!(
                    "row {} has {} cells, grid has {} columns",
                    r,
                    row.cells.len(),
                    cols
                )));
            }
        }

        let mut owner: Vec<Option<usize>> = vec![None; rows * cols];
        let mut regions = Vec::with_capacity(self.merges.len());

        for range in &self.merges {
            if range.row_span == 0 || range.col_span == 0 {
                return Err(Error::MergeConflict(format!(
                    "empty span at ({}, {})",
                    range.row, range.col
                )));
            }
            if range.row + range.row_span > rows || range.col + range.col_span > cols {
                return Err(Error::MergeConflict(format!(
                    "span {}x{} at ({}, {}) exceeds {}x{} grid",
                    range.row_span, range.col_span, range.row, range.col, rows, cols
                )));
            }

            let index = regions.len();
            for r in range.row..range.row + range.row_span {
                for c in range.col..range.col + range.col_span {
                    let slot = &mut owner[r * cols + c];
                    if let Some(other) = *slot {
                        let first: &CellRange = &regions[other];
                        return Err(Error::MergeConflict(format!(
                            "cell ({}, {}) claimed by spans at ({}, {}) and ({}, {})",
                            r, c, first.row, first.col, range.row, range.col
                        )));
                    }
                    *slot = Some(index);
                    if !range.is_origin(r, c) && !self.rows[r].cells[c].is_empty() {
                        return Err(Error::MergeConflict(format!(
                            "cell ({}, {}) is covered by the span at ({}, {}) but has content",
                            r, c, range.row, range.col
                        )));
                    }
                }
            }
            regions.push(*range);
        }

        let owner = owner
            .into_iter()
            .enumerate()
            .map(|(slot, o)| {
                o.unwrap_or_else(|| {
                    regions.push(CellRange::single(slot / cols, slot % cols));
                    regions.len() - 1
                })
            })
            .collect();

        Ok(TableGrid {
            rows,
            cols,
            regions,
            owner,
        })
    }

    /// Get plain text representation.
    pub fn plain_text(&self) -> String {
        let mut text = String::new();
        for row in &self.rows {
            let cells: Vec<String> = row.cells.iter().map(|c| c.plain_text()).collect();
            text.push_str(&cells.join("\t"));
            text.push('\n');
        }
        text
    }
}

/// Validated ownership grid of a table: one owning region per position.
#[derive(Debug, Clone)]
pub struct TableGrid {
    rows: usize,
    cols: usize,
    regions: Vec<CellRange>,
    owner: Vec<usize>,
}

/// Role of one grid position in the written table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridSlot {
    /// Top-left cell of its region; written with the region's spans
    Origin(CellRange),
    /// First column of a region continued from a row above (`vMerge`)
    VerticalContinue(CellRange),
    /// Covered by a horizontal span; not written
    Covered,
}

impl TableGrid {
    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// The region owning `(row, col)`.
    pub fn region_at(&self, row: usize, col: usize) -> Option<&CellRange> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        self.owner
            .get(row * self.cols + col)
            .and_then(|&i| self.regions.get(i))
    }

    /// Classify a grid position.
    pub fn slot(&self, row: usize, col: usize) -> GridSlot {
        match self.region_at(row, col) {
            Some(region) if region.col != col => GridSlot::Covered,
            Some(region) if region.row == row => GridSlot::Origin(*region),
            Some(region) => GridSlot::VerticalContinue(*region),
            None => GridSlot::Covered,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_without_merges() {
        let table = Table::grid(2, 3, 2000);
        let grid = table.layout().unwrap();
        assert_eq!(grid.rows(), 2);
        assert_eq!(grid.cols(), 3);
        assert_eq!(grid.slot(1, 2), GridSlot::Origin(CellRange::single(1, 2)));
    }

    #[test]
    fn test_horizontal_and_vertical_merges() {
        let mut table = Table::grid(3, 3, 2000);
        table.set_text(0, 0, "Merged across");
        table.set_text(1, 2, "Merged down");
        table.merge(CellRange::new(0, 0, 1, 3));
        table.merge(CellRange::new(1, 2, 2, 1));

        let grid = table.layout().unwrap();
        assert_eq!(grid.slot(0, 0), GridSlot::Origin(CellRange::new(0, 0, 1, 3)));
        assert_eq!(grid.slot(0, 1), GridSlot::Covered);
        assert_eq!(grid.slot(0, 2), GridSlot::Covered);
        assert_eq!(
            grid.slot(2, 2),
            GridSlot::VerticalContinue(CellRange::new(1, 2, 2, 1))
        );
        assert_eq!(grid.slot(2, 0), GridSlot::Origin(CellRange::single(2, 0)));
    }

    #[test]
    fn test_block_merge() {
        let mut table = Table::grid(3, 3, 2000);
        table.merge(CellRange::new(1, 1, 2, 2));
        let grid = table.layout().unwrap();

        assert_eq!(grid.slot(1, 1), GridSlot::Origin(CellRange::new(1, 1, 2, 2)));
        assert_eq!(grid.slot(1, 2), GridSlot::Covered);
        assert_eq!(
            grid.slot(2, 1),
            GridSlot::VerticalContinue(CellRange::new(1, 1, 2, 2))
        );
        assert_eq!(grid.slot(2, 2), GridSlot::Covered);
    }

    #[test]
    fn test_overlapping_spans_conflict() {
        let mut table = Table::grid(3, 3, 2000);
        table.merge(CellRange::new(0, 0, 2, 2));
        table.merge(CellRange::new(1, 1, 2, 2));
        assert!(matches!(table.layout(), Err(Error::MergeConflict(_))));
    }

    #[test]
    fn test_out_of_bounds_and_empty_spans() {
        let mut table = Table::grid(2, 2, 2000);
        table.merge(CellRange::new(1, 1, 1, 2));
        assert!(matches!(table.layout(), Err(Error::MergeConflict(_))));

        let mut table = Table::grid(2, 2, 2000);
        table.merge(CellRange::new(0, 0, 0, 1));
        assert!(matches!(table.layout(), Err(Error::MergeConflict(_))));
    }

    #[test]
    fn test_covered_cell_with_content_conflicts() {
        let mut table = Table::grid(2, 2, 2000);
        table.set_text(0, 1, "hidden");
        table.merge(CellRange::new(0, 0, 1, 2));
        assert!(matches!(table.layout(), Err(Error::MergeConflict(_))));
    }

    #[test]
    fn test_ragged_rows_conflict() {
        let mut table = Table::new(vec![2000, 2000]);
        table.add_row(Row::with_texts(["a", "b"]));
        table.add_row(Row::with_texts(["c"]));
        assert!(matches!(table.layout(), Err(Error::MergeConflict(_))));
    }

    #[test]
    fn test_every_position_owned_once() {
        let mut table = Table::grid(4, 4, 1000);
        table.merge(CellRange::new(0, 0, 4, 1));
        table.merge(CellRange::new(0, 1, 1, 3));
        table.merge(CellRange::new(2, 2, 2, 2));
        let grid = table.layout().unwrap();

        let origins = (0..4)
            .flat_map(|r| (0..4).map(move |c| (r, c)))
            .filter(|&(r, c)| matches!(grid.slot(r, c), GridSlot::Origin(_)))
            .count();
        // 3 declared regions plus 5 singles.
        assert_eq!(origins, 8);
    }

    #[test]
    fn test_table_plain_text() {
        let mut table = Table::new(vec![1000, 1000]);
        table.add_row(Row::with_texts(["A1", "B1"]));
        assert_eq!(table.plain_text(), "A1\tB1\n");
    }
}
