//! One named grid of cells

use std::collections::BTreeMap;

use crate::cell::{CellAddress, CellData, CellRange, CellStorage, CellValue};
use crate::error::{Error, Result};
use crate::style::Style;
use crate::{MAX_COLS, MAX_ROWS};

/// Positions are 0-based `(row, col)`; writes outside the xlsx grid fail.
/// The title is checked by [`Workbook`](crate::Workbook), not here.
#[derive(Debug, Clone)]
pub struct Worksheet {
    name: String,
    cells: CellStorage,
}

impl Worksheet {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cells: CellStorage::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn cell_at(&self, row: u32, col: u16) -> Option<&CellData> {
        self.cells.get(row, col)
    }

    pub fn cell_at_mut(&mut self, row: u32, col: u16) -> Option<&mut CellData> {
        self.cells.get_mut(row, col)
    }

    /// The cell at a position, created empty if nothing was written there
    pub fn cell_entry(&mut self, row: u32, col: u16) -> Result<&mut CellData> {
        check_position(row, col)?;
        Ok(self.cells.entry(row, col))
    }

    pub fn value_at(&self, row: u32, col: u16) -> Option<&str> {
        self.cell_at(row, col)?.value.as_str()
    }

    /// `address` in A1 notation
    pub fn set_cell_value(&mut self, address: &str, value: impl Into<CellValue>) -> Result<()> {
        let CellAddress { row, col } = address.parse()?;
        self.set_cell_value_at(row, col, value)
    }

    /// Leaves the style alone
    pub fn set_cell_value_at(&mut self, row: u32, col: u16, value: impl Into<CellValue>) -> Result<()> {
        self.cell_entry(row, col)?.value = value.into();
        Ok(())
    }

    pub fn cell_style_at(&self, row: u32, col: u16) -> Option<&Style> {
        self.cell_at(row, col).map(|cell| &cell.style)
    }

    /// Leaves the value alone
    pub fn set_cell_style_at(&mut self, row: u32, col: u16, style: &Style) -> Result<()> {
        self.cell_entry(row, col)?.style = style.clone();
        Ok(())
    }

    pub fn set_cell_at(&mut self, row: u32, col: u16, data: CellData) -> Result<()> {
        check_position(row, col)?;
        self.cells.set(row, col, data);
        Ok(())
    }

    pub fn hyperlink_at(&self, row: u32, col: u16) -> Option<&str> {
        self.cell_at(row, col)?.hyperlink.as_deref()
    }

    pub fn set_hyperlink_at(&mut self, row: u32, col: u16, target: impl Into<String>) -> Result<()> {
        self.cell_entry(row, col)?.hyperlink = Some(target.into());
        Ok(())
    }

    /// The removed target, if the cell had one
    pub fn clear_hyperlink_at(&mut self, row: u32, col: u16) -> Option<String> {
        self.cell_at_mut(row, col)?.hyperlink.take()
    }

    /// `(row, col, target)` for every linked cell, row-major
    pub fn hyperlinks(&self) -> impl Iterator<Item = (u32, u16, &str)> {
        self.cells
            .iter()
            .filter_map(|(row, col, cell)| Some((row, col, cell.hyperlink.as_deref()?)))
    }

    /// Stored cells of one row, left to right
    pub fn row_cells(&self, row: u32) -> impl Iterator<Item = (u16, &CellData)> {
        self.cells.iter_row(row)
    }

    /// Stored cells of one column, top to bottom
    pub fn column_cells(&self, col: u16) -> impl Iterator<Item = (u32, &CellData)> {
        self.cells.iter_column(col)
    }

    /// Bounding box of every stored cell, styled-only cells included
    pub fn used_range(&self) -> Option<CellRange> {
        let (top, left, bottom, right) = self.cells.used_bounds()?;
        Some(CellRange::from_indices(top, left, bottom, right))
    }

    pub fn max_row(&self) -> Option<u32> {
        Some(self.used_range()?.end.row)
    }

    pub fn max_col(&self) -> Option<u16> {
        Some(self.used_range()?.end.col)
    }

    pub fn column_width(&self, col: u16) -> Option<f64> {
        self.cells.column_width(col)
    }

    /// Width in characters of the default font
    pub fn set_column_width(&mut self, col: u16, width: f64) {
        self.cells.set_column_width(col, width);
    }

    pub fn custom_column_widths(&self) -> &BTreeMap<u16, f64> {
        self.cells.column_widths()
    }

    pub fn merged_regions(&self) -> &[CellRange] {
        self.cells.merged_regions()
    }

    /// Record `range` as merged.
    ///
    /// Fails with [`Error::MergedCellConflict`] and changes nothing when
    /// the range touches an existing merge or a non-anchor cell has text.
    pub fn merge_cells(&mut self, range: &CellRange) -> Result<()> {
        if let Some(existing) = self.merged_regions().iter().find(|r| r.overlaps(range)) {
            return Err(Error::merge_conflict(
                range,
                format!("overlaps merged region {}", existing),
            ));
        }

        let anchor = range.anchor();
        let occupied = range.cells().find(|&addr| {
            addr != anchor
                && self
                    .cell_at(addr.row, addr.col)
                    .map_or(false, |cell| !cell.value.is_empty())
        });
        if let Some(addr) = occupied {
            return Err(Error::merge_conflict(
                range,
                format!("cell {} already holds data", addr),
            ));
        }

        self.cells.add_merged_region(*range);
        Ok(())
    }

    /// `false` when `range` was not merged
    pub fn unmerge_cells(&mut self, range: &CellRange) -> bool {
        let Some(index) = self.merged_regions().iter().position(|r| r == range) else {
            return false;
        };
        self.cells.remove_merged_region(index).is_some()
    }

    pub fn merged_region_at(&self, row: u32, col: u16) -> Option<&CellRange> {
        self.merged_regions().iter().find(|r| r.contains(row, col))
    }

    /// Inside a merge but not its anchor
    pub fn is_merge_covered(&self, row: u32, col: u16) -> bool {
        self.merged_region_at(row, col)
            .map_or(false, |r| r.anchor() != CellAddress::new(row, col))
    }

    pub fn cell_count(&self) -> usize {
        self.cells.cell_count()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn iter_cells(&self) -> impl Iterator<Item = (u32, u16, &CellData)> {
        self.cells.iter()
    }
}

fn check_position(row: u32, col: u16) -> Result<()> {
    if row >= MAX_ROWS {
        Err(Error::RowOutOfBounds(row, MAX_ROWS - 1))
    } else if col >= MAX_COLS {
        Err(Error::ColumnOutOfBounds(col, MAX_COLS - 1))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::Color;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_value_and_style_are_independent() {
        let mut sheet = Worksheet::new("main.c");
        sheet.set_cell_value("B2", "hello").unwrap();
        sheet.set_cell_style_at(1, 1, &Style::new().bold(true)).unwrap();
        sheet
            .set_cell_style_at(1, 1, &Style::new().fill_color(Color::rgb(1, 2, 3)))
            .unwrap();

        assert_eq!(sheet.value_at(1, 1), Some("hello"));
        assert!(!sheet.cell_style_at(1, 1).unwrap().font.bold);
        assert!(sheet.cell_at(0, 0).is_none());
    }

    #[test]
    fn test_used_range_counts_styled_cells() {
        let mut sheet = Worksheet::new("main.c");
        assert_eq!(sheet.max_row(), None);
        assert_eq!(sheet.max_col(), None);

        sheet.set_cell_value_at(4, 1, "a").unwrap();
        sheet.set_cell_style_at(2, 3, &Style::new()).unwrap();
        assert_eq!(sheet.max_row(), Some(4));
        assert_eq!(sheet.max_col(), Some(3));
        assert_eq!(sheet.used_range().unwrap().to_string(), "B3:D5");
    }

    #[test]
    fn test_writes_outside_grid_fail() {
        let mut sheet = Worksheet::new("main.c");
        assert!(matches!(
            sheet.set_cell_value_at(MAX_ROWS, 0, "x"),
            Err(Error::RowOutOfBounds(..))
        ));
        assert!(matches!(
            sheet.set_hyperlink_at(0, MAX_COLS, "x"),
            Err(Error::ColumnOutOfBounds(..))
        ));
        assert!(sheet.is_empty());
    }

    #[test]
    fn test_hyperlinks_keep_text() {
        let mut sheet = Worksheet::new("Summary");
        sheet.set_cell_value_at(5, 1, "main.c").unwrap();
        sheet.set_hyperlink_at(5, 1, "'main.c'!A1").unwrap();
        sheet.set_hyperlink_at(2, 0, "https://example.com").unwrap();

        assert_eq!(sheet.hyperlink_at(5, 1), Some("'main.c'!A1"));
        assert_eq!(sheet.value_at(5, 1), Some("main.c"));
        let rows: Vec<u32> = sheet.hyperlinks().map(|(row, _, _)| row).collect();
        assert_eq!(rows, vec![2, 5]);

        assert_eq!(sheet.clear_hyperlink_at(5, 1).as_deref(), Some("'main.c'!A1"));
        assert_eq!(sheet.clear_hyperlink_at(5, 1), None);
        assert_eq!(sheet.value_at(5, 1), Some("main.c"));
    }

    #[test]
    fn test_row_and_column_cells() {
        let mut sheet = Worksheet::new("main.c");
        sheet.set_cell_value_at(0, 0, "a").unwrap();
        sheet.set_cell_value_at(0, 3, "d").unwrap();
        sheet.set_cell_value_at(7, 0, "h").unwrap();

        let row: Vec<(u16, String)> = sheet
            .row_cells(0)
            .map(|(col, cell)| (col, cell.value.to_string()))
            .collect();
        assert_eq!(row, vec![(0, "a".to_string()), (3, "d".to_string())]);

        let rows: Vec<u32> = sheet.column_cells(0).map(|(row, _)| row).collect();
        assert_eq!(rows, vec![0, 7]);

        assert_eq!(sheet.column_width(1), None);
        sheet.set_column_width(1, 100.0);
        assert_eq!(sheet.column_width(1), Some(100.0));
        assert_eq!(sheet.custom_column_widths().len(), 1);
    }

    #[test]
    fn test_merge_and_unmerge() {
        let mut sheet = Worksheet::new("main.c");
        sheet.set_cell_value_at(0, 0, "anchor").unwrap();

        let block = CellRange::parse("A1:C3").unwrap();
        sheet.merge_cells(&block).unwrap();
        assert_eq!(sheet.merged_region_at(1, 1), Some(&block));
        assert!(sheet.is_merge_covered(1, 1));
        assert!(!sheet.is_merge_covered(0, 0));
        assert!(sheet.merged_region_at(3, 0).is_none());

        let overlapping = CellRange::parse("B2:D4").unwrap();
        assert!(matches!(
            sheet.merge_cells(&overlapping),
            Err(Error::MergedCellConflict { .. })
        ));

        assert!(sheet.unmerge_cells(&block));
        assert!(!sheet.unmerge_cells(&block));
        assert!(sheet.merged_regions().is_empty());
    }

    #[test]
    fn test_merge_over_text_conflicts() {
        let mut sheet = Worksheet::new("main.c");
        sheet.set_cell_value_at(0, 1, "data").unwrap();
        let err = sheet.merge_cells(&CellRange::parse("A1:B1").unwrap()).unwrap_err();
        assert!(matches!(err, Error::MergedCellConflict { .. }));
        assert!(sheet.merged_regions().is_empty());

        sheet.set_cell_style_at(1, 1, &Style::new().bold(true)).unwrap();
        sheet.merge_cells(&CellRange::parse("A2:B2").unwrap()).unwrap();
    }
}
