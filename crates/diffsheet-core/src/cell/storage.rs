//! Sparse cell map plus the per-sheet extras (column widths, merges)

use std::collections::BTreeMap;

use super::{CellRange, CellValue};
use crate::style::Style;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CellData {
    pub value: CellValue,
    pub style: Style,
    /// `'Sheet'!A1` for a jump inside the workbook, otherwise a URL
    pub hyperlink: Option<String>,
}

impl CellData {
    pub fn with_style(value: impl Into<CellValue>, style: Style) -> Self {
        Self {
            value: value.into(),
            style,
            hyperlink: None,
        }
    }
}

type Row = BTreeMap<u16, CellData>;

/// Only written cells are stored; ordered maps give row-major iteration.
#[derive(Debug, Clone, Default)]
pub struct CellStorage {
    rows: BTreeMap<u32, Row>,
    column_widths: BTreeMap<u16, f64>,
    merged_regions: Vec<CellRange>,
}

impl CellStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, row: u32, col: u16) -> Option<&CellData> {
        self.rows.get(&row)?.get(&col)
    }

    pub fn get_mut(&mut self, row: u32, col: u16) -> Option<&mut CellData> {
        self.rows.get_mut(&row)?.get_mut(&col)
    }

    /// The cell at `(row, col)`, inserted empty when absent
    pub fn entry(&mut self, row: u32, col: u16) -> &mut CellData {
        self.rows.entry(row).or_default().entry(col).or_default()
    }

    pub fn set(&mut self, row: u32, col: u16, data: CellData) {
        *self.entry(row, col) = data;
    }

    /// Drops the row too once it has no cells left
    pub fn remove(&mut self, row: u32, col: u16) -> Option<CellData> {
        let cells = self.rows.get_mut(&row)?;
        let removed = cells.remove(&col);
        if cells.is_empty() {
            self.rows.remove(&row);
        }
        removed
    }

    pub fn cell_count(&self) -> usize {
        self.rows.values().map(Row::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// `(first_row, first_col, last_row, last_col)` over every stored cell
    pub fn used_bounds(&self) -> Option<(u32, u16, u32, u16)> {
        let (&first_row, _) = self.rows.first_key_value()?;
        let (&last_row, _) = self.rows.last_key_value()?;

        let cols = self.rows.values().flat_map(|cells| {
            cells
                .first_key_value()
                .into_iter()
                .chain(cells.last_key_value())
                .map(|(&col, _)| col)
        });
        let (first_col, last_col) = cols.fold((u16::MAX, 0), |(lo, hi), col| (lo.min(col), hi.max(col)));

        Some((first_row, first_col, last_row, last_col))
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, u16, &CellData)> {
        self.rows
            .iter()
            .flat_map(|(&row, cells)| cells.iter().map(move |(&col, data)| (row, col, data)))
    }

    pub fn iter_row(&self, row: u32) -> impl Iterator<Item = (u16, &CellData)> {
        self.rows
            .get(&row)
            .into_iter()
            .flat_map(|cells| cells.iter().map(|(&col, data)| (col, data)))
    }

    pub fn iter_column(&self, col: u16) -> impl Iterator<Item = (u32, &CellData)> {
        self.rows
            .iter()
            .filter_map(move |(&row, cells)| Some((row, cells.get(&col)?)))
    }

    pub fn column_width(&self, col: u16) -> Option<f64> {
        self.column_widths.get(&col).copied()
    }

    pub fn set_column_width(&mut self, col: u16, width: f64) {
        self.column_widths.insert(col, width);
    }

    pub fn column_widths(&self) -> &BTreeMap<u16, f64> {
        &self.column_widths
    }

    pub fn merged_regions(&self) -> &[CellRange] {
        &self.merged_regions
    }

    /// Unchecked; overlap rules live in the worksheet
    pub fn add_merged_region(&mut self, range: CellRange) {
        self.merged_regions.push(range);
    }

    pub fn remove_merged_region(&mut self, index: usize) -> Option<CellRange> {
        (index < self.merged_regions.len()).then(|| self.merged_regions.remove(index))
    }
}
