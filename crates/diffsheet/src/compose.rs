//! Consolidated "compare" sheet
//!
//! For each file sheet the composer writes a label row and then every
//! changed block, padded with context, one after another.

use std::collections::BTreeMap;

use diffsheet_core::{CellData, FillStyle, FontStyle, Style, Worksheet};

use crate::blocks::{merge_blocks, Block};
use crate::config::ReportConfig;
use crate::detect::{detect_diff_rows, last_meaningful_row, LastRow};
use crate::error::{ReportResult, ReportWarning};

/// What happened to one file of the batch
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FileReport {
    /// File name as shown in the compare sheet
    pub file: String,
    /// Title of the file's sheet; `None` when the file was left out
    pub sheet: Option<String>,
    /// Changed rows of the file sheet (0-based)
    pub diff_rows: Vec<u32>,
    /// Blocks copied into the compare sheet
    pub blocks: Vec<Block>,
    pub warnings: Vec<ReportWarning>,
    /// Why the file was left out of the workbook
    pub error: Option<String>,
}

impl FileReport {
    pub fn new<S: Into<String>>(file: S, sheet: Option<String>) -> Self {
        Self {
            file: file.into(),
            sheet,
            ..Default::default()
        }
    }

    /// A file that could not be added to the workbook
    pub fn failed<S: Into<String>>(file: S, error: impl ToString) -> Self {
        Self {
            file: file.into(),
            error: Some(error.to_string()),
            ..Default::default()
        }
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    pub fn has_changes(&self) -> bool {
        !self.diff_rows.is_empty()
    }
}

/// Writes file blocks into the compare sheet, top to bottom
pub struct Composer<'a> {
    config: &'a ReportConfig,
    /// Sheet title -> original file name
    labels: &'a BTreeMap<String, String>,
    /// Next row to write
    cursor: u32,
}

impl<'a> Composer<'a> {
    pub fn new(config: &'a ReportConfig, labels: &'a BTreeMap<String, String>) -> Self {
        Self {
            config,
            labels,
            cursor: config.first_content_row,
        }
    }

    /// Next row of the compare sheet that will be written
    pub fn cursor(&self) -> u32 {
        self.cursor
    }

    /// Label shown for a sheet
    ///
    /// The recorded file name wins; otherwise `_` in the title is read back
    /// as the path separator, which cannot tell real underscores apart.
    pub fn label_for(&self, title: &str) -> String {
        match self.labels.get(title) {
            Some(file) => file.clone(),
            None => title.replace('_', &self.config.path_separator.to_string()),
        }
    }

    /// Compose every source sheet in order
    pub fn compose<'s, I>(&mut self, compare: &mut Worksheet, sources: I) -> ReportResult<Vec<FileReport>>
    where
        I: IntoIterator<Item = &'s Worksheet>,
    {
        sources
            .into_iter()
            .map(|source| self.add_sheet(compare, source))
            .collect()
    }

    /// Detect the changes of one sheet and append them to the compare sheet
    pub fn add_sheet(&mut self, compare: &mut Worksheet, source: &Worksheet) -> ReportResult<FileReport> {
        let label = self.label_for(source.name());
        let mut report = FileReport::new(label.clone(), Some(source.name().to_string()));

        let last_row = last_meaningful_row(source);
        if let LastRow::Fallback(max_row) = last_row {
            let warning = ReportWarning::NoColoredRows { max_row };
            log::warn!("{}: {}", source.name(), warning);
            report.warnings.push(warning);
        }
        if let Some(last_row) = last_row.row() {
            report.diff_rows = detect_diff_rows(source, last_row, self.config);
            report.blocks = merge_blocks(
                &report.diff_rows,
                self.config.context_lines,
                self.config.first_content_row,
            );
        }

        log::info!(
            "found {} diff rows in {} blocks for sheet: {}",
            report.diff_rows.len(),
            report.blocks.len(),
            source.name()
        );

        self.write_label(compare, &label)?;
        for block in &report.blocks {
            self.copy_block(compare, source, block)?;
            self.cursor += 1;
        }
        self.cursor += 1;

        Ok(report)
    }

    fn write_label(&mut self, compare: &mut Worksheet, label: &str) -> ReportResult<()> {
        let style = Style::new()
            .bold(true)
            .font_size(self.config.label_font_size)
            .fill_color(self.config.label_fill);
        compare.set_cell_at(self.cursor, 0, CellData::with_style(label, style))?;
        self.cursor += 1;
        Ok(())
    }

    fn copy_block(&mut self, compare: &mut Worksheet, source: &Worksheet, block: &Block) -> ReportResult<()> {
        for row in block.rows() {
            for col in 0..self.config.copied_columns {
                if let Some(cell) = source.cell_at(row, col) {
                    compare.set_cell_at(self.cursor, col, copy_cell(cell))?;
                }
            }
            self.cursor += 1;
        }
        Ok(())
    }
}

/// Value plus visible colours; borders, hyperlinks and other font
/// settings are left behind
fn copy_cell(cell: &CellData) -> CellData {
    let mut font = FontStyle::default();
    if !cell.style.font.color.is_default_font() {
        font.color = cell.style.font.color;
    }

    let fill = if cell.style.fill.is_default() {
        FillStyle::None
    } else {
        cell.style.fill
    };

    let style = Style {
        font,
        fill,
        ..Style::default()
    };
    CellData::with_style(cell.value.clone(), style)
}

#[cfg(test)]
mod tests {
    use super::*;
    use diffsheet_core::Color;
    use pretty_assertions::assert_eq;

    const GREY: Color = Color::rgb(0xC0, 0xC0, 0xC0);
    const NUMBER_FILL: Color = Color::rgb(0xF0, 0xF0, 0xF0);

    /// A prepared file sheet with `rows` numbered lines, changed at `changed`
    fn file_sheet(name: &str, rows: u32, changed: &[u32]) -> Worksheet {
        let mut sheet = Worksheet::new(name);
        for row in 1..=rows {
            let number = Style::new().fill_color(NUMBER_FILL);
            sheet
                .set_cell_at(row, 0, CellData::with_style(row.to_string(), number.clone()))
                .unwrap();
            sheet
                .set_cell_at(row, 2, CellData::with_style(row.to_string(), number))
                .unwrap();
            let content = if changed.contains(&row) {
                Style::new().fill_color(GREY)
            } else {
                Style::new()
            };
            sheet
                .set_cell_at(row, 1, CellData::with_style(format!("left {}", row), content.clone()))
                .unwrap();
            sheet
                .set_cell_at(row, 3, CellData::with_style(format!("right {}", row), content))
                .unwrap();
        }
        sheet
    }

    #[test]
    fn test_label_prefers_recorded_file_name() {
        let config = ReportConfig::default();
        let mut labels = BTreeMap::new();
        labels.insert("spm_tbl_rinse.t".to_string(), "spm_tbl_rinse.t".to_string());
        let composer = Composer::new(&config, &labels);

        assert_eq!(composer.label_for("spm_tbl_rinse.t"), "spm_tbl_rinse.t");
        assert_eq!(composer.label_for("src_main.c"), "src\\main.c");
    }

    #[test]
    fn test_single_block_layout() {
        let config = ReportConfig::default();
        let labels = BTreeMap::new();
        let source = file_sheet("main.c", 30, &[10]);
        let mut compare = Worksheet::new("compare");

        let mut composer = Composer::new(&config, &labels);
        let report = composer.add_sheet(&mut compare, &source).unwrap();

        assert_eq!(report.diff_rows, vec![10]);
        assert_eq!(report.blocks, vec![Block::new(6, 14)]);
        assert!(report.warnings.is_empty());

        // Label on row 1, rows 6..=14 on rows 2..=10, then two spacing rows
        assert_eq!(compare.value_at(1, 0), Some("main.c"));
        assert_eq!(compare.value_at(2, 1), Some("left 6"));
        assert_eq!(compare.value_at(10, 3), Some("right 14"));
        assert_eq!(compare.max_row(), Some(10));
        assert_eq!(composer.cursor(), 13);

        let label_style = compare.cell_style_at(1, 0).unwrap();
        assert!(label_style.font.bold);
        assert_eq!(label_style.font.size, 12.0);
        assert_eq!(label_style.fill.color(), Some(Color::rgb(0xCC, 0xFF, 0xFF)));
    }

    #[test]
    fn test_file_without_changes_gets_label_and_spacing() {
        let config = ReportConfig::default();
        let labels = BTreeMap::new();
        let mut compare = Worksheet::new("compare");
        let mut composer = Composer::new(&config, &labels);

        let report = composer
            .add_sheet(&mut compare, &file_sheet("same.c", 5, &[]))
            .unwrap();
        assert!(report.blocks.is_empty());
        assert!(!report.has_changes());
        assert_eq!(composer.cursor(), 3);
        assert_eq!(compare.cell_count(), 1);
    }

    #[test]
    fn test_files_follow_each_other() {
        let config = ReportConfig::default();
        let labels = BTreeMap::new();
        let first = file_sheet("a.c", 40, &[10, 30]);
        let second = file_sheet("b.c", 10, &[2]);
        let mut compare = Worksheet::new("compare");

        let reports = Composer::new(&config, &labels)
            .compose(&mut compare, [&first, &second])
            .unwrap();

        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].blocks, vec![Block::new(6, 14), Block::new(26, 34)]);
        assert_eq!(reports[1].blocks, vec![Block::new(1, 6)]);

        // a.c: label 1, block 2..=10, gap 11, block 12..=20, gaps 21-22
        assert_eq!(compare.value_at(12, 1), Some("left 26"));
        assert_eq!(compare.value_at(11, 1), None);
        assert_eq!(compare.value_at(23, 0), Some("b.c"));
        assert_eq!(compare.value_at(24, 1), Some("left 1"));
    }

    #[test]
    fn test_sheet_without_coloured_rows_warns() {
        let config = ReportConfig::default();
        let labels = BTreeMap::new();
        let mut source = Worksheet::new("plain.txt");
        source.set_cell_value_at(3, 1, "text").unwrap();
        let mut compare = Worksheet::new("compare");

        let report = Composer::new(&config, &labels)
            .add_sheet(&mut compare, &source)
            .unwrap();
        assert_eq!(report.warnings, vec![ReportWarning::NoColoredRows { max_row: 3 }]);
    }

    #[test]
    fn test_copy_keeps_visible_colours() {
        let red_on_green = CellData::with_style(
            "x",
            Style::new()
                .bold(true)
                .font_color(Color::rgb(0xFF, 0, 0))
                .fill_color(Color::rgb(0, 0xFF, 0)),
        );
        let copied = copy_cell(&red_on_green);
        assert_eq!(copied.style.font.color, Color::rgb(0xFF, 0, 0));
        assert!(!copied.style.font.bold);
        assert_eq!(copied.style.fill, FillStyle::solid(Color::rgb(0, 0xFF, 0)));
    }

    #[test]
    fn test_copy_drops_default_colours() {
        let plain = CellData::with_style(
            "y",
            Style::new()
                .font_color(Color::BLACK)
                .fill_color(Color::WHITE),
        );
        let mut linked = plain.clone();
        linked.hyperlink = Some("'x'!A1".to_string());

        let copied = copy_cell(&linked);
        assert_eq!(copied.value, plain.value);
        assert_eq!(copied.style, Style::default());
        assert_eq!(copied.hyperlink, None);
    }
}
