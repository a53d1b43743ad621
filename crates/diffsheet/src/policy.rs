//! Layout and styling of file sheets and the compare sheet

use diffsheet_core::{
    BorderLineStyle, BorderStyle, Color, FillStyle, HorizontalAlignment, Worksheet,
};

use crate::config::ReportConfig;
use crate::error::ReportResult;

/// Header row of file and compare sheets
const HEADER_ROW: u32 = 0;

/// Neutralise the line-number columns of a freshly converted file sheet
///
/// From the first content row down to the last populated row, line-number
/// cells lose their hyperlink and get a light grey fill and a plain 12pt
/// font.
pub fn prepare_source_sheet(sheet: &mut Worksheet, config: &ReportConfig) -> ReportResult<()> {
    let Some(max_row) = sheet.max_row() else {
        return Ok(());
    };

    for &col in &config.line_number_columns {
        for row in config.first_content_row..=max_row {
            let cell = sheet.cell_entry(row, col)?;
            cell.hyperlink = None;
            cell.style.fill = FillStyle::solid(config.line_number_fill);
            cell.style.font.size = config.line_number_font_size;
            cell.style.font.color = Color::Auto;
        }
    }
    Ok(())
}

/// Apply the report layout to a file sheet or the compare sheet
pub fn apply(sheet: &mut Worksheet, config: &ReportConfig) -> ReportResult<()> {
    set_column_widths(sheet, config);
    set_monospace_font(sheet, config);
    write_headers(sheet, config)?;
    if let Some(col) = config.annotation_column {
        fill_annotation_column(sheet, col, config)?;
    }
    draw_vertical_borders(sheet, config)?;
    log::debug!("formatted sheet '{}'", sheet.name());
    Ok(())
}

fn set_column_widths(sheet: &mut Worksheet, config: &ReportConfig) {
    for &col in &config.line_number_columns {
        sheet.set_column_width(col, config.line_number_width);
    }
    for &col in &config.content_columns {
        sheet.set_column_width(col, config.content_width);
    }
    if let Some(col) = config.annotation_column {
        sheet.set_column_width(col, config.annotation_width);
    }
}

fn set_monospace_font(sheet: &mut Worksheet, config: &ReportConfig) {
    for &col in &config.content_columns {
        let rows: Vec<u32> = sheet.column_cells(col).map(|(row, _)| row).collect();
        for row in rows {
            if let Some(cell) = sheet.cell_at_mut(row, col) {
                cell.style.font.name = config.monospace_font.clone();
            }
        }
    }
}

/// Header cells are written over whatever the report had in row 1; a merge
/// covering one of them is dissolved first
fn write_headers(sheet: &mut Worksheet, config: &ReportConfig) -> ReportResult<()> {
    for (&col, header) in config.content_columns.iter().zip(&config.content_headers) {
        release_merge(sheet, HEADER_ROW, col);
        let cell = sheet.cell_entry(HEADER_ROW, col)?;
        cell.value = header.as_str().into();
        cell.style.font.bold = true;
    }

    if let Some(col) = config.annotation_column {
        release_merge(sheet, HEADER_ROW, col);
        let cell = sheet.cell_entry(HEADER_ROW, col)?;
        cell.value = config.annotation_header.as_str().into();
        cell.style.alignment.horizontal = HorizontalAlignment::Center;
        cell.style.fill = FillStyle::solid(config.annotation_header_fill);
    }
    Ok(())
}

fn release_merge(sheet: &mut Worksheet, row: u32, col: u16) {
    if let Some(range) = sheet.merged_region_at(row, col).copied() {
        log::debug!("{}: unmerging {} for the header row", sheet.name(), range);
        sheet.unmerge_cells(&range);
    }
}

/// Mark rows whose first content cell is unfilled as needing no comment
fn fill_annotation_column(sheet: &mut Worksheet, col: u16, config: &ReportConfig) -> ReportResult<()> {
    let Some(max_row) = sheet.max_row() else {
        return Ok(());
    };
    let Some(&content_col) = config.content_columns.first() else {
        return Ok(());
    };

    for row in config.first_content_row..=max_row {
        let unchanged = sheet
            .cell_style_at(row, content_col)
            .map_or(true, |style| style.fill.is_default());
        if unchanged {
            let cell = sheet.cell_entry(row, col)?;
            cell.value = config.annotation_placeholder.as_str().into();
            cell.style.fill = FillStyle::solid(config.annotation_placeholder_fill);
        }
    }
    Ok(())
}

/// Light left/right edges on every cell of the used area; no top/bottom
fn draw_vertical_borders(sheet: &mut Worksheet, config: &ReportConfig) -> ReportResult<()> {
    let (Some(max_row), Some(max_col)) = (sheet.max_row(), sheet.max_col()) else {
        return Ok(());
    };
    let border = BorderStyle::vertical(BorderLineStyle::Thin, config.border_color);

    for row in 0..=max_row {
        for col in 0..=max_col {
            sheet.cell_entry(row, col)?.style.border = border;
        }
    }
    Ok(())
}
