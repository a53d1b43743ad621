//! Changed-row detection on converted report sheets

use diffsheet_core::Worksheet;

use crate::config::ReportConfig;

/// Where the meaningful part of a report sheet ends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LastRow {
    /// Last row whose first-column cell carries a fill
    Colored(u32),
    /// No coloured row was found; the sheet's last populated row
    Fallback(u32),
    /// The sheet has no cells
    Empty,
}

impl LastRow {
    pub fn row(self) -> Option<u32> {
        match self {
            LastRow::Colored(row) | LastRow::Fallback(row) => Some(row),
            LastRow::Empty => None,
        }
    }
}

/// Find the last row worth scanning
///
/// Report trailers (legends, blank padding) follow the last line-numbered
/// row, and line-number cells are the only first-column cells that carry a
/// fill. Scanning runs backwards from the sheet's max row.
pub fn last_meaningful_row(sheet: &Worksheet) -> LastRow {
    let Some(max_row) = sheet.max_row() else {
        return LastRow::Empty;
    };

    (0..=max_row)
        .rev()
        .find(|&row| {
            sheet
                .cell_style_at(row, 0)
                .map_or(false, |style| !style.fill.is_default())
        })
        .map_or(LastRow::Fallback(max_row), LastRow::Colored)
}

/// Rows in `first_content_row..=last_row` where a content cell is filled
/// with exactly the highlight colour, ascending
pub fn detect_diff_rows(sheet: &Worksheet, last_row: u32, config: &ReportConfig) -> Vec<u32> {
    let highlight = Some(config.highlight_color);

    (config.first_content_row..=last_row)
        .filter(|&row| {
            config.content_columns.iter().any(|&col| {
                sheet
                    .cell_style_at(row, col)
                    .map_or(false, |style| style.fill.color() == highlight)
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use diffsheet_core::{Color, Style};
    use pretty_assertions::assert_eq;

    const GREY: Color = Color::rgb(0xC0, 0xC0, 0xC0);

    fn fill(sheet: &mut Worksheet, row: u32, col: u16, color: Color) {
        sheet
            .set_cell_style_at(row, col, &Style::new().fill_color(color))
            .unwrap();
    }

    #[test]
    fn test_last_meaningful_row() {
        let mut sheet = Worksheet::new("main.c");
        for row in 0..=20 {
            sheet.set_cell_value_at(row, 0, row.to_string()).unwrap();
        }
        fill(&mut sheet, 3, 0, Color::rgb(0xF0, 0xF0, 0xF0));
        fill(&mut sheet, 12, 0, Color::rgb(0xF0, 0xF0, 0xF0));
        fill(&mut sheet, 15, 0, Color::WHITE);
        fill(&mut sheet, 16, 0, Color::argb(0, 0x12, 0x34, 0x56));

        assert_eq!(last_meaningful_row(&sheet), LastRow::Colored(12));
    }

    #[test]
    fn test_last_row_fallback_and_empty() {
        let mut sheet = Worksheet::new("plain");
        assert_eq!(last_meaningful_row(&sheet), LastRow::Empty);
        assert_eq!(LastRow::Empty.row(), None);

        sheet.set_cell_value_at(7, 1, "text").unwrap();
        assert_eq!(last_meaningful_row(&sheet), LastRow::Fallback(7));
        assert_eq!(LastRow::Fallback(7).row(), Some(7));
    }

    #[test]
    fn test_detect_diff_rows() {
        let config = ReportConfig::default();
        let mut sheet = Worksheet::new("main.c");
        fill(&mut sheet, 0, 1, GREY); // header row is never scanned
        fill(&mut sheet, 2, 1, GREY);
        fill(&mut sheet, 4, 3, GREY);
        fill(&mut sheet, 4, 1, GREY);
        fill(&mut sheet, 5, 1, Color::rgb(0xC0, 0xC0, 0xC1));
        fill(&mut sheet, 6, 2, GREY); // line-number column
        fill(&mut sheet, 9, 3, GREY);
        fill(&mut sheet, 11, 3, GREY); // past the last row

        assert_eq!(detect_diff_rows(&sheet, 10, &config), vec![2, 4, 9]);
    }

    #[test]
    fn test_detect_uses_configured_colour() {
        let config = ReportConfig::default().with_highlight_color(Color::rgb(0xFF, 0xC0, 0xC0));
        let mut sheet = Worksheet::new("main.c");
        fill(&mut sheet, 1, 1, GREY);
        fill(&mut sheet, 2, 3, Color::rgb(0xFF, 0xC0, 0xC0));

        assert_eq!(detect_diff_rows(&sheet, 2, &config), vec![2]);
    }

    #[test]
    fn test_detect_before_first_content_row() {
        let config = ReportConfig::default();
        assert!(detect_diff_rows(&Worksheet::new("empty"), 0, &config).is_empty());
    }
}
