//! HTML conversion options

use diffsheet_core::Color;

/// Options for converting HTML tables
#[derive(Debug, Clone, PartialEq)]
pub struct HtmlReadOptions {
    /// Number of leading columns where a bare `.` is dropped (default: 2)
    pub placeholder_columns: u16,
    /// Upper bound for auto-sized column widths (default: 100)
    pub max_column_width: f64,
    /// Fill given to `<th>` cells without an explicit colour (default: `FFDDDDDD`)
    pub header_fill: Color,
    /// Font size of `<th>` cells (default: 11)
    pub header_font_size: f64,
}

impl Default for HtmlReadOptions {
    fn default() -> Self {
        Self {
            placeholder_columns: 2,
            max_column_width: 100.0,
            header_fill: Color::rgb(0xDD, 0xDD, 0xDD),
            header_font_size: 11.0,
        }
    }
}
