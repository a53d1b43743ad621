//! Grid model shared by the diffsheet crates.
//!
//! A [`Workbook`] is an ordered list of [`Worksheet`]s. Each sheet is a
//! sparse map of [`CellData`] (text, [`Style`], optional hyperlink) plus
//! column widths and merged [`CellRange`]s. Readers fill it in and the
//! xlsx writer serializes it; nothing here does I/O.
//!
//! ```rust
//! use diffsheet_core::{Color, Style, Workbook};
//!
//! let mut workbook = Workbook::new();
//! let index = workbook.add_worksheet_with_name("compare").unwrap();
//! let sheet = workbook.worksheet_mut(index).unwrap();
//!
//! sheet.set_cell_value("A1", "src\\main.c").unwrap();
//! sheet.set_cell_value_at(1, 1, "int main(void)").unwrap();
//! sheet
//!     .set_cell_style_at(1, 1, &Style::new().fill_color(Color::argb(0xFF, 0xC0, 0xC0, 0xC0)))
//!     .unwrap();
//! assert_eq!(sheet.value_at(1, 1), Some("int main(void)"));
//! ```

pub mod cell;
pub mod error;
pub mod style;
pub mod workbook;
pub mod worksheet;

pub use cell::{CellAddress, CellData, CellRange, CellValue};
pub use error::{Error, Result};
pub use workbook::{sanitize_sheet_name, Workbook};
pub use worksheet::Worksheet;

pub use style::{
    Alignment, BorderEdge, BorderLineStyle, BorderStyle, Color, FillStyle, FontStyle,
    HorizontalAlignment, Style, VerticalAlignment,
};

/// Rows per sheet in the xlsx format
pub const MAX_ROWS: u32 = 1_048_576;

/// Columns per sheet, `A` through `XFD`
pub const MAX_COLS: u16 = 16_384;

/// Longest sheet title Excel accepts, counted in characters
pub const MAX_SHEET_NAME_LEN: usize = 31;
