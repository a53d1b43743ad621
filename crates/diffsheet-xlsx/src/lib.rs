//! # diffsheet-xlsx
//!
//! XLSX (Office Open XML) writer for diffsheet workbooks.
//!
//! Only what a diff report needs is emitted: inline-string cells, cell
//! styles, column widths, merged regions and in-workbook hyperlinks.
//!
//! ```no_run
//! use diffsheet_core::Workbook;
//! use diffsheet_xlsx::XlsxWriter;
//!
//! let mut workbook = Workbook::new();
//! workbook.add_worksheet_with_name("compare")?;
//! XlsxWriter::write_file(&workbook, "report.xlsx")?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod error;
pub mod writer;

mod styles;

pub use error::{XlsxError, XlsxResult};
pub use writer::XlsxWriter;
