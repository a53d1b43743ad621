//! # diffsheet
//!
//! Turns a batch of side-by-side HTML diff reports into one reviewable
//! spreadsheet.
//!
//! ## Features
//!
//! - One sheet per compared file, converted from its HTML report
//! - A summary sheet whose file names link to their sheets
//! - A "compare" sheet holding only the changed regions, padded with context
//! - XLSX output through [`XlsxWriter`]
//!
//! ## Example
//!
//! ```rust
//! use diffsheet::prelude::*;
//!
//! let summary = "<table><tr><td>summary</td></tr></table>";
//! let file = r##"<table>
//!   <tr><th></th><th>old</th><th></th><th>new</th></tr>
//!   <tr><td>1</td><td bgcolor="#c0c0c0">a</td><td>1</td><td bgcolor="#c0c0c0">b</td></tr>
//! </table>"##;
//!
//! let config = ReportConfig::default();
//! let report = ReportBuilder::new(&config)
//!     .build_from_str(summary, &[("src_main.c", file)])
//!     .unwrap();
//!
//! assert_eq!(report.workbook.sheet_names(), vec!["compare", "Summary", "src_main.c"]);
//! assert_eq!(report.files[0].diff_rows, vec![1]);
//!
//! // Save to file
//! // report.workbook.save("report.xlsx").unwrap();
//! ```

pub mod blocks;
pub mod compose;
pub mod config;
pub mod detect;
pub mod error;
pub mod pipeline;
pub mod policy;
pub mod prelude;

pub use blocks::{merge_blocks, Block};
pub use compose::{Composer, FileReport};
pub use config::ReportConfig;
pub use detect::{detect_diff_rows, last_meaningful_row, LastRow};
pub use error::{ReportError, ReportResult, ReportWarning};
pub use pipeline::{Report, ReportBuilder, ReportSource};

// Re-export core types
pub use diffsheet_core::{
    BorderLineStyle, BorderStyle, CellAddress, CellData, CellRange, CellValue, Color, FillStyle,
    FontStyle, HorizontalAlignment, Style, VerticalAlignment, Workbook, Worksheet,
    MAX_SHEET_NAME_LEN,
};

// Re-export I/O types
pub use diffsheet_html::{Conversion, HtmlReadOptions, HtmlReader, Warning};
pub use diffsheet_xlsx::{XlsxError, XlsxWriter};

use std::path::Path;

/// Extension trait for Workbook to add file output
pub trait WorkbookExt {
    /// Save the workbook to a file, choosing the format by extension
    fn save<P: AsRef<Path>>(&self, path: P) -> ReportResult<()>;
}

impl WorkbookExt for Workbook {
    fn save<P: AsRef<Path>>(&self, path: P) -> ReportResult<()> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase());

        match extension.as_deref() {
            Some("xlsx") => Ok(XlsxWriter::write_file(self, path)?),
            _ => Err(ReportError::Config(format!(
                "Unsupported output format: {}",
                path.display()
            ))),
        }
    }
}
