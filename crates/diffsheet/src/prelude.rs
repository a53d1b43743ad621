//! Prelude module - common imports for diffsheet users
//!
//! ```rust
//! use diffsheet::prelude::*;
//! ```

pub use crate::{
    Block,
    CellAddress,
    CellRange,
    CellValue,
    Color,
    FileReport,
    Report,
    ReportBuilder,
    ReportConfig,
    ReportError,
    ReportResult,
    ReportSource,
    ReportWarning,
    Style,
    Workbook,
    // Extension traits
    WorkbookExt,
    Worksheet,
    XlsxWriter,
};
