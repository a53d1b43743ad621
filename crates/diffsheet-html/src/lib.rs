//! # diffsheet-html
//!
//! Converts the first `<table>` of an HTML diff report into a styled
//! [`Worksheet`](diffsheet_core::Worksheet).
//!
//! Malformed input never fails a conversion: problems are collected as
//! [`Warning`]s next to the sheet. Only structural violations (overlapping
//! merges) are returned as errors.
//!
//! ```rust
//! use diffsheet_html::{HtmlReadOptions, HtmlReader};
//!
//! let html = r##"<table><tr><td>1</td><td bgcolor="#c0c0c0">int x;</td></tr></table>"##;
//! let conversion = HtmlReader::read_str(html, "main.c", &HtmlReadOptions::default()).unwrap();
//! assert_eq!(conversion.sheet.value_at(0, 1), Some("int x;"));
//! assert!(conversion.warnings.is_empty());
//! ```

mod attrs;
mod error;
mod options;
mod reader;
mod warning;

pub use error::{HtmlError, HtmlResult};
pub use options::HtmlReadOptions;
pub use reader::{Conversion, HtmlReader};
pub use warning::Warning;
