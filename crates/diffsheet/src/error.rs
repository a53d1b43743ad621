//! Report error and warning types

use std::fmt;

use thiserror::Error;

/// Result type for report operations
pub type ReportResult<T> = std::result::Result<T, ReportError>;

/// Errors that stop a report, or the processing of one file in it
#[derive(Debug, Error)]
pub enum ReportError {
    /// Grid model error, including merge conflicts
    #[error(transparent)]
    Core(#[from] diffsheet_core::Error),

    /// HTML conversion error
    #[error(transparent)]
    Html(#[from] diffsheet_html::HtmlError),

    /// XLSX writing error
    #[error(transparent)]
    Xlsx(#[from] diffsheet_xlsx::XlsxError),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid configuration
    #[error("invalid configuration: {0}")]
    Config(String),
}

/// A problem recorded on a file that did not stop the batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportWarning {
    /// Raised while converting the HTML report
    Html(diffsheet_html::Warning),
    /// No row carries a coloured line-number cell; the whole sheet was scanned
    NoColoredRows { max_row: u32 },
}

impl fmt::Display for ReportWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportWarning::Html(warning) => warning.fmt(f),
            ReportWarning::NoColoredRows { max_row } => write!(
                f,
                "no coloured rows found, scanning up to row {}",
                max_row + 1
            ),
        }
    }
}

impl From<diffsheet_html::Warning> for ReportWarning {
    fn from(warning: diffsheet_html::Warning) -> Self {
        ReportWarning::Html(warning)
    }
}
