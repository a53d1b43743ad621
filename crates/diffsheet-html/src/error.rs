//! HTML conversion error types

use thiserror::Error;

/// Result type for HTML conversion
pub type HtmlResult<T> = std::result::Result<T, HtmlError>;

/// Errors that abort the conversion of one report
#[derive(Debug, Error)]
pub enum HtmlError {
    #[error("cannot read report: {0}")]
    Io(#[from] std::io::Error),

    /// Structural violation in the grid, such as overlapping merged cells
    #[error(transparent)]
    Core(#[from] diffsheet_core::Error),
}
