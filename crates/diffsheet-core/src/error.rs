//! Grid document errors

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong while building a workbook in memory
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid cell address {0}")]
    InvalidAddress(String),

    #[error("invalid cell range {0}")]
    InvalidRange(String),

    /// Row index and the last valid row
    #[error("row {0} is past the last row {1}")]
    RowOutOfBounds(u32, u32),

    /// Column index and the last valid column
    #[error("column {0} is past the last column {1}")]
    ColumnOutOfBounds(u16, u16),

    /// Index and the number of sheets
    #[error("sheet index {0} is out of range for {1} sheet(s)")]
    SheetOutOfBounds(usize, usize),

    #[error("no sheet named '{0}'")]
    SheetNotFound(String),

    #[error("invalid sheet name: {0}")]
    InvalidSheetName(String),

    /// Titles are compared case-insensitively
    #[error("a sheet named '{0}' already exists")]
    DuplicateSheetName(String),

    /// A merge overlapping another merge or hiding data; never auto-resolved
    #[error("merged cell conflict at {range}: {reason}")]
    MergedCellConflict { range: String, reason: String },

    #[error("{0}")]
    Other(String),
}

impl Error {
    pub(crate) fn merge_conflict(range: impl ToString, reason: impl Into<String>) -> Self {
        Error::MergedCellConflict {
            range: range.to_string(),
            reason: reason.into(),
        }
    }
}
