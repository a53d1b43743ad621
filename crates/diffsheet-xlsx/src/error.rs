//! Failures while producing an xlsx package

use thiserror::Error;

pub type XlsxResult<T> = std::result::Result<T, XlsxError>;

#[derive(Debug, Error)]
pub enum XlsxError {
    #[error("cannot write xlsx output: {0}")]
    Io(#[from] std::io::Error),

    #[error("cannot assemble xlsx archive: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// The workbook has no valid xlsx form (e.g. no sheets)
    #[error("workbook cannot be saved as xlsx: {0}")]
    InvalidFormat(String),
}
