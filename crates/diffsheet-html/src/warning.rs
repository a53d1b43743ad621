//! Non-fatal conversion problems

use std::fmt;

use diffsheet_core::CellAddress;

/// A problem found while converting a report that did not stop the conversion
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// The document has no `<table>`; the sheet is empty
    NoTable,
    /// Tables after the first one were ignored
    ExtraTables { count: usize },
    /// A table nested inside a cell was ignored
    NestedTable { cell: CellAddress },
    /// A background colour could not be parsed; the cell has no fill
    UnrecognizedColor { cell: CellAddress, value: String },
    /// A `colspan`/`rowspan` value was not a positive number; 1 was used
    InvalidSpan {
        cell: CellAddress,
        attribute: &'static str,
        value: String,
    },
    /// The markup could not be tokenized past this byte offset
    Markup { position: usize, message: String },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::NoTable => write!(f, "no <table> found"),
            Warning::ExtraTables { count } => write!(f, "ignored {} additional table(s)", count),
            Warning::NestedTable { cell } => write!(f, "ignored nested table in {}", cell),
            Warning::UnrecognizedColor { cell, value } => {
                write!(f, "unrecognized colour '{}' in {}", value, cell)
            }
            Warning::InvalidSpan {
                cell,
                attribute,
                value,
            } => write!(f, "invalid {} '{}' in {}", attribute, value, cell),
            Warning::Markup { position, message } => {
                write!(f, "markup error at byte {}: {}", position, message)
            }
        }
    }
}
