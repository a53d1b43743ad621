//! Cell contents

use std::fmt;

/// Report cells only ever hold text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum CellValue {
    #[default]
    Empty,
    String(String),
}

impl CellValue {
    /// True for `Empty` and for `String("")`
    pub fn is_empty(&self) -> bool {
        self.as_str().map_or(true, str::is_empty)
    }

    pub fn as_str(&self) -> Option<&str> {
        if let CellValue::String(text) = self {
            Some(text)
        } else {
            None
        }
    }

    /// Characters, not bytes
    pub fn char_len(&self) -> usize {
        self.as_str().map_or(0, |text| text.chars().count())
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str().unwrap_or(""))
    }
}

impl From<&str> for CellValue {
    fn from(text: &str) -> Self {
        text.to_owned().into()
    }
}

impl From<String> for CellValue {
    fn from(text: String) -> Self {
        CellValue::String(text)
    }
}

impl From<Option<String>> for CellValue {
    fn from(text: Option<String>) -> Self {
        text.map_or(CellValue::Empty, CellValue::String)
    }
}
