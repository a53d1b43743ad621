//! A1-style cell addresses and rectangular ranges

use crate::error::{Error, Result};
use crate::{MAX_COLS, MAX_ROWS};
use std::fmt;
use std::str::FromStr;

/// Position of one cell, 0-based; shown as `B3` etc.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellAddress {
    pub row: u32,
    /// 0 = column A
    pub col: u16,
}

impl CellAddress {
    pub fn new(row: u32, col: u16) -> Self {
        Self { row, col }
    }

    /// Parse `B3`, `$B$3` or `b3`
    ///
    /// ```
    /// use diffsheet_core::CellAddress;
    ///
    /// assert_eq!(CellAddress::parse("$E$12").unwrap(), CellAddress::new(11, 4));
    /// assert!(CellAddress::parse("E0").is_err());
    /// ```
    pub fn parse(text: &str) -> Result<Self> {
        let invalid = |why: &str| Error::InvalidAddress(format!("'{}': {}", text, why));

        let compact: String = text.trim().chars().filter(|&c| c != '$').collect();
        let digits_at = compact
            .char_indices()
            .find(|(_, c)| !c.is_ascii_alphabetic())
            .map_or(compact.len(), |(i, _)| i);
        let (letters, digits) = compact.split_at(digits_at);

        if letters.is_empty() {
            return Err(invalid("missing column letters"));
        }
        let col = column_index(letters)?;

        let row: u32 = match digits.parse() {
            Ok(0) => return Err(invalid("rows start at 1")),
            Ok(n) => n - 1,
            Err(_) => return Err(invalid("missing or malformed row number")),
        };
        if row >= MAX_ROWS {
            return Err(Error::RowOutOfBounds(row, MAX_ROWS - 1));
        }

        Ok(Self { row, col })
    }

    pub fn to_a1_string(&self) -> String {
        self.to_string()
    }
}

/// `A` = 0 ... `XFD` = 16383, case-insensitive
fn column_index(letters: &str) -> Result<u16> {
    let mut number: u32 = 0;
    for c in letters.chars() {
        if !c.is_ascii_alphabetic() {
            return Err(Error::InvalidAddress(format!("bad column letter '{}'", c)));
        }
        number = number * 26 + u32::from(c.to_ascii_uppercase() as u8 - b'A') + 1;
        if number > u32::from(MAX_COLS) {
            return Err(Error::ColumnOutOfBounds(u16::MAX, MAX_COLS - 1));
        }
    }
    Ok((number - 1) as u16)
}

fn write_column_name(f: &mut fmt::Formatter<'_>, col: u16) -> fmt::Result {
    // Bijective base 26; at most three letters within MAX_COLS
    let mut letters = [0u8; 3];
    let mut start = letters.len();
    let mut n = u32::from(col) + 1;
    while n > 0 && start > 0 {
        n -= 1;
        start -= 1;
        letters[start] = b'A' + (n % 26) as u8;
        n /= 26;
    }
    for &letter in &letters[start..] {
        write!(f, "{}", letter as char)?;
    }
    Ok(())
}

impl fmt::Display for CellAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_column_name(f, self.col)?;
        write!(f, "{}", u64::from(self.row) + 1)
    }
}

impl FromStr for CellAddress {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Inclusive block of cells, always stored top-left to bottom-right
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellRange {
    pub start: CellAddress,
    pub end: CellAddress,
}

impl CellRange {
    /// Range spanning two corners given in any order
    pub fn from_indices(row_a: u32, col_a: u16, row_b: u32, col_b: u16) -> Self {
        Self {
            start: CellAddress::new(row_a.min(row_b), col_a.min(col_b)),
            end: CellAddress::new(row_a.max(row_b), col_a.max(col_b)),
        }
    }

    /// Parse `A1:C3` (corners in any order) or a single `B2`
    pub fn parse(text: &str) -> Result<Self> {
        let text = text.trim();
        let (first, second) = text.split_once(':').unwrap_or((text, text));
        let corner = |part: &str| {
            CellAddress::parse(part).map_err(|e| Error::InvalidRange(format!("'{}': {}", text, e)))
        };
        let (a, b) = (corner(first)?, corner(second)?);
        Ok(Self::from_indices(a.row, a.col, b.row, b.col))
    }

    /// Top-left cell; the only cell of a merge that holds a value
    pub fn anchor(&self) -> CellAddress {
        self.start
    }

    pub fn contains(&self, row: u32, col: u16) -> bool {
        (self.start.row..=self.end.row).contains(&row) && (self.start.col..=self.end.col).contains(&col)
    }

    pub fn row_count(&self) -> u32 {
        self.end.row - self.start.row + 1
    }

    pub fn overlaps(&self, other: &CellRange) -> bool {
        let rows_meet = self.start.row <= other.end.row && other.start.row <= self.end.row;
        let cols_meet = self.start.col <= other.end.col && other.start.col <= self.end.col;
        rows_meet && cols_meet
    }

    /// Every address in the range, row by row
    pub fn cells(&self) -> impl Iterator<Item = CellAddress> {
        let CellRange { start, end } = *self;
        (start.row..=end.row)
            .flat_map(move |row| (start.col..=end.col).map(move |col| CellAddress::new(row, col)))
    }
}

impl fmt::Display for CellRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start == self.end {
            write!(f, "{}", self.start)
        } else {
            write!(f, "{}:{}", self.start, self.end)
        }
    }
}

impl FromStr for CellRange {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_names() {
        for (col, name) in [(0, "A"), (4, "E"), (25, "Z"), (26, "AA"), (701, "ZZ"), (16383, "XFD")] {
            assert_eq!(CellAddress::new(0, col).to_string(), format!("{}1", name));
            assert_eq!(column_index(name).unwrap(), col);
        }
        assert_eq!(column_index("xfd").unwrap(), 16383);
        assert!(column_index("XFE").is_err());
    }

    #[test]
    fn test_cell_address_parse() {
        assert_eq!(CellAddress::parse("A1").unwrap(), CellAddress::new(0, 0));
        assert_eq!("d7".parse::<CellAddress>().unwrap(), CellAddress::new(6, 3));

        for bad in ["", "A", "1", "A0", "A1048577", "A1B"] {
            assert!(CellAddress::parse(bad).is_err(), "{}", bad);
        }
    }

    #[test]
    fn test_cell_range_parse_and_display() {
        let range = CellRange::parse("C3:A1").unwrap();
        assert_eq!(range.start, CellAddress::new(0, 0));
        assert_eq!(range.end, CellAddress::new(2, 2));
        assert_eq!(range.to_string(), "A1:C3");
        assert_eq!(CellRange::parse("B2").unwrap().to_string(), "B2");
        assert!(matches!(CellRange::parse("B2:"), Err(Error::InvalidRange(_))));
    }

    #[test]
    fn test_cell_range_overlap_and_contains() {
        let a = CellRange::parse("B2:D4").unwrap();
        assert!(a.contains(1, 1));
        assert!(a.contains(3, 3));
        assert!(!a.contains(4, 1));
        assert_eq!(a.row_count(), 3);

        assert!(a.overlaps(&CellRange::parse("D4:E5").unwrap()));
        assert!(!a.overlaps(&CellRange::parse("E1:E9").unwrap()));
    }

    #[test]
    fn test_cell_range_cells() {
        let cells: Vec<_> = CellRange::parse("A1:B2").unwrap().cells().collect();
        assert_eq!(
            cells,
            vec![
                CellAddress::new(0, 0),
                CellAddress::new(0, 1),
                CellAddress::new(1, 0),
                CellAddress::new(1, 1),
            ]
        );
    }
}
