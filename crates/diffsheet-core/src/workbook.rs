//! Ordered, uniquely titled collection of worksheets

use crate::error::{Error, Result};
use crate::worksheet::Worksheet;
use crate::MAX_SHEET_NAME_LEN;

const FORBIDDEN_TITLE_CHARS: [char; 7] = [':', '\\', '/', '?', '*', '[', ']'];

/// Characters kept ahead of a `_N` collision suffix
const COLLISION_STEM_LEN: usize = 28;

/// Sheet titles are unique ignoring case, as Excel requires.
#[derive(Debug, Clone, Default)]
pub struct Workbook {
    worksheets: Vec<Worksheet>,
}

impl Workbook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sheet_count(&self) -> usize {
        self.worksheets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.worksheets.is_empty()
    }

    pub fn worksheet(&self, index: usize) -> Option<&Worksheet> {
        self.worksheets.get(index)
    }

    pub fn worksheet_mut(&mut self, index: usize) -> Option<&mut Worksheet> {
        self.worksheets.get_mut(index)
    }

    /// Exact (case-sensitive) title lookup
    pub fn worksheet_by_name(&self, name: &str) -> Option<&Worksheet> {
        self.worksheets.iter().find(|sheet| sheet.name() == name)
    }

    pub fn require_worksheet_mut(&mut self, name: &str) -> Result<&mut Worksheet> {
        self.worksheets
            .iter_mut()
            .find(|sheet| sheet.name() == name)
            .ok_or_else(|| Error::SheetNotFound(name.to_string()))
    }

    pub fn worksheets(&self) -> impl Iterator<Item = &Worksheet> {
        self.worksheets.iter()
    }

    pub fn worksheets_mut(&mut self) -> impl Iterator<Item = &mut Worksheet> {
        self.worksheets.iter_mut()
    }

    pub fn sheet_names(&self) -> Vec<&str> {
        self.worksheets.iter().map(Worksheet::name).collect()
    }

    /// Append an empty sheet, returning its index
    pub fn add_worksheet_with_name(&mut self, name: &str) -> Result<usize> {
        self.add_existing_worksheet(Worksheet::new(name))
    }

    pub fn add_existing_worksheet(&mut self, worksheet: Worksheet) -> Result<usize> {
        self.insert_existing_worksheet(self.worksheets.len(), worksheet)?;
        Ok(self.worksheets.len() - 1)
    }

    /// Put a new empty sheet at `index`, shifting later sheets right
    pub fn insert_worksheet(&mut self, index: usize, name: &str) -> Result<()> {
        self.insert_existing_worksheet(index, Worksheet::new(name))
    }

    pub fn insert_existing_worksheet(&mut self, index: usize, worksheet: Worksheet) -> Result<()> {
        if index > self.worksheets.len() {
            return Err(Error::SheetOutOfBounds(index, self.worksheets.len()));
        }
        self.check_title(worksheet.name())?;
        self.worksheets.insert(index, worksheet);
        Ok(())
    }

    /// A title derived from `preferred` that [`add_worksheet_with_name`](Self::add_worksheet_with_name)
    /// will accept.
    ///
    /// Forbidden characters become `_` and the result is cut to 31
    /// characters. A title already in use gets `_1`, `_2`, ... after its
    /// first 28 characters, fewer once the suffix itself grows.
    ///
    /// ```
    /// use diffsheet_core::Workbook;
    ///
    /// let mut wb = Workbook::new();
    /// let long = "a".repeat(33);
    /// let first = wb.unique_sheet_name(&long);
    /// assert_eq!(first, "a".repeat(31));
    /// wb.add_worksheet_with_name(&first).unwrap();
    /// assert_eq!(wb.unique_sheet_name(&long), format!("{}_1", "a".repeat(28)));
    /// ```
    pub fn unique_sheet_name(&self, preferred: &str) -> String {
        let stem = match sanitize_sheet_name(preferred) {
            s if s.is_empty() => "Sheet".to_string(),
            s => s,
        };

        let whole = prefix(&stem, MAX_SHEET_NAME_LEN);
        if !self.contains_name(&whole) {
            return whole;
        }

        (1usize..)
            .map(|n| {
                let suffix = format!("_{}", n);
                let keep = COLLISION_STEM_LEN.min(MAX_SHEET_NAME_LEN - suffix.len());
                prefix(&stem, keep) + &suffix
            })
            .find(|candidate| !self.contains_name(candidate))
            .unwrap_or(whole)
    }

    /// Whether `name` is taken, ignoring case
    pub fn contains_name(&self, name: &str) -> bool {
        let wanted = name.to_lowercase();
        self.worksheets
            .iter()
            .any(|sheet| sheet.name().to_lowercase() == wanted)
    }

    fn check_title(&self, name: &str) -> Result<()> {
        let reason = if name.is_empty() {
            "title is empty".to_string()
        } else if name.chars().count() > MAX_SHEET_NAME_LEN {
            format!("'{}' is longer than {} characters", name, MAX_SHEET_NAME_LEN)
        } else if let Some(c) = name.chars().find(|c| FORBIDDEN_TITLE_CHARS.contains(c)) {
            format!("'{}' contains '{}'", name, c)
        } else if self.contains_name(name) {
            return Err(Error::DuplicateSheetName(name.to_string()));
        } else {
            return Ok(());
        };
        Err(Error::InvalidSheetName(reason))
    }
}

/// `_` in place of every character Excel rejects in a sheet title
pub fn sanitize_sheet_name(name: &str) -> String {
    name.chars()
        .map(|c| if FORBIDDEN_TITLE_CHARS.contains(&c) { '_' } else { c })
        .collect()
}

fn prefix(s: &str, chars: usize) -> String {
    s.chars().take(chars).collect()
}
