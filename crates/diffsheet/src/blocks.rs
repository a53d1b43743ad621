//! Context padding and merging of changed rows

use std::fmt;

/// An inclusive run of rows copied into the compare sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Block {
    pub start: u32,
    pub end: u32,
}

impl Block {
    pub fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// Number of rows in the block
    pub fn row_count(&self) -> u32 {
        self.end - self.start + 1
    }

    pub fn contains(&self, row: u32) -> bool {
        (self.start..=self.end).contains(&row)
    }

    pub fn rows(&self) -> std::ops::RangeInclusive<u32> {
        self.start..=self.end
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // 1-based, as shown in the spreadsheet
        write!(f, "{}-{}", self.start + 1, self.end + 1)
    }
}

/// Pad every row by `context` rows on both sides and merge what touches
///
/// Padding never reaches above `first_content_row`. Blocks that overlap or
/// are directly adjacent are merged, so consecutive results are separated
/// by at least one row that belongs to neither.
///
/// ```
/// use diffsheet::blocks::{merge_blocks, Block};
///
/// assert_eq!(merge_blocks(&[10], 4, 2), vec![Block::new(6, 14)]);
/// assert_eq!(merge_blocks(&[10, 11, 20], 4, 1), vec![Block::new(6, 24)]);
/// assert!(merge_blocks(&[], 4, 1).is_empty());
/// ```
pub fn merge_blocks(rows: &[u32], context: u32, first_content_row: u32) -> Vec<Block> {
    let mut candidates: Vec<Block> = rows
        .iter()
        .map(|&row| {
            Block::new(
                row.saturating_sub(context).max(first_content_row),
                row.saturating_add(context),
            )
        })
        .filter(|block| block.start <= block.end)
        .collect();
    candidates.sort_unstable();

    let mut merged: Vec<Block> = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        match merged.last_mut() {
            Some(current) if candidate.start <= current.end.saturating_add(1) => {
                current.end = current.end.max(candidate.end);
            }
            _ => merged.push(candidate),
        }
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_single_row() {
        assert_eq!(merge_blocks(&[10], 4, 2), vec![Block::new(6, 14)]);
    }

    #[test]
    fn test_overlapping_context_merges() {
        assert_eq!(merge_blocks(&[10, 11, 20], 4, 1), vec![Block::new(6, 24)]);
    }

    #[test]
    fn test_adjacent_blocks_merge() {
        // 6..=14 and 15..=23 touch
        assert_eq!(merge_blocks(&[10, 19], 4, 1), vec![Block::new(6, 23)]);
        // 6..=14 and 16..=24 leave row 15 between them
        assert_eq!(
            merge_blocks(&[10, 20], 4, 1),
            vec![Block::new(6, 14), Block::new(16, 24)]
        );
    }

    #[test]
    fn test_clamped_to_first_content_row() {
        assert_eq!(merge_blocks(&[1, 2], 4, 1), vec![Block::new(1, 6)]);
        assert_eq!(merge_blocks(&[3], 0, 1), vec![Block::new(3, 3)]);
        // Rows wholly above the content are dropped
        assert!(merge_blocks(&[0], 0, 1).is_empty());
    }

    #[test]
    fn test_unsorted_input_and_saturation() {
        assert_eq!(
            merge_blocks(&[u32::MAX, 30, 5], 4, 1),
            vec![
                Block::new(1, 9),
                Block::new(26, 34),
                Block::new(u32::MAX - 4, u32::MAX)
            ]
        );
    }

    #[test]
    fn test_block_helpers() {
        let block = Block::new(6, 14);
        assert_eq!(block.row_count(), 9);
        assert!(block.contains(6) && block.contains(14));
        assert!(!block.contains(15));
        assert_eq!(block.to_string(), "7-15");
        assert_eq!(block.rows().count(), 9);
    }
}
