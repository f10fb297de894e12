//! Block - a cached page of rows
//!
//! Rows are grouped into fixed-size blocks. Block `n` covers rows
//! `[n * block_size, (n + 1) * block_size)`.

use std::ops::Range;
use std::sync::Arc;

/// Block number containing `row_index`
pub fn block_of(row_index: usize, block_size: usize) -> usize {
    row_index / block_size
}

/// Row range `[start, end)` covered by `block_number`, saturating at `usize::MAX`
pub fn block_range(block_number: usize, block_size: usize) -> Range<usize> {
    let start = block_number.saturating_mul(block_size);
    start..start.saturating_add(block_size)
}

/// A loaded block of rows
#[derive(Clone, Debug)]
pub struct Block<R> {
    pub block_number: usize,
    /// First absolute row index covered
    pub start_row: usize,
    /// Last absolute row index covered (inclusive)
    pub end_row: usize,
    /// Rows returned by the datasource; may be shorter than the block on the final page
    pub rows: Arc<[R]>,
    /// Load stamp, refreshed on every (re-)insert
    pub last_accessed: u64,
}

impl<R> Block<R> {
    /// Build a block for `block_number` holding `rows`
    pub fn new(block_number: usize, block_size: usize, rows: Vec<R>) -> Self {
        let range = block_range(block_number, block_size);
        Self {
            block_number,
            start_row: range.start,
            end_row: range.end.saturating_sub(1).max(range.start),
            rows: rows.into(),
            last_accessed: 0,
        }
    }

    /// Row at an absolute index, if this block holds it
    pub fn row(&self, row_index: usize) -> Option<&R> {
        row_index
            .checked_sub(self.start_row)
            .and_then(|offset| self.rows.get(offset))
    }

    /// Number of rows actually returned
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_of() {
        assert_eq!(block_of(0, 100), 0);
        assert_eq!(block_of(99, 100), 0);
        assert_eq!(block_of(100, 100), 1);
        assert_eq!(block_of(250, 100), 2);
    }

    #[test]
    fn test_block_range() {
        assert_eq!(block_range(0, 100), 0..100);
        assert_eq!(block_range(3, 25), 75..100);
    }

    #[test]
    fn test_block_range_saturates() {
        let last = block_of(usize::MAX, 100);
        let range = block_range(last, 100);
        assert_eq!(range.end, usize::MAX);
        assert!(range.start <= range.end);
        assert_eq!(block_range(usize::MAX, 100), usize::MAX..usize::MAX);

        let block = Block::new(usize::MAX, 100, Vec::<u8>::new());
        assert_eq!(block.end_row, usize::MAX);
    }

    #[test]
    fn test_short_final_block() {
        let block = Block::new(2, 100, vec!["a", "b"]);
        assert_eq!(block.start_row, 200);
        assert_eq!(block.end_row, 299);
        assert_eq!(block.len(), 2);
        assert_eq!(block.row(201), Some(&"b"));
        assert_eq!(block.row(202), None);
        assert_eq!(block.row(10), None);
    }
}
