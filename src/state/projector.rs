//! View Projector
//!
//! Builds the sparse row sequence exposed to the grid from whatever blocks
//! are resident. The projection is recomputed from scratch on every call and
//! does not depend on the order in which blocks completed.

use super::block_cache::BlockCache;

/// Sparse row sequence; `None` marks rows that are not loaded yet
#[derive(Clone, Debug, PartialEq)]
pub struct ViewRows<R> {
    rows: Vec<Option<R>>,
}

impl<R> ViewRows<R> {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Row at `index`; `None` if absent or out of range
    pub fn get(&self, index: usize) -> Option<&R> {
        self.rows.get(index).and_then(Option::as_ref)
    }

    /// Whether the row at `index` is loaded
    pub fn is_loaded(&self, index: usize) -> bool {
        self.get(index).is_some()
    }

    /// Number of loaded positions
    pub fn loaded_count(&self) -> usize {
        self.rows.iter().filter(|r| r.is_some()).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = Option<&R>> {
        self.rows.iter().map(Option::as_ref)
    }

    pub fn into_inner(self) -> Vec<Option<R>> {
        self.rows
    }
}

/// Length of the exposed sequence: the known total, or the highest resident
/// `end_row + 1`, or 0 with nothing resident
pub fn view_len<R>(cache: &BlockCache<R>, total_rows: Option<usize>) -> usize {
    total_rows.unwrap_or_else(|| {
        cache
            .iter()
            .map(|block| block.end_row.saturating_add(1))
            .max()
            .unwrap_or(0)
    })
}

/// Project resident blocks onto a sequence of `view_len` positions
pub fn project<R: Clone>(cache: &BlockCache<R>, total_rows: Option<usize>) -> ViewRows<R> {
    let len = view_len(cache, total_rows);
    let mut rows: Vec<Option<R>> = vec![None; len];

    for block in cache.iter() {
        for (offset, row) in block.rows.iter().enumerate() {
            // Blocks loaded before a row-count shrink may reach past the end.
            if let Some(slot) = rows.get_mut(block.start_row.saturating_add(offset)) {
                *slot = Some(row.clone());
            }
        }
    }

    ViewRows { rows }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::block::Block;

    #[test]
    fn test_empty_cache_unknown_total() {
        let cache: BlockCache<u32> = BlockCache::new(4);
        assert!(project(&cache, None).is_empty());
    }

    #[test]
    fn test_known_total_with_sparse_rows() {
        let mut cache = BlockCache::new(4);
        cache.insert(Block::new(0, 100, (0..100u32).collect()));

        let view = project(&cache, Some(250));
        assert_eq!(view.len(), 250);
        assert_eq!(view.get(99), Some(&99));
        assert!(!view.is_loaded(100));
        assert!(!view.is_loaded(249));
        assert_eq!(view.loaded_count(), 100);
    }

    #[test]
    fn test_unknown_total_uses_highest_end_row() {
        let mut cache = BlockCache::new(4);
        cache.insert(Block::new(2, 10, vec![7u32; 10]));
        cache.insert(Block::new(0, 10, vec![1u32; 10]));

        let view = project(&cache, None);
        assert_eq!(view.len(), 30);
        assert!(view.is_loaded(0));
        assert!(!view.is_loaded(15));
        assert_eq!(view.get(29), Some(&7));
    }

    #[test]
    fn test_rows_past_shrunk_total_are_dropped() {
        let mut cache = BlockCache::new(4);
        cache.insert(Block::new(1, 10, (10..20u32).collect()));

        let view = project(&cache, Some(15));
        assert_eq!(view.len(), 15);
        assert_eq!(view.get(14), Some(&14));
        assert_eq!(view.get(15), None);
    }
}
