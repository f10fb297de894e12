//! Block Cache
//!
//! Resident blocks keyed by block number, bounded by a maximum block count.
//! Eviction removes the blocks with the oldest load stamp first. Reads never
//! refresh the stamp; only a (re-)insert does, so the policy is
//! oldest-loaded-first rather than LRU by access.

use hashlink::LinkedHashMap;

use super::block::Block;

/// Recency-bounded block cache
#[derive(Debug)]
pub struct BlockCache<R> {
    /// Blocks in ascending `last_accessed` order (front = oldest)
    blocks: LinkedHashMap<usize, Block<R>>,
    max_blocks: usize,
    /// Monotonic stamp source
    clock: u64,
}

impl<R> BlockCache<R> {
    /// Create an empty cache holding at most `max_blocks` blocks (minimum 1)
    pub fn new(max_blocks: usize) -> Self {
        Self {
            blocks: LinkedHashMap::new(),
            max_blocks: max_blocks.max(1),
            clock: 0,
        }
    }

    /// Insert or replace a block, stamp it, then evict the excess.
    ///
    /// Returns the block numbers evicted by this insert.
    pub fn insert(&mut self, mut block: Block<R>) -> Vec<usize> {
        self.clock += 1;
        block.last_accessed = self.clock;

        // Re-inserting must move the entry to the back of the recency order.
        self.blocks.remove(&block.block_number);
        self.blocks.insert(block.block_number, block);

        self.evict()
    }

    /// Drop the oldest blocks until the cache is within bounds
    fn evict(&mut self) -> Vec<usize> {
        let excess = self.blocks.len().saturating_sub(self.max_blocks);
        let mut evicted = Vec::with_capacity(excess);
        for _ in 0..excess {
            if let Some((block_number, _)) = self.blocks.pop_front() {
                evicted.push(block_number);
            }
        }
        if !evicted.is_empty() {
            tracing::debug!(?evicted, resident = self.blocks.len(), "evicted blocks");
        }
        evicted
    }

    pub fn get(&self, block_number: usize) -> Option<&Block<R>> {
        self.blocks.get(&block_number)
    }

    pub fn contains(&self, block_number: usize) -> bool {
        self.blocks.contains_key(&block_number)
    }

    /// Remove every block
    pub fn clear(&mut self) {
        self.blocks.clear();
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn max_blocks(&self) -> usize {
        self.max_blocks
    }

    /// Resident blocks, oldest first
    pub fn iter(&self) -> impl Iterator<Item = &Block<R>> {
        self.blocks.values()
    }

    /// Resident block numbers, oldest first
    pub fn block_numbers(&self) -> Vec<usize> {
        self.blocks.keys().copied().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(n: usize) -> Block<usize> {
        Block::new(n, 10, (n * 10..n * 10 + 10).collect())
    }

    #[test]
    fn test_within_capacity_is_noop() {
        let mut cache = BlockCache::new(3);
        assert!(cache.insert(block(0)).is_empty());
        assert!(cache.insert(block(1)).is_empty());
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_evicts_oldest_loaded() {
        let mut cache = BlockCache::new(2);
        cache.insert(block(0));
        cache.insert(block(2));
        let evicted = cache.insert(block(5));

        assert_eq!(evicted, vec![0]);
        assert_eq!(cache.block_numbers(), vec![2, 5]);
    }

    #[test]
    fn test_reinsert_refreshes_stamp() {
        let mut cache = BlockCache::new(2);
        cache.insert(block(0));
        cache.insert(block(1));
        cache.insert(block(0));
        let evicted = cache.insert(block(2));

        assert_eq!(evicted, vec![1]);
        assert!(cache.contains(0));
        assert!(cache.contains(2));
    }

    #[test]
    fn test_reads_do_not_refresh_stamp() {
        let mut cache = BlockCache::new(2);
        cache.insert(block(0));
        cache.insert(block(1));
        assert!(cache.get(0).is_some());
        let evicted = cache.insert(block(2));

        assert_eq!(evicted, vec![0]);
    }

    #[test]
    fn test_stamps_are_monotonic() {
        let mut cache = BlockCache::new(4);
        cache.insert(block(3));
        cache.insert(block(1));
        cache.insert(block(2));

        let stamps: Vec<u64> = cache.iter().map(|b| b.last_accessed).collect();
        assert!(stamps.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_capacity_one_keeps_newest() {
        let mut cache = BlockCache::new(1);
        cache.insert(block(0));
        cache.insert(block(1));
        assert_eq!(cache.block_numbers(), vec![1]);
    }

    #[test]
    fn test_zero_capacity_is_clamped() {
        let mut cache = BlockCache::new(0);
        cache.insert(block(0));
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.max_blocks(), 1);
    }

    #[test]
    fn test_clear() {
        let mut cache = BlockCache::new(4);
        cache.insert(block(0));
        cache.insert(block(1));
        cache.clear();
        assert!(cache.is_empty());
    }
}
