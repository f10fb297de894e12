//! In-flight load tracker
//!
//! Block numbers whose fetch has been issued but not resolved yet. A block
//! in this set is never handed to the datasource a second time.

use ahash::AHashSet;

#[derive(Clone, Debug, Default)]
pub struct InFlightSet {
    blocks: AHashSet<usize>,
}

impl InFlightSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a block as loading. Returns `false` if it already was.
    pub fn begin(&mut self, block_number: usize) -> bool {
        self.blocks.insert(block_number)
    }

    /// Clear the marker for a resolved fetch, success or failure
    pub fn finish(&mut self, block_number: usize) -> bool {
        self.blocks.remove(&block_number)
    }

    pub fn contains(&self, block_number: usize) -> bool {
        self.blocks.contains(&block_number)
    }

    pub fn clear(&mut self) {
        self.blocks.clear();
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Loading block numbers in ascending order
    pub fn sorted(&self) -> Vec<usize> {
        let mut blocks: Vec<usize> = self.blocks.iter().copied().collect();
        blocks.sort_unstable();
        blocks
    }
}
