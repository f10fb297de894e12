//! Prefetch Planner
//!
//! Turns a visible row range into the block numbers that must be loaded:
//! every block the range touches, widened by the overflow margin on each
//! side and clamped at 0, minus blocks already resident or in flight.

use std::ops::RangeInclusive;

use super::block::block_of;
use super::block_cache::BlockCache;
use super::in_flight::InFlightSet;

/// Inclusive range of visible row indices reported by the viewport
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct VisibleRange {
    pub start: usize,
    pub end: usize,
}

impl VisibleRange {
    /// Build a range, swapping the bounds if they arrive reversed
    pub fn new(start: usize, end: usize) -> Self {
        Self {
            start: start.min(end),
            end: start.max(end),
        }
    }
}

#[derive(Clone, Debug)]
pub struct PrefetchPlanner {
    block_size: usize,
    overflow: usize,
    last_range: Option<VisibleRange>,
}

impl PrefetchPlanner {
    pub fn new(block_size: usize, overflow: usize) -> Self {
        Self {
            block_size: block_size.max(1),
            overflow,
            last_range: None,
        }
    }

    /// Record a reported range. Returns `false` when it repeats the previous report.
    pub fn observe(&mut self, range: VisibleRange) -> bool {
        if self.last_range == Some(range) {
            return false;
        }
        self.last_range = Some(range);
        true
    }

    /// Forget the last reported range so the next report is planned again
    pub fn reset(&mut self) {
        self.last_range = None;
    }

    pub fn last_range(&self) -> Option<VisibleRange> {
        self.last_range
    }

    /// Blocks `range` needs, widened by the overflow margin
    pub fn wanted_blocks(&self, range: VisibleRange) -> RangeInclusive<usize> {
        let first = block_of(range.start, self.block_size).saturating_sub(self.overflow);
        let last = block_of(range.end, self.block_size).saturating_add(self.overflow);
        first..=last
    }

    /// Blocks to load for `range`, in ascending order
    pub fn plan<R>(
        &self,
        range: VisibleRange,
        cache: &BlockCache<R>,
        in_flight: &InFlightSet,
    ) -> Vec<usize> {
        self.wanted_blocks(range)
            .filter(|&n| !cache.contains(n) && !in_flight.contains(n))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::block::Block;

    #[test]
    fn test_overflow_clamped_at_zero() {
        let planner = PrefetchPlanner::new(100, 1);
        assert_eq!(planner.wanted_blocks(VisibleRange::new(0, 50)), 0..=1);
        assert_eq!(planner.wanted_blocks(VisibleRange::new(250, 420)), 1..=5);
    }

    #[test]
    fn test_plan_skips_resident_and_in_flight() {
        let planner = PrefetchPlanner::new(100, 1);
        let mut cache = BlockCache::new(10);
        cache.insert(Block::new(1, 100, vec![0u8; 100]));
        let mut in_flight = InFlightSet::new();
        in_flight.begin(3);

        let plan = planner.plan(VisibleRange::new(150, 250), &cache, &in_flight);
        assert_eq!(plan, vec![0, 2]);
    }

    #[test]
    fn test_plan_empty_once_everything_loaded() {
        let planner = PrefetchPlanner::new(10, 0);
        let mut cache = BlockCache::new(10);
        let in_flight = InFlightSet::new();
        let range = VisibleRange::new(5, 25);

        for n in planner.plan(range, &cache, &in_flight) {
            cache.insert(Block::new(n, 10, vec![0u8; 10]));
        }
        assert!(planner.plan(range, &cache, &in_flight).is_empty());
    }

    #[test]
    fn test_observe_deduplicates() {
        let mut planner = PrefetchPlanner::new(100, 0);
        assert!(planner.observe(VisibleRange::new(0, 10)));
        assert!(!planner.observe(VisibleRange::new(0, 10)));
        assert!(planner.observe(VisibleRange::new(0, 11)));

        planner.reset();
        assert!(planner.observe(VisibleRange::new(0, 11)));
    }

    #[test]
    fn test_reversed_bounds_are_normalized() {
        assert_eq!(VisibleRange::new(30, 10), VisibleRange::new(10, 30));
    }
}
