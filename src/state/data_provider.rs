//! PagedDataProvider Trait
//!
//! Abstraction a virtualized table renders from when rows arrive lazily.

use std::ops::Range;

use crate::services::TableDatasource;

use super::block::block_of;
use super::data_source_state::InfiniteDataSource;

/// Paged data provider for lazy loading
pub trait PagedDataProvider {
    type Row: Clone;

    /// Get the total number of rows (may be estimated)
    fn len(&self) -> usize;

    /// Check if empty
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get a cached row by index (returns None if not yet loaded)
    fn cached_row(&self, index: usize) -> Option<Self::Row>;

    /// Request a range of rows to be loaded
    fn request_range(&mut self, range: Range<usize>);

    /// Check if a range is loaded
    fn is_range_loaded(&self, range: Range<usize>) -> bool;
}

impl<D: TableDatasource> PagedDataProvider for InfiniteDataSource<D> {
    type Row = D::Row;

    fn len(&self) -> usize {
        InfiniteDataSource::len(self)
    }

    fn cached_row(&self, index: usize) -> Option<Self::Row> {
        self.row(index).cloned()
    }

    fn request_range(&mut self, range: Range<usize>) {
        if range.is_empty() {
            return;
        }
        self.report_visible_range(range.start, range.end - 1);
    }

    fn is_range_loaded(&self, range: Range<usize>) -> bool {
        let end = range.end.min(PagedDataProvider::len(self));
        if range.start >= end {
            return true;
        }
        let block_size = self.block_size();
        (block_of(range.start, block_size)..=block_of(end - 1, block_size))
            .all(|n| self.is_block_resident(n))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{sample_people, GridConfig};
    use crate::services::{build_runtime, MockDatasource};
    use std::time::Duration;

    #[test]
    fn test_provider_over_session() {
        let runtime = build_runtime().expect("runtime");
        let source = MockDatasource::new(sample_people(450));
        let config = GridConfig::default().with_overflow(0);
        let mut provider =
            InfiniteDataSource::new(source, config, runtime.handle().clone()).expect("session");
        assert!(provider.settle(Duration::from_secs(2)));

        assert_eq!(PagedDataProvider::len(&provider), 450);
        assert!(provider.is_range_loaded(0..100));
        assert!(!provider.is_range_loaded(50..150));

        provider.request_range(120..180);
        assert!(provider.settle(Duration::from_secs(2)));
        assert!(provider.is_range_loaded(50..150));
        assert_eq!(provider.cached_row(120).map(|p| p.id), Some(121));
        assert!(provider.is_range_loaded(460..470));
    }
}
