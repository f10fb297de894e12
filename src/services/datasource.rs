//! Datasource contract
//!
//! The only boundary between the block cache and the outside world: a
//! paginated fetch that receives a row range plus the current sort and
//! filter state, and resolves to the rows of that range or an error.

use std::ops::Range;
use std::sync::Arc;

use futures::future::BoxFuture;

use crate::domain::{ColumnFilters, SortModel};
use crate::error::Result;

/// Parameters of a single page request
#[derive(Clone, Debug, PartialEq)]
pub struct GetRowsParams {
    /// First row, inclusive
    pub start_row: usize,
    /// Last row, exclusive
    pub end_row: usize,
    pub sort_model: SortModel,
    pub column_filters: ColumnFilters,
}

impl GetRowsParams {
    pub fn range(&self) -> Range<usize> {
        self.start_row..self.end_row
    }
}

/// Successful page response
#[derive(Clone, Debug, PartialEq)]
pub struct RowsBlock<R> {
    /// At most `end_row - start_row` rows; fewer signals end of data
    pub rows: Vec<R>,
    /// Absolute index of the last row of the whole sorted and filtered
    /// collection. `-1` means the collection is empty, `None` means unknown.
    pub last_row_index: Option<i64>,
}

impl<R> RowsBlock<R> {
    pub fn new(rows: Vec<R>) -> Self {
        Self {
            rows,
            last_row_index: None,
        }
    }

    pub fn with_last_row(mut self, last_row_index: i64) -> Self {
        self.last_row_index = Some(last_row_index);
        self
    }

    /// Total row count implied by `last_row_index`
    pub fn total_rows(&self) -> Option<usize> {
        self.last_row_index
            .map(|last| usize::try_from(last.saturating_add(1)).unwrap_or(0))
    }
}

/// Paged row source consumed by the block cache
pub trait TableDatasource: Send + Sync + 'static {
    type Row: Clone + Send + Sync + 'static;

    /// Row count advertised before the first fetch, if the source knows it
    fn row_count(&self) -> Option<usize> {
        None
    }

    /// Fetch the rows of `params.range()`
    fn get_rows(&self, params: GetRowsParams) -> BoxFuture<'static, Result<RowsBlock<Self::Row>>>;
}

impl<D: TableDatasource> TableDatasource for Arc<D> {
    type Row = D::Row;

    fn row_count(&self) -> Option<usize> {
        (**self).row_count()
    }

    fn get_rows(&self, params: GetRowsParams) -> BoxFuture<'static, Result<RowsBlock<Self::Row>>> {
        (**self).get_rows(params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_rows_from_last_row_index() {
        assert_eq!(RowsBlock::<u8>::new(vec![]).total_rows(), None);
        assert_eq!(RowsBlock::<u8>::new(vec![]).with_last_row(249).total_rows(), Some(250));
        assert_eq!(RowsBlock::<u8>::new(vec![]).with_last_row(-1).total_rows(), Some(0));
    }
}
