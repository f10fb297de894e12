//! Grid Datasource Library
//!
//! A bounded, block-cached window over a remotely paged row collection. A
//! virtualized grid reports which rows are visible; the cache decides which
//! fixed-size blocks to fetch, keeps at most a configured number of them
//! resident, and exposes a sparse row sequence with absent rows for
//! anything not loaded yet. Sort and filter changes invalidate the cache.

pub mod constants;
pub mod domain;
pub mod error;
pub mod helpers;
pub mod services;
pub mod state;
pub mod utils;

pub use domain::{
    ColumnFilters, FilterCondition, FilterOperator, FilterValue, GridConfig, SortKey, SortModel,
};
pub use error::{Error, Result};
pub use services::{GetRowsParams, MockDatasource, RowsBlock, TableDatasource};
pub use state::{InfiniteDataSource, PagedDataProvider, ViewRows};
