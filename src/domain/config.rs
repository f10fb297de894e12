//! Config - Grid and application configuration

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_CACHE_BLOCK_SIZE, DEFAULT_CACHE_OVERFLOW_SIZE, DEFAULT_MAX_BLOCKS_IN_CACHE,
    DEMO_FETCH_LATENCY_MS, DEMO_ROW_COUNT,
};
use crate::error::{Error, Result};

use super::filter::ColumnFilters;
use super::sort::SortModel;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Cache configuration
    pub grid: GridConfig,
    /// Demo dataset options
    pub demo: DemoConfig,
}

/// Consumer-facing cache configuration, fixed for the lifetime of a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GridConfig {
    /// Rows per block
    pub cache_block_size: usize,
    /// Maximum number of resident blocks
    pub max_blocks_in_cache: usize,
    /// Blocks of margin loaded beyond the visible range
    pub cache_overflow_size: usize,
    /// Initial sort state
    pub default_sort: SortModel,
    /// Initial filter state
    pub default_filters: ColumnFilters,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            cache_block_size: DEFAULT_CACHE_BLOCK_SIZE,
            max_blocks_in_cache: DEFAULT_MAX_BLOCKS_IN_CACHE,
            cache_overflow_size: DEFAULT_CACHE_OVERFLOW_SIZE,
            default_sort: SortModel::default(),
            default_filters: ColumnFilters::default(),
        }
    }
}

impl GridConfig {
    pub fn with_block_size(mut self, size: usize) -> Self {
        self.cache_block_size = size;
        self
    }

    pub fn with_max_blocks(mut self, max: usize) -> Self {
        self.max_blocks_in_cache = max;
        self
    }

    pub fn with_overflow(mut self, overflow: usize) -> Self {
        self.cache_overflow_size = overflow;
        self
    }

    pub fn with_default_sort(mut self, sort: SortModel) -> Self {
        self.default_sort = sort;
        self
    }

    pub fn with_default_filters(mut self, filters: ColumnFilters) -> Self {
        self.default_filters = filters;
        self
    }

    /// Reject sizes the cache cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.cache_block_size == 0 {
            return Err(Error::invalid_config("cacheBlockSize must be positive"));
        }
        if self.max_blocks_in_cache == 0 {
            return Err(Error::invalid_config("maxBlocksInCache must be at least 1"));
        }
        Ok(())
    }
}

/// Demo dataset options
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DemoConfig {
    /// Number of rows in the generated dataset
    pub row_count: usize,
    /// Simulated fetch latency in milliseconds
    pub latency_ms: u64,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            row_count: DEMO_ROW_COUNT,
            latency_ms: DEMO_FETCH_LATENCY_MS,
        }
    }
}
