//! Cache Constants
//!
//! Centralized defaults for the block cache and the demo binary.

/// Rows per block when the consumer does not configure one
pub const DEFAULT_CACHE_BLOCK_SIZE: usize = 100;

/// Resident block bound when the consumer does not configure one
pub const DEFAULT_MAX_BLOCKS_IN_CACHE: usize = 10;

/// Extra blocks prefetched on each side of the visible range
pub const DEFAULT_CACHE_OVERFLOW_SIZE: usize = 1;

/// Default wait used by `settle` callers that have no deadline of their own
pub const DEFAULT_SETTLE_TIMEOUT_MS: u64 = 5_000;

/// Demo dataset size
pub const DEMO_ROW_COUNT: usize = 10_000;

/// Simulated datasource latency for the demo
pub const DEMO_FETCH_LATENCY_MS: u64 = 25;

/// Config file name looked up in the application config directory
pub const CONFIG_FILE_NAME: &str = "grid.toml";
