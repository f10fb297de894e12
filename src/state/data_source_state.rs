//! InfiniteDataSource - block-cached session over a paged datasource
//!
//! One instance per grid. The session owns the block cache, the in-flight
//! set, the total row count and the sort/filter state; nothing is shared
//! between sessions. It is driven from a single thread of control:
//!
//! - the viewport calls [`InfiniteDataSource::report_visible_range`],
//! - fetches run on tokio and report back through a channel,
//! - the owner applies finished fetches with
//!   [`InfiniteDataSource::drain_completions`] (or one of the waiting
//!   variants) and re-reads [`InfiniteDataSource::view`].
//!
//! Every fetch is tagged with the cache generation it was issued under. A
//! sort or filter invalidation bumps the generation, so a fetch that
//! resolves afterwards is discarded instead of installing rows computed
//! under the old sort/filter.

use std::sync::Arc;
use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender};
use tokio::runtime::Handle;

use crate::domain::{ColumnFilters, FilterOperator, FilterValue, GridConfig, SortModel};
use crate::error::Result;
use crate::helpers::ChangeDetector;
use crate::services::{spawn_named, GetRowsParams, RowsBlock, TableDatasource};

use super::block::{block_of, block_range, Block};
use super::block_cache::BlockCache;
use super::in_flight::InFlightSet;
use super::planner::{PrefetchPlanner, VisibleRange};
use super::projector::{project, view_len, ViewRows};

/// A resolved fetch on its way back to the session
pub struct LoadCompletion<R> {
    pub block_number: usize,
    pub generation: u64,
    pub result: Result<RowsBlock<R>>,
}

/// Block-cached view over a [`TableDatasource`]
pub struct InfiniteDataSource<D: TableDatasource> {
    datasource: Arc<D>,
    runtime: Handle,
    config: GridConfig,

    cache: BlockCache<D::Row>,
    in_flight: InFlightSet,
    planner: PrefetchPlanner,
    total_rows: Option<usize>,

    sort_model: SortModel,
    column_filters: ColumnFilters,
    sort_detector: ChangeDetector<SortModel>,
    filter_detector: ChangeDetector<ColumnFilters>,

    /// Bumped on every invalidation
    generation: u64,
    last_error: Option<Arc<str>>,

    tx: Sender<LoadCompletion<D::Row>>,
    rx: Receiver<LoadCompletion<D::Row>>,
}

impl<D: TableDatasource> InfiniteDataSource<D> {
    /// Create a session and start loading block 0
    pub fn new(datasource: D, config: GridConfig, runtime: Handle) -> Result<Self> {
        config.validate()?;

        let (tx, rx) = crossbeam_channel::unbounded();
        let sort_model = config.default_sort.clone();
        let column_filters = config.default_filters.clone();
        let total_rows = datasource.row_count();

        let mut session = Self {
            datasource: Arc::new(datasource),
            runtime,
            cache: BlockCache::new(config.max_blocks_in_cache),
            in_flight: InFlightSet::new(),
            planner: PrefetchPlanner::new(config.cache_block_size, config.cache_overflow_size),
            total_rows,
            sort_detector: ChangeDetector::new(sort_model.clone()),
            filter_detector: ChangeDetector::new(column_filters.clone()),
            sort_model,
            column_filters,
            generation: 0,
            last_error: None,
            tx,
            rx,
            config,
        };

        tracing::debug!(
            block_size = session.config.cache_block_size,
            max_blocks = session.config.max_blocks_in_cache,
            overflow = session.config.cache_overflow_size,
            "created infinite datasource"
        );

        session.bootstrap();
        Ok(session)
    }

    // ==================== Viewport ====================

    /// Report the visible rows `[start, end]` (inclusive).
    ///
    /// A report identical to the previous one is ignored. Returns the block
    /// numbers whose fetch was issued by this call.
    pub fn report_visible_range(&mut self, start: usize, end: usize) -> Vec<usize> {
        let range = VisibleRange::new(start, end);
        if !self.planner.observe(range) {
            return Vec::new();
        }
        self.prefetch(range)
    }

    /// Load every block `range` needs that is neither resident nor loading
    fn prefetch(&mut self, range: VisibleRange) -> Vec<usize> {
        let plan = self.planner.plan(range, &self.cache, &self.in_flight);
        if !plan.is_empty() {
            tracing::debug!(start = range.start, end = range.end, blocks = ?plan, "prefetch");
        }
        plan.into_iter().filter(|&n| self.load(n)).collect()
    }

    /// Make sure an empty cache is never left without a pending first block
    fn bootstrap(&mut self) {
        if self.cache.is_empty() && !self.in_flight.contains(0) {
            self.load(0);
        }
    }

    // ==================== Loader ====================

    /// Issue the fetch for one block. Returns `false` if it was already in flight.
    fn load(&mut self, block_number: usize) -> bool {
        // Marker goes in before the fetch exists so no later plan can re-issue it.
        if !self.in_flight.begin(block_number) {
            return false;
        }

        let range = block_range(block_number, self.config.cache_block_size);
        let params = GetRowsParams {
            start_row: range.start,
            end_row: range.end,
            sort_model: self.sort_model.clone(),
            column_filters: self.column_filters.clone(),
        };
        let generation = self.generation;

        tracing::debug!(
            block = block_number,
            start = range.start,
            end = range.end,
            generation,
            "loading block"
        );

        let fetch = self.datasource.get_rows(params);
        let tx = self.tx.clone();
        spawn_named(&self.runtime, "load-block", async move {
            let result = fetch.await;
            let completion = LoadCompletion {
                block_number,
                generation,
                result,
            };
            if tx.send(completion).is_err() {
                tracing::debug!(block = block_number, "session dropped before block resolved");
            }
        });
        true
    }

    /// Apply one resolved fetch
    fn apply_completion(&mut self, completion: LoadCompletion<D::Row>) {
        let LoadCompletion {
            block_number,
            generation,
            result,
        } = completion;

        if generation != self.generation {
            tracing::warn!(
                block = block_number,
                generation,
                current = self.generation,
                "discarding stale block"
            );
            return;
        }

        self.in_flight.finish(block_number);

        match result {
            Ok(page) => {
                let total = page.total_rows();
                let block = Block::new(block_number, self.config.cache_block_size, page.rows);
                tracing::debug!(block = block_number, rows = block.len(), ?total, "block loaded");

                self.cache.insert(block);
                if let Some(total) = total {
                    self.total_rows = Some(total);
                }
                self.last_error = None;
            }
            Err(e) => {
                tracing::warn!(block = block_number, error = %e, "block fetch failed");
                self.last_error = Some(e.to_string().into());
            }
        }
    }

    /// Apply every fetch that has already resolved. Returns how many were processed.
    pub fn drain_completions(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(completion) = self.rx.try_recv() {
            self.apply_completion(completion);
            applied += 1;
        }
        applied
    }

    /// Block up to `timeout` for the next resolved fetch, then apply it and
    /// anything else already queued. Returns how many were processed.
    pub fn wait_for_completion(&mut self, timeout: Duration) -> usize {
        match self.rx.recv_timeout(timeout) {
            Ok(completion) => {
                self.apply_completion(completion);
                1 + self.drain_completions()
            }
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => 0,
        }
    }

    /// Apply completions until nothing is in flight or `timeout` elapses.
    /// Returns whether the session settled.
    pub fn settle(&mut self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        self.drain_completions();
        while !self.in_flight.is_empty() {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return false;
            }
            self.wait_for_completion(remaining);
        }
        true
    }

    // ==================== Sort / Filter ====================

    pub fn sort_model(&self) -> &SortModel {
        &self.sort_model
    }

    /// Replace the sort state; invalidates the cache when it actually changed
    pub fn set_sort_model(&mut self, sort_model: SortModel) {
        self.sort_model = sort_model;
        self.evaluate_changes();
    }

    pub fn column_filters(&self) -> &ColumnFilters {
        &self.column_filters
    }

    /// Replace the filter state; invalidates the cache and the row count
    /// when it actually changed
    pub fn set_column_filters(&mut self, column_filters: ColumnFilters) {
        self.column_filters = column_filters;
        self.evaluate_changes();
    }

    /// Add or replace the condition on `column`
    pub fn update_filter(
        &mut self,
        column: impl Into<String>,
        operator: FilterOperator,
        value: impl Into<FilterValue>,
        value2: Option<FilterValue>,
    ) {
        let mut filters = self.column_filters.clone();
        filters.update(column, operator, value, value2);
        self.set_column_filters(filters);
    }

    /// Drop the condition on `column`
    pub fn remove_filter(&mut self, column: &str) {
        let mut filters = self.column_filters.clone();
        filters.remove(column);
        self.set_column_filters(filters);
    }

    pub fn clear_filters(&mut self) {
        self.set_column_filters(ColumnFilters::new());
    }

    /// Run both change detectors and invalidate once if either fired
    fn evaluate_changes(&mut self) {
        let previous_sorted = !self.sort_detector.previous().is_empty();
        let sort_changed = self.sort_detector.observe(&self.sort_model)
            && (previous_sorted || !self.sort_model.is_empty());
        let filters_changed = self.filter_detector.observe(&self.column_filters);

        if sort_changed || filters_changed {
            self.invalidate(filters_changed);
        }
    }

    /// Drop all cached state tied to the old sort/filter and start reloading
    fn invalidate(&mut self, reset_total: bool) {
        self.cache.clear();
        if reset_total {
            self.total_rows = None;
        }
        self.generation += 1;
        // Outstanding fetches belong to the old generation and will be discarded.
        self.in_flight.clear();

        tracing::info!(
            generation = self.generation,
            reset_total,
            sort = ?self.sort_model,
            filters = self.column_filters.len(),
            "cache invalidated"
        );

        self.bootstrap();
        if let Some(range) = self.planner.last_range() {
            self.prefetch(range);
        }
        // A block of that range failing under the new generation must be
        // re-planned by the next report, even an identical one.
        self.planner.reset();
    }

    // ==================== Read side ====================

    /// Sparse row sequence over everything currently resident
    pub fn view(&self) -> ViewRows<D::Row> {
        project(&self.cache, self.total_rows)
    }

    /// Length the view currently has
    pub fn len(&self) -> usize {
        view_len(&self.cache, self.total_rows)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Loaded row at `index`, without materializing the whole view
    pub fn row(&self, index: usize) -> Option<&D::Row> {
        if index >= self.len() {
            return None;
        }
        self.cache
            .get(block_of(index, self.config.cache_block_size))
            .and_then(|block| block.row(index))
    }

    /// Total rows reported by the datasource, if known
    pub fn total_rows(&self) -> Option<usize> {
        self.total_rows
    }

    /// Resident block numbers, ascending
    pub fn resident_blocks(&self) -> Vec<usize> {
        let mut blocks = self.cache.block_numbers();
        blocks.sort_unstable();
        blocks
    }

    pub fn is_block_resident(&self, block_number: usize) -> bool {
        self.cache.contains(block_number)
    }

    /// Block numbers currently loading, ascending
    pub fn in_flight_blocks(&self) -> Vec<usize> {
        self.in_flight.sorted()
    }

    pub fn is_loading(&self) -> bool {
        !self.in_flight.is_empty()
    }

    /// Most recent fetch failure, cleared by the next successful load
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Current cache generation
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    pub fn block_size(&self) -> usize {
        self.config.cache_block_size
    }
}
