//! Grid Datasource - Demo Entry Point
//!
//! Scrolls a virtual viewport over a generated dataset served by the
//! in-memory datasource, then applies a filter and a sort, logging what the
//! cache fetches and keeps resident along the way.
//!
//! Usage: `grid-datasource [config.toml|config.json]`

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use grid_datasource::constants::DEFAULT_SETTLE_TIMEOUT_MS;
use grid_datasource::domain::{sample_people, AppConfig, FilterOperator, FilterValue, Person};
use grid_datasource::services::{build_runtime, MockDatasource};
use grid_datasource::utils::{default_config_path, load_config};
use grid_datasource::{InfiniteDataSource, SortKey, SortModel};

/// Rows visible at once in the simulated viewport
const VIEWPORT_ROWS: usize = 40;

fn main() -> anyhow::Result<()> {
    // Initialize tracing for logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let config_path: Option<PathBuf> = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .or_else(default_config_path);
    let config: AppConfig = match &config_path {
        Some(path) => load_config(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => AppConfig::default(),
    };

    tracing::info!(
        rows = config.demo.row_count,
        block_size = config.grid.cache_block_size,
        max_blocks = config.grid.max_blocks_in_cache,
        "Starting grid datasource demo..."
    );

    let runtime = build_runtime().context("failed to start tokio runtime")?;
    let source = MockDatasource::new(sample_people(config.demo.row_count))
        .with_latency(Duration::from_millis(config.demo.latency_ms));
    let mut grid = InfiniteDataSource::new(source, config.grid.clone(), runtime.handle().clone())?;
    let timeout = Duration::from_millis(DEFAULT_SETTLE_TIMEOUT_MS);

    settle(&mut grid, timeout, "bootstrap");

    // Scroll down in viewport-sized jumps, then jump back to the top.
    let total = grid.total_rows().unwrap_or(0);
    let step = (total / 8).max(VIEWPORT_ROWS);
    let mut offsets: Vec<usize> = (0..total).step_by(step).collect();
    offsets.push(0);
    for start in offsets {
        let issued = grid.report_visible_range(start, start + VIEWPORT_ROWS - 1);
        tracing::info!(start, ?issued, "scrolled");
        settle(&mut grid, timeout, "scroll");
    }

    grid.update_filter(
        "age",
        FilterOperator::Between,
        25,
        Some(FilterValue::Number(40.0)),
    );
    settle(&mut grid, timeout, "filter");

    grid.set_sort_model(SortModel::new(vec![SortKey::desc("salary"), SortKey::asc("name")]));
    settle(&mut grid, timeout, "sort");

    if let Some(first) = grid.row(0) {
        print_row(first);
    }
    Ok(())
}

fn settle(grid: &mut InfiniteDataSource<MockDatasource<Person>>, timeout: Duration, stage: &str) {
    if !grid.settle(timeout) {
        tracing::warn!(stage, pending = ?grid.in_flight_blocks(), "fetches still pending");
    }
    let view = grid.view();
    tracing::info!(
        stage,
        total = ?grid.total_rows(),
        len = view.len(),
        loaded = view.loaded_count(),
        resident = ?grid.resident_blocks(),
        "view updated"
    );
}

fn print_row(person: &Person) {
    println!(
        "{:>6}  {:<14} {:>3}  {:<12} {:>7}",
        person.id, person.name, person.age, person.department, person.salary
    );
}
