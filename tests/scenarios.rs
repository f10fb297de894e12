//! End-to-end cache behavior against the in-memory datasource

use std::time::Duration;

use grid_datasource::domain::{sample_people, Person};
use grid_datasource::services::build_runtime;
use grid_datasource::{
    FilterCondition, FilterOperator, GridConfig, InfiniteDataSource, MockDatasource, SortKey,
    SortModel,
};
use tokio::runtime::Runtime;

const WAIT: Duration = Duration::from_secs(5);

struct Harness {
    _runtime: Runtime,
    source: std::sync::Arc<MockDatasource<Person>>,
    grid: InfiniteDataSource<std::sync::Arc<MockDatasource<Person>>>,
}

fn harness(rows: usize, config: GridConfig) -> Harness {
    let runtime = build_runtime().expect("runtime");
    let source = std::sync::Arc::new(MockDatasource::new(sample_people(rows)));
    let grid = InfiniteDataSource::new(source.clone(), config, runtime.handle().clone())
        .expect("session");
    Harness {
        _runtime: runtime,
        source,
        grid,
    }
}

#[test]
fn scroll_evicts_oldest_block() {
    let config = GridConfig::default()
        .with_block_size(100)
        .with_max_blocks(2)
        .with_overflow(0);
    let mut h = harness(1_000, config);
    assert!(h.grid.settle(WAIT));

    h.grid.report_visible_range(0, 49);
    assert!(h.grid.settle(WAIT));
    h.grid.report_visible_range(250, 299);
    assert!(h.grid.settle(WAIT));
    h.grid.report_visible_range(500, 549);
    assert!(h.grid.settle(WAIT));

    assert_eq!(h.grid.resident_blocks(), vec![2, 5]);
    assert_eq!(h.source.requested_starts(), vec![0, 200, 500]);

    let view = h.grid.view();
    assert_eq!(view.len(), 1_000);
    assert!(!view.is_loaded(0));
    assert_eq!(view.get(250).map(|p| p.id), Some(251));
    assert_eq!(view.get(599).map(|p| p.id), Some(600));
}

#[test]
fn short_dataset_reports_total() {
    let mut h = harness(250, GridConfig::default());
    assert!(h.grid.settle(WAIT));

    assert_eq!(h.grid.total_rows(), Some(250));
    let view = h.grid.view();
    assert_eq!(view.len(), 250);
    assert_eq!(view.loaded_count(), 100);
}

#[test]
fn final_short_block_fills_tail() {
    let mut h = harness(250, GridConfig::default().with_overflow(0));
    assert!(h.grid.settle(WAIT));
    h.grid.report_visible_range(200, 249);
    assert!(h.grid.settle(WAIT));

    let view = h.grid.view();
    assert_eq!(view.len(), 250);
    assert_eq!(view.get(249).map(|p| p.id), Some(250));
    assert!(!view.is_loaded(150));
}

#[test]
fn filter_change_refetches_with_filter() {
    let mut h = harness(1_000, GridConfig::default().with_overflow(0));
    assert!(h.grid.settle(WAIT));
    h.grid.report_visible_range(0, 150);
    assert!(h.grid.settle(WAIT));
    assert_eq!(h.grid.resident_blocks(), vec![0, 1]);

    let condition = FilterCondition::new("age", FilterOperator::Between, 25).with_value2(40);
    let mut filters = h.grid.column_filters().clone();
    filters.add(condition.clone());
    h.grid.set_column_filters(filters);

    assert!(h.grid.resident_blocks().is_empty());
    assert_eq!(h.grid.total_rows(), None);

    let refetch = h
        .source
        .requests()
        .into_iter()
        .find(|p| p.start_row == 0 && !p.column_filters.is_empty())
        .expect("block 0 refetched");
    assert_eq!(refetch.column_filters.get("age"), Some(&condition));

    assert!(h.grid.settle(WAIT));
    let total = h.grid.total_rows().expect("total after refetch");
    assert!(total < 1_000);
    let view = h.grid.view();
    assert_eq!(view.len(), total);
    assert!(view.iter().flatten().all(|p| (25..=40).contains(&p.age)));
}

#[test]
fn sort_change_reloads_in_new_order() {
    let mut h = harness(500, GridConfig::default());
    assert!(h.grid.settle(WAIT));
    assert_eq!(h.grid.row(0).map(|p| p.id), Some(1));

    h.grid.set_sort_model(SortModel::new(vec![SortKey::desc("id")]));
    assert!(h.grid.resident_blocks().is_empty());
    assert_eq!(h.grid.total_rows(), Some(500));
    assert!(h.grid.settle(WAIT));

    assert_eq!(h.grid.row(0).map(|p| p.id), Some(500));
}

#[test]
fn repeated_range_is_idempotent() {
    let mut h = harness(5_000, GridConfig::default());
    assert!(h.grid.settle(WAIT));

    h.grid.report_visible_range(1_000, 1_040);
    assert!(h.grid.settle(WAIT));
    let before = h.source.requests().len();

    assert!(h.grid.report_visible_range(1_000, 1_040).is_empty());
    assert_eq!(h.source.requests().len(), before);
}

#[test]
fn failing_block_stays_absent() {
    let runtime = build_runtime().expect("runtime");
    let source = MockDatasource::new(sample_people(1_000)).fail_when(|p| p.start_row == 300);
    let mut grid = InfiniteDataSource::new(
        source,
        GridConfig::default().with_overflow(0),
        runtime.handle().clone(),
    )
    .expect("session");
    assert!(grid.settle(WAIT));

    grid.report_visible_range(250, 350);
    assert!(grid.settle(WAIT));

    assert_eq!(grid.resident_blocks(), vec![0, 2]);
    assert!(grid.in_flight_blocks().is_empty());
    assert!(grid.view().is_loaded(250));
    assert!(!grid.view().is_loaded(300));
}
