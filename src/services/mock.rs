//! In-memory datasource
//!
//! Serves pages from a fixed dataset, applying the requested filters and
//! sort on every call the way a remote API would. Used by the demo binary
//! and the tests; optional latency and failure injection simulate a slow or
//! flaky backend.

use std::cmp::Ordering;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use futures::future::BoxFuture;
use futures::FutureExt;

use crate::domain::{ColumnFilters, FilterCondition, FilterOperator, FilterValue, GridRow, SortModel};
use crate::error::{Error, Result};

use super::datasource::{GetRowsParams, RowsBlock, TableDatasource};

type FailPredicate = Arc<dyn Fn(&GetRowsParams) -> bool + Send + Sync>;

/// Datasource over an in-memory row set
pub struct MockDatasource<R> {
    rows: Arc<Vec<R>>,
    latency: Option<Duration>,
    fail_when: Option<FailPredicate>,
    requests: Arc<Mutex<Vec<GetRowsParams>>>,
}

impl<R> MockDatasource<R>
where
    R: GridRow + Clone + Send + Sync + 'static,
{
    pub fn new(rows: Vec<R>) -> Self {
        Self {
            rows: Arc::new(rows),
            latency: None,
            fail_when: None,
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Delay every response by `latency`
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Fail every request matching `predicate`
    pub fn fail_when(
        mut self,
        predicate: impl Fn(&GetRowsParams) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.fail_when = Some(Arc::new(predicate));
        self
    }

    /// Every request received so far, in issue order
    pub fn requests(&self) -> Vec<GetRowsParams> {
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Start rows of every request received so far
    pub fn requested_starts(&self) -> Vec<usize> {
        self.requests().iter().map(|p| p.start_row).collect()
    }

    /// Resolve a request synchronously
    pub fn query(&self, params: &GetRowsParams) -> RowsBlock<R> {
        let mut processed: Vec<R> = self
            .rows
            .iter()
            .filter(|row| row_matches(*row, &params.column_filters))
            .cloned()
            .collect();

        if !params.sort_model.is_empty() {
            sort_rows(&mut processed, &params.sort_model);
        }

        let last_row = processed.len() as i64 - 1;
        let start = params.start_row.min(processed.len());
        let end = params.end_row.min(processed.len()).max(start);
        RowsBlock::new(processed[start..end].to_vec()).with_last_row(last_row)
    }
}

impl<R> TableDatasource for MockDatasource<R>
where
    R: GridRow + Clone + Send + Sync + 'static,
{
    type Row = R;

    fn row_count(&self) -> Option<usize> {
        Some(self.rows.len())
    }

    fn get_rows(&self, params: GetRowsParams) -> BoxFuture<'static, Result<RowsBlock<R>>> {
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(params.clone());

        let failed = self.fail_when.as_ref().is_some_and(|f| f(&params));
        let result = if failed {
            Err(Error::fetch(format!(
                "rows {}..{} unavailable",
                params.start_row, params.end_row
            )))
        } else {
            Ok(self.query(&params))
        };

        let latency = self.latency;
        async move {
            if let Some(latency) = latency {
                tokio::time::sleep(latency).await;
            }
            result
        }
        .boxed()
    }
}

/// Whether `row` satisfies every condition
pub fn row_matches<R: GridRow>(row: &R, filters: &ColumnFilters) -> bool {
    filters
        .iter()
        .all(|condition| cell_matches(&row.cell(&condition.column), condition))
}

/// Evaluate one condition against a cell
pub fn cell_matches(cell: &FilterValue, condition: &FilterCondition) -> bool {
    let value = &condition.value;

    if cell.is_null() {
        return match condition.operator {
            FilterOperator::IsEmpty => true,
            FilterOperator::Equals => value.is_null(),
            _ => false,
        };
    }

    match condition.operator {
        FilterOperator::Equals => values_equal(cell, value),
        FilterOperator::NotEquals => !values_equal(cell, value),
        FilterOperator::Contains => lower(cell).contains(&lower(value)),
        FilterOperator::NotContains => !lower(cell).contains(&lower(value)),
        FilterOperator::StartsWith => lower(cell).starts_with(&lower(value)),
        FilterOperator::EndsWith => lower(cell).ends_with(&lower(value)),
        FilterOperator::GreaterThan | FilterOperator::After => {
            compare_values(cell, value) == Ordering::Greater
        }
        FilterOperator::LessThan | FilterOperator::Before => {
            compare_values(cell, value) == Ordering::Less
        }
        FilterOperator::GreaterThanOrEqual | FilterOperator::OnOrAfter => {
            compare_values(cell, value) != Ordering::Less
        }
        FilterOperator::LessThanOrEqual | FilterOperator::OnOrBefore => {
            compare_values(cell, value) != Ordering::Greater
        }
        FilterOperator::Between => {
            let Some(upper) = condition.value2.as_ref() else {
                return false;
            };
            let comparable = matches!(
                (cell, value, upper),
                (FilterValue::Number(_), FilterValue::Number(_), FilterValue::Number(_))
                    | (FilterValue::Date(_), FilterValue::Date(_), FilterValue::Date(_))
            );
            comparable
                && compare_values(cell, value) != Ordering::Less
                && compare_values(cell, upper) != Ordering::Greater
        }
        FilterOperator::OneOf => match value {
            FilterValue::List(items) => items.contains(&cell.to_string()),
            _ => false,
        },
        FilterOperator::NotOneOf => match value {
            FilterValue::List(items) => !items.contains(&cell.to_string()),
            _ => true,
        },
        FilterOperator::IsEmpty => cell.to_string().trim().is_empty(),
        FilterOperator::IsNotEmpty => !cell.to_string().trim().is_empty(),
    }
}

fn lower(value: &FilterValue) -> String {
    value.to_string().to_lowercase()
}

fn values_equal(cell: &FilterValue, value: &FilterValue) -> bool {
    match (cell, value) {
        (FilterValue::Bool(a), FilterValue::Bool(b)) => a == b,
        (FilterValue::Bool(_), _) => false,
        (FilterValue::Number(a), FilterValue::Number(b)) => a == b,
        (FilterValue::Date(a), FilterValue::Date(b)) => a == b,
        _ => lower(cell) == lower(value),
    }
}

/// Total order over cells: nulls first, then typed comparison, falling back
/// to case-insensitive text
fn compare_values(a: &FilterValue, b: &FilterValue) -> Ordering {
    match (a, b) {
        (FilterValue::Null, FilterValue::Null) => Ordering::Equal,
        (FilterValue::Null, _) => Ordering::Less,
        (_, FilterValue::Null) => Ordering::Greater,
        (FilterValue::Number(x), FilterValue::Number(y)) => {
            x.partial_cmp(y).unwrap_or(Ordering::Equal)
        }
        (FilterValue::Date(x), FilterValue::Date(y)) => x.cmp(y),
        (FilterValue::Bool(x), FilterValue::Bool(y)) => x.cmp(y),
        _ => lower(a).cmp(&lower(b)),
    }
}

/// Stable multi-key sort; descending keys reverse the whole comparison
pub fn sort_rows<R: GridRow>(rows: &mut [R], sort_model: &SortModel) {
    rows.sort_by(|a, b| {
        for key in sort_model.keys() {
            let ordering = compare_values(&a.cell(&key.column_id), &b.cell(&key.column_id));
            if ordering != Ordering::Equal {
                return if key.descending {
                    ordering.reverse()
                } else {
                    ordering
                };
            }
        }
        Ordering::Equal
    });
}
