//! Column Definition
//!
//! Describes how a grid column participates in sorting and filtering.

use serde::{Deserialize, Serialize};

use super::filter::{operators_for, FilterDataType, FilterOperator};

/// Column definition for the grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnDef {
    /// Column identifier, matches `SortKey::column_id` and `FilterCondition::column`
    pub id: String,
    /// Column header label
    pub label: String,
    /// Whether the column is sortable
    #[serde(default)]
    pub sortable: bool,
    /// Filter type; `None` means the column is not filterable
    #[serde(default)]
    pub filter_type: Option<FilterDataType>,
    /// Allowed values for enum columns
    #[serde(default)]
    pub filter_options: Vec<String>,
}

impl ColumnDef {
    /// Create a new column
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            sortable: false,
            filter_type: None,
            filter_options: Vec::new(),
        }
    }

    /// Make the column sortable
    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    /// Make the column filterable with the given type
    pub fn filterable(mut self, filter_type: FilterDataType) -> Self {
        self.filter_type = Some(filter_type);
        self
    }

    /// Set enum options (implies an enum filter)
    pub fn options(mut self, options: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.filter_type = Some(FilterDataType::Enum);
        self.filter_options = options.into_iter().map(Into::into).collect();
        self
    }

    /// Operators the column offers, empty when not filterable
    pub fn operators(&self) -> &'static [FilterOperator] {
        self.filter_type.map(operators_for).unwrap_or(&[])
    }
}
