//! Filter - Column filter conditions
//!
//! The filter state handed to the datasource is an ordered list of
//! per-column conditions. The cache never interprets the operators; it only
//! compares filter states for equality and passes them through.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Data type of a filterable column, used to pick the operators it offers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FilterDataType {
    String,
    Number,
    Date,
    Boolean,
    Enum,
}

/// Comparison operator of a filter condition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FilterOperator {
    Equals,
    NotEquals,
    Contains,
    NotContains,
    StartsWith,
    EndsWith,
    IsEmpty,
    IsNotEmpty,
    GreaterThan,
    LessThan,
    GreaterThanOrEqual,
    LessThanOrEqual,
    Between,
    Before,
    After,
    OnOrBefore,
    OnOrAfter,
    OneOf,
    NotOneOf,
}

impl FilterOperator {
    /// Human-readable label
    pub fn label(self) -> &'static str {
        match self {
            FilterOperator::Equals => "Equals",
            FilterOperator::NotEquals => "Not equals",
            FilterOperator::Contains => "Contains",
            FilterOperator::NotContains => "Does not contain",
            FilterOperator::StartsWith => "Starts with",
            FilterOperator::EndsWith => "Ends with",
            FilterOperator::IsEmpty => "Is empty",
            FilterOperator::IsNotEmpty => "Is not empty",
            FilterOperator::GreaterThan => "Greater than",
            FilterOperator::LessThan => "Less than",
            FilterOperator::GreaterThanOrEqual => "Greater than or equal",
            FilterOperator::LessThanOrEqual => "Less than or equal",
            FilterOperator::Between => "Between",
            FilterOperator::Before => "Before",
            FilterOperator::After => "After",
            FilterOperator::OnOrBefore => "On or before",
            FilterOperator::OnOrAfter => "On or after",
            FilterOperator::OneOf => "One of",
            FilterOperator::NotOneOf => "Not one of",
        }
    }

    /// Whether the operator needs no operand
    pub fn is_unary(self) -> bool {
        matches!(self, FilterOperator::IsEmpty | FilterOperator::IsNotEmpty)
    }
}

/// Operators offered for a column of the given data type
pub fn operators_for(data_type: FilterDataType) -> &'static [FilterOperator] {
    use FilterOperator::*;

    match data_type {
        FilterDataType::String => &[
            Equals,
            NotEquals,
            Contains,
            NotContains,
            StartsWith,
            EndsWith,
            IsEmpty,
            IsNotEmpty,
        ],
        FilterDataType::Number => &[
            Equals,
            NotEquals,
            GreaterThan,
            LessThan,
            GreaterThanOrEqual,
            LessThanOrEqual,
            Between,
            IsEmpty,
            IsNotEmpty,
        ],
        FilterDataType::Date => &[
            Equals, NotEquals, Before, After, OnOrBefore, OnOrAfter, Between, IsEmpty, IsNotEmpty,
        ],
        FilterDataType::Boolean => &[Equals, NotEquals],
        FilterDataType::Enum => &[Equals, NotEquals, OneOf, NotOneOf, IsEmpty, IsNotEmpty],
    }
}

/// Operand of a filter condition (also used as a cell value by row sources)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    #[default]
    Null,
    Bool(bool),
    Number(f64),
    Date(NaiveDate),
    Text(String),
    List(Vec<String>),
}

impl FilterValue {
    pub fn is_null(&self) -> bool {
        matches!(self, FilterValue::Null)
    }
}

// Deep equality: a NaN operand equals itself, otherwise an unchanged filter
// state would read as changed on every comparison.
impl PartialEq for FilterValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (FilterValue::Null, FilterValue::Null) => true,
            (FilterValue::Bool(a), FilterValue::Bool(b)) => a == b,
            (FilterValue::Number(a), FilterValue::Number(b)) => {
                a == b || (a.is_nan() && b.is_nan())
            }
            (FilterValue::Date(a), FilterValue::Date(b)) => a == b,
            (FilterValue::Text(a), FilterValue::Text(b)) => a == b,
            (FilterValue::List(a), FilterValue::List(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for FilterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterValue::Null => write!(f, "null"),
            FilterValue::Bool(b) => write!(f, "{b}"),
            FilterValue::Number(n) => write!(f, "{n}"),
            FilterValue::Date(d) => write!(f, "{d}"),
            FilterValue::Text(s) => write!(f, "{s}"),
            FilterValue::List(items) => write!(f, "{}", items.join(", ")),
        }
    }
}

impl From<&str> for FilterValue {
    fn from(s: &str) -> Self {
        FilterValue::Text(s.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(s: String) -> Self {
        FilterValue::Text(s)
    }
}

impl From<f64> for FilterValue {
    fn from(n: f64) -> Self {
        FilterValue::Number(n)
    }
}

impl From<i64> for FilterValue {
    fn from(n: i64) -> Self {
        FilterValue::Number(n as f64)
    }
}

impl From<i32> for FilterValue {
    fn from(n: i32) -> Self {
        FilterValue::Number(f64::from(n))
    }
}

impl From<bool> for FilterValue {
    fn from(b: bool) -> Self {
        FilterValue::Bool(b)
    }
}

impl From<NaiveDate> for FilterValue {
    fn from(d: NaiveDate) -> Self {
        FilterValue::Date(d)
    }
}

impl From<Vec<String>> for FilterValue {
    fn from(items: Vec<String>) -> Self {
        FilterValue::List(items)
    }
}

impl<T: Into<FilterValue>> From<Option<T>> for FilterValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(FilterValue::Null, Into::into)
    }
}

/// A single column-scoped predicate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterCondition {
    pub column: String,
    pub operator: FilterOperator,
    #[serde(default)]
    pub value: FilterValue,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value2: Option<FilterValue>,
}

impl FilterCondition {
    pub fn new(
        column: impl Into<String>,
        operator: FilterOperator,
        value: impl Into<FilterValue>,
    ) -> Self {
        Self {
            column: column.into(),
            operator,
            value: value.into(),
            value2: None,
        }
    }

    /// Condition with a second operand (`between`)
    pub fn with_value2(mut self, value2: impl Into<FilterValue>) -> Self {
        self.value2 = Some(value2.into());
        self
    }

    /// Check that the condition carries the operands its operator needs
    pub fn is_valid(&self) -> bool {
        if self.column.is_empty() {
            return false;
        }
        if !self.operator.is_unary() && self.value.is_null() {
            return false;
        }
        if self.operator == FilterOperator::Between
            && self.value2.as_ref().is_none_or(FilterValue::is_null)
        {
            return false;
        }
        true
    }

    /// Human-readable description, e.g. `age between 25 and 40`
    pub fn description(&self) -> String {
        let column = &self.column;
        let value = &self.value;
        let value2 = self.value2.clone().unwrap_or_default();

        match self.operator {
            FilterOperator::Equals => format!("{column} equals \"{value}\""),
            FilterOperator::NotEquals => format!("{column} does not equal \"{value}\""),
            FilterOperator::Contains => format!("{column} contains \"{value}\""),
            FilterOperator::NotContains => format!("{column} does not contain \"{value}\""),
            FilterOperator::StartsWith => format!("{column} starts with \"{value}\""),
            FilterOperator::EndsWith => format!("{column} ends with \"{value}\""),
            FilterOperator::GreaterThan => format!("{column} > {value}"),
            FilterOperator::LessThan => format!("{column} < {value}"),
            FilterOperator::GreaterThanOrEqual => format!("{column} >= {value}"),
            FilterOperator::LessThanOrEqual => format!("{column} <= {value}"),
            FilterOperator::Between => format!("{column} between {value} and {value2}"),
            FilterOperator::Before => format!("{column} before {value}"),
            FilterOperator::After => format!("{column} after {value}"),
            FilterOperator::OnOrBefore => format!("{column} on or before {value}"),
            FilterOperator::OnOrAfter => format!("{column} on or after {value}"),
            FilterOperator::OneOf => format!("{column} is one of: {value}"),
            FilterOperator::NotOneOf => format!("{column} is not one of: {value}"),
            FilterOperator::IsEmpty => format!("{column} is empty"),
            FilterOperator::IsNotEmpty => format!("{column} is not empty"),
        }
    }
}

/// Ordered filter state, at most one condition per column
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "Vec<FilterCondition>", into = "Vec<FilterCondition>")]
pub struct ColumnFilters(Vec<FilterCondition>);

impl ColumnFilters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a condition, replacing any existing condition on the same column.
    /// The new condition always moves to the end.
    pub fn add(&mut self, condition: FilterCondition) {
        self.remove(&condition.column);
        self.0.push(condition);
    }

    /// Build a condition from parts and add it
    pub fn update(
        &mut self,
        column: impl Into<String>,
        operator: FilterOperator,
        value: impl Into<FilterValue>,
        value2: Option<FilterValue>,
    ) {
        let mut condition = FilterCondition::new(column, operator, value);
        condition.value2 = value2;
        self.add(condition);
    }

    /// Remove the condition on `column`, if any
    pub fn remove(&mut self, column: &str) {
        self.0.retain(|c| c.column != column);
    }

    pub fn get(&self, column: &str) -> Option<&FilterCondition> {
        self.0.iter().find(|c| c.column == column)
    }

    pub fn has_active(&self, column: &str) -> bool {
        self.get(column).is_some()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Number of active conditions
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FilterCondition> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[FilterCondition] {
        &self.0
    }
}

impl FromIterator<FilterCondition> for ColumnFilters {
    fn from_iter<I: IntoIterator<Item = FilterCondition>>(iter: I) -> Self {
        let mut filters = Self::new();
        for condition in iter {
            filters.add(condition);
        }
        filters
    }
}

impl From<Vec<FilterCondition>> for ColumnFilters {
    fn from(conditions: Vec<FilterCondition>) -> Self {
        conditions.into_iter().collect()
    }
}

impl From<ColumnFilters> for Vec<FilterCondition> {
    fn from(filters: ColumnFilters) -> Self {
        filters.0
    }
}

impl<'a> IntoIterator for &'a ColumnFilters {
    type Item = &'a FilterCondition;
    type IntoIter = std::slice::Iter<'a, FilterCondition>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
