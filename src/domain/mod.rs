//! Domain Layer
//!
//! Value types shared by the cache, the datasource contract and consumers.

pub mod column;
pub mod config;
pub mod filter;
pub mod person;
pub mod row;
pub mod sort;

pub use column::ColumnDef;
pub use config::{AppConfig, DemoConfig, GridConfig};
pub use filter::{
    operators_for, ColumnFilters, FilterCondition, FilterDataType, FilterOperator, FilterValue,
};
pub use person::{sample_people, Person};
pub use row::GridRow;
pub use sort::{SortKey, SortModel};
