//! Row access for datasources that sort and filter in memory

use super::filter::FilterValue;

/// A row whose cells can be read by column id
pub trait GridRow {
    /// Cell value for `column`; unknown columns read as `Null`
    fn cell(&self, column: &str) -> FilterValue;
}
