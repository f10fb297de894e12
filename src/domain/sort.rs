//! Sort - Multi-column sort model

use serde::{Deserialize, Serialize};

/// One entry of the sort model
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SortKey {
    pub column_id: String,
    #[serde(default)]
    pub descending: bool,
}

impl SortKey {
    pub fn asc(column_id: impl Into<String>) -> Self {
        Self {
            column_id: column_id.into(),
            descending: false,
        }
    }

    pub fn desc(column_id: impl Into<String>) -> Self {
        Self {
            column_id: column_id.into(),
            descending: true,
        }
    }
}

/// Ordered sort state; the first key has the highest priority
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SortModel(Vec<SortKey>);

impl SortModel {
    pub fn new(keys: Vec<SortKey>) -> Self {
        Self(keys)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn keys(&self) -> &[SortKey] {
        &self.0
    }

    /// Direction for a column, if it participates in the sort
    pub fn direction(&self, column_id: &str) -> Option<bool> {
        self.0
            .iter()
            .find(|k| k.column_id == column_id)
            .map(|k| k.descending)
    }
}

impl From<Vec<SortKey>> for SortModel {
    fn from(keys: Vec<SortKey>) -> Self {
        Self(keys)
    }
}

impl FromIterator<SortKey> for SortModel {
    fn from_iter<I: IntoIterator<Item = SortKey>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
