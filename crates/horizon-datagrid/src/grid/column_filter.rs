//! Per-column categorical filters.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use horizon_datagrid_core::logging::targets;

use super::column::{ColumnDescriptor, find_column};
use super::record::Record;

/// Sentinel filter value meaning "no constraint".
pub const ALL: &str = "all";

/// Selected filter value per column key.
///
/// A key that is absent, or mapped to `"all"`, `""` or `null`, places no
/// constraint on its column.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnFilterState {
    values: BTreeMap<String, Value>,
}

impl ColumnFilterState {
    /// Creates an empty filter state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the filter value for a column.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(key.into(), value.into());
    }

    /// Builder form of [`ColumnFilterState::set`].
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(key, value);
        self
    }

    /// Removes the filter for a column. Returns the previous value.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.values.remove(key)
    }

    /// Removes every filter.
    pub fn clear(&mut self) {
        self.values.clear();
    }

    /// The raw value stored for a column, including sentinels.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// Iterates over the filters that actually constrain records.
    pub fn active(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values
            .iter()
            .filter(|(_, value)| !is_unconstrained(value))
            .map(|(key, value)| (key.as_str(), value))
    }

    /// Returns `true` if no filter constrains records.
    pub fn is_empty(&self) -> bool {
        self.active().next().is_none()
    }
}

fn is_unconstrained(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty() || s == ALL,
        _ => false,
    }
}

/// Applies column filters with logical AND.
///
/// Records are matched on their raw field under the column key (not through
/// the accessor) using strict equality: `5` does not equal `"5"`. Filters on
/// columns not marked filterable are still honored.
pub struct ColumnFilterSet;

impl ColumnFilterSet {
    /// Returns the records passing every active filter, in input order.
    pub fn apply<'a>(
        records: &[&'a Record],
        filters: &ColumnFilterState,
        columns: &[ColumnDescriptor],
    ) -> Vec<&'a Record> {
        let active: Vec<(&str, &Value)> = filters.active().collect();
        if active.is_empty() {
            return records.to_vec();
        }

        for (key, _) in &active {
            if !columns.is_empty() && find_column(columns, key).is_none() {
                tracing::warn!(target: targets::PIPELINE, key, "filter on unknown column");
            }
        }

        records
            .iter()
            .copied()
            .filter(|record| Self::passes(record, &active))
            .collect()
    }

    /// Returns `true` if `record` passes every active filter.
    pub fn matches(record: &Record, filters: &ColumnFilterState) -> bool {
        filters
            .active()
            .all(|(key, expected)| record.field(key) == Some(expected))
    }

    fn passes(record: &Record, active: &[(&str, &Value)]) -> bool {
        active
            .iter()
            .all(|(key, expected)| record.field(key) == Some(*expected))
    }
}
