//! Single-key stable sorting.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::column::{ColumnDescriptor, find_column};
use super::record::Record;
use super::value::compare_values;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Smallest first.
    #[default]
    Asc,
    /// Largest first.
    Desc,
}

impl SortDirection {
    /// Returns the opposite direction.
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

/// What a column header should show about sorting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortIndicator {
    /// The grid is sorted by this column, ascending.
    Ascending,
    /// The grid is sorted by this column, descending.
    Descending,
    /// The grid is not sorted by this column.
    Unsorted,
}

/// The active sort key and direction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct SortState {
    /// Column key to sort by; `None` keeps input order.
    pub key: Option<String>,
    /// Sort direction.
    pub direction: SortDirection,
}

impl SortState {
    /// Sorts by `key` in the given direction.
    pub fn by(key: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            key: Some(key.into()),
            direction,
        }
    }

    /// Header-click behaviour: re-selecting the active key flips the
    /// direction, selecting a new key sorts it ascending.
    pub fn toggle(&mut self, key: &str) {
        if self.key.as_deref() == Some(key) {
            self.direction = self.direction.toggled();
        } else {
            self.key = Some(key.to_string());
            self.direction = SortDirection::Asc;
        }
    }

    /// Removes the sort key, restoring input order.
    pub fn clear(&mut self) {
        self.key = None;
        self.direction = SortDirection::Asc;
    }

    /// Returns the header indicator for `key`.
    pub fn indicator(&self, key: &str) -> SortIndicator {
        match (self.key.as_deref() == Some(key), self.direction) {
            (false, _) => SortIndicator::Unsorted,
            (true, SortDirection::Asc) => SortIndicator::Ascending,
            (true, SortDirection::Desc) => SortIndicator::Descending,
        }
    }
}

/// Stable single-key sorter.
///
/// Compares raw field values under the sort key. Ties keep their input
/// order in both directions, because descending reverses the comparator
/// rather than the output.
pub struct Sorter;

impl Sorter {
    /// Returns `records` sorted by `sort`.
    ///
    /// No-op when no key is set or the key does not name a sortable column.
    pub fn apply<'a>(
        records: &[&'a Record],
        sort: &SortState,
        columns: &[ColumnDescriptor],
    ) -> Vec<&'a Record> {
        let mut sorted = records.to_vec();
        let Some(key) = Self::effective_key(sort, columns) else {
            return sorted;
        };

        sorted.sort_by(|a, b| Self::compare(a, b, key, sort.direction));
        sorted
    }

    /// Compares two records on `key` in `direction`.
    pub fn compare(a: &Record, b: &Record, key: &str, direction: SortDirection) -> Ordering {
        let cmp = compare_values(a.field(key), b.field(key));
        match direction {
            SortDirection::Asc => cmp,
            SortDirection::Desc => cmp.reverse(),
        }
    }

    /// The key that will actually be sorted on, if any.
    pub fn effective_key<'s>(sort: &'s SortState, columns: &[ColumnDescriptor]) -> Option<&'s str> {
        let key = sort.key.as_deref()?;
        find_column(columns, key)
            .filter(|column| column.is_sortable())
            .map(|_| key)
    }
}
