//! The raw input collection and its column list.

use std::collections::{HashMap, HashSet};

use serde_json::Value;

use horizon_datagrid_core::logging::targets;

use super::column::ColumnDescriptor;
use super::record::{Record, RecordId};
use crate::error::{GridError, Result};

/// Holds the records and column descriptors a grid works on.
///
/// A record set is immutable; new data replaces it wholesale.
#[derive(Debug, Clone, Default)]
pub struct RecordSet {
    records: Vec<Record>,
    columns: Vec<ColumnDescriptor>,
    by_id: HashMap<RecordId, usize>,
}

impl RecordSet {
    /// Builds a record set, rejecting duplicate column keys.
    ///
    /// Accessor paths are not checked against the records; a missing value
    /// renders as empty.
    pub fn with_data(records: Vec<Record>, columns: Vec<ColumnDescriptor>) -> Result<Self> {
        let mut keys = HashSet::with_capacity(columns.len());
        for column in &columns {
            if !keys.insert(column.key()) {
                return Err(GridError::duplicate_column(column.key()));
            }
        }

        let mut by_id = HashMap::with_capacity(records.len());
        for (index, record) in records.iter().enumerate() {
            if by_id.insert(record.id().clone(), index).is_some() {
                tracing::warn!(target: targets::RECORDS, id = %record.id(), "duplicate record id");
            }
        }

        tracing::debug!(
            target: targets::RECORDS,
            records = records.len(),
            columns = columns.len(),
            "record set built"
        );

        Ok(Self {
            records,
            columns,
            by_id,
        })
    }

    /// Builds a record set from raw JSON values, as returned by a REST call.
    pub fn from_values(values: Vec<Value>, columns: Vec<ColumnDescriptor>) -> Result<Self> {
        let records = values
            .into_iter()
            .enumerate()
            .map(|(index, value)| Record::from_value_at(value, index))
            .collect::<Result<Vec<_>>>()?;
        Self::with_data(records, columns)
    }

    /// All records, unmodified and in input order.
    pub fn all(&self) -> &[Record] {
        &self.records
    }

    /// The column descriptors.
    pub fn columns(&self) -> &[ColumnDescriptor] {
        &self.columns
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if there are no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Looks up a record by id. With duplicate ids, the last one wins.
    pub fn get(&self, id: &RecordId) -> Option<&Record> {
        self.by_id.get(id).map(|&index| &self.records[index])
    }

    /// Returns `true` if a record with this id exists.
    pub fn contains(&self, id: &RecordId) -> bool {
        self.by_id.contains_key(id)
    }
}
