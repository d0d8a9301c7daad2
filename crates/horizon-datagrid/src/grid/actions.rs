//! Bulk and per-row action registrations.
//!
//! The grid only dispatches actions; the side effects (delete, export,
//! status changes) belong to whoever registers the handler.

use std::fmt;
use std::sync::Arc;

use super::record::{Record, RecordId};

/// Type alias for a bulk action handler, called with the selected ids.
pub type BulkActionFn = Arc<dyn Fn(&[RecordId]) + Send + Sync>;

/// Type alias for a row action handler.
pub type RowActionFn = Arc<dyn Fn(&Record) + Send + Sync>;

/// An action applied to the current selection.
#[derive(Clone)]
pub struct BulkAction {
    label: String,
    handler: BulkActionFn,
}

impl BulkAction {
    /// Creates a bulk action.
    pub fn new<F>(label: impl Into<String>, handler: F) -> Self
    where
        F: Fn(&[RecordId]) + Send + Sync + 'static,
    {
        Self {
            label: label.into(),
            handler: Arc::new(handler),
        }
    }

    /// The action's label.
    pub fn label(&self) -> &str {
        &self.label
    }

    pub(crate) fn invoke(&self, selected: &[RecordId]) {
        (self.handler)(selected)
    }
}

impl fmt::Debug for BulkAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BulkAction").field("label", &self.label).finish()
    }
}

/// An action applied to a single row.
#[derive(Clone)]
pub struct RowAction {
    label: String,
    handler: RowActionFn,
}

impl RowAction {
    /// Creates a row action.
    pub fn new<F>(label: impl Into<String>, handler: F) -> Self
    where
        F: Fn(&Record) + Send + Sync + 'static,
    {
        Self {
            label: label.into(),
            handler: Arc::new(handler),
        }
    }

    /// The action's label.
    pub fn label(&self) -> &str {
        &self.label
    }

    pub(crate) fn invoke(&self, record: &Record) {
        (self.handler)(record)
    }
}

impl fmt::Debug for RowAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RowAction").field("label", &self.label).finish()
    }
}

/// Actions registered on a grid, in registration order.
#[derive(Debug, Clone, Default)]
pub struct ActionSet {
    bulk: Vec<BulkAction>,
    row: Vec<RowAction>,
}

impl ActionSet {
    /// Registers a bulk action. A later action with the same label replaces
    /// the earlier one in place.
    pub fn add_bulk(&mut self, action: BulkAction) {
        match self.bulk.iter_mut().find(|a| a.label == action.label) {
            Some(existing) => *existing = action,
            None => self.bulk.push(action),
        }
    }

    /// Registers a row action, replacing any with the same label.
    pub fn add_row(&mut self, action: RowAction) {
        match self.row.iter_mut().find(|a| a.label == action.label) {
            Some(existing) => *existing = action,
            None => self.row.push(action),
        }
    }

    /// Looks up a bulk action by label.
    pub fn bulk(&self, label: &str) -> Option<&BulkAction> {
        self.bulk.iter().find(|a| a.label == label)
    }

    /// Looks up a row action by label.
    pub fn row(&self, label: &str) -> Option<&RowAction> {
        self.row.iter().find(|a| a.label == label)
    }

    /// Labels of all bulk actions.
    pub fn bulk_labels(&self) -> impl Iterator<Item = &str> {
        self.bulk.iter().map(BulkAction::label)
    }

    /// Labels of all row actions.
    pub fn row_labels(&self) -> impl Iterator<Item = &str> {
        self.row.iter().map(RowAction::label)
    }
}
