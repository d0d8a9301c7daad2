//! Selection tracking for grid rows.
//!
//! [`SelectionTracker`] stores selected record ids independently of paging,
//! so selections survive search, filter and page changes. The header
//! checkbox state is never stored: [`SelectionTracker::aggregate_state`]
//! derives it from the selection and the ids currently visible.
//!
//! # Example
//!
//! ```
//! use horizon_datagrid::grid::{AggregateState, RecordId, SelectionTracker};
//!
//! let visible: Vec<RecordId> = vec![1.into(), 2.into(), 3.into()];
//! let mut selection = SelectionTracker::new();
//!
//! selection.select_all_visible(&visible);
//! assert_eq!(selection.aggregate_state(&visible), AggregateState::All);
//!
//! selection.toggle(&RecordId::from(2));
//! assert_eq!(selection.aggregate_state(&visible), AggregateState::Some);
//! ```

use std::collections::HashSet;

use horizon_datagrid_core::Signal;
use horizon_datagrid_core::logging::targets;

use super::record::RecordId;

/// Aggregate selection of a visible set, for tri-state checkboxes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AggregateState {
    /// No visible id is selected.
    #[default]
    None,
    /// Some, but not all, visible ids are selected.
    Some,
    /// Every visible id is selected.
    All,
}

impl AggregateState {
    /// Returns `true` if at least one visible id is selected.
    pub fn is_any(&self) -> bool {
        !matches!(self, AggregateState::None)
    }

    /// Returns `true` if every visible id is selected.
    pub fn is_all(&self) -> bool {
        matches!(self, AggregateState::All)
    }
}

/// Tracks a set of selected record ids.
///
/// # Signals
///
/// - `selection_changed`: Emitted when membership changes, with
///   (newly selected, newly deselected) ids
pub struct SelectionTracker {
    /// Set of selected ids for O(1) lookup.
    selected: HashSet<RecordId>,

    /// Selected ids in selection order.
    order: Vec<RecordId>,

    /// Emitted when selection changes. Args: (selected, deselected)
    pub selection_changed: Signal<(Vec<RecordId>, Vec<RecordId>)>,
}

impl Default for SelectionTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SelectionTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelectionTracker")
            .field("selected", &self.order)
            .finish()
    }
}

impl SelectionTracker {
    /// Creates an empty tracker.
    pub fn new() -> Self {
        Self {
            selected: HashSet::new(),
            order: Vec::new(),
            selection_changed: Signal::new(),
        }
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Checks if an id is selected.
    pub fn is_selected(&self, id: &RecordId) -> bool {
        self.selected.contains(id)
    }

    /// Returns the selected ids in selection order.
    pub fn selected_ids(&self) -> &[RecordId] {
        &self.order
    }

    /// Returns the number of selected ids.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns `true` if nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Derives the aggregate state relative to `visible`.
    ///
    /// `None` if no visible id is selected (including when nothing is
    /// visible), `All` if every visible id is selected, `Some` otherwise.
    pub fn aggregate_state(&self, visible: &[RecordId]) -> AggregateState {
        let selected = visible.iter().filter(|id| self.selected.contains(*id)).count();
        if selected == 0 {
            AggregateState::None
        } else if selected == visible.len() {
            AggregateState::All
        } else {
            AggregateState::Some
        }
    }

    // =========================================================================
    // Operations
    // =========================================================================

    /// Flips membership of a single id.
    pub fn toggle(&mut self, id: &RecordId) {
        if self.remove(id) {
            self.notify(Vec::new(), vec![id.clone()]);
        } else {
            self.insert(id.clone());
            self.notify(vec![id.clone()], Vec::new());
        }
    }

    /// Adds every visible id. Ids selected on other pages stay selected.
    pub fn select_all_visible(&mut self, visible: &[RecordId]) {
        let newly_selected: Vec<RecordId> = visible
            .iter()
            .filter(|id| self.insert((*id).clone()))
            .cloned()
            .collect();
        self.notify(newly_selected, Vec::new());
    }

    /// Removes every visible id. Ids selected on other pages stay selected.
    pub fn clear_all_visible(&mut self, visible: &[RecordId]) {
        let newly_deselected: Vec<RecordId> = visible
            .iter()
            .filter(|id| self.remove(id))
            .cloned()
            .collect();
        self.notify(Vec::new(), newly_deselected);
    }

    /// Header checkbox behaviour: clears the visible ids if all of them are
    /// selected, otherwise selects all of them.
    pub fn toggle_all_visible(&mut self, visible: &[RecordId]) {
        if self.aggregate_state(visible).is_all() {
            self.clear_all_visible(visible);
        } else {
            self.select_all_visible(visible);
        }
    }

    /// Empties the selection entirely.
    pub fn clear(&mut self) {
        if self.order.is_empty() {
            return;
        }
        let deselected = std::mem::take(&mut self.order);
        self.selected.clear();
        self.notify(Vec::new(), deselected);
    }

    // =========================================================================
    // Internal Helpers
    // =========================================================================

    fn insert(&mut self, id: RecordId) -> bool {
        if self.selected.insert(id.clone()) {
            self.order.push(id);
            true
        } else {
            false
        }
    }

    fn remove(&mut self, id: &RecordId) -> bool {
        if self.selected.remove(id) {
            self.order.retain(|selected| selected != id);
            true
        } else {
            false
        }
    }

    fn notify(&self, selected: Vec<RecordId>, deselected: Vec<RecordId>) {
        if selected.is_empty() && deselected.is_empty() {
            return;
        }
        tracing::trace!(
            target: targets::SELECTION,
            selected = selected.len(),
            deselected = deselected.len(),
            total = self.order.len(),
            "selection changed"
        );
        self.selection_changed.emit((selected, deselected));
    }
}
