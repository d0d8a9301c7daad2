//! The grid controller.
//!
//! [`DataGrid`] owns a [`RecordSet`] plus the interactive state around it
//! and runs the reduction pipeline:
//!
//! ```text
//! records -> search -> column filters -> sort -> page
//! ```
//!
//! The filtered and sorted order is cached as a list of row indices into
//! the record set. The cache is keyed by the upstream state (data
//! generation, search term, active filters, sort key and direction), so
//! moving between pages reuses it and only a data, search, filter or sort
//! change recomputes it.
//!
//! # Example
//!
//! ```
//! use horizon_datagrid::{DataGrid, GridOptions};
//! use horizon_datagrid::grid::{ColumnDescriptor, RecordId, SortDirection, ViewStatus};
//! use serde_json::json;
//!
//! let mut grid = DataGrid::from_values(
//!     vec![
//!         json!({"id": 1, "name": "Apple"}),
//!         json!({"id": 2, "name": "Banana"}),
//!         json!({"id": 3, "name": "Cherry"}),
//!     ],
//!     vec![ColumnDescriptor::new("name").with_accessor("name").sortable()],
//!     GridOptions::default(),
//! ).unwrap();
//!
//! grid.set_search_term("an");
//! grid.set_sort("name", SortDirection::Desc);
//!
//! let view = grid.view();
//! assert_eq!(view.status, ViewStatus::Ready);
//! assert_eq!(view.visible_ids(), vec![RecordId::from(2)]);
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering as AtomicOrdering};

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use horizon_datagrid_core::Signal;
use horizon_datagrid_core::logging::targets;

use super::actions::{ActionSet, BulkAction, RowAction};
use super::column::{ColumnDescriptor, FilterOption, find_column};
use super::column_filter::{ColumnFilterSet, ColumnFilterState};
use super::paginator::{Page, PageLink, PageState, Paginator, page_links, total_pages};
use super::record::{Record, RecordId};
use super::record_set::RecordSet;
use super::search::SearchFilter;
use super::selection::{AggregateState, SelectionTracker};
use super::sort::{SortDirection, SortIndicator, SortState, Sorter};
use crate::error::{GridError, Result};
use crate::options::GridOptions;

/// Caller-visible interactive state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GridState {
    /// Free-text search term.
    pub search_term: String,
    /// Selected value per filterable column.
    pub filters: ColumnFilterState,
    /// Active sort.
    pub sort: SortState,
    /// Requested page and page size.
    pub page: PageState,
}

/// What the grid body should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewStatus {
    /// Data is being fetched.
    Loading,
    /// The record set is empty.
    Empty,
    /// Records exist but none survive search and filters.
    NoMatches,
    /// There are rows to show.
    Ready,
}

/// A snapshot of the grid ready for rendering.
#[derive(Debug, Clone)]
pub struct GridView<'a> {
    /// What the body should show.
    pub status: ViewStatus,
    /// Records on the current page.
    pub rows: Vec<&'a Record>,
    /// Column descriptors, in display order.
    pub columns: &'a [ColumnDescriptor],
    /// The page being shown.
    pub current_page: usize,
    /// Total pages, at least one.
    pub total_pages: usize,
    /// Records surviving search and filters.
    pub total_items: usize,
    /// 1-based `(first, last, total)` for the footer.
    pub range: Option<(usize, usize, usize)>,
    /// Page-number bar.
    pub page_links: Vec<PageLink>,
    /// Header checkbox state for the rows on this page.
    pub selection: AggregateState,
    /// Number of selected ids across all pages.
    pub selected_count: usize,
    sort: &'a SortState,
    sortable: bool,
}

impl GridView<'_> {
    /// Ids of the rows on this page, in display order.
    pub fn visible_ids(&self) -> Vec<RecordId> {
        self.rows.iter().map(|record| record.id().clone()).collect()
    }

    /// The sort indicator for a column header.
    pub fn sort_indicator(&self, key: &str) -> SortIndicator {
        let sortable =
            self.sortable && find_column(self.columns, key).is_some_and(|c| c.is_sortable());
        if sortable {
            self.sort.indicator(key)
        } else {
            SortIndicator::Unsorted
        }
    }

    /// Whether the bulk action bar should be shown.
    pub fn has_selection(&self) -> bool {
        self.selected_count > 0
    }
}

/// One dropdown in the filter panel.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterControl<'a> {
    /// Column key the filter applies to.
    pub key: &'a str,
    /// Column header, used as the control label.
    pub header: &'a str,
    /// The currently selected value, or `None` for "all".
    pub selected: Option<&'a Value>,
    /// Choices offered besides "all"; empty if the column declares none.
    pub options: &'a [FilterOption],
}

#[derive(Debug, Clone, PartialEq)]
struct FilterKey {
    generation: u64,
    search: String,
    filters: ColumnFilterState,
}

#[derive(Debug, Clone, PartialEq)]
struct SortKey {
    filter: FilterKey,
    sort: Option<(String, SortDirection)>,
}

#[derive(Debug, Default)]
struct OrderCache {
    filtered: Option<(FilterKey, Arc<Vec<usize>>)>,
    sorted: Option<(SortKey, Arc<Vec<usize>>)>,
}

/// Drives a record set through search, filter, sort, pagination and
/// selection.
///
/// Disabling a stage in [`GridOptions`] makes it pass records through
/// unchanged; the stored state is kept, so re-enabling restores it.
///
/// # Signals
///
/// - `row_clicked`: Emitted by [`DataGrid::click_row`] with the record
/// - `page_clamped`: Emitted when a stale page is persisted back into
///   range, with (old page, new page)
///
/// Selection changes are reported by the tracker's own
/// [`SelectionTracker::selection_changed`] signal.
pub struct DataGrid {
    records: RecordSet,
    options: GridOptions,
    state: GridState,
    loading: bool,
    generation: u64,
    selection: SelectionTracker,
    actions: ActionSet,
    cache: RwLock<OrderCache>,
    filter_runs: AtomicUsize,
    sort_runs: AtomicUsize,

    /// Emitted when a row is clicked.
    pub row_clicked: Signal<Record>,

    /// Emitted when the current page is clamped. Args: (old, new)
    pub page_clamped: Signal<(usize, usize)>,
}

static_assertions::assert_impl_all!(DataGrid: Send, Sync);

impl std::fmt::Debug for DataGrid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DataGrid")
            .field("records", &self.records.len())
            .field("options", &self.options)
            .field("state", &self.state)
            .field("loading", &self.loading)
            .field("selection", &self.selection)
            .finish()
    }
}

impl DataGrid {
    /// Creates a grid over `records`.
    pub fn new(
        records: Vec<Record>,
        columns: Vec<ColumnDescriptor>,
        options: GridOptions,
    ) -> Result<Self> {
        let options = options.validate()?;
        let record_set = RecordSet::with_data(records, columns)?;
        Ok(Self::with_record_set(record_set, options))
    }

    /// Creates a grid from raw JSON objects.
    pub fn from_values(
        values: Vec<Value>,
        columns: Vec<ColumnDescriptor>,
        options: GridOptions,
    ) -> Result<Self> {
        let options = options.validate()?;
        let record_set = RecordSet::from_values(values, columns)?;
        Ok(Self::with_record_set(record_set, options))
    }

    /// Creates a grid over an existing record set.
    pub fn with_record_set(records: RecordSet, options: GridOptions) -> Self {
        let page = PageState::first(options.items_per_page).unwrap_or_default();
        Self {
            records,
            options,
            state: GridState {
                page,
                ..GridState::default()
            },
            loading: false,
            generation: 0,
            selection: SelectionTracker::new(),
            actions: ActionSet::default(),
            cache: RwLock::new(OrderCache::default()),
            filter_runs: AtomicUsize::new(0),
            sort_runs: AtomicUsize::new(0),
            row_clicked: Signal::new(),
            page_clamped: Signal::new(),
        }
    }

    // =========================================================================
    // Data
    // =========================================================================

    /// Returns the record set.
    pub fn records(&self) -> &RecordSet {
        &self.records
    }

    /// Returns the options.
    pub fn options(&self) -> &GridOptions {
        &self.options
    }

    /// Returns the interactive state.
    pub fn state(&self) -> &GridState {
        &self.state
    }

    /// Replaces records and columns.
    ///
    /// Search, filters, sort and selection are kept; the page is clamped if
    /// it no longer exists.
    pub fn set_data(&mut self, records: Vec<Record>, columns: Vec<ColumnDescriptor>) -> Result<()> {
        let record_set = RecordSet::with_data(records, columns)?;
        self.replace_records(record_set);
        Ok(())
    }

    /// Replaces the records, keeping the current columns.
    pub fn set_records(&mut self, records: Vec<Record>) -> Result<()> {
        let columns = self.records.columns().to_vec();
        self.set_data(records, columns)
    }

    /// Replaces the record set and clears the loading flag.
    pub fn replace_records(&mut self, records: RecordSet) {
        self.records = records;
        self.generation = self.generation.wrapping_add(1);
        self.loading = false;
        tracing::debug!(
            target: targets::PIPELINE,
            generation = self.generation,
            records = self.records.len(),
            "data replaced"
        );
        self.reconcile_page();
    }

    /// Marks the grid as waiting for data.
    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    /// Whether the grid is waiting for data.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Replaces the options.
    ///
    /// A changed page size resets to page one. Turning selection off clears
    /// the selection.
    pub fn set_options(&mut self, options: GridOptions) -> Result<()> {
        let options = options.validate()?;
        if options.items_per_page != self.options.items_per_page {
            self.state.page.set_items_per_page(options.items_per_page)?;
        }
        if !options.selectable {
            self.selection.clear();
        }
        self.options = options;
        self.reconcile_page();
        Ok(())
    }

    // =========================================================================
    // Search, Filter and Sort
    // =========================================================================

    /// Sets the search term.
    pub fn set_search_term(&mut self, term: impl Into<String>) {
        let term = term.into();
        if term == self.state.search_term {
            return;
        }
        tracing::trace!(target: targets::PIPELINE, term = %term, "search term changed");
        self.state.search_term = term;
        self.reconcile_page();
    }

    /// Sets the filter value for a column. `"all"` removes the constraint.
    pub fn set_filter(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        let key = key.into();
        if find_column(self.records.columns(), &key).is_none() {
            tracing::warn!(target: targets::PIPELINE, key = %key, "filter on unknown column");
        }
        self.state.filters.set(key, value);
        self.reconcile_page();
    }

    /// Removes the filter for a column.
    pub fn clear_filter(&mut self, key: &str) {
        if self.state.filters.remove(key).is_some() {
            self.reconcile_page();
        }
    }

    /// Removes every column filter.
    pub fn clear_filters(&mut self) {
        self.state.filters.clear();
        self.reconcile_page();
    }

    /// Header click on `key`: sorts ascending, or flips the direction if
    /// already sorted by it.
    ///
    /// Returns `false` and changes nothing when sorting is disabled or the
    /// column is not sortable.
    pub fn toggle_sort(&mut self, key: &str) -> bool {
        if !self.can_sort(key) {
            return false;
        }
        self.state.sort.toggle(key);
        tracing::trace!(
            target: targets::PIPELINE,
            key,
            direction = ?self.state.sort.direction,
            "sort toggled"
        );
        true
    }

    /// Sorts by `key` in `direction`.
    pub fn set_sort(&mut self, key: impl Into<String>, direction: SortDirection) {
        self.state.sort = SortState::by(key, direction);
    }

    /// Restores input order.
    pub fn clear_sort(&mut self) {
        self.state.sort.clear();
    }

    fn can_sort(&self, key: &str) -> bool {
        self.options.sortable
            && find_column(self.records.columns(), key).is_some_and(|c| c.is_sortable())
    }

    // =========================================================================
    // Paging
    // =========================================================================

    /// Moves to `page`. A page past the end is clamped to the last page.
    pub fn set_page(&mut self, page: usize) -> Result<()> {
        self.state.page.set_page(page)?;
        self.reconcile_page();
        Ok(())
    }

    /// Advances one page. Returns `true` if the page changed.
    pub fn next_page(&mut self) -> bool {
        let total = self.total_pages();
        self.state.page.next(total)
    }

    /// Goes back one page. Returns `true` if the page changed.
    pub fn previous_page(&mut self) -> bool {
        self.state.page.previous()
    }

    /// Changes the page size and returns to page one.
    pub fn set_items_per_page(&mut self, items_per_page: usize) -> Result<()> {
        self.state.page.set_items_per_page(items_per_page)
    }

    /// Total pages of the current reduced sequence.
    pub fn total_pages(&self) -> usize {
        if self.options.pagination {
            total_pages(self.filtered_count(), self.state.page.items_per_page())
        } else {
            1
        }
    }

    /// Number of records surviving search and filters.
    pub fn filtered_count(&self) -> usize {
        self.ordered_indices().len()
    }

    /// The current page of the reduced sequence.
    pub fn page(&self) -> Page<'_> {
        let order = self.ordered_indices();
        let all = self.records.all();
        let ordered: Vec<&Record> = order.iter().map(|&index| &all[index]).collect();

        if self.options.pagination {
            Paginator::apply(&ordered, &self.state.page)
        } else {
            Paginator::unpaginated(&ordered)
        }
    }

    /// Ids of the records on the current page.
    pub fn visible_ids(&self) -> Vec<RecordId> {
        self.page().items.iter().map(|record| record.id().clone()).collect()
    }

    // =========================================================================
    // Views
    // =========================================================================

    /// Builds a render snapshot of the current state.
    pub fn view(&self) -> GridView<'_> {
        let page = self.page();
        let visible: Vec<RecordId> = page.items.iter().map(|record| record.id().clone()).collect();

        let status = if self.loading {
            ViewStatus::Loading
        } else if self.records.is_empty() {
            ViewStatus::Empty
        } else if page.total_items == 0 {
            ViewStatus::NoMatches
        } else {
            ViewStatus::Ready
        };

        let (selection, selected_count) = if self.options.selectable {
            (self.selection.aggregate_state(&visible), self.selection.len())
        } else {
            (AggregateState::None, 0)
        };

        GridView {
            status,
            range: page.range(),
            page_links: page_links(page.effective_page, page.total_pages),
            current_page: page.effective_page,
            total_pages: page.total_pages,
            total_items: page.total_items,
            rows: page.items,
            columns: self.records.columns(),
            selection,
            selected_count,
            sort: &self.state.sort,
            sortable: self.options.sortable,
        }
    }

    /// Filter panel model: one control per filterable column, in column
    /// order. Columns without declared options offer only "all". Empty when
    /// filtering is disabled.
    pub fn filter_controls(&self) -> Vec<FilterControl<'_>> {
        if !self.options.filterable {
            return Vec::new();
        }
        self.records
            .columns()
            .iter()
            .filter(|column| column.is_filterable())
            .map(|column| {
                let selected = self
                    .state
                    .filters
                    .active()
                    .find(|(key, _)| *key == column.key())
                    .map(|(_, value)| value);
                FilterControl {
                    key: column.key(),
                    header: column.header(),
                    selected,
                    options: column.filter_options().unwrap_or(&[]),
                }
            })
            .collect()
    }

    // =========================================================================
    // Selection
    // =========================================================================

    /// Returns the selection tracker.
    pub fn selection(&self) -> &SelectionTracker {
        &self.selection
    }

    /// Header checkbox state for the current page.
    pub fn selection_state(&self) -> AggregateState {
        if !self.options.selectable {
            return AggregateState::None;
        }
        self.selection.aggregate_state(&self.visible_ids())
    }

    /// Flips the selection of one record. Returns `false` if selection is
    /// disabled or `id` is not in the record set.
    pub fn toggle_selection(&mut self, id: &RecordId) -> bool {
        if !self.options.selectable {
            return false;
        }
        if !self.records.contains(id) {
            tracing::debug!(target: targets::SELECTION, id = %id, "toggle ignored for unknown id");
            return false;
        }
        self.selection.toggle(id);
        true
    }

    /// Selects every record on the current page.
    pub fn select_all_visible(&mut self) {
        if self.options.selectable {
            let visible = self.visible_ids();
            self.selection.select_all_visible(&visible);
        }
    }

    /// Deselects every record on the current page.
    pub fn clear_all_visible(&mut self) {
        if self.options.selectable {
            let visible = self.visible_ids();
            self.selection.clear_all_visible(&visible);
        }
    }

    /// Header checkbox click for the current page.
    pub fn toggle_all_visible(&mut self) {
        if self.options.selectable {
            let visible = self.visible_ids();
            self.selection.toggle_all_visible(&visible);
        }
    }

    /// Empties the selection.
    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    // =========================================================================
    // Actions and Events
    // =========================================================================

    /// Registers a bulk action, replacing any with the same label.
    pub fn add_bulk_action<F>(&mut self, label: impl Into<String>, handler: F)
    where
        F: Fn(&[RecordId]) + Send + Sync + 'static,
    {
        self.actions.add_bulk(BulkAction::new(label, handler));
    }

    /// Registers a row action, replacing any with the same label.
    pub fn add_row_action<F>(&mut self, label: impl Into<String>, handler: F)
    where
        F: Fn(&Record) + Send + Sync + 'static,
    {
        self.actions.add_row(RowAction::new(label, handler));
    }

    /// Returns the registered actions.
    pub fn actions(&self) -> &ActionSet {
        &self.actions
    }

    /// Runs a bulk action on the current selection.
    ///
    /// Returns `Ok(false)` without calling the handler when nothing is
    /// selected.
    pub fn invoke_bulk_action(&self, label: &str) -> Result<bool> {
        let action = self.actions.bulk(label).ok_or_else(|| GridError::unknown_action(label))?;
        if self.selection.is_empty() {
            return Ok(false);
        }
        tracing::debug!(
            target: targets::ACTIONS,
            label,
            selected = self.selection.len(),
            "bulk action"
        );
        action.invoke(self.selection.selected_ids());
        Ok(true)
    }

    /// Runs a row action on the record with `id`.
    pub fn invoke_row_action(&self, label: &str, id: &RecordId) -> Result<()> {
        let action = self.actions.row(label).ok_or_else(|| GridError::unknown_action(label))?;
        let record = self.record(id)?;
        tracing::debug!(target: targets::ACTIONS, label, id = %id, "row action");
        action.invoke(record);
        Ok(())
    }

    /// Reports a click on the row with `id` through `row_clicked`.
    pub fn click_row(&self, id: &RecordId) -> Result<()> {
        let record = self.record(id)?;
        self.row_clicked.emit(record.clone());
        Ok(())
    }

    fn record(&self, id: &RecordId) -> Result<&Record> {
        self.records.get(id).ok_or_else(|| GridError::UnknownRecord { id: id.clone() })
    }

    // =========================================================================
    // Pipeline
    // =========================================================================

    fn filter_key(&self) -> FilterKey {
        let search = if self.options.searchable && !self.state.search_term.trim().is_empty() {
            self.state.search_term.clone()
        } else {
            String::new()
        };
        let filters = if self.options.filterable {
            self.state
                .filters
                .active()
                .fold(ColumnFilterState::new(), |acc, (key, value)| acc.with(key, value.clone()))
        } else {
            ColumnFilterState::new()
        };
        FilterKey {
            generation: self.generation,
            search,
            filters,
        }
    }

    fn sort_key(&self) -> Option<(String, SortDirection)> {
        if !self.options.sortable {
            return None;
        }
        Sorter::effective_key(&self.state.sort, self.records.columns())
            .map(|key| (key.to_string(), self.state.sort.direction))
    }

    /// Row indices surviving search and filters, in sorted order.
    #[tracing::instrument(skip_all, target = "horizon_datagrid::pipeline", level = "trace")]
    fn ordered_indices(&self) -> Arc<Vec<usize>> {
        let key = SortKey {
            filter: self.filter_key(),
            sort: self.sort_key(),
        };

        if let Some((cached, indices)) = &self.cache.read().sorted
            && *cached == key
        {
            return indices.clone();
        }

        let filtered = self.filtered_indices(&key.filter);
        let sorted = match &key.sort {
            None => filtered,
            Some((sort_key, direction)) => {
                self.sort_runs.fetch_add(1, AtomicOrdering::Relaxed);
                let records = self.records.all();
                let mut indices = filtered.as_ref().clone();
                indices.sort_by(|&a, &b| {
                    Sorter::compare(&records[a], &records[b], sort_key, *direction)
                });
                tracing::debug!(
                    target: targets::PIPELINE,
                    key = %sort_key,
                    direction = ?direction,
                    rows = indices.len(),
                    "sorted"
                );
                Arc::new(indices)
            }
        };

        self.cache.write().sorted = Some((key, sorted.clone()));
        sorted
    }

    #[tracing::instrument(skip_all, target = "horizon_datagrid::pipeline", level = "trace")]
    fn filtered_indices(&self, key: &FilterKey) -> Arc<Vec<usize>> {
        if let Some((cached, indices)) = &self.cache.read().filtered
            && cached == key
        {
            return indices.clone();
        }

        self.filter_runs.fetch_add(1, AtomicOrdering::Relaxed);
        let columns = self.records.columns();
        let indices: Vec<usize> = self
            .records
            .all()
            .iter()
            .enumerate()
            .filter(|(_, record)| SearchFilter::matches(record, &key.search, columns))
            .filter(|(_, record)| ColumnFilterSet::matches(record, &key.filters))
            .map(|(index, _)| index)
            .collect();

        tracing::debug!(
            target: targets::PIPELINE,
            generation = key.generation,
            total = self.records.len(),
            matched = indices.len(),
            "filtered"
        );

        let indices = Arc::new(indices);
        self.cache.write().filtered = Some((key.clone(), indices.clone()));
        indices
    }

    /// Persists the effective page when the requested one no longer exists.
    fn reconcile_page(&mut self) {
        if !self.options.pagination {
            return;
        }
        let total = self.total_pages();
        let old = self.state.page.current_page();
        if old <= total {
            return;
        }
        self.state.page.clamp_to(total);
        let new = self.state.page.current_page();
        tracing::debug!(target: targets::PAGINATOR, old, new, total, "current page clamped");
        self.page_clamped.emit((old, new));
    }

    #[cfg(test)]
    fn pipeline_runs(&self) -> (usize, usize) {
        (
            self.filter_runs.load(AtomicOrdering::Relaxed),
            self.sort_runs.load(AtomicOrdering::Relaxed),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use serde_json::json;

    fn columns() -> Vec<ColumnDescriptor> {
        vec![
            ColumnDescriptor::new("name").with_header("Name").with_accessor("name").sortable(),
            ColumnDescriptor::new("status")
                .with_header("Status")
                .with_accessor("status")
                .filterable()
                .with_filter_options(vec![
                    FilterOption::new("ACTIVE", "Active"),
                    FilterOption::new("DRAFT", "Draft"),
                ]),
            ColumnDescriptor::new("category").with_accessor("category").filterable(),
        ]
    }

    fn grid(count: i64) -> DataGrid {
        let values = (1..=count)
            .map(|id| {
                json!({
                    "id": id,
                    "name": format!("Item {id:02}"),
                    "status": if id % 2 == 0 { "DRAFT" } else { "ACTIVE" },
                })
            })
            .collect();
        DataGrid::from_values(values, columns(), GridOptions::default()).unwrap()
    }

    #[test]
    fn test_page_change_reuses_cached_order() {
        let mut grid = grid(25);
        grid.set_sort("name", SortDirection::Desc);
        assert_eq!(grid.page().items.len(), 10);
        assert_eq!(grid.pipeline_runs(), (1, 1));

        grid.set_page(2).unwrap();
        grid.next_page();
        assert_eq!(grid.page().items.len(), 5);
        assert_eq!(grid.pipeline_runs(), (1, 1));

        grid.toggle_sort("name");
        grid.page();
        assert_eq!(grid.pipeline_runs(), (1, 2));

        grid.set_search_term("item 1");
        grid.page();
        assert_eq!(grid.pipeline_runs(), (2, 3));
    }

    #[test]
    fn test_sentinel_filter_does_not_invalidate() {
        let mut grid = grid(6);
        grid.page();
        grid.set_filter("status", "all");
        grid.page();
        assert_eq!(grid.pipeline_runs().0, 1);
    }

    #[test]
    fn test_stale_page_is_persisted() {
        let mut grid = grid(25);
        let clamps = Arc::new(Mutex::new(Vec::new()));
        let clamps_clone = clamps.clone();
        grid.page_clamped.connect(move |&(old, new)| clamps_clone.lock().push((old, new)));

        grid.set_page(3).unwrap();
        grid.set_search_term("item 2");
        assert_eq!(grid.filtered_count(), 6);
        assert_eq!(grid.state().page.current_page(), 1);
        assert_eq!(*clamps.lock(), vec![(3, 1)]);

        grid.set_page(9).unwrap();
        assert_eq!(grid.state().page.current_page(), 1);
    }

    #[test]
    fn test_disabled_stages_pass_through() {
        let mut grid = grid(12);
        grid.set_search_term("item 01");
        grid.set_filter("status", "DRAFT");
        grid.set_sort("name", SortDirection::Desc);

        let options = GridOptions::default()
            .with_searchable(false)
            .with_filterable(false)
            .with_sortable(false)
            .with_pagination(false);
        grid.set_options(options).unwrap();

        let view = grid.view();
        assert_eq!(view.rows.len(), 12);
        assert_eq!(view.total_pages, 1);
        assert_eq!(view.rows[0].id(), &RecordId::Int(1));
        assert_eq!(view.sort_indicator("name"), SortIndicator::Unsorted);
        assert!(grid.filter_controls().is_empty());
        assert!(!grid.toggle_sort("name"));
    }

    #[test]
    fn test_toggle_sort_requires_sortable_column() {
        let mut grid = grid(3);
        assert!(!grid.toggle_sort("status"));
        assert!(!grid.toggle_sort("missing"));
        assert!(grid.toggle_sort("name"));
        assert_eq!(grid.view().sort_indicator("name"), SortIndicator::Ascending);
        assert!(grid.toggle_sort("name"));
        assert_eq!(grid.view().sort_indicator("name"), SortIndicator::Descending);
    }

    #[test]
    fn test_status() {
        let mut grid = DataGrid::new(Vec::new(), columns(), GridOptions::default()).unwrap();
        grid.set_loading(true);
        assert_eq!(grid.view().status, ViewStatus::Loading);

        grid.set_records(Vec::new()).unwrap();
        assert!(!grid.is_loading());
        assert_eq!(grid.view().status, ViewStatus::Empty);

        grid.set_records(vec![Record::from_value(json!({"id": 1, "name": "Only"})).unwrap()])
            .unwrap();
        assert_eq!(grid.view().status, ViewStatus::Ready);

        grid.set_search_term("zzz");
        let view = grid.view();
        assert_eq!(view.status, ViewStatus::NoMatches);
        assert_eq!(view.total_pages, 1);
        assert_eq!(view.range, None);
    }

    #[test]
    fn test_filter_controls() {
        let mut grid = grid(4);
        grid.set_filter("status", "DRAFT");

        let controls = grid.filter_controls();
        let keys: Vec<&str> = controls.iter().map(|control| control.key).collect();
        assert_eq!(keys, vec!["status", "category"]);
        assert_eq!(controls[0].header, "Status");
        assert_eq!(controls[0].selected, Some(&json!("DRAFT")));
        assert_eq!(controls[0].options.len(), 2);

        // A filterable column without declared options still gets a control.
        assert_eq!(controls[1].header, "category");
        assert_eq!(controls[1].selected, None);
        assert!(controls[1].options.is_empty());

        grid.set_filter("status", "all");
        assert_eq!(grid.filter_controls()[0].selected, None);
    }

    #[test]
    fn test_selection_guards() {
        let mut grid = grid(3);
        assert!(!grid.toggle_selection(&RecordId::Int(99)));
        assert!(grid.toggle_selection(&RecordId::Int(1)));
        assert_eq!(grid.selection_state(), AggregateState::Some);

        grid.set_options(GridOptions::default().with_selectable(false)).unwrap();
        assert!(grid.selection().is_empty());
        assert!(!grid.toggle_selection(&RecordId::Int(2)));
        grid.select_all_visible();
        assert!(grid.selection().is_empty());
    }

    #[test]
    fn test_actions_and_row_clicks() {
        let mut grid = grid(3);
        let deleted = Arc::new(Mutex::new(Vec::new()));
        let deleted_clone = deleted.clone();
        grid.add_bulk_action("Delete", move |ids| deleted_clone.lock().extend_from_slice(ids));

        let edited = Arc::new(Mutex::new(None));
        let edited_clone = edited.clone();
        grid.add_row_action("Edit", move |record| {
            *edited_clone.lock() = Some(record.id().clone())
        });
        assert_eq!(grid.actions().bulk_labels().collect::<Vec<_>>(), vec!["Delete"]);
        assert_eq!(grid.actions().row_labels().collect::<Vec<_>>(), vec!["Edit"]);

        assert!(!grid.invoke_bulk_action("Delete").unwrap());
        assert!(deleted.lock().is_empty());

        grid.toggle_selection(&RecordId::Int(3));
        grid.toggle_selection(&RecordId::Int(1));
        assert!(grid.invoke_bulk_action("Delete").unwrap());
        assert_eq!(*deleted.lock(), vec![RecordId::Int(3), RecordId::Int(1)]);

        assert!(matches!(
            grid.invoke_bulk_action("Archive"),
            Err(GridError::UnknownAction { .. })
        ));

        grid.invoke_row_action("Edit", &RecordId::Int(2)).unwrap();
        assert_eq!(*edited.lock(), Some(RecordId::Int(2)));
        assert!(matches!(
            grid.invoke_row_action("Edit", &RecordId::Int(7)),
            Err(GridError::UnknownRecord { .. })
        ));

        let clicked = Arc::new(Mutex::new(Vec::new()));
        let clicked_clone = clicked.clone();
        grid.row_clicked.connect(move |record| clicked_clone.lock().push(record.id().clone()));
        grid.click_row(&RecordId::Int(2)).unwrap();
        assert!(grid.click_row(&RecordId::Int(8)).is_err());
        assert_eq!(*clicked.lock(), vec![RecordId::Int(2)]);
    }

    #[test]
    fn test_duplicate_columns_rejected() {
        let columns = vec![ColumnDescriptor::new("a"), ColumnDescriptor::new("a")];
        assert!(matches!(
            DataGrid::new(Vec::new(), columns, GridOptions::default()),
            Err(GridError::DuplicateColumnKey { .. })
        ));
    }

    #[test]
    fn test_state_serializes() {
        let mut grid = grid(3);
        grid.set_search_term("item");
        grid.set_filter("status", "ACTIVE");
        grid.set_sort("name", SortDirection::Desc);

        let value = serde_json::to_value(grid.state()).unwrap();
        assert_eq!(value["searchTerm"], json!("item"));
        assert_eq!(value["filters"], json!({"status": "ACTIVE"}));
        assert_eq!(value["sort"], json!({"key": "name", "direction": "desc"}));
        assert_eq!(value["page"], json!({"currentPage": 1, "itemsPerPage": 10}));
    }
}
