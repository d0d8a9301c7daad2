//! The tabular data engine.
//!
//! A grid reduces a record set to one page of rows through a fixed
//! pipeline. Every stage is a pure function of its input and the
//! interactive state, and can be used on its own:
//!
//! - `SearchFilter`: free-text substring search across accessor values
//! - `ColumnFilterSet`: per-column categorical equality filters, ANDed
//! - `Sorter`: stable single-key sort
//! - `Paginator`: fixed-size page slicing with bounds clamping
//!
//! `SelectionTracker` keeps the selected ids alongside, independent of the
//! pipeline, and derives a tri-state aggregate for whatever is visible.
//!
//! `DataGrid` ties these together, caches the filtered and sorted order,
//! and exposes a render snapshot through `GridView`.
//!
//! # Architecture Overview
//!
//! ```text
//! ┌───────────┐   ┌────────┐   ┌─────────┐   ┌──────┐   ┌──────┐
//! │ RecordSet │──>│ Search │──>│ Filters │──>│ Sort │──>│ Page │──> rows
//! └───────────┘   └────────┘   └─────────┘   └──────┘   └──────┘
//!                                                           │
//!                      ┌──────────────────┐    visible ids  │
//!                      │ SelectionTracker │<────────────────┘
//!                      └──────────────────┘
//! ```
//!
//! # Example
//!
//! ```
//! use horizon_datagrid::grid::{
//!     ColumnDescriptor, ColumnFilterSet, ColumnFilterState, Record, SearchFilter,
//!     SortDirection, SortState, Sorter,
//! };
//! use serde_json::json;
//!
//! let records: Vec<Record> = vec![
//!     json!({"id": 1, "name": "Alpha", "status": "ACTIVE"}),
//!     json!({"id": 2, "name": "Beta", "status": "DRAFT"}),
//!     json!({"id": 3, "name": "Gamma", "status": "ACTIVE"}),
//! ]
//! .into_iter()
//! .map(|value| Record::from_value(value).unwrap())
//! .collect();
//!
//! let columns = vec![ColumnDescriptor::new("name").with_accessor("name").sortable()];
//! let refs: Vec<&Record> = records.iter().collect();
//!
//! let searched = SearchFilter::apply(&refs, "a", &columns);
//! let filtered = ColumnFilterSet::apply(
//!     &searched,
//!     &ColumnFilterState::new().with("status", "ACTIVE"),
//!     &columns,
//! );
//! let sorted = Sorter::apply(&filtered, &SortState::by("name", SortDirection::Desc), &columns);
//!
//! assert_eq!(sorted[0].field("name"), Some(&json!("Gamma")));
//! ```

mod actions;
mod column;
mod column_filter;
mod data_grid;
mod paginator;
mod record;
mod record_set;
mod search;
mod selection;
mod sort;
mod value;

pub use actions::{ActionSet, BulkAction, BulkActionFn, RowAction, RowActionFn};
pub use column::{ColumnDescriptor, FilterOption, RenderFn};
pub use column_filter::{ALL, ColumnFilterSet, ColumnFilterState};
pub use data_grid::{DataGrid, FilterControl, GridState, GridView, ViewStatus};
pub use paginator::{
    DEFAULT_ITEMS_PER_PAGE, Page, PageLink, PageState, Paginator, page_links, total_pages,
};
pub use record::{ID_FIELD, Record, RecordId};
pub use record_set::RecordSet;
pub use search::SearchFilter;
pub use selection::{AggregateState, SelectionTracker};
pub use sort::{SortDirection, SortIndicator, SortState, Sorter};
pub use value::CellValue;
