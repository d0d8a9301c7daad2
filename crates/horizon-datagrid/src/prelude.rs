//! Prelude module for Horizon DataGrid.
//!
//! This module re-exports the most commonly used types for convenient importing:
//!
//! ```
//! use horizon_datagrid::prelude::*;
//! ```

// ============================================================================
// Controller and Configuration
// ============================================================================

pub use crate::error::GridError;
pub use crate::grid::{DataGrid, FilterControl, GridState, GridView, ViewStatus};
pub use crate::options::GridOptions;

// ============================================================================
// Records and Columns
// ============================================================================

pub use crate::grid::{CellValue, ColumnDescriptor, FilterOption, Record, RecordId, RecordSet};

// ============================================================================
// Pipeline Stages
// ============================================================================

pub use crate::grid::{
    ColumnFilterSet, ColumnFilterState, Page, PageLink, PageState, Paginator, SearchFilter,
    SortDirection, SortIndicator, SortState, Sorter,
};

// ============================================================================
// Selection and Signals
// ============================================================================

pub use crate::grid::{AggregateState, SelectionTracker};
pub use horizon_datagrid_core::{ConnectionId, Signal};
