//! Horizon DataGrid - A tabular data engine for record collections.
//!
//! Takes a collection of JSON records and a list of column descriptors and
//! reduces them to one page of rows: free-text search, per-column
//! categorical filters, a stable single-key sort and pagination, plus
//! multi-row selection with a tri-state "select all visible" aggregate.
//!
//! Rendering is left to the caller; the engine only computes what to show.
//!
//! # Example
//!
//! ```
//! use horizon_datagrid::prelude::*;
//! use serde_json::json;
//!
//! fn main() -> Result<(), GridError> {
//!     let columns = vec![
//!         ColumnDescriptor::new("name").with_header("Name").with_accessor("name").sortable(),
//!         ColumnDescriptor::new("status").with_accessor("status").filterable(),
//!     ];
//!     let mut grid = DataGrid::from_values(
//!         vec![
//!             json!({"id": 1, "name": "Apple", "status": "ACTIVE"}),
//!             json!({"id": 2, "name": "Banana", "status": "DRAFT"}),
//!         ],
//!         columns,
//!         GridOptions::default(),
//!     )?;
//!
//!     grid.set_filter("status", "ACTIVE");
//!     grid.toggle_all_visible();
//!
//!     let view = grid.view();
//!     assert_eq!(view.rows.len(), 1);
//!     assert_eq!(view.selection, AggregateState::All);
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod grid;
pub mod options;
pub mod prelude;

pub use error::{GridError, Result};
pub use grid::DataGrid;
pub use horizon_datagrid_core::{ConnectionId, Signal, logging};
pub use options::GridOptions;
