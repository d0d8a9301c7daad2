//! Core systems for Horizon DataGrid.
//!
//! This crate provides the pieces the grid engine shares with its callers:
//!
//! - **Signal/Slot System**: Type-safe notifications for row clicks,
//!   selection changes and page corrections
//! - **Logging**: Stable `tracing` target names for filtering engine logs
//!
//! # Signal/Slot Example
//!
//! ```
//! use horizon_datagrid_core::Signal;
//!
//! let clicked = Signal::<u32>::new();
//! let conn_id = clicked.connect(|row| {
//!     println!("Row {} clicked", row);
//! });
//!
//! clicked.emit(7);
//! clicked.disconnect(conn_id);
//! ```

pub mod logging;
pub mod signal;

pub use signal::{ConnectionId, Signal};
