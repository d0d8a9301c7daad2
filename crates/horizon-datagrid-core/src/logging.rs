//! Logging facilities for Horizon DataGrid.
//!
//! Horizon DataGrid uses the `tracing` crate for instrumentation. The library
//! never installs a subscriber; to see logs, install one in your application:
//!
//! ```ignore
//! fn main() {
//!     tracing_subscriber::fmt()
//!         .with_env_filter("horizon_datagrid::pipeline=trace")
//!         .init();
//! }
//! ```

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Signal/slot system target.
    pub const SIGNAL: &str = "horizon_datagrid_core::signal";
    /// Record set construction and replacement.
    pub const RECORDS: &str = "horizon_datagrid::records";
    /// Search, filter and sort stages plus the order cache.
    pub const PIPELINE: &str = "horizon_datagrid::pipeline";
    /// Page slicing and bounds clamping.
    pub const PAGINATOR: &str = "horizon_datagrid::paginator";
    /// Selection tracking.
    pub const SELECTION: &str = "horizon_datagrid::selection";
    /// Row and bulk action dispatch.
    pub const ACTIONS: &str = "horizon_datagrid::actions";
}

/// Installs a `tracing-subscriber` that honours `RUST_LOG`, for tests only.
#[cfg(test)]
pub(crate) fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
