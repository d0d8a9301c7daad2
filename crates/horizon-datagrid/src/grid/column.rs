//! Column descriptors.
//!
//! A [`ColumnDescriptor`] declares how one field of a record participates in
//! search, filtering, sorting and rendering.
//!
//! # Example
//!
//! ```
//! use horizon_datagrid::grid::{CellValue, ColumnDescriptor, FilterOption};
//!
//! let columns = vec![
//!     ColumnDescriptor::new("code").with_header("Code").with_accessor("code").sortable(),
//!     ColumnDescriptor::new("discountType")
//!         .with_header("Discount type")
//!         .with_accessor("discountType")
//!         .sortable()
//!         .filterable()
//!         .with_filter_options(vec![
//!             FilterOption::new("PERCENTAGE", "Percentage"),
//!             FilterOption::new("FIXED_AMOUNT", "Fixed amount"),
//!         ]),
//!     ColumnDescriptor::new("summary").with_render(|record| {
//!         CellValue::from(format!("#{}", record.id()))
//!     }),
//! ];
//! # assert_eq!(columns.len(), 3);
//! ```

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::record::Record;
use super::value::CellValue;

/// Type alias for a column render function.
///
/// Render functions are pure: they map a record to what the cell shows. The
/// engine never inspects them beyond calling them.
pub type RenderFn = Arc<dyn Fn(&Record) -> CellValue + Send + Sync>;

/// One choice offered by a column's filter control.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterOption {
    /// Raw value records are compared against.
    pub value: Value,
    /// Human-readable label.
    pub label: String,
}

impl FilterOption {
    /// Creates a filter option.
    pub fn new(value: impl Into<Value>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// Declarative metadata for one grid column.
#[derive(Clone)]
pub struct ColumnDescriptor {
    key: String,
    header: Option<String>,
    accessor: Option<String>,
    sortable: bool,
    filterable: bool,
    filter_options: Option<Vec<FilterOption>>,
    render: Option<RenderFn>,
}

impl ColumnDescriptor {
    /// Creates a column with the given unique key and no capabilities.
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            header: None,
            accessor: None,
            sortable: false,
            filterable: false,
            filter_options: None,
            render: None,
        }
    }

    /// Sets the header label.
    pub fn with_header(mut self, header: impl Into<String>) -> Self {
        self.header = Some(header.into());
        self
    }

    /// Sets the accessor path into records (see [`Record::resolve`]).
    pub fn with_accessor(mut self, accessor: impl Into<String>) -> Self {
        self.accessor = Some(accessor.into());
        self
    }

    /// Marks the column as sortable.
    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    /// Marks the column as filterable.
    pub fn filterable(mut self) -> Self {
        self.filterable = true;
        self
    }

    /// Sets the ordered choices for the column's filter control.
    pub fn with_filter_options(mut self, options: Vec<FilterOption>) -> Self {
        self.filter_options = Some(options);
        self
    }

    /// Sets a render function.
    pub fn with_render<F>(mut self, render: F) -> Self
    where
        F: Fn(&Record) -> CellValue + Send + Sync + 'static,
    {
        self.render = Some(Arc::new(render));
        self
    }

    /// The column's unique key.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The header label, falling back to the key.
    pub fn header(&self) -> &str {
        self.header.as_deref().unwrap_or(&self.key)
    }

    /// The accessor path, if any. Columns without one are not searchable.
    pub fn accessor(&self) -> Option<&str> {
        self.accessor.as_deref()
    }

    /// Whether the column can be sorted.
    pub fn is_sortable(&self) -> bool {
        self.sortable
    }

    /// Whether the column offers a filter control.
    pub fn is_filterable(&self) -> bool {
        self.filterable
    }

    /// The filter choices, if declared.
    pub fn filter_options(&self) -> Option<&[FilterOption]> {
        self.filter_options.as_deref()
    }

    /// Whether the column has a render function.
    pub fn has_render(&self) -> bool {
        self.render.is_some()
    }

    /// Returns the raw value this column's accessor yields for `record`.
    pub fn value<'r>(&self, record: &'r Record) -> Option<&'r Value> {
        self.accessor.as_deref().and_then(|path| record.resolve(path))
    }

    /// Produces the presentable value for `record`.
    ///
    /// Uses the render function when present; otherwise converts the accessor
    /// value, falling back to [`CellValue::Empty`].
    pub fn cell(&self, record: &Record) -> CellValue {
        match &self.render {
            Some(render) => render(record),
            None => self.value(record).map(CellValue::from_json).unwrap_or_default(),
        }
    }
}

impl fmt::Debug for ColumnDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnDescriptor")
            .field("key", &self.key)
            .field("header", &self.header)
            .field("accessor", &self.accessor)
            .field("sortable", &self.sortable)
            .field("filterable", &self.filterable)
            .field("filter_options", &self.filter_options)
            .field("render", &self.render.is_some())
            .finish()
    }
}

/// Finds a column by key.
pub(crate) fn find_column<'c>(
    columns: &'c [ColumnDescriptor],
    key: &str,
) -> Option<&'c ColumnDescriptor> {
    columns.iter().find(|column| column.key == key)
}
