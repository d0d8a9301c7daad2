//! Grid configuration.
//!
//! [`GridOptions`] switches pipeline stages on and off and sets the default
//! page size. Options can be built in code or loaded from JSON or TOML:
//!
//! ```
//! use horizon_datagrid::GridOptions;
//!
//! let options = GridOptions::from_toml(r#"
//!     selectable = false
//!     itemsPerPage = 25
//! "#).unwrap();
//!
//! assert!(!options.selectable);
//! assert!(options.searchable);
//! assert_eq!(options.items_per_page, 25);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{GridError, Result};
use crate::grid::DEFAULT_ITEMS_PER_PAGE;

/// Recognized grid options. Every stage is enabled by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GridOptions {
    /// Enables the search stage.
    pub searchable: bool,
    /// Enables the column filter stage and its controls.
    pub filterable: bool,
    /// Enables selection tracking.
    pub selectable: bool,
    /// Enables the sort stage.
    pub sortable: bool,
    /// Enables paging; when off, one page holds everything.
    pub pagination: bool,
    /// Default page size.
    pub items_per_page: usize,
}

impl Default for GridOptions {
    fn default() -> Self {
        Self {
            searchable: true,
            filterable: true,
            selectable: true,
            sortable: true,
            pagination: true,
            items_per_page: DEFAULT_ITEMS_PER_PAGE,
        }
    }
}

impl GridOptions {
    /// Parses options from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        let options: Self = serde_json::from_str(json)?;
        options.validate()
    }

    /// Parses options from TOML.
    pub fn from_toml(toml: &str) -> Result<Self> {
        let options: Self = toml::from_str(toml)?;
        options.validate()
    }

    /// Checks option values.
    pub fn validate(self) -> Result<Self> {
        if self.items_per_page == 0 {
            return Err(GridError::InvalidPageSize);
        }
        Ok(self)
    }

    /// Sets whether search is enabled.
    pub fn with_searchable(mut self, enabled: bool) -> Self {
        self.searchable = enabled;
        self
    }

    /// Sets whether column filters are enabled.
    pub fn with_filterable(mut self, enabled: bool) -> Self {
        self.filterable = enabled;
        self
    }

    /// Sets whether selection is enabled.
    pub fn with_selectable(mut self, enabled: bool) -> Self {
        self.selectable = enabled;
        self
    }

    /// Sets whether sorting is enabled.
    pub fn with_sortable(mut self, enabled: bool) -> Self {
        self.sortable = enabled;
        self
    }

    /// Sets whether paging is enabled.
    pub fn with_pagination(mut self, enabled: bool) -> Self {
        self.pagination = enabled;
        self
    }

    /// Sets the default page size.
    pub fn with_items_per_page(mut self, items_per_page: usize) -> Self {
        self.items_per_page = items_per_page;
        self
    }
}
