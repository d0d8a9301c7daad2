//! Error types for the grid engine.

use crate::grid::RecordId;

/// Result type alias for grid operations.
pub type Result<T> = std::result::Result<T, GridError>;

/// Errors that can occur while building or driving a grid.
///
/// Empty data, stale page numbers, missing accessors and selections of
/// unknown ids are not errors; they degrade to empty values, clamped pages,
/// or no-ops.
#[derive(Debug, thiserror::Error)]
pub enum GridError {
    /// Two columns share the same key.
    #[error("Duplicate column key '{key}'")]
    DuplicateColumnKey { key: String },

    /// A record could not be accepted into the record set.
    #[error("Invalid record at index {index}: {reason}")]
    InvalidRecord { index: usize, reason: String },

    /// Page size must be at least one.
    #[error("Items per page must be greater than zero")]
    InvalidPageSize,

    /// Page numbers are 1-based.
    #[error("Invalid page number {page}: pages start at 1")]
    InvalidPage { page: usize },

    /// No bulk or row action is registered under this label.
    #[error("No action registered with label '{label}'")]
    UnknownAction { label: String },

    /// A row event referenced an id that is not in the record set.
    #[error("No record with id '{id}'")]
    UnknownRecord { id: RecordId },

    /// Grid options could not be parsed.
    #[error("Invalid grid options: {0}")]
    Options(String),
}

impl GridError {
    /// Create a duplicate column key error.
    pub fn duplicate_column(key: impl Into<String>) -> Self {
        Self::DuplicateColumnKey { key: key.into() }
    }

    /// Create an invalid record error.
    pub fn invalid_record(index: usize, reason: impl Into<String>) -> Self {
        Self::InvalidRecord {
            index,
            reason: reason.into(),
        }
    }

    /// Create an unknown action error.
    pub fn unknown_action(label: impl Into<String>) -> Self {
        Self::UnknownAction {
            label: label.into(),
        }
    }
}

impl From<serde_json::Error> for GridError {
    fn from(err: serde_json::Error) -> Self {
        Self::Options(err.to_string())
    }
}

impl From<toml::de::Error> for GridError {
    fn from(err: toml::de::Error) -> Self {
        Self::Options(err.to_string())
    }
}
