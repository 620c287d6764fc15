//! Table errors.

use std::time::Duration;

/// Errors raised while configuring a table.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TableError {
    /// The container id is not a declared mount point.
    #[error("mount point '{0}' not found")]
    MountNotFound(String),

    #[error("items per page must be greater than zero")]
    ZeroPageSize,

    #[error("duplicate column field '{0}'")]
    DuplicateColumn(String),

    #[error("duplicate action key '{0}'")]
    DuplicateAction(String),

    /// An editable column names no column of the table.
    #[error("editable column '{0}' does not exist")]
    UnknownEditableColumn(String),

    #[error("unknown column '{0}'")]
    UnknownColumn(String),
}

/// Errors raised by inline cell editing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EditError {
    /// A commit for this cell is already in flight.
    #[error("cell '{field}' of row '{row_id}' has a pending commit")]
    CellLocked { row_id: String, field: String },

    #[error("cell '{field}' is not editable")]
    NotEditable { field: String },

    #[error("no cell is being edited")]
    NoActiveEditor,

    #[error("row '{0}' not found")]
    RowNotFound(String),

    /// The input could not be parsed for the column kind.
    #[error("invalid value for '{field}': {message}")]
    Invalid { field: String, message: String },

    /// The edit handler did not answer in time.
    #[error("edit timed out after {0:?}")]
    Timeout(Duration),

    /// The edit handler failed.
    #[error("{0}")]
    Handler(String),
}

impl EditError {
    /// Build a handler failure from any displayable error.
    pub fn handler(err: impl std::fmt::Display) -> Self {
        EditError::Handler(err.to_string())
    }
}
