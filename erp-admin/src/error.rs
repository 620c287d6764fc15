//! Screen error types

use datatable::{EditError, TableError};
use erp_lib::error::{Error as BackendError, ValidationErrors};
use erp_lib::model::{ItemAction, Resource};

/// Errors surfaced by list screens.
///
/// Every variant has already been reported through the screen's notifier
/// by the time it is returned.
#[derive(Debug, thiserror::Error)]
pub enum ScreenError {
    #[error(transparent)]
    Table(#[from] TableError),

    #[error(transparent)]
    Edit(#[from] EditError),

    #[error(transparent)]
    Backend(#[from] BackendError),

    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    #[error("{resource} does not support '{}'", .action.path())]
    UnsupportedAction {
        resource: Resource,
        action: ItemAction,
    },

    #[error("Unknown action '{0}'")]
    UnknownAction(String),

    #[error("Record has no '{0}' field")]
    MissingId(String),

    #[error("Export failed: {0}")]
    Export(#[from] serde_json::Error),

    #[error("Unknown screen '{0}'")]
    UnknownScreen(String),
}
