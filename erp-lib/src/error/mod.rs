//! Error types

mod api;
mod auth;
mod bulk;
mod validation;

pub use api::*;
pub use auth::*;
pub use bulk::*;
pub use validation::*;

/// Top-level error for client operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Some items of a bulk create were rejected.
    #[error(transparent)]
    BulkCreate(#[from] BulkCreateError),

    /// Client-side validation rejected a record before sending.
    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Returns the HTTP status code if this is an HTTP error.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Error::Api(api) => api.status_code(),
            _ => None,
        }
    }
}
