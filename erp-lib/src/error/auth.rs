//! Authentication error types

/// Errors raised while obtaining or using credentials.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// No token is configured.
    #[error("No access token configured")]
    MissingToken,

    /// Access token expired.
    #[error("Access token expired")]
    TokenExpired,

    /// The backend rejected the token.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
}
