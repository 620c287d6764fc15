//! Bearer tokens and their providers

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::AuthError;

/// Session token sent as `Authorization: Bearer <secret>`.
#[derive(Clone)]
pub struct BearerToken {
    secret: String,
    expires_at: Option<DateTime<Utc>>,
}

impl BearerToken {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            expires_at: None,
        }
    }

    /// A token the backend stops accepting at `expires_at`.
    pub fn expiring(secret: impl Into<String>, expires_at: DateTime<Utc>) -> Self {
        Self {
            secret: secret.into(),
            expires_at: Some(expires_at),
        }
    }

    pub fn secret(&self) -> &str {
        &self.secret
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.expires_at
    }

    /// Tokens without a known expiry never count as expired.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        matches!(self.expires_at, Some(at) if now >= at)
    }
}

impl std::fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BearerToken")
            .field("secret", &"***")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// Supplies the token for each request of an [`ErpClient`](crate::ErpClient).
///
/// Login, refresh and logout belong to the implementation.
#[async_trait]
pub trait TokenProvider: Send + Sync {
    async fn token(&self, base_url: &str) -> Result<BearerToken, AuthError>;
}

/// Hands out one fixed token, e.g. from `ERP_TOKEN`.
///
/// ```
/// use erp_lib::auth::StaticTokenProvider;
///
/// let provider = StaticTokenProvider::new("4f1c0e...");
/// ```
#[derive(Debug, Clone)]
pub struct StaticTokenProvider {
    token: BearerToken,
}

impl StaticTokenProvider {
    pub fn new(secret: impl Into<String>) -> Self {
        Self::with_token(BearerToken::new(secret))
    }

    pub fn with_token(token: BearerToken) -> Self {
        Self { token }
    }
}

#[async_trait]
impl TokenProvider for StaticTokenProvider {
    async fn token(&self, _base_url: &str) -> Result<BearerToken, AuthError> {
        if self.token.secret.trim().is_empty() {
            return Err(AuthError::MissingToken);
        }
        if self.token.is_expired_at(Utc::now()) {
            return Err(AuthError::TokenExpired);
        }
        Ok(self.token.clone())
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[tokio::test]
    async fn test_static_provider_returns_token() {
        let provider = StaticTokenProvider::new("abc");
        let token = provider.token("http://erp").await.unwrap();
        assert_eq!(token.secret(), "abc");
    }

    #[tokio::test]
    async fn test_blank_token_is_missing() {
        for secret in ["", "   "] {
            let provider = StaticTokenProvider::new(secret);
            assert!(matches!(
                provider.token("http://erp").await,
                Err(AuthError::MissingToken)
            ));
        }
    }

    #[tokio::test]
    async fn test_expired_token_is_refused() {
        let expired = BearerToken::expiring("abc", Utc::now() - chrono::Duration::minutes(1));
        let provider = StaticTokenProvider::with_token(expired);
        assert!(matches!(
            provider.token("http://erp").await,
            Err(AuthError::TokenExpired)
        ));
    }

    #[test]
    fn test_expiry_boundary() {
        let at = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
        let token = BearerToken::expiring("abc", at);
        assert!(!token.is_expired_at(at - chrono::Duration::seconds(1)));
        assert!(token.is_expired_at(at));
        assert!(!BearerToken::new("abc").is_expired_at(at));
    }

    #[test]
    fn test_debug_hides_secret() {
        let token = BearerToken::new("super-secret");
        assert!(!format!("{:?}", token).contains("super-secret"));
    }
}
