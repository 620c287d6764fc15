//! Main ErpClient

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;

use crate::auth::TokenProvider;
use crate::error::ApiError;

/// The client for the ERP REST backend.
///
/// This client is cheap to clone (uses `Arc` internally) and can be shared
/// across tasks.
///
/// # Example
///
/// ```ignore
/// use erp_lib::{ErpClient, auth::StaticTokenProvider};
///
/// let client = ErpClient::builder()
///     .url("https://erp.example.com/api")
///     .token_provider(StaticTokenProvider::new("my-token"))
///     .timeout(Duration::from_secs(30))
///     .build()?;
///
/// let parts = client.list(Resource::Parts, &ListQuery::new().page(1)).await?;
/// ```
#[derive(Clone)]
pub struct ErpClient {
    pub(crate) inner: Arc<ErpClientInner>,
}

pub(crate) struct ErpClientInner {
    pub(crate) base_url: String,
    pub(crate) token_provider: Arc<dyn TokenProvider>,
    pub(crate) http_client: Client,
    pub(crate) timeout: Option<Duration>,
}

impl ErpClient {
    /// Creates a new builder for constructing a client.
    pub fn builder() -> ErpClientBuilder<Missing, Missing> {
        ErpClientBuilder::new()
    }

    /// Returns the base URL of the backend.
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.inner.timeout
    }
}

impl std::fmt::Debug for ErpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ErpClient")
            .field("base_url", &self.inner.base_url)
            .field("timeout", &self.inner.timeout)
            .finish_non_exhaustive()
    }
}

// =============================================================================
// Typestate Builder
// =============================================================================

/// Marker type for missing required builder fields.
pub struct Missing;

/// Marker type for set builder fields.
pub struct Set<T>(T);

/// Builder for constructing an [`ErpClient`].
///
/// Uses the typestate pattern to ensure required fields are set at compile time.
///
/// # Required Fields
///
/// - `url` - The backend API base URL
/// - `token_provider` - A [`TokenProvider`] implementation
pub struct ErpClientBuilder<Url, Provider> {
    url: Url,
    token_provider: Provider,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    http_client: Option<Client>,
}

impl ErpClientBuilder<Missing, Missing> {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            url: Missing,
            token_provider: Missing,
            timeout: None,
            connect_timeout: None,
            http_client: None,
        }
    }
}

impl Default for ErpClientBuilder<Missing, Missing> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> ErpClientBuilder<Missing, P> {
    /// Sets the backend API base URL.
    pub fn url(self, url: impl Into<String>) -> ErpClientBuilder<Set<String>, P> {
        ErpClientBuilder {
            url: Set(url.into()),
            token_provider: self.token_provider,
            timeout: self.timeout,
            connect_timeout: self.connect_timeout,
            http_client: self.http_client,
        }
    }
}

impl<U> ErpClientBuilder<U, Missing> {
    /// Sets the token provider for authentication.
    pub fn token_provider<T: TokenProvider + 'static>(
        self,
        provider: T,
    ) -> ErpClientBuilder<U, Set<Arc<dyn TokenProvider>>> {
        ErpClientBuilder {
            url: self.url,
            token_provider: Set(Arc::new(provider) as Arc<dyn TokenProvider>),
            timeout: self.timeout,
            connect_timeout: self.connect_timeout,
            http_client: self.http_client,
        }
    }
}

impl<U, P> ErpClientBuilder<U, P> {
    /// Sets the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the connection timeout.
    ///
    /// This is applied when building the HTTP client.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Sets a custom HTTP client.
    ///
    /// If not set, a default client will be created.
    pub fn http_client(mut self, client: Client) -> Self {
        self.http_client = Some(client);
        self
    }
}

impl ErpClientBuilder<Set<String>, Set<Arc<dyn TokenProvider>>> {
    /// Builds the [`ErpClient`].
    ///
    /// Fails if the URL does not parse or the HTTP client cannot be created.
    pub fn build(self) -> Result<ErpClient, ApiError> {
        let base_url = self.url.0;
        let parsed = url::Url::parse(&base_url)
            .map_err(|e| ApiError::InvalidUrl(format!("{}: {}", base_url, e)))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ApiError::InvalidUrl(format!(
                "{}: unsupported scheme '{}'",
                base_url,
                parsed.scheme()
            )));
        }

        let http_client = match self.http_client {
            Some(client) => client,
            None => {
                let mut builder = Client::builder();
                if let Some(timeout) = self.connect_timeout {
                    builder = builder.connect_timeout(timeout);
                }
                builder.build()?
            }
        };

        Ok(ErpClient {
            inner: Arc::new(ErpClientInner {
                base_url: base_url.trim_end_matches('/').to_string(),
                token_provider: self.token_provider.0,
                http_client,
                timeout: self.timeout,
            }),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::StaticTokenProvider;

    #[test]
    fn test_build_trims_trailing_slash() {
        let client = ErpClient::builder()
            .url("http://localhost:8000/api/")
            .token_provider(StaticTokenProvider::new("t"))
            .build()
            .unwrap();
        assert_eq!(client.base_url(), "http://localhost:8000/api");
    }

    #[test]
    fn test_invalid_url() {
        let result = ErpClient::builder()
            .url("not a url")
            .token_provider(StaticTokenProvider::new("t"))
            .build();
        assert!(matches!(result, Err(ApiError::InvalidUrl(_))));

        let result = ErpClient::builder()
            .url("ftp://erp")
            .token_provider(StaticTokenProvider::new("t"))
            .build();
        assert!(matches!(result, Err(ApiError::InvalidUrl(_))));
    }
}
