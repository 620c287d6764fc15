//! Request execution
//!
//! HTTP plumbing for [`ErpClient`] and its [`Backend`] implementation.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Method;
use reqwest::header::HeaderMap;
use reqwest::header::HeaderValue;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::Backend;
use super::ListQuery;
use crate::ErpClient;
use crate::error::ApiError;
use crate::error::AuthError;
use crate::error::BulkCreateError;
use crate::error::Error;
use crate::model::{CollectionAction, ItemAction, ListResponse, Record, Resource};

impl ErpClient {
    /// Builds `<base>/<path>/` with an optional query string.
    fn build_url(&self, path: &str, query: Option<&ListQuery>) -> String {
        let mut url = format!("{}/{}/", self.inner.base_url, path.trim_matches('/'));
        if let Some(query) = query {
            let qs = query.to_query_string();
            if !qs.is_empty() {
                url.push('?');
                url.push_str(&qs);
            }
        }
        url
    }

    fn item_path(resource: Resource, id: &str) -> String {
        format!("{}/{}", resource.path(), urlencoding::encode(id))
    }

    fn default_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert("Content-Type", HeaderValue::from_static("application/json"));
        headers.insert("Accept", HeaderValue::from_static("application/json"));
        headers
    }

    /// Sends an authenticated request and returns the raw response.
    ///
    /// Status codes are not inspected.
    async fn send(
        &self,
        method: Method,
        url: &str,
        body: Option<&Value>,
    ) -> Result<reqwest::Response, Error> {
        let token = self
            .inner
            .token_provider
            .token(&self.inner.base_url)
            .await?;

        log::debug!("{} {}", method, url);
        let mut request = self
            .inner
            .http_client
            .request(method, url)
            .headers(self.default_headers())
            .bearer_auth(token.secret());

        if let Some(timeout) = self.inner.timeout {
            request = request.timeout(timeout);
        }

        if let Some(body) = body {
            request = request.body(serde_json::to_string(body)?);
        }

        request.send().await.map_err(|e| self.map_send_error(e))
    }

    fn map_send_error(&self, err: reqwest::Error) -> Error {
        if err.is_timeout() {
            let limit = self.inner.timeout.unwrap_or(Duration::ZERO);
            log::warn!("Request timed out after {:?}", limit);
            return Error::Api(ApiError::Timeout(limit));
        }
        log::warn!("Request failed: {}", err);
        Error::Api(ApiError::Network(err))
    }

    /// Sends a request and fails on non-success statuses.
    async fn request(
        &self,
        method: Method,
        url: &str,
        body: Option<&Value>,
    ) -> Result<reqwest::Response, Error> {
        let response = self.send(method, url, body).await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        log::warn!("HTTP {} from {}: {}", status.as_u16(), url, body);
        if status.as_u16() == 401 {
            let error = ApiError::from_body(401, body);
            let message = match &error {
                ApiError::Http { message, .. } => message.clone(),
                other => other.to_string(),
            };
            return Err(Error::Auth(AuthError::Unauthorized(message)));
        }
        Err(Error::Api(ApiError::from_body(status.as_u16(), body)))
    }

    /// Reads the response body as text.
    async fn read_body(response: reqwest::Response) -> Result<String, Error> {
        response
            .text()
            .await
            .map_err(|e| Error::Api(ApiError::Network(e)))
    }

    async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, Error> {
        let body = Self::read_body(response).await?;
        serde_json::from_str(&body)
            .map_err(|e| Error::Api(ApiError::parse_with_body(e.to_string(), body)))
    }

    /// Reads an optional JSON body. Empty bodies (e.g. 204) are `None`.
    async fn read_optional_json(response: reqwest::Response) -> Result<Option<Value>, Error> {
        let body = Self::read_body(response).await?;
        if body.trim().is_empty() {
            return Ok(None);
        }
        serde_json::from_str(&body)
            .map(Some)
            .map_err(|e| Error::Api(ApiError::parse_with_body(e.to_string(), body)))
    }
}

fn to_value(record: &Record) -> Value {
    Value::Object(record.clone())
}

#[async_trait]
impl Backend for ErpClient {
    async fn list(&self, resource: Resource, query: &ListQuery) -> Result<ListResponse, Error> {
        let url = self.build_url(resource.path(), Some(query));
        let response = self.request(Method::GET, &url, None).await?;
        let body = Self::read_body(response).await?;
        let list = ListResponse::decode(&body)?;
        log::debug!(
            "Listed {}: {} rows of {}",
            resource,
            list.records().len(),
            list.total()
        );
        Ok(list)
    }

    async fn retrieve(&self, resource: Resource, id: &str) -> Result<Record, Error> {
        let url = self.build_url(&Self::item_path(resource, id), None);
        let response = self.request(Method::GET, &url, None).await?;
        Self::read_json(response).await
    }

    async fn create(&self, resource: Resource, record: &Record) -> Result<Record, Error> {
        let url = self.build_url(resource.path(), None);
        let response = self
            .request(Method::POST, &url, Some(&to_value(record)))
            .await?;
        Self::read_json(response).await
    }

    async fn update(&self, resource: Resource, id: &str, record: &Record) -> Result<Record, Error> {
        let url = self.build_url(&Self::item_path(resource, id), None);
        let response = self
            .request(Method::PATCH, &url, Some(&to_value(record)))
            .await?;
        Self::read_json(response).await
    }

    async fn delete(&self, resource: Resource, id: &str) -> Result<(), Error> {
        let url = self.build_url(&Self::item_path(resource, id), None);
        self.request(Method::DELETE, &url, None).await?;
        Ok(())
    }

    async fn action(
        &self,
        resource: Resource,
        id: &str,
        action: ItemAction,
        body: Option<&Record>,
    ) -> Result<Option<Value>, Error> {
        let path = format!("{}/{}", Self::item_path(resource, id), action.path());
        let url = self.build_url(&path, None);
        let body = body.map(to_value);
        let response = self.request(Method::POST, &url, body.as_ref()).await?;
        Self::read_optional_json(response).await
    }

    async fn collection_action(
        &self,
        resource: Resource,
        action: CollectionAction,
        records: &[Record],
    ) -> Result<Option<Value>, Error> {
        let path = format!("{}/{}", resource.path(), action.path());
        let url = self.build_url(&path, None);
        let body = Value::Array(records.iter().map(to_value).collect());

        let response = self.send(action.method(), &url, Some(&body)).await?;
        let status = response.status();
        if status.is_success() {
            return Self::read_optional_json(response).await;
        }

        let text = response.text().await.unwrap_or_default();
        if action == CollectionAction::BulkCreate
            && let Ok(json) = serde_json::from_str::<Value>(&text)
            && let Some(bulk) = BulkCreateError::from_body(status.as_u16(), &json)
        {
            log::warn!("{}", bulk);
            return Err(Error::BulkCreate(bulk));
        }
        log::warn!("HTTP {} from {}: {}", status.as_u16(), url, text);
        Err(Error::Api(ApiError::from_body(status.as_u16(), text)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::StaticTokenProvider;

    fn client() -> ErpClient {
        ErpClient::builder()
            .url("http://erp.local/api")
            .token_provider(StaticTokenProvider::new("t"))
            .build()
            .unwrap()
    }

    #[test]
    fn test_collection_url() {
        let query = ListQuery::new().page(1).page_size(20);
        assert_eq!(
            client().build_url("tasks/parts", Some(&query)),
            "http://erp.local/api/tasks/parts/?page=1&page_size=20"
        );
        assert_eq!(
            client().build_url("tasks/parts", Some(&ListQuery::new())),
            "http://erp.local/api/tasks/parts/"
        );
    }

    #[test]
    fn test_item_url_encodes_id() {
        let path = ErpClient::item_path(Resource::JobOrders, "2024/01");
        assert_eq!(
            client().build_url(&path, None),
            "http://erp.local/api/projects/job-orders/2024%2F01/"
        );
    }
}
