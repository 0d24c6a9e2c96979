//! HTTP transport for the accounting API

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::RwLock;
use reqwest::{Client, RequestBuilder, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use shared::ApiErrorBody;

use crate::{ClientConfig, ClientError, ClientResult};

/// HTTP client trait
///
/// Paths are absolute (`/api/...`) and already carry their query string.
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn get<T: DeserializeOwned + Send>(&self, path: &str) -> ClientResult<T>;
    /// GET returning the raw body (spreadsheet downloads)
    async fn get_bytes(&self, path: &str) -> ClientResult<Vec<u8>>;
    async fn post<T: DeserializeOwned + Send, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T>;
    /// POST whose success body is plain text
    async fn post_text<B: Serialize + Sync>(&self, path: &str, body: &B) -> ClientResult<String>;
    async fn put<T: DeserializeOwned + Send, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T>;
    /// PATCH without a body; parameters travel in the query string
    async fn patch(&self, path: &str) -> ClientResult<()>;
    async fn delete(&self, path: &str) -> ClientResult<()>;
    fn token(&self) -> Option<String>;
    fn set_token(&self, token: Option<String>);
}

/// Network HTTP client
///
/// Clones share the bearer token.
#[derive(Debug, Clone)]
pub struct NetworkHttpClient {
    client: Client,
    base_url: String,
    token: Arc<RwLock<Option<String>>>,
}

impl NetworkHttpClient {
    pub fn new(base_url: &str) -> ClientResult<Self> {
        Self::from_config(&ClientConfig::new(base_url))
    }

    pub fn from_config(config: &ClientConfig) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: Arc::new(RwLock::new(config.token.clone())),
        })
    }

    /// Base URL without trailing slash
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    fn auth_header(&self) -> Option<String> {
        self.token.read().as_ref().map(|t| format!("Bearer {}", t))
    }

    fn authorize(&self, req: RequestBuilder) -> RequestBuilder {
        match self.auth_header() {
            Some(auth) => req.header(reqwest::header::AUTHORIZATION, auth),
            None => req,
        }
    }

    async fn send(&self, method: &'static str, path: &str, req: RequestBuilder) -> ClientResult<Response> {
        tracing::debug!(method, path = %path, "API request");
        let response = self.authorize(req).send().await?;
        Self::check_status(method, path, response).await
    }

    /// Map a non-success response to [`ClientError::Api`]
    async fn check_status(method: &str, path: &str, response: Response) -> ClientResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        let body = ApiErrorBody::from_text(&text).unwrap_or_default();
        let code = body.code(status.as_u16());
        let message = body.best_message().unwrap_or_default().to_string();
        tracing::warn!(
            method,
            path = %path,
            status = status.as_u16(),
            code = %code,
            reason = code.message(),
            "API request failed"
        );
        Err(ClientError::Api {
            code,
            status: status.as_u16(),
            message,
        })
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> ClientResult<T> {
        let bytes = response.bytes().await?;
        if bytes.is_empty() {
            return Err(ClientError::InvalidResponse("empty response body".into()));
        }
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[async_trait]
impl HttpClient for NetworkHttpClient {
    async fn get<T: DeserializeOwned + Send>(&self, path: &str) -> ClientResult<T> {
        let req = self.client.get(self.url(path));
        let response = self.send("GET", path, req).await?;
        Self::decode(response).await
    }

    async fn get_bytes(&self, path: &str) -> ClientResult<Vec<u8>> {
        let req = self.client.get(self.url(path));
        let response = self.send("GET", path, req).await?;
        Ok(response.bytes().await?.to_vec())
    }

    async fn post<T: DeserializeOwned + Send, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let req = self.client.post(self.url(path)).json(body);
        let response = self.send("POST", path, req).await?;
        Self::decode(response).await
    }

    async fn post_text<B: Serialize + Sync>(&self, path: &str, body: &B) -> ClientResult<String> {
        let req = self.client.post(self.url(path)).json(body);
        let response = self.send("POST", path, req).await?;
        Ok(response.text().await?)
    }

    async fn put<T: DeserializeOwned + Send, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let req = self.client.put(self.url(path)).json(body);
        let response = self.send("PUT", path, req).await?;
        Self::decode(response).await
    }

    async fn patch(&self, path: &str) -> ClientResult<()> {
        let req = self.client.patch(self.url(path));
        self.send("PATCH", path, req).await?;
        Ok(())
    }

    async fn delete(&self, path: &str) -> ClientResult<()> {
        let req = self.client.delete(self.url(path));
        self.send("DELETE", path, req).await?;
        Ok(())
    }

    fn token(&self) -> Option<String> {
        self.token.read().clone()
    }

    fn set_token(&self, token: Option<String>) {
        *self.token.write() = token;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_join() {
        let client = NetworkHttpClient::new("http://localhost:8080/").unwrap();
        assert_eq!(client.base_url(), "http://localhost:8080");
        assert_eq!(client.url("/api/users"), "http://localhost:8080/api/users");
        assert_eq!(client.url("api/users"), "http://localhost:8080/api/users");
    }

    #[test]
    fn test_token_shared_between_clones() {
        let client = NetworkHttpClient::new("http://localhost:8080").unwrap();
        let clone = client.clone();
        assert!(client.auth_header().is_none());

        clone.set_token(Some("abc.def.ghi".into()));
        assert_eq!(client.auth_header().as_deref(), Some("Bearer abc.def.ghi"));

        client.set_token(None);
        assert!(clone.token().is_none());
    }

    #[test]
    fn test_token_from_config() {
        let config = ClientConfig::new("http://localhost:8080").with_token("t");
        let client = NetworkHttpClient::from_config(&config).unwrap();
        assert_eq!(client.token().as_deref(), Some("t"));
    }
}
