//! Remote search backend over HTTP.

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;
use std::time::Duration;
use tern_search_protocol::{
    BulkRequest, BulkResponse, CountRequest, CountResponse, CreateIndexRequest,
    CreateIndexResponse, ErrorCode, RefreshRequest, RefreshResponse, ScrollRequest, SearchError,
    SearchPage, SearchRequest,
};

use crate::backend::{DocumentSink, SearchBackend};
use crate::config::BackendConfig;
use crate::error::{Result, ServiceError};

/// Search backend that delegates to a remote engine via HTTP.
///
/// Each protocol operation is a JSON POST to a versioned route under
/// the configured base URL. Error bodies are parsed back into protocol
/// [`SearchError`] envelopes where possible so callers see structured
/// failures instead of raw HTTP status text.
pub struct RemoteBackend {
    /// HTTP client.
    client: Client,
    /// Engine base URL, without the `/v1/...` route suffix.
    base_url: String,
    /// Optional authentication token.
    auth_token: Option<String>,
    /// Request timeout.
    request_timeout: Duration,
}

impl RemoteBackend {
    /// Create a new remote backend from configuration.
    pub fn from_config(config: &BackendConfig) -> Result<Self> {
        let connect_timeout = Duration::from_millis(config.connect_timeout_ms.unwrap_or(5_000));
        let request_timeout = Duration::from_millis(config.request_timeout_ms.unwrap_or(30_000));

        let client = Client::builder()
            .connect_timeout(connect_timeout)
            .timeout(request_timeout)
            .build()
            .map_err(|e| ServiceError::Internal {
                message: format!("failed to create HTTP client: {}", e),
            })?;

        Ok(Self {
            client,
            base_url: config.endpoint.clone(),
            auth_token: config.auth_token.clone(),
            request_timeout,
        })
    }

    /// Create a new remote backend with default timeouts.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            auth_token: None,
            request_timeout: Duration::from_secs(30),
        }
    }

    /// Set the authentication token.
    pub fn with_auth_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    fn route(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    async fn post_json<Req, Resp>(&self, path: &str, request: &Req) -> Result<Resp>
    where
        Req: Serialize + Sync,
        Resp: DeserializeOwned,
    {
        let mut http_request = self.client.post(self.route(path)).json(request);

        if let Some(ref token) = self.auth_token {
            http_request = http_request.bearer_auth(token);
        }

        let response = http_request
            .timeout(self.request_timeout)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ServiceError::Timeout {
                        message: format!("request to {} timed out: {}", path, e),
                    }
                } else if e.is_connect() {
                    ServiceError::Connect {
                        message: format!("failed to connect to search engine: {}", e),
                    }
                } else {
                    ServiceError::Backend {
                        message: format!("request to {} failed: {}", path, e),
                    }
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            // Prefer the structured protocol error when the body parses.
            if let Ok(search_error) = serde_json::from_str::<SearchError>(&body) {
                let code = search_error.error.code;
                let msg = search_error.error.message;
                return Err(match code {
                    ErrorCode::ScrollExpired => ServiceError::ScrollExpired { scroll_id: msg },
                    ErrorCode::IndexNotFound => ServiceError::IndexNotFound { index: msg },
                    ErrorCode::InvalidRequest | ErrorCode::UnsupportedProtocolVersion => {
                        ServiceError::InvalidRequest { message: msg }
                    }
                    ErrorCode::Timeout => ServiceError::Timeout { message: msg },
                    ErrorCode::Internal => ServiceError::Backend {
                        message: format!("{}: {}", code, msg),
                    },
                });
            }
            return Err(ServiceError::Backend {
                message: format!("search engine returned {}: {}", status, body),
            });
        }

        response.json().await.map_err(|e| ServiceError::Backend {
            message: format!("failed to parse response from {}: {}", path, e),
        })
    }
}

impl fmt::Debug for RemoteBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RemoteBackend")
            .field("base_url", &self.base_url)
            .field("has_auth_token", &self.auth_token.is_some())
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

#[async_trait]
impl SearchBackend for RemoteBackend {
    async fn search(&self, request: SearchRequest) -> Result<SearchPage> {
        self.post_json("/v1/search", &request).await
    }

    async fn scroll(&self, request: ScrollRequest) -> Result<SearchPage> {
        self.post_json("/v1/scroll", &request).await
    }

    async fn count(&self, request: CountRequest) -> Result<u64> {
        let response: CountResponse = self.post_json("/v1/count", &request).await?;
        Ok(response.count)
    }
}

#[async_trait]
impl DocumentSink for RemoteBackend {
    async fn bulk(&self, request: BulkRequest) -> Result<u64> {
        let response: BulkResponse = self.post_json("/v1/bulk", &request).await?;
        Ok(response.indexed)
    }

    async fn create_index(&self, request: CreateIndexRequest) -> Result<bool> {
        let response: CreateIndexResponse = self.post_json("/v1/index/create", &request).await?;
        Ok(response.created)
    }

    async fn refresh(&self, request: RefreshRequest) -> Result<()> {
        let _: RefreshResponse = self.post_json("/v1/index/refresh", &request).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_pattern() {
        let backend = RemoteBackend::new("http://localhost:9200")
            .with_auth_token("token")
            .with_timeout(Duration::from_secs(60));

        assert_eq!(backend.base_url, "http://localhost:9200");
        assert_eq!(backend.auth_token, Some("token".to_string()));
        assert_eq!(backend.request_timeout, Duration::from_secs(60));
    }

    #[test]
    fn test_from_config() {
        let config = BackendConfig::new("http://search.example.com:9200")
            .with_auth_token("secret")
            .with_request_timeout_ms(10_000);
        let backend = RemoteBackend::from_config(&config).unwrap();
        assert_eq!(backend.base_url, "http://search.example.com:9200");
        assert_eq!(backend.request_timeout, Duration::from_millis(10_000));
    }

    #[test]
    fn test_route_joins_without_double_slash() {
        let backend = RemoteBackend::new("http://localhost:9200/");
        assert_eq!(backend.route("/v1/search"), "http://localhost:9200/v1/search");

        let backend = RemoteBackend::new("http://localhost:9200");
        assert_eq!(backend.route("/v1/scroll"), "http://localhost:9200/v1/scroll");
    }

    #[test]
    fn test_debug_hides_token() {
        let backend = RemoteBackend::new("http://localhost:9200").with_auth_token("secret-token");

        let debug_output = format!("{:?}", backend);
        assert!(debug_output.contains("has_auth_token: true"));
        assert!(!debug_output.contains("secret-token"));
    }
}
