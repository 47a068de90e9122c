//! Backend connection configuration.

use serde::{Deserialize, Serialize};

/// Connection settings for a remote search engine.
///
/// Typically loaded from configuration or built from command-line
/// arguments by the binaries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Engine base URL (e.g. "http://search.example.com:9200").
    pub endpoint: String,

    /// Authentication token (optional).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth_token: Option<String>,

    /// Connection timeout in milliseconds (optional).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connect_timeout_ms: Option<u64>,

    /// Request timeout in milliseconds (optional).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_timeout_ms: Option<u64>,
}

impl BackendConfig {
    /// Create a configuration pointing at the given engine.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            auth_token: None,
            connect_timeout_ms: None,
            request_timeout_ms: None,
        }
    }

    /// Set the authentication token.
    pub fn with_auth_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }

    /// Set the connection timeout.
    pub fn with_connect_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.connect_timeout_ms = Some(timeout_ms);
        self
    }

    /// Set the request timeout.
    pub fn with_request_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.request_timeout_ms = Some(timeout_ms);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builders() {
        let config = BackendConfig::new("http://localhost:9200")
            .with_auth_token("secret")
            .with_connect_timeout_ms(2_000)
            .with_request_timeout_ms(10_000);

        assert_eq!(config.endpoint, "http://localhost:9200");
        assert_eq!(config.auth_token, Some("secret".to_string()));
        assert_eq!(config.connect_timeout_ms, Some(2_000));
        assert_eq!(config.request_timeout_ms, Some(10_000));
    }

    #[test]
    fn test_optional_fields_omitted_from_json() {
        let config = BackendConfig::new("http://localhost:9200");
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("http://localhost:9200"));
        assert!(!json.contains("auth_token"));

        let parsed: BackendConfig = serde_json::from_str(&json).unwrap();
        assert!(parsed.auth_token.is_none());
    }
}
