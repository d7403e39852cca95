// Copyright(C) Mundis.
use {
    crate::ConfigError,
    serde::{Deserialize, Serialize},
};

pub const DEFAULT_QUERY_TIMEOUT_MS: u64 = 60_000;
pub const DEFAULT_WAIT_FOR_TIMEOUT_MS: u64 = 40_000;

/// Where and how to reach the blockchain GraphQL API.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct NetworkConfig {
    /// Endpoints in preference order; the next one is tried when a request
    /// cannot be delivered to the previous one.
    pub endpoints: Vec<String>,
    pub query_timeout_ms: u64,
    /// Upper bound for waiting on the transaction of a processed message.
    pub wait_for_timeout_ms: u64,
    /// Project secret sent as basic auth, if the endpoint requires one
    pub access_key: Option<String>,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            endpoints: Vec::new(),
            query_timeout_ms: DEFAULT_QUERY_TIMEOUT_MS,
            wait_for_timeout_ms: DEFAULT_WAIT_FOR_TIMEOUT_MS,
            access_key: None,
        }
    }
}

impl NetworkConfig {
    /// Full GraphQL URLs of all endpoints, in preference order.
    pub fn graphql_urls(&self) -> Result<Vec<String>, ConfigError> {
        if self.endpoints.is_empty() {
            return Err(ConfigError::MissingEndpoint);
        }
        self.endpoints.iter().map(|e| graphql_url(e)).collect()
    }
}

/// The SDK core used for ABI encoding and message processing. The GraphQL
/// queries never go through it.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct BindingConfig {
    /// JSON-RPC URL of the SDK bridge
    pub sdk_url: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct ClientConfig {
    pub network: NetworkConfig,
    pub binding: BindingConfig,
}

impl ClientConfig {
    /// Puts `endpoint` in front of the configured endpoints. A config without
    /// any endpoint is rejected.
    pub fn with_endpoint(mut self, endpoint: Option<String>) -> Result<Self, ConfigError> {
        if let Some(endpoint) = endpoint {
            graphql_url(&endpoint)?;
            self.network.endpoints.retain(|e| e != &endpoint);
            self.network.endpoints.insert(0, endpoint);
        }
        self.network.graphql_urls()?;
        Ok(self)
    }

    pub fn with_sdk_url(mut self, sdk_url: Option<String>) -> Self {
        if sdk_url.is_some() {
            self.binding.sdk_url = sdk_url;
        }
        self
    }
}

/// Normalizes an endpoint the way the SDK does: `https://` is assumed when no
/// scheme is given and `/graphql` is appended when missing.
pub fn graphql_url(endpoint: &str) -> Result<String, ConfigError> {
    let trimmed = endpoint.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::MissingEndpoint);
    }
    let (scheme, rest) = match trimmed.split_once("://") {
        Some((scheme, rest)) => (scheme, rest),
        None => ("https", trimmed),
    };
    if scheme != "https" && scheme != "http" {
        return Err(ConfigError::InvalidEndpoint(endpoint.to_string()));
    }
    let rest = rest.trim_end_matches('/');
    if rest.is_empty() || rest.starts_with('/') || rest.contains(char::is_whitespace) {
        return Err(ConfigError::InvalidEndpoint(endpoint.to_string()));
    }
    if rest.ends_with("/graphql") {
        Ok(format!("{}://{}", scheme, rest))
    } else {
        Ok(format!("{}://{}/graphql", scheme, rest))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_endpoints() {
        assert_eq!(
            graphql_url("devnet.evercloud.dev/abc").unwrap(),
            "https://devnet.evercloud.dev/abc/graphql"
        );
        assert_eq!(
            graphql_url("http://localhost/graphql/").unwrap(),
            "http://localhost/graphql"
        );
        assert_eq!(
            graphql_url(" https://example.org ").unwrap(),
            "https://example.org/graphql"
        );
    }

    #[test]
    fn rejects_bad_endpoints() {
        assert!(matches!(graphql_url(""), Err(ConfigError::MissingEndpoint)));
        assert!(matches!(
            graphql_url("ftp://example.org"),
            Err(ConfigError::InvalidEndpoint(_))
        ));
        assert!(matches!(
            graphql_url("https://"),
            Err(ConfigError::InvalidEndpoint(_))
        ));
    }

    #[test]
    fn endpoint_is_required() {
        assert!(matches!(
            ClientConfig::default().with_endpoint(None),
            Err(ConfigError::MissingEndpoint)
        ));
    }

    #[test]
    fn command_line_endpoint_takes_precedence() {
        let mut config = ClientConfig::default();
        config.network.endpoints = vec!["a.example".to_string(), "b.example".to_string()];
        let config = config.with_endpoint(Some("b.example".to_string())).unwrap();
        assert_eq!(config.network.endpoints, vec!["b.example", "a.example"]);
    }

    #[test]
    fn partial_json_uses_defaults() {
        let config: ClientConfig =
            serde_json::from_str(r#"{ "network": { "endpoints": ["x.example"] } }"#).unwrap();
        assert_eq!(config.network.query_timeout_ms, DEFAULT_QUERY_TIMEOUT_MS);
        assert_eq!(config.binding.sdk_url, None);
    }
}
