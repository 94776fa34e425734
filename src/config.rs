//! Client configuration.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::TransportError;

/// Public Wikidata query service.
pub const WIKIDATA_ENDPOINT: &str = "https://query.wikidata.org/sparql";

/// Environment variable overriding the endpoint.
pub const ENDPOINT_ENV: &str = "WIKIGURU_ENDPOINT";

/// Environment variable overriding the User-Agent header.
pub const USER_AGENT_ENV: &str = "WIKIGURU_USER_AGENT";

/// Settings for the live query client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuruConfig {
    /// SPARQL endpoint URL.
    pub endpoint: String,
    /// User-Agent sent with every query. Wikidata rejects anonymous clients.
    pub user_agent: String,
}

impl Default for GuruConfig {
    fn default() -> Self {
        Self {
            endpoint: WIKIDATA_ENDPOINT.to_string(),
            user_agent: concat!("wikiguru/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl GuruConfig {
    /// Defaults overridden by `WIKIGURU_ENDPOINT` and `WIKIGURU_USER_AGENT`.
    ///
    /// Empty variables are ignored.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(endpoint) = lookup(ENDPOINT_ENV).filter(|v| !v.trim().is_empty()) {
            config.endpoint = endpoint.trim().to_string();
        }
        if let Some(agent) = lookup(USER_AGENT_ENV).filter(|v| !v.trim().is_empty()) {
            config.user_agent = agent;
        }
        config
    }

    /// Sets the endpoint.
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Sets the User-Agent.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Parses and checks the endpoint.
    ///
    /// # Errors
    ///
    /// Returns `TransportError::InvalidEndpoint` if the endpoint is not an
    /// absolute `http` or `https` URL.
    pub fn endpoint_url(&self) -> Result<Url, TransportError> {
        let url = Url::parse(&self.endpoint).map_err(|e| TransportError::InvalidEndpoint {
            endpoint: self.endpoint.clone(),
            reason: e.to_string(),
        })?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(TransportError::InvalidEndpoint {
                endpoint: self.endpoint.clone(),
                reason: format!("unsupported scheme '{other}'"),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_points_at_wikidata() {
        let config = GuruConfig::default();
        assert_eq!(config.endpoint, WIKIDATA_ENDPOINT);
        assert!(config.user_agent.starts_with("wikiguru/"));
        assert_eq!(config.endpoint_url().unwrap().host_str(), Some("query.wikidata.org"));
    }

    #[test]
    fn test_lookup_overrides() {
        let config = GuruConfig::from_lookup(|key| match key {
            ENDPOINT_ENV => Some(" http://localhost:9999/sparql ".to_string()),
            USER_AGENT_ENV => Some("tests/1.0".to_string()),
            _ => None,
        });
        assert_eq!(config.endpoint, "http://localhost:9999/sparql");
        assert_eq!(config.user_agent, "tests/1.0");
    }

    #[test]
    fn test_empty_lookup_keeps_defaults() {
        let config = GuruConfig::from_lookup(|_| Some("  ".to_string()));
        assert_eq!(config, GuruConfig::default());
    }

    #[test]
    fn test_invalid_endpoints() {
        let err = GuruConfig::default().with_endpoint("not a url").endpoint_url().unwrap_err();
        assert!(matches!(err, TransportError::InvalidEndpoint { .. }));

        let err = GuruConfig::default()
            .with_endpoint("ftp://example.org/sparql")
            .endpoint_url()
            .unwrap_err();
        assert!(err.to_string().contains("unsupported scheme 'ftp'"));
    }

    #[test]
    fn test_deserialize_partial() {
        let config: GuruConfig =
            serde_json::from_str(r#"{ "endpoint": "http://localhost/sparql" }"#).unwrap();
        assert_eq!(config.endpoint, "http://localhost/sparql");
        assert_eq!(config.user_agent, GuruConfig::default().user_agent);
    }
}
