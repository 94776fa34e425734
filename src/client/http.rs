//! Blocking HTTP client for a SPARQL endpoint.

use std::time::Duration;

use reqwest::blocking::{Client, ClientBuilder};
use reqwest::header::ACCEPT;
use url::Url;

use crate::binding::SparqlResults;
use crate::config::GuruConfig;
use crate::error::TransportError;

use super::{QueryClient, ResultFormat};

/// Longest response body kept in a `TransportError::Status`.
const MAX_ERROR_BODY_CHARS: usize = 512;

/// Issues each query as one `GET` request against the configured endpoint.
///
/// The underlying connection pool lives as long as the client.
#[derive(Debug, Clone)]
pub struct HttpSparqlClient {
    http: Client,
    endpoint: Url,
}

impl HttpSparqlClient {
    /// Builds a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns `TransportError::InvalidEndpoint` for a bad endpoint and
    /// `TransportError::RequestFailed` if the HTTP stack cannot be set up.
    pub fn from_config(config: &GuruConfig) -> Result<Self, TransportError> {
        let endpoint = config.endpoint_url()?;
        let http = client_builder(config).build()?;
        Ok(Self { http, endpoint })
    }

    /// The endpoint queries are sent to.
    #[must_use]
    pub const fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

/// HTTP settings shared by every client.
///
/// reqwest's blocking client aborts after 30s by default; a query instead
/// blocks until the service answers or drops the connection.
fn client_builder(config: &GuruConfig) -> ClientBuilder {
    Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(None::<Duration>)
}

impl QueryClient for HttpSparqlClient {
    fn query(&self, query: &str, format: ResultFormat) -> Result<SparqlResults, TransportError> {
        tracing::debug!(endpoint = %self.endpoint, bytes = query.len(), "sending sparql query");

        let response = self
            .http
            .get(self.endpoint.clone())
            .query(&[("query", query), ("format", format.param())])
            .header(ACCEPT, format.mime_type())
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let body: String = response
                .text()
                .unwrap_or_default()
                .chars()
                .take(MAX_ERROR_BODY_CHARS)
                .collect();
            return Err(TransportError::Status {
                code: status.as_u16(),
                body,
            });
        }

        let body = response.text()?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[cfg(test)]
mod tests {
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread::{self, JoinHandle};
    use std::time::Instant;

    use super::*;

    /// Serves one HTTP response on a loopback port after `delay`.
    ///
    /// The join handle yields the raw request head.
    fn serve_once(
        status: &'static str,
        body: String,
        delay: Duration,
    ) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let endpoint = format!("http://{}/sparql", listener.local_addr().unwrap());

        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut request = Vec::new();
            let mut buf = [0_u8; 4096];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = stream.read(&mut buf).unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }

            thread::sleep(delay);
            let response = format!(
                "HTTP/1.1 {status}\r\nContent-Type: application/sparql-results+json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            stream.write_all(response.as_bytes()).unwrap();
            stream.flush().unwrap();
            String::from_utf8_lossy(&request).into_owned()
        });

        (endpoint, handle)
    }

    /// Client for a loopback endpoint, with the production settings.
    fn loopback_client(endpoint: &str) -> HttpSparqlClient {
        let config = GuruConfig::default()
            .with_endpoint(endpoint)
            .with_user_agent("wikiguru-tests/1.0");
        HttpSparqlClient {
            http: client_builder(&config).no_proxy().build().unwrap(),
            endpoint: config.endpoint_url().unwrap(),
        }
    }

    #[test]
    fn test_from_default_config() {
        let client = HttpSparqlClient::from_config(&GuruConfig::default()).unwrap();
        assert_eq!(client.endpoint().as_str(), "https://query.wikidata.org/sparql");
    }

    #[test]
    fn test_rejects_bad_endpoint() {
        let config = GuruConfig::default().with_endpoint("mailto:someone@example.org");
        let err = HttpSparqlClient::from_config(&config).unwrap_err();
        assert!(matches!(err, TransportError::InvalidEndpoint { .. }));
    }

    #[test]
    fn test_query_decodes_results_and_sends_parameters() {
        let body = r#"{
            "head": { "vars": ["city", "population"] },
            "results": { "bindings": [ {
                "city": { "type": "uri", "value": "http://www.wikidata.org/entity/Q84" },
                "population": { "type": "literal", "value": "8799728" }
            } ] }
        }"#;
        let (endpoint, server) = serve_once("200 OK", body.to_string(), Duration::ZERO);

        let results = loopback_client(&endpoint)
            .query("SELECT ?city WHERE {}", ResultFormat::Json)
            .unwrap();
        assert_eq!(results.results.bindings.len(), 1);
        assert_eq!(results.results.bindings[0]["population"].value, "8799728");

        let request = server.join().unwrap().to_ascii_lowercase();
        assert!(request.starts_with("get /sparql?"));
        assert!(request.contains("query=select"));
        assert!(request.contains("format=json"));
        assert!(request.contains("accept: application/sparql-results+json"));
        assert!(request.contains("user-agent: wikiguru-tests/1.0"));
    }

    #[test]
    fn test_error_status_keeps_truncated_body() {
        let body = "x".repeat(MAX_ERROR_BODY_CHARS * 3);
        let (endpoint, server) =
            serve_once("500 Internal Server Error", body, Duration::ZERO);

        let err = loopback_client(&endpoint)
            .query("SELECT 1", ResultFormat::Json)
            .unwrap_err();
        server.join().unwrap();

        let TransportError::Status { code, body } = err else {
            panic!("expected status error, got {err:?}");
        };
        assert_eq!(code, 500);
        assert_eq!(body.chars().count(), MAX_ERROR_BODY_CHARS);
    }

    #[test]
    fn test_invalid_json_is_decode_error() {
        let (endpoint, server) =
            serve_once("200 OK", "<html>not json</html>".to_string(), Duration::ZERO);

        let err = loopback_client(&endpoint)
            .query("SELECT 1", ResultFormat::Json)
            .unwrap_err();
        server.join().unwrap();
        assert!(matches!(err, TransportError::Decode { .. }), "{err:?}");
    }

    #[test]
    fn test_slow_service_is_not_cut_off() {
        // Longer than reqwest's 30s blocking default.
        let delay = Duration::from_secs(31);
        let (endpoint, server) =
            serve_once("200 OK", r#"{"results":{"bindings":[]}}"#.to_string(), delay);

        let started = Instant::now();
        let results = loopback_client(&endpoint)
            .query("SELECT 1", ResultFormat::Json)
            .unwrap();
        server.join().unwrap();

        assert!(started.elapsed() >= delay);
        assert!(results.results.bindings.is_empty());
    }
}
