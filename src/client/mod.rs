//! Query client seam.
//!
//! The resolver only needs one thing from the outside world: run a query
//! string and hand back a results document. [`QueryClient`] is that seam.
//! Two implementations ship with the crate:
//! - [`HttpSparqlClient`] talks to a live SPARQL endpoint (feature `http`)
//! - [`FixtureClient`] replays canned documents for tests and offline use

mod fixture;
#[cfg(feature = "http")]
mod http;

pub use fixture::FixtureClient;
#[cfg(feature = "http")]
pub use http::HttpSparqlClient;

use crate::binding::SparqlResults;
use crate::error::TransportError;

/// Encoding requested from the query service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ResultFormat {
    /// SPARQL 1.1 query results JSON.
    #[default]
    Json,
}

impl ResultFormat {
    /// Value of the HTTP `Accept` header.
    #[must_use]
    pub const fn mime_type(self) -> &'static str {
        match self {
            Self::Json => "application/sparql-results+json",
        }
    }

    /// Value of the `format` query parameter.
    #[must_use]
    pub const fn param(self) -> &'static str {
        match self {
            Self::Json => "json",
        }
    }
}

/// Runs SPARQL queries against a knowledge service.
///
/// Implementations block until the service answers. They must not retry
/// and must not cache; a failure is returned as-is.
pub trait QueryClient: Send + Sync {
    /// Runs `query` and decodes the response.
    ///
    /// # Errors
    ///
    /// Returns a `TransportError` if the request fails or the response
    /// cannot be decoded.
    fn query(&self, query: &str, format: ResultFormat) -> Result<SparqlResults, TransportError>;
}

impl<C: QueryClient + ?Sized> QueryClient for &C {
    fn query(&self, query: &str, format: ResultFormat) -> Result<SparqlResults, TransportError> {
        (**self).query(query, format)
    }
}

impl<C: QueryClient + ?Sized> QueryClient for std::sync::Arc<C> {
    fn query(&self, query: &str, format: ResultFormat) -> Result<SparqlResults, TransportError> {
        (**self).query(query, format)
    }
}

impl<C: QueryClient + ?Sized> QueryClient for Box<C> {
    fn query(&self, query: &str, format: ResultFormat) -> Result<SparqlResults, TransportError> {
        (**self).query(query, format)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_format() {
        assert_eq!(ResultFormat::default(), ResultFormat::Json);
        assert_eq!(ResultFormat::Json.mime_type(), "application/sparql-results+json");
        assert_eq!(ResultFormat::Json.param(), "json");
    }

    #[test]
    fn test_blanket_impls_forward() {
        let fixture = std::sync::Arc::new(FixtureClient::fixed(SparqlResults::empty()));
        let boxed: Box<dyn QueryClient> = Box::new(fixture.clone());
        boxed.query("SELECT 1", ResultFormat::Json).unwrap();
        (&*fixture).query("SELECT 2", ResultFormat::Json).unwrap();
        assert_eq!(fixture.queries(), vec!["SELECT 1".to_string(), "SELECT 2".to_string()]);
    }
}
