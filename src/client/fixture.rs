//! In-memory query client.

use std::collections::VecDeque;
use std::sync::Mutex;

use crate::binding::SparqlResults;
use crate::error::TransportError;

use super::{QueryClient, ResultFormat};

fn lock_err(context: &'static str) -> TransportError {
    TransportError::RequestFailed {
        message: format!("poisoned lock: {context}"),
    }
}

#[derive(Debug, Default)]
struct FixtureState {
    queued: VecDeque<Result<SparqlResults, TransportError>>,
    fallback: Option<SparqlResults>,
    issued: Vec<String>,
}

/// Deterministic stand-in for a live knowledge service.
///
/// Queued responses are returned in order, one per query. Once the queue
/// is drained the fallback document is returned for every further query.
/// Every query string is recorded.
///
/// # Examples
///
/// ```
/// use wikiguru::{FixtureClient, QueryClient, ResultFormat, SparqlResults};
///
/// let client = FixtureClient::fixed(SparqlResults::from_rows(&[&[("population", "42")]]));
/// let results = client.query("SELECT ...", ResultFormat::Json).unwrap();
/// assert_eq!(results.results.bindings.len(), 1);
/// assert_eq!(client.queries().len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct FixtureClient {
    state: Mutex<FixtureState>,
}

impl FixtureClient {
    /// Create a client with no responses. Queries fail until one is added.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a client that answers every query with `results`.
    #[must_use]
    pub fn fixed(results: SparqlResults) -> Self {
        Self {
            state: Mutex::new(FixtureState {
                fallback: Some(results),
                ..FixtureState::default()
            }),
        }
    }

    /// Queue a document for the next unanswered query.
    #[must_use]
    pub fn then(self, results: SparqlResults) -> Self {
        self.push(Ok(results));
        self
    }

    /// Queue a failure for the next unanswered query.
    #[must_use]
    pub fn then_fail(self, error: TransportError) -> Self {
        self.push(Err(error));
        self
    }

    fn push(&self, response: Result<SparqlResults, TransportError>) {
        // A poisoned fixture only happens after a panicking test; keep going.
        let mut state = self
            .state
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        state.queued.push_back(response);
    }

    /// Every query issued so far, oldest first.
    #[must_use]
    pub fn queries(&self) -> Vec<String> {
        self.state
            .lock()
            .map(|state| state.issued.clone())
            .unwrap_or_default()
    }

    /// The most recent query, if any.
    #[must_use]
    pub fn last_query(&self) -> Option<String> {
        self.state
            .lock()
            .ok()
            .and_then(|state| state.issued.last().cloned())
    }
}

impl QueryClient for FixtureClient {
    fn query(&self, query: &str, _format: ResultFormat) -> Result<SparqlResults, TransportError> {
        let mut state = self.state.lock().map_err(|_| lock_err("fixture.query"))?;
        state.issued.push(query.to_string());

        if let Some(response) = state.queued.pop_front() {
            return response;
        }
        state.fallback.clone().ok_or_else(|| TransportError::RequestFailed {
            message: "fixture has no response for query".to_string(),
        })
    }
}
