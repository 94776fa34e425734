//! The question-answering entry point.

use chrono::{Local, NaiveDate};

use crate::client::QueryClient;
#[cfg(feature = "http")]
use crate::client::HttpSparqlClient;
#[cfg(feature = "http")]
use crate::config::GuruConfig;
use crate::error::GuruResult;
use crate::question::{Question, QuestionKind};
use crate::resolver::{Answer, Resolver};

/// Answers "how old is ..." and "what is the population of ..." questions.
///
/// Each call issues at most one query and keeps no state between calls.
///
/// # Examples
///
/// ```
/// use wikiguru::{FixtureClient, Guru, SparqlResults};
///
/// let client = FixtureClient::fixed(SparqlResults::from_rows(&[&[("population", "8799728")]]));
/// let guru = Guru::new(client);
/// assert_eq!(guru.ask("what is the population of London").unwrap(), "8799728");
/// ```
#[derive(Debug)]
pub struct Guru<C> {
    resolver: Resolver<C>,
}

impl<C: QueryClient> Guru<C> {
    /// Create a guru that queries through `client`.
    pub const fn new(client: C) -> Self {
        Self {
            resolver: Resolver::new(client),
        }
    }

    /// The underlying query client.
    pub const fn client(&self) -> &C {
        self.resolver.client()
    }

    /// Answers a question, returning the answer text.
    ///
    /// # Errors
    ///
    /// Any [`GuruError`](crate::GuruError); see [`Guru::answer`].
    pub fn ask(&self, question: &str) -> GuruResult<String> {
        self.answer(question).map(|answer| answer.to_string())
    }

    /// Answers a question, computing ages as of today's local date.
    ///
    /// # Errors
    ///
    /// - `MissingSubject` / `UnrecognizedQuestion` if the text does not parse
    /// - any error of [`Resolver::resolve_age`] or [`Resolver::resolve_population`]
    pub fn answer(&self, question: &str) -> GuruResult<Answer> {
        self.answer_on(question, Local::now().date_naive())
    }

    /// Answers a question, computing ages as of `today`.
    ///
    /// # Errors
    ///
    /// Same as [`Guru::answer`].
    pub fn answer_on(&self, question: &str, today: NaiveDate) -> GuruResult<Answer> {
        let Question { kind, subject } = Question::parse(question)?;
        tracing::debug!(%kind, subject = %subject, "dispatching question");

        match kind {
            QuestionKind::Age => self.resolver.resolve_age_on(&subject, today),
            QuestionKind::Population => self.resolver.resolve_population(&subject),
        }
    }
}

#[cfg(feature = "http")]
impl Guru<HttpSparqlClient> {
    /// Create a guru backed by a live endpoint.
    ///
    /// # Errors
    ///
    /// Returns a transport error if the client cannot be built.
    pub fn from_config(config: &GuruConfig) -> GuruResult<Self> {
        Ok(Self::new(HttpSparqlClient::from_config(config)?))
    }

    /// Create a guru backed by the public Wikidata endpoint, honouring the
    /// `WIKIGURU_*` environment overrides.
    ///
    /// # Errors
    ///
    /// Returns a transport error if the client cannot be built.
    pub fn wikidata() -> GuruResult<Self> {
        Self::from_config(&GuruConfig::from_env())
    }
}
