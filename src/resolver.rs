//! Answer resolution.
//!
//! Each question kind runs one query and validates the result set the
//! same way:
//! 1. no rows: `NotFound`
//! 2. several rows: `AmbiguousResult`
//! 3. one row: kind-specific checks, then the answer

use std::fmt;

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::age::{parse_birth_date, whole_years_between};
use crate::binding::ResultSet;
use crate::client::{QueryClient, ResultFormat};
use crate::error::{GuruError, GuruResult};
use crate::query::{city_query, person_query};

/// A resolved answer.
///
/// `Display` renders the answer text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Answer {
    /// Age in whole years.
    Age(u32),
    /// Population figure exactly as the service returned it.
    Population(String),
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Age(years) => write!(f, "{years}"),
            Self::Population(count) => write!(f, "{count}"),
        }
    }
}

/// Resolves subjects into answers through a [`QueryClient`].
///
/// The client is owned for the lifetime of the resolver.
#[derive(Debug)]
pub struct Resolver<C> {
    client: C,
}

impl<C: QueryClient> Resolver<C> {
    /// Create a resolver that queries through `client`.
    pub const fn new(client: C) -> Self {
        Self { client }
    }

    /// The underlying query client.
    pub const fn client(&self) -> &C {
        &self.client
    }

    /// Age of a living politician as of today's local date.
    ///
    /// # Errors
    ///
    /// See [`Resolver::resolve_age_on`].
    pub fn resolve_age(&self, subject: &str) -> GuruResult<Answer> {
        self.resolve_age_on(subject, Local::now().date_naive())
    }

    /// Age of a living politician as of `today`.
    ///
    /// # Errors
    ///
    /// - `NotFound` / `AmbiguousResult` for zero or several matches
    /// - `SubjectDeceased` if the single match has a death date
    /// - `MissingField` / `InvalidDate` for an unusable birth date
    /// - `Transport` if the query fails
    pub fn resolve_age_on(&self, subject: &str, today: NaiveDate) -> GuruResult<Answer> {
        let results = self.run(&person_query(subject))?;
        let binding = results.single(subject)?;
        if binding.is_deceased() {
            return Err(GuruError::SubjectDeceased {
                subject: subject.to_string(),
            });
        }

        let birth = parse_birth_date(binding.require_date_of_birth()?)?;
        let years = whole_years_between(birth, today)?;
        Ok(Answer::Age(years))
    }

    /// Population of a capital city.
    ///
    /// # Errors
    ///
    /// - `NotFound` / `AmbiguousResult` for zero or several matches
    /// - `MissingField` if the single match has no population
    /// - `Transport` if the query fails
    pub fn resolve_population(&self, subject: &str) -> GuruResult<Answer> {
        let results = self.run(&city_query(subject))?;
        let population = results.single(subject)?.require_population()?;
        Ok(Answer::Population(population.to_string()))
    }

    fn run(&self, query: &str) -> GuruResult<ResultSet> {
        let raw = self.client.query(query, ResultFormat::Json)?;
        let results = ResultSet::from(raw);
        tracing::debug!(rows = results.len(), "query returned");
        Ok(results)
    }
}
