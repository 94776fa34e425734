//! Query results, raw and typed.
//!
//! The query service answers in the SPARQL 1.1 JSON results format:
//!
//! ```json
//! { "head": { "vars": ["city", "population"] },
//!   "results": { "bindings": [ { "population": { "type": "literal", "value": "8799728" } } ] } }
//! ```
//!
//! [`SparqlResults`] mirrors that document. [`ResultSet`] is the typed view
//! the resolver works with; unknown fields are dropped at the boundary.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{GuruError, GuruResult};

/// Field names this crate reads from a binding.
pub mod fields {
    /// Entity URI of a matched person.
    pub const PERSON: &str = "person";
    /// English label of a matched person.
    pub const PERSON_LABEL: &str = "personLabel";
    /// Entity URI of a matched city.
    pub const CITY: &str = "city";
    /// English label of a matched city.
    pub const CITY_LABEL: &str = "cityLabel";
    /// Birth timestamp (`wdt:P569`).
    pub const DATE_OF_BIRTH: &str = "date_of_birth";
    /// Death timestamp (`wdt:P570`).
    pub const DATE_OF_DEATH: &str = "date_of_death";
    /// Population figure (`wdt:P1082`).
    pub const POPULATION: &str = "population";
}

/// One RDF term in a raw binding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RdfTerm {
    /// `uri`, `literal`, or `bnode`.
    #[serde(rename = "type", default)]
    pub term_type: String,

    /// Lexical value of the term.
    pub value: String,

    /// XSD datatype URI of a typed literal.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub datatype: Option<String>,

    /// Language tag of a language-tagged literal.
    #[serde(rename = "xml:lang", default, skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
}

impl RdfTerm {
    /// Creates a plain literal.
    #[must_use]
    pub fn literal(value: impl Into<String>) -> Self {
        Self {
            term_type: "literal".to_string(),
            value: value.into(),
            datatype: None,
            lang: None,
        }
    }
}

/// A raw result row: variable name to term.
pub type RawBinding = HashMap<String, RdfTerm>;

/// The `head` section: selected variable names.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultsHead {
    /// Projected variable names.
    #[serde(default)]
    pub vars: Vec<String>,
}

/// The `results` section: one raw binding per row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultsBody {
    /// Raw rows in service order.
    #[serde(default)]
    pub bindings: Vec<RawBinding>,
}

/// A SPARQL JSON results document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SparqlResults {
    /// Header section.
    #[serde(default)]
    pub head: ResultsHead,
    /// Result rows.
    pub results: ResultsBody,
}

impl SparqlResults {
    /// Builds a document from raw rows.
    #[must_use]
    pub fn from_bindings(bindings: Vec<RawBinding>) -> Self {
        Self {
            head: ResultsHead::default(),
            results: ResultsBody { bindings },
        }
    }

    /// Builds a document from rows of `(field, value)` literal pairs.
    ///
    /// ```
    /// use wikiguru::SparqlResults;
    ///
    /// let results = SparqlResults::from_rows(&[&[("population", "8799728")]]);
    /// assert_eq!(results.results.bindings.len(), 1);
    /// ```
    #[must_use]
    pub fn from_rows(rows: &[&[(&str, &str)]]) -> Self {
        let bindings = rows
            .iter()
            .map(|row| {
                row.iter()
                    .map(|(field, value)| ((*field).to_string(), RdfTerm::literal(*value)))
                    .collect()
            })
            .collect();
        Self::from_bindings(bindings)
    }

    /// An empty result set.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }
}

/// A typed result row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Binding {
    /// Entity URI of the matched person or city.
    pub entity: Option<String>,
    /// English label of the matched entity.
    pub label: Option<String>,
    /// Birth timestamp text.
    pub date_of_birth: Option<String>,
    /// Death timestamp text; present only for deceased people.
    pub date_of_death: Option<String>,
    /// Population figure text.
    pub population: Option<String>,
}

impl Binding {
    /// Translates a raw row, keeping only the fields this crate reads.
    #[must_use]
    pub fn from_raw(raw: &RawBinding) -> Self {
        let value = |name: &str| raw.get(name).map(|term| term.value.clone());
        Self {
            entity: value(fields::PERSON).or_else(|| value(fields::CITY)),
            label: value(fields::PERSON_LABEL).or_else(|| value(fields::CITY_LABEL)),
            date_of_birth: value(fields::DATE_OF_BIRTH),
            date_of_death: value(fields::DATE_OF_DEATH),
            population: value(fields::POPULATION),
        }
    }

    /// Returns true if the row carries a death date.
    #[must_use]
    pub const fn is_deceased(&self) -> bool {
        self.date_of_death.is_some()
    }

    /// Returns the birth date text.
    ///
    /// # Errors
    ///
    /// Returns `GuruError::MissingField` if the row has no birth date.
    pub fn require_date_of_birth(&self) -> GuruResult<&str> {
        self.date_of_birth
            .as_deref()
            .ok_or_else(|| GuruError::missing_field(fields::DATE_OF_BIRTH))
    }

    /// Returns the population text.
    ///
    /// # Errors
    ///
    /// Returns `GuruError::MissingField` if the row has no population.
    pub fn require_population(&self) -> GuruResult<&str> {
        self.population
            .as_deref()
            .ok_or_else(|| GuruError::missing_field(fields::POPULATION))
    }
}

/// The typed rows of one query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultSet {
    /// Rows in service order.
    pub bindings: Vec<Binding>,
}

impl ResultSet {
    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Returns true if there are no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Returns the only row.
    ///
    /// # Errors
    ///
    /// - `GuruError::NotFound` naming `subject` when there are no rows.
    /// - `GuruError::AmbiguousResult` with the row count when there are several.
    pub fn single(&self, subject: &str) -> GuruResult<&Binding> {
        match self.bindings.as_slice() {
            [] => Err(GuruError::NotFound {
                subject: subject.to_string(),
            }),
            [only] => Ok(only),
            many => Err(GuruError::AmbiguousResult { count: many.len() }),
        }
    }
}

impl From<&SparqlResults> for ResultSet {
    fn from(results: &SparqlResults) -> Self {
        Self {
            bindings: results.results.bindings.iter().map(Binding::from_raw).collect(),
        }
    }
}

impl From<SparqlResults> for ResultSet {
    fn from(results: SparqlResults) -> Self {
        Self::from(&results)
    }
}
