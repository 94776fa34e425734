//! # wikiguru - answers to two questions, straight from Wikidata
//!
//! wikiguru understands two question templates:
//!
//! - `how old is <politician>`: age in whole years of a living politician
//! - `what is the population of <capital city>`: population figure
//!
//! A question is parsed into a [`Question`], turned into a SPARQL query,
//! run through a [`QueryClient`], and the result rows are validated into
//! an [`Answer`] or a [`GuruError`].
//!
//! ## Usage
//!
//! ```rust,ignore
//! use wikiguru::Guru;
//!
//! let guru = Guru::wikidata()?;
//! println!("{}", guru.ask("how old is Tony Blair")?);
//! println!("{}", guru.ask("what is the population of London")?);
//! ```
//!
//! Offline, inject a [`FixtureClient`]:
//!
//! ```
//! use wikiguru::{ErrorKind, FixtureClient, Guru, SparqlResults};
//!
//! let guru = Guru::new(FixtureClient::fixed(SparqlResults::empty()));
//! let err = guru.ask("what is the population of Narnia").unwrap_err();
//! assert_eq!(err.kind(), ErrorKind::NotFound);
//! assert_eq!(err.to_string(), "Narnia has not been found");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod age;
pub mod binding;
pub mod client;
pub mod config;
pub mod error;
pub mod guru;
pub mod query;
pub mod question;
pub mod resolver;

// Re-export primary types at crate root for convenience
pub use binding::{Binding, RawBinding, RdfTerm, ResultSet, SparqlResults};
#[cfg(feature = "http")]
pub use client::HttpSparqlClient;
pub use client::{FixtureClient, QueryClient, ResultFormat};
pub use config::GuruConfig;
pub use error::{ErrorKind, GuruError, GuruResult, TransportError};
pub use guru::Guru;
pub use question::{Question, QuestionKind};
pub use resolver::{Answer, Resolver};
