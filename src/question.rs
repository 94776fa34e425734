//! Question routing.
//!
//! Two question templates are understood:
//! - `how old is <person>`
//! - `what is the population of <city>`
//!
//! Matching is case-insensitive and substring-based: the template phrase
//! may appear anywhere in the text, not only at the start.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{GuruError, GuruResult};

/// The kind of a recognized question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    /// "how old is <person>"
    Age,
    /// "what is the population of <city>"
    Population,
}

impl QuestionKind {
    /// All kinds, in the order they are matched.
    pub const ALL: [Self; 2] = [Self::Age, Self::Population];

    /// The lowercase template phrase, including its trailing space.
    #[must_use]
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Age => "how old is ",
            Self::Population => "what is the population of ",
        }
    }

    /// Message used when the subject after the phrase is empty.
    #[must_use]
    pub const fn missing_subject_message(self) -> &'static str {
        match self {
            Self::Age => "Missing person's name",
            Self::Population => "Missing city name",
        }
    }
}

impl fmt::Display for QuestionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Age => write!(f, "age"),
            Self::Population => write!(f, "population"),
        }
    }
}

/// A classified question with its normalized subject.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    /// Which template matched.
    pub kind: QuestionKind,
    /// Subject, trimmed and title-cased.
    pub subject: String,
}

impl Question {
    /// Classifies free text and extracts the subject.
    ///
    /// The text is lowercased, the first matching template phrase is
    /// removed everywhere it occurs, and the remainder is trimmed and
    /// title-cased.
    ///
    /// # Errors
    ///
    /// - `GuruError::MissingSubject` if nothing is left after the phrase.
    /// - `GuruError::UnrecognizedQuestion` if no template phrase occurs;
    ///   the message carries the original text.
    ///
    /// # Examples
    ///
    /// ```
    /// use wikiguru::{Question, QuestionKind};
    ///
    /// let q = Question::parse("What is the population of paris").unwrap();
    /// assert_eq!(q.kind, QuestionKind::Population);
    /// assert_eq!(q.subject, "Paris");
    /// ```
    pub fn parse(text: &str) -> GuruResult<Self> {
        let lowered = text.to_lowercase();

        let kind = QuestionKind::ALL
            .into_iter()
            .find(|kind| lowered.contains(kind.prefix()))
            .ok_or_else(|| GuruError::UnrecognizedQuestion {
                question: text.to_string(),
            })?;

        let remainder = lowered.replace(kind.prefix(), "");
        let remainder = remainder.trim();
        if remainder.is_empty() {
            return Err(GuruError::MissingSubject { kind });
        }

        Ok(Self {
            kind,
            subject: title_case(remainder),
        })
    }
}

/// Title-cases text word by word.
///
/// A letter is uppercased when it starts the text or follows an uncased
/// character, and lowercased when it follows a cased letter, so `"o'neil"`
/// becomes `"O'Neil"`. Letters without case (Hebrew, CJK) count as uncased.
#[must_use]
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut after_cased = false;
    for ch in text.chars() {
        if !ch.is_alphabetic() {
            out.push(ch);
        } else if after_cased {
            out.extend(ch.to_lowercase());
        } else {
            out.extend(ch.to_uppercase());
        }
        after_cased = ch.is_lowercase() || ch.is_uppercase();
    }
    out
}
