//! Error types for wikiguru.
//!
//! Every failure a question can end in is a variant of [`GuruError`].
//! Callers branch on [`GuruError::kind`] instead of matching on message
//! text; the `Display` output of each variant is the user-facing message.

use thiserror::Error;

use crate::question::QuestionKind;

/// Failures of the external query service, surfaced unchanged.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The request could not be sent or the response not read.
    #[error("Query request failed: {message}")]
    RequestFailed {
        /// Underlying failure.
        message: String,
    },

    /// The service answered with a non-success status.
    #[error("Query service returned status {code}: {body}")]
    Status {
        /// HTTP status code.
        code: u16,
        /// Start of the response body.
        body: String,
    },

    /// The response body is not a SPARQL JSON results document.
    #[error("Failed to decode query results: {message}")]
    Decode {
        /// Decoder message.
        message: String,
    },

    /// The configured endpoint is unusable.
    #[error("Invalid endpoint '{endpoint}': {reason}")]
    InvalidEndpoint {
        /// Endpoint as configured.
        endpoint: String,
        /// Why it was rejected.
        reason: String,
    },
}

impl From<serde_json::Error> for TransportError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode {
            message: err.to_string(),
        }
    }
}

#[cfg(feature = "http")]
impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            return Self::Decode {
                message: err.to_string(),
            };
        }
        Self::RequestFailed {
            message: err.to_string(),
        }
    }
}

/// Discriminant of [`GuruError`], for callers that only care about the kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Nothing follows the question phrase.
    MissingSubject,
    /// Neither question phrase occurs in the text.
    UnrecognizedQuestion,
    /// The query returned no rows.
    NotFound,
    /// The query returned more than one row.
    AmbiguousResult,
    /// The person has a death date.
    SubjectDeceased,
    /// A required field is absent from the single row.
    MissingField,
    /// A birth date could not be used.
    InvalidDate,
    /// The query service failed.
    Transport,
}

/// Top-level error type for wikiguru.
#[derive(Debug, Error)]
pub enum GuruError {
    /// Nothing follows the question phrase.
    #[error("{}", .kind.missing_subject_message())]
    MissingSubject {
        /// Kind of the question that lacks a subject.
        kind: QuestionKind,
    },

    /// Neither question phrase occurs in the text.
    #[error("Invalid question: {question}")]
    UnrecognizedQuestion {
        /// The question exactly as asked.
        question: String,
    },

    /// The query returned no rows.
    #[error("{subject} has not been found")]
    NotFound {
        /// Subject as queried.
        subject: String,
    },

    /// The query returned more than one row.
    #[error("Ambiguous result. {count} records returned")]
    AmbiguousResult {
        /// Number of rows returned.
        count: usize,
    },

    /// The single matching person has a death date.
    #[error("{subject} is dead")]
    SubjectDeceased {
        /// Subject as queried.
        subject: String,
    },

    /// A required field is absent from the single row.
    #[error("Field '{field}' is missing from the result")]
    MissingField {
        /// Name of the absent field.
        field: String,
    },

    /// A birth date could not be parsed or lies in the future.
    #[error("Invalid date '{value}': {reason}")]
    InvalidDate {
        /// Date text or value.
        value: String,
        /// Why it was rejected.
        reason: String,
    },

    /// The query service failed.
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),
}

impl GuruError {
    /// Creates a missing-field error.
    #[must_use]
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }

    /// Creates an invalid-date error.
    #[must_use]
    pub fn invalid_date(value: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidDate {
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Returns the kind of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingSubject { .. } => ErrorKind::MissingSubject,
            Self::UnrecognizedQuestion { .. } => ErrorKind::UnrecognizedQuestion,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::AmbiguousResult { .. } => ErrorKind::AmbiguousResult,
            Self::SubjectDeceased { .. } => ErrorKind::SubjectDeceased,
            Self::MissingField { .. } => ErrorKind::MissingField,
            Self::InvalidDate { .. } => ErrorKind::InvalidDate,
            Self::Transport(_) => ErrorKind::Transport,
        }
    }

    /// Returns true if the question itself was rejected before any query ran.
    #[must_use]
    pub const fn is_question_error(&self) -> bool {
        matches!(
            self,
            Self::MissingSubject { .. } | Self::UnrecognizedQuestion { .. }
        )
    }

    /// Returns true if this is a transport error.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    /// Returns true if asking again could succeed.
    ///
    /// Nothing in this crate retries; the classification is for callers.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::Transport(e) => match e {
                TransportError::RequestFailed { .. } => true,
                TransportError::Status { code, .. } => *code >= 500 || *code == 429,
                _ => false,
            },
            _ => false,
        }
    }
}

/// Result type alias for wikiguru operations.
pub type GuruResult<T> = Result<T, GuruError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_subject_messages() {
        let age = GuruError::MissingSubject {
            kind: QuestionKind::Age,
        };
        assert_eq!(age.to_string(), "Missing person's name");

        let population = GuruError::MissingSubject {
            kind: QuestionKind::Population,
        };
        assert_eq!(population.to_string(), "Missing city name");
    }

    #[test]
    fn test_resolution_messages() {
        let err = GuruError::NotFound {
            subject: "Narnia".to_string(),
        };
        assert_eq!(err.to_string(), "Narnia has not been found");

        let err = GuruError::AmbiguousResult { count: 2 };
        assert_eq!(err.to_string(), "Ambiguous result. 2 records returned");

        let err = GuruError::SubjectDeceased {
            subject: "Abraham Lincoln".to_string(),
        };
        assert_eq!(err.to_string(), "Abraham Lincoln is dead");

        let err = GuruError::UnrecognizedQuestion {
            question: "what is area of Berlin".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid question: what is area of Berlin");
    }

    #[test]
    fn test_kind_mapping() {
        assert_eq!(
            GuruError::missing_field("population").kind(),
            ErrorKind::MissingField
        );
        assert_eq!(
            GuruError::invalid_date("x", "bad").kind(),
            ErrorKind::InvalidDate
        );
        let err: GuruError = TransportError::Decode {
            message: "eof".to_string(),
        }
        .into();
        assert_eq!(err.kind(), ErrorKind::Transport);
        assert!(err.is_transport());
    }

    #[test]
    fn test_question_errors() {
        let err = GuruError::UnrecognizedQuestion {
            question: "hi".to_string(),
        };
        assert!(err.is_question_error());
        assert!(!GuruError::AmbiguousResult { count: 3 }.is_question_error());
    }

    #[test]
    fn test_retryable() {
        let err: GuruError = TransportError::Status {
            code: 503,
            body: String::new(),
        }
        .into();
        assert!(err.is_retryable());

        let err: GuruError = TransportError::Status {
            code: 400,
            body: "bad query".to_string(),
        }
        .into();
        assert!(!err.is_retryable());

        let err: GuruError = TransportError::RequestFailed {
            message: "refused".to_string(),
        }
        .into();
        assert!(err.is_retryable());

        assert!(!GuruError::NotFound {
            subject: "Narnia".to_string()
        }
        .is_retryable());
    }

    #[test]
    fn test_decode_from_serde() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: TransportError = parse_err.into();
        assert!(matches!(err, TransportError::Decode { .. }));
    }
}
