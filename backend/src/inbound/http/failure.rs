//! Failures that can escape an HTTP handler.
//!
//! Every escaped failure is one of three shapes, matched in this order by the
//! classifier: a structured domain [`Error`], a request-layer
//! [`RequestFailure`] carrying its own status and body, or an opaque error the
//! service does not recognise.

use std::fmt;

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde_json::Value;

use crate::domain::{Error, FailureKind};

use super::classifier::classify;

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Failure>;

/// The three failure shapes the boundary understands.
#[derive(Debug)]
pub enum Failure {
    /// Structured domain error; its fields are authoritative.
    Domain(Error),
    /// Request-layer failure such as an extractor or validation rejection.
    Recognized(RequestFailure),
    /// Anything else. Its contents never reach the client.
    Unrecognized(Box<dyn std::error::Error>),
}

impl Failure {
    /// Wrap an arbitrary error as an unrecognized failure.
    pub fn unrecognized(error: impl Into<Box<dyn std::error::Error>>) -> Self {
        Self::Unrecognized(error.into())
    }

    /// Which classification branch the failure belongs to.
    #[must_use]
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::Domain(_) => FailureKind::Domain,
            Self::Recognized(_) => FailureKind::Recognized,
            Self::Unrecognized(_) => FailureKind::Unrecognized,
        }
    }

    /// `Display` renderings of the source chain, outermost first.
    #[must_use]
    pub fn source_chain(&self) -> Vec<String> {
        let mut chain = Vec::new();
        let mut next = std::error::Error::source(self);
        while let Some(source) = next {
            chain.push(source.to_string());
            next = source.source();
        }
        chain
    }

    /// Treat an actix error that is not a [`Failure`] as a recognized
    /// failure carrying the error's own status and text.
    #[must_use]
    pub fn from_actix(error: &actix_web::Error) -> Self {
        let response_error = error.as_response_error();
        Self::Recognized(RequestFailure::new(
            response_error.status_code().as_u16(),
            FailureBody::Text(error.to_string()),
        ))
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Domain(error) => write!(f, "domain error {}: {error}", error.code()),
            Self::Recognized(failure) => write!(f, "request failure {}", failure.status),
            Self::Unrecognized(error) => write!(f, "unrecognized failure: {error}"),
        }
    }
}

impl std::error::Error for Failure {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Domain(error) => Some(error),
            Self::Recognized(_) => None,
            Self::Unrecognized(error) => Some(error.as_ref()),
        }
    }
}

impl From<Error> for Failure {
    fn from(value: Error) -> Self {
        Self::Domain(value)
    }
}

impl From<RequestFailure> for Failure {
    fn from(value: RequestFailure) -> Self {
        Self::Recognized(value)
    }
}

impl From<std::io::Error> for Failure {
    fn from(value: std::io::Error) -> Self {
        Self::unrecognized(value)
    }
}

impl From<serde_json::Error> for Failure {
    fn from(value: serde_json::Error) -> Self {
        Self::unrecognized(value)
    }
}

impl ResponseError for Failure {
    fn status_code(&self) -> StatusCode {
        classify(self).status
    }

    fn error_response(&self) -> HttpResponse {
        classify(self).into_response()
    }
}

/// Request-layer failure carrying its own status and body.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestFailure {
    /// HTTP status raised by the request layer.
    pub status: u16,
    /// Body supplied with the failure.
    pub body: FailureBody,
}

impl RequestFailure {
    /// Build a failure from its status and body.
    #[must_use]
    pub fn new(status: u16, body: FailureBody) -> Self {
        Self { status, body }
    }

    /// Failure without a body.
    #[must_use]
    pub fn bare(status: u16) -> Self {
        Self::new(status, FailureBody::Empty)
    }

    /// Validation-layer rejection listing every violated rule.
    ///
    /// # Examples
    /// ```
    /// use envelope::inbound::http::failure::{FailureBody, FailureMessage, RequestFailure};
    ///
    /// let failure = RequestFailure::validation(vec!["limit must not be less than 1".into()]);
    /// assert_eq!(failure.status, 400);
    /// assert!(matches!(
    ///     failure.body,
    ///     FailureBody::Fields { message: Some(FailureMessage::Many(_)), .. }
    /// ));
    /// ```
    #[must_use]
    pub fn validation(messages: Vec<String>) -> Self {
        Self::new(
            400,
            FailureBody::Fields {
                message: Some(FailureMessage::Many(
                    messages.into_iter().map(Value::String).collect(),
                )),
                errors: None,
            },
        )
    }

    /// 404 raised when no route matches the request.
    #[must_use]
    pub fn route_not_found(method: &str, path: &str) -> Self {
        Self::new(
            404,
            FailureBody::Fields {
                message: Some(FailureMessage::Single(format!("Cannot {method} {path}"))),
                errors: None,
            },
        )
    }
}

/// Body attached to a [`RequestFailure`].
#[derive(Debug, Clone, PartialEq)]
pub enum FailureBody {
    /// No body.
    Empty,
    /// Plain-text body used verbatim as the message.
    Text(String),
    /// Structured body with an optional message and error list.
    Fields {
        /// Single message or a sequence of messages.
        message: Option<FailureMessage>,
        /// Additional error entries.
        errors: Option<Value>,
    },
}

/// Message field of a structured failure body.
#[derive(Debug, Clone, PartialEq)]
pub enum FailureMessage {
    /// One message.
    Single(String),
    /// Sequence of entries, typically one string per violated validation
    /// rule. Entries are kept as sent so the whole sequence can be echoed
    /// back as details.
    Many(Vec<Value>),
}

impl FailureBody {
    /// Read a framework-style JSON body.
    ///
    /// Strings become [`FailureBody::Text`]. Objects are searched for a string
    /// or array `message` and an `errors` entry. Anything else is treated as
    /// an empty body.
    #[must_use]
    pub fn from_json(value: Value) -> Self {
        match value {
            Value::String(text) => Self::Text(text),
            Value::Object(mut fields) => {
                let message = match fields.remove("message") {
                    Some(Value::String(text)) => Some(FailureMessage::Single(text)),
                    Some(Value::Array(items)) => Some(FailureMessage::Many(items)),
                    _ => None,
                };
                let errors = fields.remove("errors").filter(|errors| !errors.is_null());
                Self::Fields { message, errors }
            }
            _ => Self::Empty,
        }
    }
}
