//! Boundary classifier: turns any escaped [`Failure`] into the error envelope.
//!
//! Precedence, first match wins:
//! 1. [`Failure::Domain`]: the structured error's fields are used verbatim.
//! 2. [`Failure::Recognized`]: status, message and details are read from the
//!    request-layer failure and the status is mapped through
//!    [`ErrorCode::for_status`].
//! 3. [`Failure::Unrecognized`]: a generic 500 with no details.
//!
//! Classification itself is pure. [`BoundaryClassifier`] adds the one side
//! effect: the raw failure is reported to the [`DiagnosticSink`] before the
//! envelope is rendered, whichever branch matched.

use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse, http::StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::domain::{DiagnosticSink, ErrorCode, FailureReport, TraceId};

use super::failure::{Failure, FailureBody, FailureMessage, RequestFailure};

/// Client-facing message for failures that carry none of their own.
pub const GENERIC_FAILURE_MESSAGE: &str = "Something went wrong";

/// Error wire shape: `{ success: false, message, code, details }`.
///
/// `details` is always present and serialises as `null` when absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    /// Always `false`.
    pub success: bool,
    /// Human-readable message.
    pub message: String,
    /// Taxonomy code.
    pub code: ErrorCode,
    /// Opaque supplementary details.
    pub details: Option<Value>,
}

impl ErrorEnvelope {
    fn new(message: impl Into<String>, code: ErrorCode, details: Option<Value>) -> Self {
        Self {
            success: false,
            message: message.into(),
            code,
            details,
        }
    }
}

/// Outgoing status plus envelope for one failure.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    /// Status the response is sent with.
    pub status: StatusCode,
    /// Body of the response.
    pub envelope: ErrorEnvelope,
}

impl Classification {
    /// Render the classification as a JSON response.
    #[must_use]
    pub fn into_response(self) -> HttpResponse {
        HttpResponse::build(self.status).json(self.envelope)
    }
}

/// Classify a failure without side effects.
///
/// # Examples
/// ```
/// use envelope::domain::ErrorCode;
/// use envelope::inbound::http::classifier::classify;
/// use envelope::inbound::http::failure::Failure;
///
/// let classified = classify(&Failure::unrecognized("database exploded"));
/// assert_eq!(classified.status.as_u16(), 500);
/// assert_eq!(classified.envelope.code, ErrorCode::InternalError);
/// assert_eq!(classified.envelope.message, "Something went wrong");
/// ```
#[must_use]
pub fn classify(failure: &Failure) -> Classification {
    match failure {
        Failure::Domain(error) => Classification {
            status: status_or_internal(error.status()),
            envelope: ErrorEnvelope::new(error.message(), error.code(), error.details().cloned()),
        },
        Failure::Recognized(request) => classify_request_failure(request),
        Failure::Unrecognized(_) => Classification {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            envelope: ErrorEnvelope::new(GENERIC_FAILURE_MESSAGE, ErrorCode::InternalError, None),
        },
    }
}

fn classify_request_failure(failure: &RequestFailure) -> Classification {
    let (message, details) = match &failure.body {
        FailureBody::Empty => (None, None),
        FailureBody::Text(text) => (Some(text.clone()), None),
        FailureBody::Fields {
            message: Some(FailureMessage::Many(messages)),
            ..
        } => (
            messages.first().and_then(Value::as_str).map(str::to_owned),
            Some(Value::Array(messages.clone())),
        ),
        FailureBody::Fields {
            message: Some(FailureMessage::Single(text)),
            errors,
        } => (Some(text.clone()), errors.clone()),
        FailureBody::Fields {
            message: None,
            errors,
        } => (None, errors.clone()),
    };
    let message = message
        .filter(|text| !text.trim().is_empty())
        .unwrap_or_else(|| GENERIC_FAILURE_MESSAGE.to_owned());

    Classification {
        status: status_or_internal(failure.status),
        envelope: ErrorEnvelope::new(message, ErrorCode::for_status(failure.status), details),
    }
}

fn status_or_internal(status: u16) -> StatusCode {
    StatusCode::from_u16(status).unwrap_or_else(|_| {
        warn!(status, "failure carries an invalid HTTP status; sending 500");
        StatusCode::INTERNAL_SERVER_ERROR
    })
}

/// Request attributes recorded alongside a failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    /// HTTP method.
    pub method: String,
    /// Request path.
    pub path: String,
    /// Trace identifier in scope, if any.
    pub trace_id: Option<TraceId>,
}

impl RequestContext {
    /// Capture the context of `request` and the trace identifier in scope.
    #[must_use]
    pub fn from_request(request: &HttpRequest) -> Self {
        Self {
            method: request.method().to_string(),
            path: request.path().to_owned(),
            trace_id: TraceId::current(),
        }
    }
}

/// Classifier bound to the diagnostic sink every failure is reported to.
#[derive(Clone)]
pub struct BoundaryClassifier {
    sink: Arc<dyn DiagnosticSink>,
}

impl BoundaryClassifier {
    /// Create a classifier reporting to `sink`.
    pub fn new(sink: Arc<dyn DiagnosticSink>) -> Self {
        Self { sink }
    }

    /// Report `failure` to the sink, then render its error envelope.
    pub fn handle(&self, failure: &Failure, context: &RequestContext) -> HttpResponse {
        let classification = classify(failure);
        self.sink.record(&FailureReport {
            trace_id: context.trace_id,
            method: context.method.clone(),
            path: context.path.clone(),
            status: classification.status.as_u16(),
            code: classification.envelope.code,
            kind: failure.kind(),
            detail: format!("{failure:?}"),
            sources: failure.source_chain(),
        });
        classification.into_response()
    }
}
