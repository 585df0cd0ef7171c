//! Success transformer: wraps every successful handler result in the success
//! envelope, exactly once per request.
//!
//! [`SuccessEnvelope`] values are transformed when they are rendered as
//! responders; plain values are transformed by the boundary middleware. Both
//! paths go through [`transform`] and mark the response with [`Enveloped`],
//! which is how the boundary avoids wrapping a response twice.

use std::borrow::Cow;

use actix_web::{
    HttpRequest, HttpResponse, Responder,
    body::BoxBody,
    http::{
        StatusCode,
        header::{CONTENT_TYPE, HeaderValue},
    },
};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::domain::{DEFAULT_SUCCESS_MESSAGE, SuccessEnvelope};

use super::failure::Failure;

/// Success wire shape: `{ success: true, message, data }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuccessBody<T> {
    /// Always `true`.
    pub success: bool,
    /// Human-readable message.
    pub message: Cow<'static, str>,
    /// Payload; `null` when the handler returned none.
    pub data: Option<T>,
}

/// Response extension marking a body that already holds the success envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Enveloped;

/// Value a handler produced, as seen by the transformer.
#[derive(Debug, Clone, PartialEq)]
pub enum HandlerValue<T> {
    /// Bare data.
    Plain(T),
    /// Data with a handler-chosen message and status.
    Enveloped(SuccessEnvelope<T>),
}

/// Output of [`transform`].
#[derive(Debug, Clone, PartialEq)]
pub struct Transformed<T> {
    /// Status override to apply; `None` keeps the default success status.
    pub status: Option<StatusCode>,
    /// Envelope to send.
    pub body: SuccessBody<T>,
}

/// Build the success envelope for a handler value. Never touches `data`.
///
/// # Examples
/// ```
/// use envelope::domain::SuccessEnvelope;
/// use envelope::inbound::http::transformer::{HandlerValue, transform};
///
/// let plain = transform(HandlerValue::Plain(vec![1, 2]));
/// assert_eq!(plain.body.message, "OK");
/// assert!(plain.status.is_none());
///
/// let created = transform(HandlerValue::Enveloped(SuccessEnvelope::created("id-1")));
/// assert_eq!(created.body.message, "Created");
/// assert_eq!(created.status.map(|s| s.as_u16()), Some(201));
/// ```
pub fn transform<T>(value: HandlerValue<T>) -> Transformed<T> {
    match value {
        HandlerValue::Plain(data) => Transformed {
            status: None,
            body: SuccessBody {
                success: true,
                message: Cow::Borrowed(DEFAULT_SUCCESS_MESSAGE),
                data: Some(data),
            },
        },
        HandlerValue::Enveloped(envelope) => {
            let (data, message, status) = envelope.into_parts();
            Transformed {
                status: status.and_then(success_status),
                body: SuccessBody {
                    success: true,
                    message,
                    data,
                },
            }
        }
    }
}

fn success_status(status: u16) -> Option<StatusCode> {
    match StatusCode::from_u16(status) {
        Ok(code) => Some(code),
        Err(_) => {
            warn!(status, "ignoring invalid success status override");
            None
        }
    }
}

impl<T: Serialize> Transformed<T> {
    /// Render onto a fresh response with `default_status` unless overridden.
    #[must_use]
    pub fn into_response(self, default_status: StatusCode) -> HttpResponse {
        self.render_onto(HttpResponse::with_body(default_status, ()))
    }

    /// Render onto an existing response head, keeping its headers and
    /// extensions and replacing its body.
    #[must_use]
    pub fn render_onto(self, mut head: HttpResponse<()>) -> HttpResponse {
        let body = match serde_json::to_vec(&self.body) {
            Ok(body) => body,
            Err(error) => return HttpResponse::from_error(Failure::from(error)),
        };
        if let Some(status) = self.status {
            *head.status_mut() = status;
        }
        head.headers_mut()
            .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let mut response = head.set_body(BoxBody::new(body));
        response.extensions_mut().insert(Enveloped);
        response
    }
}

impl<T: Serialize> Responder for SuccessEnvelope<T> {
    type Body = BoxBody;

    fn respond_to(self, _req: &HttpRequest) -> HttpResponse<Self::Body> {
        transform(HandlerValue::Enveloped(self)).into_response(StatusCode::OK)
    }
}
