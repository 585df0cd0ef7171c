//! Response boundary applied once around the API scope.
//!
//! Every response leaving the scope is either the success envelope or the
//! error envelope:
//!
//! - responses carrying an error (handler `Err`, extractor rejection) and
//!   inner-service errors are classified by [`BoundaryClassifier`], which also
//!   reports them to the diagnostic sink;
//! - responses already marked [`Enveloped`] pass through untouched, whatever
//!   status the envelope chose;
//! - 4xx and 5xx responses built by hand are treated as recognized failures
//!   with their own status and text body;
//! - other 2xx responses are wrapped as plain handler values;
//! - 1xx, 3xx and `204 No Content` pass through.

use std::sync::Arc;
use std::task::{Context, Poll};

use actix_web::body::{BoxBody, MessageBody, to_bytes};
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::error::InternalError;
use actix_web::http::StatusCode;
use actix_web::http::header::{CONTENT_TYPE, HeaderName, HeaderValue};
use actix_web::web::Bytes;
use actix_web::{Error, HttpResponse};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use serde_json::Value;
use tracing::{debug, warn};

use crate::domain::{DiagnosticSink, TRACE_ID_HEADER};
use crate::inbound::http::classifier::{BoundaryClassifier, RequestContext};
use crate::inbound::http::failure::{Failure, FailureBody, RequestFailure};
use crate::inbound::http::transformer::{Enveloped, HandlerValue, transform};

/// Middleware enforcing the response envelopes.
///
/// # Examples
/// ```
/// use std::sync::Arc;
///
/// use actix_web::{App, web};
/// use envelope::middleware::Boundary;
/// use envelope::outbound::TracingDiagnosticSink;
///
/// let boundary = Boundary::new(Arc::new(TracingDiagnosticSink));
/// let _app = App::new().service(web::scope("/api").wrap(boundary));
/// ```
#[derive(Clone)]
pub struct Boundary {
    classifier: BoundaryClassifier,
}

impl Boundary {
    /// Build a boundary reporting failures to `sink`.
    pub fn new(sink: Arc<dyn DiagnosticSink>) -> Self {
        Self {
            classifier: BoundaryClassifier::new(sink),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for Boundary
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type InitError = ();
    type Transform = BoundaryMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(BoundaryMiddleware {
            service,
            classifier: self.classifier.clone(),
        }))
    }
}

/// Service wrapper produced by [`Boundary`].
pub struct BoundaryMiddleware<S> {
    service: S,
    classifier: BoundaryClassifier,
}

impl<S, B> Service<ServiceRequest> for BoundaryMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let context = RequestContext::from_request(req.request());
        let classifier = self.classifier.clone();
        let fut = self.service.call(req);
        Box::pin(async move {
            match fut.await {
                Ok(res) => Ok(finish(res, &classifier, &context).await),
                Err(error) => Err(escaped(&classifier, &error, &context)),
            }
        })
    }
}

async fn finish<B>(
    res: ServiceResponse<B>,
    classifier: &BoundaryClassifier,
    context: &RequestContext,
) -> ServiceResponse<BoxBody>
where
    B: MessageBody + 'static,
{
    let rendered = res
        .response()
        .error()
        .map(|error| render_error(classifier, error, context));
    if let Some(response) = rendered {
        let (request, _) = res.into_parts();
        return ServiceResponse::new(request, response);
    }

    let status = res.status();
    if res.response().extensions().contains::<Enveloped>()
        || status.is_informational()
        || status.is_redirection()
        || status == StatusCode::NO_CONTENT
    {
        return res.map_into_boxed_body();
    }

    let (request, response) = res.into_parts();
    if status.is_client_error() || status.is_server_error() {
        let failure = bare_failure(response).await;
        return ServiceResponse::new(request, classifier.handle(&failure, context));
    }
    ServiceResponse::new(request, wrap_success(response, classifier, context).await)
}

/// Classify an error returned by the inner service itself.
///
/// No request is available to build a [`ServiceResponse`], so the envelope
/// travels inside an [`InternalError`] that renders exactly that response.
fn escaped(classifier: &BoundaryClassifier, error: &Error, context: &RequestContext) -> Error {
    let mut response = render_error(classifier, error, context);
    if let Some(trace_id) = context.trace_id {
        match HeaderValue::from_str(&trace_id.to_string()) {
            Ok(value) => {
                response
                    .headers_mut()
                    .insert(HeaderName::from_static(TRACE_ID_HEADER), value);
            }
            Err(error) => warn!(%error, "failed to encode trace identifier header"),
        }
    }
    InternalError::from_response(error.to_string(), response).into()
}

fn render_error(
    classifier: &BoundaryClassifier,
    error: &Error,
    context: &RequestContext,
) -> HttpResponse {
    match error.as_error::<Failure>() {
        Some(failure) => classifier.handle(failure, context),
        None => classifier.handle(&Failure::from_actix(error), context),
    }
}

/// Turn a hand-built failure response into a recognized failure.
async fn bare_failure<B>(response: HttpResponse<B>) -> Failure
where
    B: MessageBody + 'static,
{
    let status = response.status().as_u16();
    let is_json = is_json(&response);
    let bytes = match to_bytes(response.into_body()).await {
        Ok(bytes) => bytes,
        Err(error) => return Failure::unrecognized(error),
    };
    let body = if bytes.is_empty() {
        FailureBody::Empty
    } else if is_json {
        serde_json::from_slice(&bytes).map_or_else(
            |_| text_body(&bytes),
            FailureBody::from_json,
        )
    } else {
        text_body(&bytes)
    };
    Failure::from(RequestFailure::new(status, body))
}

fn text_body(bytes: &Bytes) -> FailureBody {
    match std::str::from_utf8(bytes) {
        Ok(text) => FailureBody::Text(text.to_owned()),
        Err(_) => FailureBody::Empty,
    }
}

/// Wrap a plain success body in the success envelope.
async fn wrap_success<B>(
    response: HttpResponse<B>,
    classifier: &BoundaryClassifier,
    context: &RequestContext,
) -> HttpResponse
where
    B: MessageBody + 'static,
{
    let is_json = is_json(&response);
    let (head, body) = response.into_parts();
    let bytes = match to_bytes(body).await {
        Ok(bytes) => bytes,
        Err(error) => return classifier.handle(&Failure::unrecognized(error), context),
    };

    let data = if bytes.is_empty() {
        Value::Null
    } else if is_json {
        match serde_json::from_slice(&bytes) {
            Ok(value) => value,
            Err(error) => {
                return classifier.handle(&Failure::from(error), context);
            }
        }
    } else if let Ok(text) = std::str::from_utf8(&bytes) {
        Value::String(text.to_owned())
    } else {
        debug!(path = %context.path, len = bytes.len(), "passing binary body through unwrapped");
        return head.set_body(BoxBody::new(bytes));
    };

    transform(HandlerValue::Plain(data)).render_onto(head)
}

fn is_json<B>(response: &HttpResponse<B>) -> bool {
    response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| {
            let essence = value.split(';').next().unwrap_or_default().trim();
            essence.eq_ignore_ascii_case("application/json") || essence.ends_with("+json")
        })
}

#[cfg(test)]
mod tests;
