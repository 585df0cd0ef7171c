//! Tests for the response boundary.

use std::sync::Mutex;

use super::*;
use crate::domain::{Error as DomainError, ErrorCode, FailureKind, FailureReport, SuccessEnvelope};
use crate::inbound::http::ApiResult;
use crate::inbound::http::classifier::ErrorEnvelope;
use actix_web::dev::ServiceFactory;
use actix_web::http::header::LOCATION;
use actix_web::test::{self as actix_test, TestRequest};
use actix_web::{App, Scope, web};
use rstest::rstest;
use serde_json::json;

#[derive(Default)]
struct RecordingSink {
    reports: Mutex<Vec<FailureReport>>,
}

impl RecordingSink {
    fn reports(&self) -> Vec<FailureReport> {
        self.reports.lock().expect("sink lock").clone()
    }
}

impl DiagnosticSink for RecordingSink {
    fn record(&self, report: &FailureReport) {
        self.reports.lock().expect("sink lock").push(report.clone());
    }
}

#[derive(Debug, thiserror::Error)]
#[error("pool exhausted: postgres://app:hunter2@db")]
struct PoolExhausted;

async fn json_data() -> web::Json<Value> {
    web::Json(json!({ "id": 1 }))
}

async fn created() -> SuccessEnvelope<Value> {
    SuccessEnvelope::created(json!({ "id": "abc" }))
}

async fn partially_applied() -> SuccessEnvelope<Value> {
    SuccessEnvelope::ok(json!({ "id": 1 }))
        .with_message("Partially applied")
        .with_status(400)
}

async fn text() -> &'static str {
    "hello"
}

async fn empty() -> HttpResponse {
    HttpResponse::Ok().finish()
}

async fn binary() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("application/octet-stream")
        .body(vec![0xff_u8, 0xfe, 0x00])
}

async fn conflict() -> ApiResult<HttpResponse> {
    Err(DomainError::conflict().with_message("dup").into())
}

async fn hand_built_bad_request() -> HttpResponse {
    HttpResponse::BadRequest().body("nope")
}

async fn hand_built_unavailable() -> HttpResponse {
    HttpResponse::ServiceUnavailable().json(json!({ "message": "down for maintenance" }))
}

async fn leaky() -> ApiResult<HttpResponse> {
    Err(Failure::unrecognized(PoolExhausted))
}

async fn actix_forbidden() -> Result<HttpResponse, Error> {
    Err(actix_web::error::ErrorForbidden("no entry"))
}

async fn redirect() -> HttpResponse {
    HttpResponse::Found()
        .insert_header((LOCATION, "/json"))
        .finish()
}

async fn no_content() -> HttpResponse {
    HttpResponse::NoContent().finish()
}

async fn not_found(request: actix_web::HttpRequest) -> ApiResult<HttpResponse> {
    Err(RequestFailure::route_not_found(request.method().as_str(), request.path()).into())
}

fn scope(
    sink: Arc<RecordingSink>,
) -> Scope<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<BoxBody>,
        Error = Error,
        InitError = (),
    >,
> {
    web::scope("")
        .route("/json", web::get().to(json_data))
        .route("/created", web::post().to(created))
        .route("/partial", web::get().to(partially_applied))
        .route("/text", web::get().to(text))
        .route("/empty", web::get().to(empty))
        .route("/binary", web::get().to(binary))
        .route("/conflict", web::get().to(conflict))
        .route("/bad-request", web::get().to(hand_built_bad_request))
        .route("/unavailable", web::get().to(hand_built_unavailable))
        .route("/leaky", web::get().to(leaky))
        .route("/forbidden", web::get().to(actix_forbidden))
        .route("/redirect", web::get().to(redirect))
        .route("/no-content", web::get().to(no_content))
        .default_service(web::to(not_found))
        .wrap(Boundary::new(sink))
}

async fn call(sink: &Arc<RecordingSink>, req: TestRequest) -> ServiceResponse {
    let app = actix_test::init_service(App::new().service(scope(Arc::clone(sink)))).await;
    actix_test::call_service(&app, req.to_request()).await
}

async fn get(sink: &Arc<RecordingSink>, uri: &str) -> ServiceResponse {
    call(sink, TestRequest::get().uri(uri)).await
}

#[rstest]
#[case("/json", json!({ "id": 1 }))]
#[case("/text", json!("hello"))]
#[case("/empty", Value::Null)]
#[actix_web::test]
async fn plain_successes_are_wrapped_with_default_message(
    #[case] uri: &str,
    #[case] data: Value,
) {
    let sink = Arc::new(RecordingSink::default());

    let res = get(&sink, uri).await;

    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body, json!({ "success": true, "message": "OK", "data": data }));
    assert!(sink.reports().is_empty());
}

#[actix_web::test]
async fn enveloped_successes_are_not_wrapped_twice() {
    let sink = Arc::new(RecordingSink::default());

    let res = call(&sink, TestRequest::post().uri("/created")).await;

    assert_eq!(res.status(), StatusCode::CREATED);
    let body: Value = actix_test::read_body_json(res).await;
    insta::assert_json_snapshot!(body, @r#"
    {
      "data": {
        "id": "abc"
      },
      "message": "Created",
      "success": true
    }
    "#);
}

#[actix_web::test]
async fn envelope_status_overrides_keep_the_success_shape() {
    let sink = Arc::new(RecordingSink::default());

    let res = get(&sink, "/partial").await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(
        body,
        json!({ "success": true, "message": "Partially applied", "data": { "id": 1 } })
    );
    assert!(sink.reports().is_empty());
}

#[actix_web::test]
async fn inner_service_errors_escape_as_rendered_envelopes() {
    let sink = Arc::new(RecordingSink::default());
    let app = actix_test::init_service(
        App::new().service(
            web::scope("")
                .route("/json", web::get().to(json_data))
                .wrap_fn(|_req, _srv| {
                    ready(Err::<ServiceResponse, _>(Error::from(Failure::from(
                        DomainError::service_unavailable().with_message("draining"),
                    ))))
                })
                .wrap(Boundary::new(Arc::clone(&sink) as Arc<dyn DiagnosticSink>)),
        ),
    )
    .await;

    let result =
        actix_test::try_call_service(&app, TestRequest::get().uri("/json").to_request()).await;

    let Err(error) = result else {
        panic!("inner error should escape the boundary");
    };
    let response = error.error_response();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body = to_bytes(response.into_body()).await.expect("response body");
    let body: Value = serde_json::from_slice(&body).expect("json body");
    assert_eq!(
        body,
        json!({
            "success": false,
            "message": "draining",
            "code": "SERVICE_UNAVAILABLE",
            "details": null
        })
    );
    let reports = sink.reports();
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].kind, FailureKind::Domain);
    assert_eq!(reports[0].path, "/json");
}

#[actix_web::test]
async fn binary_bodies_pass_through() {
    let sink = Arc::new(RecordingSink::default());

    let res = get(&sink, "/binary").await;

    assert_eq!(res.status(), StatusCode::OK);
    let body = actix_test::read_body(res).await;
    assert_eq!(body.as_ref(), &[0xff_u8, 0xfe, 0x00]);
}

#[rstest]
#[case("/redirect", StatusCode::FOUND)]
#[case("/no-content", StatusCode::NO_CONTENT)]
#[actix_web::test]
async fn non_enveloped_statuses_pass_through(#[case] uri: &str, #[case] status: StatusCode) {
    let sink = Arc::new(RecordingSink::default());

    let res = get(&sink, uri).await;

    assert_eq!(res.status(), status);
    let body = actix_test::read_body(res).await;
    assert!(body.is_empty());
}

#[actix_web::test]
async fn domain_errors_keep_their_fields_and_are_reported() {
    let sink = Arc::new(RecordingSink::default());

    let res = get(&sink, "/conflict").await;

    assert_eq!(res.status(), StatusCode::CONFLICT);
    let body: Value = actix_test::read_body_json(res).await;
    insta::assert_json_snapshot!(body, @r#"
    {
      "code": "RESOURCE_CONFLICT",
      "details": null,
      "message": "dup",
      "success": false
    }
    "#);
    let reports = sink.reports();
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].kind, FailureKind::Domain);
    assert_eq!(reports[0].path, "/conflict");
    assert_eq!(reports[0].method, "GET");
}

#[rstest]
#[case("/bad-request", StatusCode::BAD_REQUEST, "nope", ErrorCode::BadRequest)]
#[case(
    "/unavailable",
    StatusCode::SERVICE_UNAVAILABLE,
    "down for maintenance",
    ErrorCode::ServiceUnavailable
)]
#[case("/forbidden", StatusCode::FORBIDDEN, "no entry", ErrorCode::Forbidden)]
#[case("/missing", StatusCode::NOT_FOUND, "Cannot GET /missing", ErrorCode::NotFound)]
#[actix_web::test]
async fn request_layer_failures_are_recognized(
    #[case] uri: &str,
    #[case] status: StatusCode,
    #[case] message: &str,
    #[case] code: ErrorCode,
) {
    let sink = Arc::new(RecordingSink::default());

    let res = get(&sink, uri).await;

    assert_eq!(res.status(), status);
    let envelope: ErrorEnvelope = actix_test::read_body_json(res).await;
    assert_eq!(envelope.message, message);
    assert_eq!(envelope.code, code);
    let reports = sink.reports();
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].kind, FailureKind::Recognized);
}

#[actix_web::test]
async fn unrecognized_failures_are_hidden_from_clients_but_reported_in_full() {
    let sink = Arc::new(RecordingSink::default());

    let res = get(&sink, "/leaky").await;

    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = actix_test::read_body(res).await;
    let text = std::str::from_utf8(&body).expect("utf8 body");
    assert!(!text.contains("hunter2"));
    let envelope: ErrorEnvelope = serde_json::from_str(text).expect("error envelope");
    assert_eq!(envelope.code, ErrorCode::InternalError);
    assert_eq!(envelope.message, "Something went wrong");
    assert_eq!(envelope.details, None);

    let reports = sink.reports();
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].kind, FailureKind::Unrecognized);
    assert_eq!(reports[0].status, 500);
    assert_eq!(
        reports[0].sources,
        vec!["pool exhausted: postgres://app:hunter2@db".to_owned()]
    );
}

#[rstest]
#[case("application/json", true)]
#[case("application/json; charset=utf-8", true)]
#[case("application/problem+json", true)]
#[case("text/plain", false)]
fn json_content_types_are_detected(#[case] content_type: &str, #[case] expected: bool) {
    let response = HttpResponse::Ok().content_type(content_type).finish();
    assert_eq!(is_json(&response), expected);
}
