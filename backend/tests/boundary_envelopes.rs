//! End-to-end behaviour of the response boundary over the full API surface.
//!
//! Each scenario drives the assembled app (trace middleware, API scope and
//! boundary) and checks the envelope on the wire together with what reached
//! the diagnostic sink.

use std::sync::{Arc, Mutex};

use actix_web::dev::ServiceResponse;
use actix_web::http::StatusCode;
use actix_web::{App, Error, test, web};
use envelope::domain::{
    DiagnosticSink, Error as DomainError, FailureKind, FailureReport, SuccessEnvelope,
    TRACE_ID_HEADER, UserDirectory,
};
use envelope::inbound::http::failure::Failure;
use envelope::inbound::http::{ApiState, api_scope};
use envelope::{Boundary, Trace};
use futures_util::future::ready;
use rstest::{fixture, rstest};
use serde_json::{Value, json};

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

#[fixture]
fn sink() -> Arc<RecordingSink> {
    Arc::new(RecordingSink::default())
}

struct Exchange {
    status: StatusCode,
    trace_id: Option<String>,
    body: Value,
}

async fn send(sink: &Arc<RecordingSink>, request: test::TestRequest) -> Exchange {
    let app = test::init_service(
        App::new()
            .wrap(Trace)
            .service(api_scope(ApiState::new(UserDirectory::default()), boundary(sink))),
    )
    .await;
    let res = test::call_service(&app, request.to_request()).await;
    let status = res.status();
    let trace_id = res
        .headers()
        .get(TRACE_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    let body = test::read_body_json(res).await;
    Exchange {
        status,
        trace_id,
        body,
    }
}

fn boundary(sink: &Arc<RecordingSink>) -> Boundary {
    Boundary::new(Arc::clone(sink) as Arc<dyn DiagnosticSink>)
}

async fn get(sink: &Arc<RecordingSink>, uri: &str) -> Exchange {
    send(sink, test::TestRequest::get().uri(uri)).await
}

#[rstest]
#[actix_web::test]
async fn root_reports_server_running(sink: Arc<RecordingSink>) {
    let exchange = get(&sink, "/").await;

    assert_eq!(exchange.status, StatusCode::OK);
    assert_eq!(
        exchange.body,
        json!({ "success": true, "message": "Server Running...", "data": null })
    );
    assert!(sink.reports().is_empty());
}

#[rstest]
#[actix_web::test]
async fn user_listing_uses_handler_message(sink: Arc<RecordingSink>) {
    let exchange = get(&sink, "/users?limit=10&offset=0").await;

    assert_eq!(exchange.status, StatusCode::OK);
    insta::assert_json_snapshot!(exchange.body, @r#"
    {
      "data": [
        {
          "id": 1,
          "name": "John Doe"
        }
      ],
      "message": "Users fetched successfully",
      "success": true
    }
    "#);
}

#[rstest]
#[actix_web::test]
async fn plain_handler_body_is_wrapped_once(sink: Arc<RecordingSink>) {
    let exchange = get(&sink, "/users/1").await;

    assert_eq!(exchange.status, StatusCode::OK);
    assert_eq!(
        exchange.body,
        json!({ "success": true, "message": "OK", "data": { "id": 1, "name": "John Doe" } })
    );
}

#[rstest]
#[actix_web::test]
async fn unknown_user_is_a_domain_not_found(sink: Arc<RecordingSink>) {
    let exchange = get(&sink, "/users/42").await;

    assert_eq!(exchange.status, StatusCode::NOT_FOUND);
    assert_eq!(
        exchange.body,
        json!({
            "success": false,
            "message": "User 42 not found",
            "code": "RESOURCE_NOT_FOUND",
            "details": { "id": 42 }
        })
    );
    let reports = sink.reports();
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].kind, FailureKind::Domain);
}

#[rstest]
#[actix_web::test]
async fn unmatched_route_is_a_generic_not_found(sink: Arc<RecordingSink>) {
    let exchange = get(&sink, "/does-not-exist").await;

    assert_eq!(exchange.status, StatusCode::NOT_FOUND);
    assert_eq!(
        exchange.body,
        json!({
            "success": false,
            "message": "Cannot GET /does-not-exist",
            "code": "NOT_FOUND",
            "details": null
        })
    );
}

#[rstest]
#[actix_web::test]
async fn invalid_pagination_lists_every_violation(sink: Arc<RecordingSink>) {
    let exchange = get(&sink, "/users?limit=0&offset=-5").await;

    assert_eq!(exchange.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        exchange.body,
        json!({
            "success": false,
            "message": "limit must not be less than 1",
            "code": "BAD_REQUEST",
            "details": ["limit must not be less than 1", "offset must not be less than 0"]
        })
    );
    let reports = sink.reports();
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].kind, FailureKind::Recognized);
}

#[rstest]
#[actix_web::test]
async fn malformed_path_segment_is_a_bad_request(sink: Arc<RecordingSink>) {
    let exchange = get(&sink, "/users/not-a-number").await;

    assert_eq!(exchange.status, StatusCode::BAD_REQUEST);
    assert_eq!(exchange.body["code"], "BAD_REQUEST");
    assert_eq!(exchange.body["success"], false);
    assert!(exchange.body["details"].is_array());
}

#[rstest]
#[actix_web::test]
async fn failure_reports_carry_the_response_trace_id(sink: Arc<RecordingSink>) {
    let exchange = get(&sink, "/users/42").await;

    let trace_id = exchange.trace_id.expect("trace id header");
    let reports = sink.reports();
    assert_eq!(
        reports[0].trace_id.map(|id| id.to_string()),
        Some(trace_id)
    );
    assert_eq!(reports[0].method, "GET");
    assert_eq!(reports[0].path, "/users/42");
}

#[rstest]
#[actix_web::test]
async fn inbound_trace_id_is_echoed_on_failures(sink: Arc<RecordingSink>) {
    let inbound = "67e55044-10b1-426f-9247-bb680e5fe0c8";

    let exchange = send(
        &sink,
        test::TestRequest::get()
            .uri("/nowhere")
            .insert_header((TRACE_ID_HEADER, inbound)),
    )
    .await;

    assert_eq!(exchange.status, StatusCode::NOT_FOUND);
    assert_eq!(exchange.trace_id.as_deref(), Some(inbound));
    assert_eq!(
        sink.reports()[0].trace_id.map(|id| id.to_string()).as_deref(),
        Some(inbound)
    );
}

async fn partially_applied() -> SuccessEnvelope<Value> {
    SuccessEnvelope::ok(json!({ "id": 1 }))
        .with_message("Partially applied")
        .with_status(400)
}

#[rstest]
#[actix_web::test]
async fn success_envelope_with_error_status_stays_a_success(sink: Arc<RecordingSink>) {
    let app = test::init_service(
        App::new().wrap(Trace).service(
            web::scope("")
                .route("/partial", web::get().to(partially_applied))
                .wrap(boundary(&sink)),
        ),
    )
    .await;

    let res = test::call_service(&app, test::TestRequest::get().uri("/partial").to_request()).await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert!(res.headers().contains_key(TRACE_ID_HEADER));
    let body: Value = test::read_body_json(res).await;
    assert_eq!(
        body,
        json!({ "success": true, "message": "Partially applied", "data": { "id": 1 } })
    );
    assert!(sink.reports().is_empty());
}

#[rstest]
#[actix_web::test]
async fn errors_raised_below_the_boundary_are_enveloped_and_traced(sink: Arc<RecordingSink>) {
    let inbound = "9b2f1c3e-5d4a-4e8f-a1b2-c3d4e5f60718";
    let app = test::init_service(
        App::new().wrap(Trace).service(
            web::scope("")
                .route("/partial", web::get().to(partially_applied))
                .wrap_fn(|_req, _srv| {
                    ready(Err::<ServiceResponse, _>(Error::from(Failure::from(
                        DomainError::unauthorized(),
                    ))))
                })
                .wrap(boundary(&sink)),
        ),
    )
    .await;

    let result = test::try_call_service(
        &app,
        test::TestRequest::get()
            .uri("/partial")
            .insert_header((TRACE_ID_HEADER, inbound))
            .to_request(),
    )
    .await;

    let Err(error) = result else {
        panic!("inner error should escape as an error");
    };
    let response = error.error_response();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        response
            .headers()
            .get(TRACE_ID_HEADER)
            .and_then(|value| value.to_str().ok()),
        Some(inbound)
    );
    let body = actix_web::body::to_bytes(response.into_body())
        .await
        .expect("response body");
    let body: Value = serde_json::from_slice(&body).expect("json body");
    assert_eq!(
        body,
        json!({
            "success": false,
            "message": "Unauthorized",
            "code": "UNAUTHORIZED",
            "details": null
        })
    );
    let reports = sink.reports();
    assert_eq!(reports.len(), 1);
    assert_eq!(
        reports[0].trace_id.map(|id| id.to_string()).as_deref(),
        Some(inbound)
    );
}
