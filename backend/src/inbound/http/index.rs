//! Liveness endpoint at the API root.

use actix_web::get;

use crate::domain::SuccessEnvelope;
use crate::inbound::http::schemas::EmptyEnvelopeSchema;

/// Message returned by `GET /`.
pub const SERVER_RUNNING_MESSAGE: &str = "Server Running...";

/// Report that the server is accepting requests.
#[utoipa::path(
    get,
    path = "/",
    responses((status = 200, description = "Server is running", body = EmptyEnvelopeSchema)),
    tags = ["health"],
    operation_id = "index"
)]
#[get("/")]
pub async fn index() -> SuccessEnvelope<()> {
    SuccessEnvelope::empty().with_message(SERVER_RUNNING_MESSAGE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, http::StatusCode, test as actix_test};
    use serde_json::Value;

    #[actix_web::test]
    async fn index_reports_running_without_data() {
        let app = actix_test::init_service(App::new().service(index)).await;

        let response =
            actix_test::call_service(&app, actix_test::TestRequest::get().uri("/").to_request())
                .await;

        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = actix_test::read_body_json(response).await;
        insta::assert_json_snapshot!(body, @r#"
        {
          "data": null,
          "message": "Server Running...",
          "success": true
        }
        "#);
    }
}
