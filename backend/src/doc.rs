//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every API path together with the envelope schemas so
//! clients can see both wire shapes: `{ success: true, message, data }` and
//! `{ success: false, message, code, details }`.
//!
//! The document is served by Swagger UI outside production and exported via
//! `cargo run --bin openapi-dump` for external tooling.

use utoipa::OpenApi;

use crate::domain::ErrorCode;
use crate::inbound::http::schemas::{
    EmptyEnvelopeSchema, ErrorEnvelopeSchema, UserEnvelopeSchema, UserListEnvelopeSchema,
    UserSchema,
};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Envelope API",
        description = "HTTP service whose every response uses a uniform success or error envelope."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::index::index,
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::get_user,
    ),
    components(schemas(
        ErrorEnvelopeSchema,
        ErrorCode,
        UserSchema,
        UserListEnvelopeSchema,
        UserEnvelopeSchema,
        EmptyEnvelopeSchema
    )),
    tags(
        (name = "users", description = "Operations related to users"),
        (name = "health", description = "Liveness of the service")
    )
)]
pub struct ApiDoc;
