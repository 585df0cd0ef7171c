//! OpenAPI schema definitions for the response envelopes.
//!
//! Wire types stay free of utoipa derives; these wrappers mirror their
//! structure for documentation only. `ErrorCode` is the exception and derives
//! `ToSchema` itself so the taxonomy is listed once.

use utoipa::ToSchema;

use crate::domain::ErrorCode;

/// OpenAPI schema for [`crate::inbound::http::classifier::ErrorEnvelope`].
#[derive(ToSchema)]
#[schema(as = ErrorEnvelope)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorEnvelopeSchema {
    /// Always `false`.
    #[schema(example = false)]
    success: bool,
    /// Human-readable message.
    #[schema(example = "Resource not found")]
    message: String,
    /// Machine-readable error code.
    code: ErrorCode,
    /// Supplementary details; `null` when absent.
    details: Option<serde_json::Value>,
}

/// OpenAPI schema for [`crate::domain::User`].
#[derive(ToSchema)]
#[schema(as = User)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct UserSchema {
    /// Stable numeric identifier.
    #[schema(example = 1)]
    id: u32,
    /// Display name.
    #[schema(example = "John Doe")]
    name: String,
}

/// Success envelope carrying a page of users.
#[derive(ToSchema)]
#[schema(as = UserListEnvelope)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct UserListEnvelopeSchema {
    /// Always `true`.
    #[schema(example = true)]
    success: bool,
    #[schema(example = "Users fetched successfully")]
    message: String,
    data: Vec<UserSchema>,
}

/// Success envelope carrying one user.
#[derive(ToSchema)]
#[schema(as = UserEnvelope)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct UserEnvelopeSchema {
    #[schema(example = true)]
    success: bool,
    #[schema(example = "OK")]
    message: String,
    data: UserSchema,
}

/// Success envelope without data.
#[derive(ToSchema)]
#[schema(as = EmptyEnvelope)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct EmptyEnvelopeSchema {
    #[schema(example = true)]
    success: bool,
    #[schema(example = "Server Running...")]
    message: String,
    /// Always `null`.
    data: Option<serde_json::Value>,
}
