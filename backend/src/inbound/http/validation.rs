//! Request validation adapters.
//!
//! Extractor rejections and query validation both surface as recognized
//! [`RequestFailure`]s in the validation-layer shape: a 400 whose body lists
//! one message per violated rule. The classifier then picks the first message
//! and exposes the full list as `details`.

use actix_web::{HttpRequest, error::JsonPayloadError, web};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;
use utoipa::IntoParams;

use super::failure::{Failure, FailureBody, FailureMessage, RequestFailure};

/// Upper bound on JSON request bodies.
pub const JSON_LIMIT_BYTES: usize = 256 * 1024;
/// Page size used when a listing request gives none.
pub const DEFAULT_PAGE_LIMIT: i64 = 20;
/// Largest page size a listing request may ask for.
pub const MAX_PAGE_LIMIT: i64 = 100;

/// JSON extractor configuration reporting failures through the boundary.
#[must_use]
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(JSON_LIMIT_BYTES)
        .error_handler(|error, request| json_failure(&error, request).into())
}

/// Query extractor configuration reporting failures through the boundary.
#[must_use]
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|error, request| {
        rejected(request, "query", error.to_string()).into()
    })
}

/// Path extractor configuration reporting failures through the boundary.
#[must_use]
pub fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(|error, request| {
        rejected(request, "path", error.to_string()).into()
    })
}

fn json_failure(error: &JsonPayloadError, request: &HttpRequest) -> Failure {
    match error {
        JsonPayloadError::OverflowKnownLength { .. } | JsonPayloadError::Overflow { .. } => {
            debug!(path = request.path(), %error, "rejected oversized JSON payload");
            Failure::from(RequestFailure::new(
                413,
                FailureBody::Fields {
                    message: Some(FailureMessage::Many(vec![Value::String(error.to_string())])),
                    errors: None,
                },
            ))
        }
        other => rejected(request, "json", other.to_string()),
    }
}

fn rejected(request: &HttpRequest, source: &'static str, message: String) -> Failure {
    debug!(path = request.path(), source, %message, "rejected request input");
    Failure::from(RequestFailure::validation(vec![message]))
}

/// Query string accepted by `GET /users`.
///
/// The fields are signed so that negative input reaches [`Self::validate`]
/// and is reported alongside every other violated rule.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListUsersQuery {
    /// Page size, 1 to 100. Defaults to 20.
    pub limit: Option<i64>,
    /// Number of users to skip. Defaults to 0.
    pub offset: Option<i64>,
}

/// Validated pagination window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    /// Number of users to skip.
    pub offset: usize,
    /// Maximum number of users to return.
    pub limit: usize,
}

impl ListUsersQuery {
    /// Check every rule and collect one message per violation.
    ///
    /// # Errors
    /// Returns a validation [`RequestFailure`] listing each violated rule.
    ///
    /// # Examples
    /// ```
    /// use envelope::inbound::http::validation::ListUsersQuery;
    ///
    /// let query = ListUsersQuery { limit: Some(0), offset: Some(-1) };
    /// let failure = query.validate().expect_err("both rules are violated");
    /// assert_eq!(failure.status, 400);
    /// ```
    pub fn validate(&self) -> Result<Page, RequestFailure> {
        let limit = self.limit.unwrap_or(DEFAULT_PAGE_LIMIT);
        let offset = self.offset.unwrap_or(0);

        let mut violations = Vec::new();
        if limit < 1 {
            violations.push("limit must not be less than 1".to_owned());
        }
        if limit > MAX_PAGE_LIMIT {
            violations.push(format!("limit must not be greater than {MAX_PAGE_LIMIT}"));
        }
        if offset < 0 {
            violations.push("offset must not be less than 0".to_owned());
        }

        match (usize::try_from(offset), usize::try_from(limit)) {
            (Ok(offset), Ok(limit)) if violations.is_empty() => Ok(Page { offset, limit }),
            _ => Err(RequestFailure::validation(violations)),
        }
    }
}
