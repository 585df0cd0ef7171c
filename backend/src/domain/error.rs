//! Domain-level error types.
//!
//! These errors are transport agnostic. They carry the HTTP-equivalent status
//! the failure should surface with, but the inbound adapter decides how that
//! status and the rest of the payload reach the wire.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::ErrorCode;

/// Status used when a caller constructs an error without choosing one.
pub const DEFAULT_ERROR_STATUS: u16 = 400;

/// HTTP status classes the error factory builds errors for.
///
/// Each class supplies a default status, message, and code; constructors on
/// [`Error`] start from these defaults and callers override what they need.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusClass {
    /// 400.
    BadRequest,
    /// 401.
    Unauthorized,
    /// 403.
    Forbidden,
    /// 404.
    NotFound,
    /// 409.
    Conflict,
    /// 422.
    Unprocessable,
    /// 500.
    Internal,
    /// 503.
    ServiceUnavailable,
}

impl StatusClass {
    /// HTTP status of the class.
    #[must_use]
    pub const fn status(self) -> u16 {
        match self {
            Self::BadRequest => 400,
            Self::Unauthorized => 401,
            Self::Forbidden => 403,
            Self::NotFound => 404,
            Self::Conflict => 409,
            Self::Unprocessable => 422,
            Self::Internal => 500,
            Self::ServiceUnavailable => 503,
        }
    }

    /// Code used when the caller does not pick one.
    #[must_use]
    pub const fn default_code(self) -> ErrorCode {
        match self {
            Self::BadRequest => ErrorCode::BadRequest,
            Self::Unauthorized => ErrorCode::Unauthorized,
            Self::Forbidden => ErrorCode::Forbidden,
            Self::NotFound => ErrorCode::ResourceNotFound,
            Self::Conflict => ErrorCode::ResourceConflict,
            Self::Unprocessable => ErrorCode::BusinessRuleViolation,
            Self::Internal => ErrorCode::InternalError,
            Self::ServiceUnavailable => ErrorCode::ServiceUnavailable,
        }
    }

    /// Message used when the caller does not supply one.
    #[must_use]
    pub const fn default_message(self) -> &'static str {
        match self {
            Self::BadRequest => "Bad Request",
            Self::Unauthorized => "Unauthorized",
            Self::Forbidden => "Forbidden",
            Self::NotFound => "Resource not found",
            Self::Conflict => "Conflict",
            Self::Unprocessable => "Unprocessable entity",
            Self::Internal => "Internal Server Error",
            Self::ServiceUnavailable => "Service unavailable",
        }
    }
}

/// Fallback text for errors built without a usable message.
const GENERIC_MESSAGE: &str = "Something went wrong";

/// Structured domain error.
///
/// ## Invariants
/// - Exactly one `code` and one `status` per value.
/// - `status` is [`DEFAULT_ERROR_STATUS`] unless set explicitly.
/// - `message` is non-empty once trimmed of whitespace.
/// - `details` is plain JSON, so it never references live state.
///
/// # Examples
/// ```
/// use envelope::domain::{Error, ErrorCode};
/// use serde_json::json;
///
/// let err = Error::not_found()
///     .with_message("User 7 not found")
///     .with_details(json!({ "id": 7 }));
/// assert_eq!(err.code(), ErrorCode::ResourceNotFound);
/// assert_eq!(err.status(), 404);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ErrorDto", into = "ErrorDto")]
pub struct Error {
    message: Cow<'static, str>,
    code: ErrorCode,
    status: u16,
    details: Option<Value>,
}

/// Validation errors emitted by [`Error::try_new`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ErrorValidationError {
    /// The message was empty or whitespace.
    #[error("error message must not be empty")]
    EmptyMessage,
}

impl Error {
    /// Create an error with the default status.
    ///
    /// A blank message is replaced by a generic one so construction never
    /// fails; use [`Error::try_new`] to reject blank messages instead.
    pub fn new(code: ErrorCode, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            message: non_blank_or(message.into(), GENERIC_MESSAGE),
            code,
            status: DEFAULT_ERROR_STATUS,
            details: None,
        }
    }

    /// Fallible constructor that validates the message content.
    pub fn try_new(
        code: ErrorCode,
        message: impl Into<Cow<'static, str>>,
    ) -> Result<Self, ErrorValidationError> {
        let message = message.into();
        if message.trim().is_empty() {
            return Err(ErrorValidationError::EmptyMessage);
        }
        Ok(Self {
            message,
            code,
            status: DEFAULT_ERROR_STATUS,
            details: None,
        })
    }

    /// Build an error carrying the defaults of `class`.
    #[must_use]
    pub fn for_class(class: StatusClass) -> Self {
        Self {
            message: Cow::Borrowed(class.default_message()),
            code: class.default_code(),
            status: class.status(),
            details: None,
        }
    }

    /// Stable machine-readable error code.
    #[must_use]
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// HTTP-equivalent status for the failure.
    #[must_use]
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Human-readable message returned to adapters.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Supplementary error details for adapters.
    #[must_use]
    pub fn details(&self) -> Option<&Value> {
        self.details.as_ref()
    }

    /// Replace the message, keeping the current one if `message` is blank.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<Cow<'static, str>>) -> Self {
        let message = message.into();
        if !message.trim().is_empty() {
            self.message = message;
        }
        self
    }

    /// Replace the code.
    #[must_use]
    pub fn with_code(mut self, code: ErrorCode) -> Self {
        self.code = code;
        self
    }

    /// Replace the status.
    #[must_use]
    pub fn with_status(mut self, status: u16) -> Self {
        self.status = status;
        self
    }

    /// Attach structured details to the error.
    ///
    /// # Examples
    /// ```
    /// use envelope::domain::Error;
    /// use serde_json::json;
    ///
    /// let err = Error::bad_request().with_details(json!({ "field": "name" }));
    /// assert!(err.details().is_some());
    /// ```
    #[must_use]
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// 400 with [`ErrorCode::BadRequest`].
    #[must_use]
    pub fn bad_request() -> Self {
        Self::for_class(StatusClass::BadRequest)
    }

    /// 400 with [`ErrorCode::ValidationError`] and the offending fields.
    #[must_use]
    pub fn validation(details: Value) -> Self {
        Self::bad_request()
            .with_code(ErrorCode::ValidationError)
            .with_message("Validation Failed")
            .with_details(details)
    }

    /// 401 with [`ErrorCode::Unauthorized`].
    #[must_use]
    pub fn unauthorized() -> Self {
        Self::for_class(StatusClass::Unauthorized)
    }

    /// 401 with [`ErrorCode::TokenExpired`].
    #[must_use]
    pub fn token_expired() -> Self {
        Self::unauthorized()
            .with_code(ErrorCode::TokenExpired)
            .with_message("Token expired")
    }

    /// 403 with [`ErrorCode::Forbidden`].
    #[must_use]
    pub fn forbidden() -> Self {
        Self::for_class(StatusClass::Forbidden)
    }

    /// 404 with [`ErrorCode::ResourceNotFound`].
    #[must_use]
    pub fn not_found() -> Self {
        Self::for_class(StatusClass::NotFound)
    }

    /// 409 with [`ErrorCode::ResourceConflict`].
    #[must_use]
    pub fn conflict() -> Self {
        Self::for_class(StatusClass::Conflict)
    }

    /// 422 with [`ErrorCode::BusinessRuleViolation`].
    #[must_use]
    pub fn unprocessable() -> Self {
        Self::for_class(StatusClass::Unprocessable)
    }

    /// 500 with [`ErrorCode::InternalError`].
    #[must_use]
    pub fn internal() -> Self {
        Self::for_class(StatusClass::Internal)
    }

    /// 503 with [`ErrorCode::ServiceUnavailable`].
    #[must_use]
    pub fn service_unavailable() -> Self {
        Self::for_class(StatusClass::ServiceUnavailable)
    }
}

fn non_blank_or(message: Cow<'static, str>, fallback: &'static str) -> Cow<'static, str> {
    if message.trim().is_empty() {
        Cow::Borrowed(fallback)
    } else {
        message
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for Error {}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorDto {
    message: String,
    code: ErrorCode,
    #[serde(default = "default_status")]
    status: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    details: Option<Value>,
}

const fn default_status() -> u16 {
    DEFAULT_ERROR_STATUS
}

impl From<Error> for ErrorDto {
    fn from(value: Error) -> Self {
        Self {
            message: value.message.into_owned(),
            code: value.code,
            status: value.status,
            details: value.details,
        }
    }
}

impl TryFrom<ErrorDto> for Error {
    type Error = ErrorValidationError;

    fn try_from(value: ErrorDto) -> Result<Self, Self::Error> {
        let ErrorDto {
            message,
            code,
            status,
            details,
        } = value;

        let mut error = Error::try_new(code, message)?;
        error.status = status;
        error.details = details;
        Ok(error)
    }
}
