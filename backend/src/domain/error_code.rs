//! Closed taxonomy of wire-visible error identifiers.
//!
//! The identifiers are part of the public wire contract: clients match on the
//! serialized strings, so variants may be added but never renamed or removed.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Stable machine-readable error code describing the failure.
///
/// Serialized as the SCREAMING_SNAKE_CASE identifier, for example
/// `RESOURCE_NOT_FOUND`.
///
/// # Examples
/// ```
/// use envelope::domain::{ErrorCategory, ErrorCode};
///
/// assert_eq!(ErrorCode::ResourceNotFound.as_str(), "RESOURCE_NOT_FOUND");
/// assert_eq!(ErrorCode::TokenExpired.category(), ErrorCategory::Authentication);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// No more specific code applies.
    UnknownError,
    /// An unexpected failure inside the service.
    InternalError,
    /// The service cannot handle requests right now.
    ServiceUnavailable,
    /// The operation did not complete in time.
    Timeout,
    /// The request is malformed.
    BadRequest,
    /// The caller exceeded its request allowance.
    TooManyRequests,

    /// Input failed validation.
    ValidationError,
    /// The request body could not be accepted.
    InvalidPayload,
    /// The query string could not be accepted.
    InvalidQueryParams,
    /// A mandatory field was absent.
    MissingRequiredField,
    /// A field is present but malformed.
    InvalidFormat,
    /// The request body exceeds the accepted size.
    PayloadTooLarge,

    /// Authentication failed or is missing.
    Unauthorized,
    /// Supplied credentials were rejected.
    InvalidCredentials,
    /// The bearer token has expired.
    TokenExpired,
    /// The bearer token could not be verified.
    TokenInvalid,
    /// No bearer token was supplied.
    TokenMissing,
    /// The session is no longer valid.
    SessionExpired,

    /// Authenticated but not permitted.
    Forbidden,
    /// The caller lacks a required permission.
    InsufficientPermissions,
    /// Access to the resource was refused.
    AccessDenied,

    /// Nothing matched the request.
    NotFound,
    /// The addressed resource does not exist.
    ResourceNotFound,
    /// A resource with the same identity already exists.
    ResourceAlreadyExists,
    /// The request conflicts with the resource's current state.
    ResourceConflict,
    /// The resource is locked against modification.
    ResourceLocked,

    /// A business rule rejected the operation.
    BusinessRuleViolation,
    /// The operation is not allowed in this context.
    OperationNotAllowed,
    /// The resource is in the wrong state for the operation.
    InvalidState,
    /// A quota or limit was exceeded.
    LimitExceeded,

    /// An upstream integration failed.
    ExternalServiceError,
    /// An upstream integration is unavailable.
    ExternalServiceUnavailable,
    /// An upstream integration did not answer in time.
    ExternalTimeout,
    /// A third-party provider reported a failure.
    ThirdPartyFailure,
}

/// Grouping of [`ErrorCode`]s by the layer that raises them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Generic and infrastructure failures.
    System,
    /// Request validation failures.
    Validation,
    /// Identity could not be established.
    Authentication,
    /// Identity established but not permitted.
    Authorization,
    /// Resource lookup and state failures.
    Resource,
    /// Business rule failures.
    Business,
    /// Failures of upstream integrations.
    External,
}

impl ErrorCode {
    /// Every code in the taxonomy, in declaration order.
    pub const ALL: [Self; 34] = [
        Self::UnknownError,
        Self::InternalError,
        Self::ServiceUnavailable,
        Self::Timeout,
        Self::BadRequest,
        Self::TooManyRequests,
        Self::ValidationError,
        Self::InvalidPayload,
        Self::InvalidQueryParams,
        Self::MissingRequiredField,
        Self::InvalidFormat,
        Self::PayloadTooLarge,
        Self::Unauthorized,
        Self::InvalidCredentials,
        Self::TokenExpired,
        Self::TokenInvalid,
        Self::TokenMissing,
        Self::SessionExpired,
        Self::Forbidden,
        Self::InsufficientPermissions,
        Self::AccessDenied,
        Self::NotFound,
        Self::ResourceNotFound,
        Self::ResourceAlreadyExists,
        Self::ResourceConflict,
        Self::ResourceLocked,
        Self::BusinessRuleViolation,
        Self::OperationNotAllowed,
        Self::InvalidState,
        Self::LimitExceeded,
        Self::ExternalServiceError,
        Self::ExternalServiceUnavailable,
        Self::ExternalTimeout,
        Self::ThirdPartyFailure,
    ];

    /// Wire identifier of the code.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::UnknownError => "UNKNOWN_ERROR",
            Self::InternalError => "INTERNAL_ERROR",
            Self::ServiceUnavailable => "SERVICE_UNAVAILABLE",
            Self::Timeout => "TIMEOUT",
            Self::BadRequest => "BAD_REQUEST",
            Self::TooManyRequests => "TOO_MANY_REQUESTS",
            Self::ValidationError => "VALIDATION_ERROR",
            Self::InvalidPayload => "INVALID_PAYLOAD",
            Self::InvalidQueryParams => "INVALID_QUERY_PARAMS",
            Self::MissingRequiredField => "MISSING_REQUIRED_FIELD",
            Self::InvalidFormat => "INVALID_FORMAT",
            Self::PayloadTooLarge => "PAYLOAD_TOO_LARGE",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::TokenExpired => "TOKEN_EXPIRED",
            Self::TokenInvalid => "TOKEN_INVALID",
            Self::TokenMissing => "TOKEN_MISSING",
            Self::SessionExpired => "SESSION_EXPIRED",
            Self::Forbidden => "FORBIDDEN",
            Self::InsufficientPermissions => "INSUFFICIENT_PERMISSIONS",
            Self::AccessDenied => "ACCESS_DENIED",
            Self::NotFound => "NOT_FOUND",
            Self::ResourceNotFound => "RESOURCE_NOT_FOUND",
            Self::ResourceAlreadyExists => "RESOURCE_ALREADY_EXISTS",
            Self::ResourceConflict => "RESOURCE_CONFLICT",
            Self::ResourceLocked => "RESOURCE_LOCKED",
            Self::BusinessRuleViolation => "BUSINESS_RULE_VIOLATION",
            Self::OperationNotAllowed => "OPERATION_NOT_ALLOWED",
            Self::InvalidState => "INVALID_STATE",
            Self::LimitExceeded => "LIMIT_EXCEEDED",
            Self::ExternalServiceError => "EXTERNAL_SERVICE_ERROR",
            Self::ExternalServiceUnavailable => "EXTERNAL_SERVICE_UNAVAILABLE",
            Self::ExternalTimeout => "EXTERNAL_TIMEOUT",
            Self::ThirdPartyFailure => "THIRD_PARTY_FAILURE",
        }
    }

    /// Category the code belongs to.
    #[must_use]
    pub const fn category(self) -> ErrorCategory {
        match self {
            Self::UnknownError
            | Self::InternalError
            | Self::ServiceUnavailable
            | Self::Timeout
            | Self::BadRequest
            | Self::TooManyRequests => ErrorCategory::System,
            Self::ValidationError
            | Self::InvalidPayload
            | Self::InvalidQueryParams
            | Self::MissingRequiredField
            | Self::InvalidFormat
            | Self::PayloadTooLarge => ErrorCategory::Validation,
            Self::Unauthorized
            | Self::InvalidCredentials
            | Self::TokenExpired
            | Self::TokenInvalid
            | Self::TokenMissing
            | Self::SessionExpired => ErrorCategory::Authentication,
            Self::Forbidden | Self::InsufficientPermissions | Self::AccessDenied => {
                ErrorCategory::Authorization
            }
            Self::NotFound
            | Self::ResourceNotFound
            | Self::ResourceAlreadyExists
            | Self::ResourceConflict
            | Self::ResourceLocked => ErrorCategory::Resource,
            Self::BusinessRuleViolation
            | Self::OperationNotAllowed
            | Self::InvalidState
            | Self::LimitExceeded => ErrorCategory::Business,
            Self::ExternalServiceError
            | Self::ExternalServiceUnavailable
            | Self::ExternalTimeout
            | Self::ThirdPartyFailure => ErrorCategory::External,
        }
    }

    /// Map an HTTP status onto the code reported for request-layer failures.
    ///
    /// Statuses outside the fixed table map to [`ErrorCode::UnknownError`].
    ///
    /// # Examples
    /// ```
    /// use envelope::domain::ErrorCode;
    ///
    /// assert_eq!(ErrorCode::for_status(409), ErrorCode::ResourceConflict);
    /// assert_eq!(ErrorCode::for_status(418), ErrorCode::UnknownError);
    /// ```
    #[must_use]
    pub const fn for_status(status: u16) -> Self {
        match status {
            400 => Self::BadRequest,
            401 => Self::Unauthorized,
            403 => Self::Forbidden,
            404 => Self::NotFound,
            409 => Self::ResourceConflict,
            422 => Self::BusinessRuleViolation,
            429 => Self::TooManyRequests,
            500 => Self::InternalError,
            503 => Self::ServiceUnavailable,
            _ => Self::UnknownError,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when parsing an identifier outside the taxonomy.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown error code: {0}")]
pub struct UnknownErrorCode(pub String);

impl FromStr for ErrorCode {
    type Err = UnknownErrorCode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|code| code.as_str() == s)
            .ok_or_else(|| UnknownErrorCode(s.to_owned()))
    }
}
