//! Domain primitives and ports.
//!
//! Purpose: define the transport-agnostic values every request outcome is
//! built from. Keep types immutable and document invariants and serialisation
//! contracts (serde) in each type's Rustdoc.
//!
//! Public surface:
//! - `ErrorCode` / `ErrorCategory`: the closed error taxonomy.
//! - `Error`: structured error value plus its per-status-class factory.
//! - `SuccessEnvelope`: handler-chosen success payload, message and status.
//! - `DiagnosticSink` / `FailureReport`: port for failure diagnostics.
//! - `TraceId`: request correlation identifier.
//! - `UserDirectory` / `User`: placeholder business logic.

pub mod error;
pub mod error_code;
pub mod ports;
pub mod response;
pub mod trace_id;
pub mod users;

pub use self::error::{DEFAULT_ERROR_STATUS, Error, ErrorValidationError, StatusClass};
pub use self::error_code::{ErrorCategory, ErrorCode, UnknownErrorCode};
pub use self::ports::{DiagnosticSink, FailureKind, FailureReport};
#[cfg(test)]
pub use self::ports::MockDiagnosticSink;
pub use self::response::{CREATED_MESSAGE, DEFAULT_SUCCESS_MESSAGE, SuccessEnvelope};
pub use self::trace_id::TraceId;
pub use self::users::{User, UserDirectory};

/// Header carrying the request trace identifier.
pub const TRACE_ID_HEADER: &str = "trace-id";
