//! Request middleware.
//!
//! Purpose: Define middleware components for request lifecycle concerns:
//! trace correlation around the whole app and the response boundary around
//! the API scope.

pub mod boundary;
pub mod trace;

pub use boundary::Boundary;
pub use trace::Trace;
