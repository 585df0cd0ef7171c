//! Envelope service library.
//!
//! Every HTTP response leaves the service in one of two shapes: a success
//! envelope `{ success: true, message, data }` or an error envelope
//! `{ success: false, message, code, details }`. The domain layer defines the
//! error taxonomy and values, the inbound HTTP layer classifies failures and
//! transforms successes, and the middleware applies both at the boundary.

pub mod config;
pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::{Boundary, Trace};
