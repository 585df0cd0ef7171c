//! Outbound adapters implementing domain ports.
//!
//! Adapters are thin translators between domain values and infrastructure.
//! They contain no business logic.
//!
//! - **diagnostics**: the failure-report sink backed by `tracing`.

pub mod diagnostics;

pub use diagnostics::TracingDiagnosticSink;
