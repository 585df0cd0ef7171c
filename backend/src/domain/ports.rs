//! Ports the domain depends on.
//!
//! The only outbound dependency is the diagnostic sink: every failure that
//! escapes a handler is reported to it in full, independent of how much the
//! client gets to see.

use super::{ErrorCode, TraceId};

/// Shape of the failure that reached the boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// A structured domain error.
    Domain,
    /// A request-layer failure carrying its own status and body.
    Recognized,
    /// Anything else.
    Unrecognized,
}

impl FailureKind {
    /// Lowercase label for log fields.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Domain => "domain",
            Self::Recognized => "recognized",
            Self::Unrecognized => "unrecognized",
        }
    }
}

/// Full-fidelity record of one escaped failure.
///
/// Unlike the client-visible envelope this keeps the raw failure rendering
/// and its source chain.
#[derive(Debug, Clone, PartialEq)]
pub struct FailureReport {
    /// Correlation identifier of the request, when one is in scope.
    pub trace_id: Option<TraceId>,
    /// HTTP method of the request.
    pub method: String,
    /// Request path.
    pub path: String,
    /// Status the client receives.
    pub status: u16,
    /// Code the client receives.
    pub code: ErrorCode,
    /// Which classification branch matched.
    pub kind: FailureKind,
    /// `Debug` rendering of the raw failure.
    pub detail: String,
    /// `Display` renderings of the failure's `source()` chain, outermost first.
    pub sources: Vec<String>,
}

/// Write-only destination for failure diagnostics.
///
/// Implementations must tolerate concurrent calls from every worker; the
/// relative order of reports from different requests is unspecified.
#[cfg_attr(test, mockall::automock)]
pub trait DiagnosticSink: Send + Sync {
    /// Store one failure report.
    fn record(&self, report: &FailureReport);
}
