//! Diagnostic sink backed by `tracing`.

use tracing::{error, warn};

use crate::domain::{DiagnosticSink, FailureReport};

/// Forwards failure reports to the active `tracing` subscriber.
///
/// Server failures (5xx) are logged at `ERROR`, everything else at `WARN`.
/// The raw failure rendering and its source chain are logged even though the
/// client never sees them.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingDiagnosticSink;

impl DiagnosticSink for TracingDiagnosticSink {
    fn record(&self, report: &FailureReport) {
        let trace_id = report.trace_id.map(|id| id.to_string());
        if report.status >= 500 {
            error!(
                trace_id = trace_id.as_deref(),
                method = %report.method,
                path = %report.path,
                status = report.status,
                code = %report.code,
                kind = report.kind.as_str(),
                detail = %report.detail,
                sources = ?report.sources,
                "request failed"
            );
        } else {
            warn!(
                trace_id = trace_id.as_deref(),
                method = %report.method,
                path = %report.path,
                status = report.status,
                code = %report.code,
                kind = report.kind.as_str(),
                detail = %report.detail,
                sources = ?report.sources,
                "request rejected"
            );
        }
    }
}
