//! HTTP server configuration object and helpers.

use std::net::SocketAddr;
use std::sync::Arc;

use envelope::config::AppSettings;
use envelope::domain::{DiagnosticSink, UserDirectory};
use envelope::outbound::TracingDiagnosticSink;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) serve_docs: bool,
    pub(crate) sink: Arc<dyn DiagnosticSink>,
    pub(crate) users: UserDirectory,
}

impl ServerConfig {
    /// Construct a server configuration from application settings.
    ///
    /// Failures are reported to [`TracingDiagnosticSink`] and users are served
    /// from the default directory until replaced.
    #[must_use]
    pub fn new(settings: &AppSettings) -> Self {
        Self {
            bind_addr: settings.bind_addr,
            serve_docs: settings.serve_docs(),
            sink: Arc::new(TracingDiagnosticSink),
            users: UserDirectory::default(),
        }
    }

    /// Report failures to `sink` instead of the tracing sink.
    #[cfg_attr(
        not(test),
        expect(dead_code, reason = "Exercised by server tests")
    )]
    #[must_use]
    pub fn with_sink(mut self, sink: Arc<dyn DiagnosticSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Return the socket address the server will bind to.
    #[cfg_attr(
        not(test),
        expect(dead_code, reason = "Exercised by server tests")
    )]
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
