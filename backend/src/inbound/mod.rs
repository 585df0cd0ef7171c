//! Inbound adapters that translate external requests into domain calls while
//! keeping framework details at the edge.
//!
//! HTTP handlers and the response boundary's classification logic live under
//! [`http`].

pub mod http;
