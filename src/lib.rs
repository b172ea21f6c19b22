//! Hostname-based request dispatch for axum.
//!
//! A [`Vhost`] binds a hostname pattern (literal, `*` wildcard, or regex) to a
//! handler. Installed with [`vhost_middleware`], it runs the pattern against the
//! request's hostname; on match it attaches a [`VhostMatch`] to the request
//! extensions and hands the request to the handler, otherwise the request
//! continues down the chain untouched.

pub mod config;
pub mod error;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;

pub use error::VhostError;
pub use http::{vhost_middleware, HttpServer, ServiceHandler, Vhost, VhostBuilder, VhostHandler};
pub use routing::{HostnameSpec, ResolvedHostname, VhostMatch};
