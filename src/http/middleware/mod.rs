//! Request middleware.

pub mod vhost;

pub use vhost::{vhost_middleware, ServiceHandler, Vhost, VhostBuilder, VhostHandler};
