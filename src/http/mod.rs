//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, TraceLayer)
//!     → middleware/vhost.rs (per virtual host, in config order)
//!         match   → VhostMatch in extensions → handler
//!         no match → next layer
//!     → fallback (404)
//! ```

pub mod middleware;
pub mod server;

pub use middleware::{vhost_middleware, ServiceHandler, Vhost, VhostBuilder, VhostHandler};
pub use server::{build_router, HttpServer};
