//! Lifecycle management.
//!
//! # Data Flow
//! ```text
//! main.rs
//!     → Shutdown::trigger_on_ctrl_c (signal task)
//!     → broadcast to HttpServer::run
//!     → axum graceful shutdown drains in-flight requests
//! ```

pub mod shutdown;

pub use shutdown::Shutdown;
