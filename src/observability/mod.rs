//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Setup and server code produce:
//!     → logging.rs (structured log events)
//!
//! Consumers:
//!     → stdout via tracing-subscriber fmt layer
//! ```
//!
//! # Design Decisions
//! - Pattern compilation logs the final anchored source at debug level
//! - Requests that fall through to the next stage are never logged

pub mod logging;
