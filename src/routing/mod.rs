//! Hostname routing subsystem.
//!
//! # Data Flow
//! ```text
//! Setup (once per middleware instance):
//!     HostnameSpec (literal / wildcard / regex)
//!     → pattern.rs (escape, expand wildcards, anchor, compile)
//!     → CompiledPattern (immutable, shared via Arc)
//!
//! Per request:
//!     Request (extensions, URI authority, Host header)
//!     → hostname.rs (select source, strip port)
//!     → matcher.rs (run pattern, shape captures)
//!     → VhostMatch or no match
//! ```
//!
//! # Design Decisions
//! - Patterns compiled at startup, immutable at runtime
//! - Matching is case-insensitive and anchored at both ends
//! - Deterministic: same hostname always yields the same captures

pub mod hostname;
pub mod matcher;
pub mod pattern;

pub use hostname::{extract_hostname, HostSources, ResolvedHostname};
pub use matcher::{VhostMatch, VhostMatcher};
pub use pattern::{compile, CompiledPattern, HostnameSpec};
