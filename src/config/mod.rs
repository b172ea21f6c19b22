//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → VhostServerConfig (validated, immutable)
//!     → compiled into one vhost middleware per entry
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; patterns are compiled once at startup
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::{ListenerConfig, VhostServerConfig, VirtualHostConfig};
pub use validation::ValidationError;
