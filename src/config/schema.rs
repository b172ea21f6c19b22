//! Configuration schema definitions.
//!
//! This module defines the configuration structure for the virtual host server.
//! All types derive Serde traits for deserialization from config files.

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::VhostError;
use crate::routing::HostnameSpec;

/// Root configuration for the virtual host server.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct VhostServerConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Virtual hosts, checked in order.
    pub vhosts: Vec<VirtualHostConfig>,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// A single virtual host.
///
/// Exactly one of `hostname` and `pattern` must be set.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VirtualHostConfig {
    /// Identifier for logging and responses.
    pub name: String,

    /// Literal hostname; `*` matches one label.
    pub hostname: Option<String>,

    /// Regular expression, anchored automatically.
    pub pattern: Option<String>,

    /// Static response body. When unset the match data is returned as JSON.
    pub body: Option<String>,
}

impl VirtualHostConfig {
    /// Convert to a hostname specification.
    pub fn to_spec(&self) -> Result<HostnameSpec, VhostError> {
        match (&self.hostname, &self.pattern) {
            (_, Some(pattern)) => Regex::new(pattern)
                .map(HostnameSpec::Pattern)
                .map_err(|source| VhostError::InvalidPattern {
                    pattern: pattern.clone(),
                    source,
                }),
            (Some(hostname), None) => Ok(HostnameSpec::Literal(hostname.clone())),
            (None, None) => Err(VhostError::MissingHostname),
        }
    }
}
