//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check each virtual host names exactly one hostname source
//! - Compile regex patterns up front
//! - Detect duplicate virtual host names
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: VhostServerConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;
use std::net::SocketAddr;

use regex::Regex;
use thiserror::Error;

use crate::config::schema::VhostServerConfig;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("invalid bind address `{0}`")]
    BindAddress(String),

    #[error("virtual host #{0} has an empty name")]
    EmptyName(usize),

    #[error("duplicate virtual host name `{0}`")]
    DuplicateName(String),

    #[error("virtual host `{0}` must set exactly one of `hostname` or `pattern`")]
    HostnameSource(String),

    #[error("virtual host `{0}` has an empty hostname")]
    EmptyHostname(String),

    #[error("virtual host `{name}` has an invalid pattern: {reason}")]
    InvalidPattern { name: String, reason: String },
}

/// Validate a parsed configuration.
pub fn validate_config(config: &VhostServerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    let mut seen = HashSet::new();
    for (i, vhost) in config.vhosts.iter().enumerate() {
        if vhost.name.is_empty() {
            errors.push(ValidationError::EmptyName(i));
        } else if !seen.insert(vhost.name.as_str()) {
            errors.push(ValidationError::DuplicateName(vhost.name.clone()));
        }

        match (&vhost.hostname, &vhost.pattern) {
            (Some(hostname), None) => {
                if hostname.is_empty() {
                    errors.push(ValidationError::EmptyHostname(vhost.name.clone()));
                }
            }
            (None, Some(pattern)) => {
                if let Err(e) = Regex::new(pattern) {
                    errors.push(ValidationError::InvalidPattern {
                        name: vhost.name.clone(),
                        reason: e.to_string(),
                    });
                }
            }
            _ => errors.push(ValidationError::HostnameSource(vhost.name.clone())),
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
