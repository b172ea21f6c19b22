//! Virtual host matching logic.
//!
//! # Responsibilities
//! - Read the raw `Host` header and the extracted hostname
//! - Run the compiled pattern against the hostname
//! - Shape the positional captures into a `VhostMatch`
//!
//! # Design Decisions
//! - Missing host data and a failed match are the same outcome: `None`
//! - Capture group 0 (the whole match) is not exposed; group 1 becomes index 0

use std::sync::Arc;

use axum::http::{request::Parts, Request};
use serde::ser::{Serialize, SerializeStruct, Serializer};

use crate::routing::hostname::{extract_hostname, host_header, HostSources};
use crate::routing::pattern::CompiledPattern;

/// Data attached to a request whose hostname matched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VhostMatch {
    host: String,
    hostname: String,
    captures: Vec<Option<String>>,
    names: Arc<[Option<String>]>,
}

impl VhostMatch {
    /// Raw `Host` header value, port included.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Hostname the pattern was run against.
    pub fn hostname(&self) -> &str {
        &self.hostname
    }

    /// Number of capture groups.
    pub fn len(&self) -> usize {
        self.captures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.captures.is_empty()
    }

    /// Capture at position `index`; `None` if out of range or the group
    /// did not participate.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.captures.get(index).and_then(|c| c.as_deref())
    }

    /// Capture by group name (pre-built patterns only).
    pub fn name(&self, name: &str) -> Option<&str> {
        let index = self
            .names
            .iter()
            .position(|n| n.as_deref() == Some(name))?;
        self.get(index)
    }

    pub fn captures(&self) -> &[Option<String>] {
        &self.captures
    }

    pub fn iter(&self) -> impl Iterator<Item = Option<&str>> {
        self.captures.iter().map(|c| c.as_deref())
    }
}

impl Serialize for VhostMatch {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("VhostMatch", 4)?;
        state.serialize_field("host", &self.host)?;
        state.serialize_field("hostname", &self.hostname)?;
        state.serialize_field("length", &self.captures.len())?;
        state.serialize_field("captures", &self.captures)?;
        state.end()
    }
}

/// Matches requests against a single compiled hostname pattern.
#[derive(Debug, Clone)]
pub struct VhostMatcher {
    pattern: Arc<CompiledPattern>,
    names: Arc<[Option<String>]>,
}

impl VhostMatcher {
    pub fn new(pattern: CompiledPattern) -> Self {
        // Skip the implicit whole-match group.
        let names = pattern
            .regex()
            .capture_names()
            .skip(1)
            .map(|n| n.map(str::to_string))
            .collect();
        Self {
            pattern: Arc::new(pattern),
            names,
        }
    }

    pub fn pattern(&self) -> &CompiledPattern {
        &self.pattern
    }

    /// Match a full request.
    pub fn match_request<B>(&self, req: &Request<B>) -> Option<VhostMatch> {
        self.match_host(host_header(req.headers()), &HostSources::from_request(req))
    }

    /// Match request parts.
    pub fn match_parts(&self, parts: &Parts) -> Option<VhostMatch> {
        self.match_host(host_header(&parts.headers), &HostSources::from_parts(parts))
    }

    /// Match a raw `Host` header plus the request's host sources.
    pub fn match_host(&self, host: Option<&str>, sources: &HostSources<'_>) -> Option<VhostMatch> {
        let host = host.filter(|h| !h.is_empty())?;
        let hostname = extract_hostname(sources).filter(|h| !h.is_empty())?;

        let caps = self.pattern.captures(hostname)?;
        let captures = caps
            .iter()
            .skip(1)
            .map(|m| m.map(|m| m.as_str().to_string()))
            .collect();

        Some(VhostMatch {
            host: host.to_string(),
            hostname: hostname.to_string(),
            captures,
            names: self.names.clone(),
        })
    }
}
