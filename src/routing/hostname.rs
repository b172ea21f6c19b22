//! Hostname extraction.
//!
//! # Responsibilities
//! - Collect the places a request can name its host
//! - Pick the first non-empty one in priority order
//! - Strip a trailing port
//!
//! # Design Decisions
//! - Brackets around IPv6 literals only move the start of the port search;
//!   they are kept in the returned hostname (`[::1]:8080` → `[::1]`)
//! - Absence is a `None`, never an error

use axum::http::{header::HOST, request::Parts, Extensions, HeaderMap, Request, Uri};

/// Hostname already resolved by an upstream layer.
///
/// A trusted-proxy layer that honors `X-Forwarded-Host` can insert this into
/// the request extensions; it then takes precedence over the URI authority and
/// the `Host` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedHostname(pub String);

/// The host values available on a request, highest priority first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HostSources<'a> {
    /// Hostname resolved by the framework or an upstream layer.
    pub hostname: Option<&'a str>,
    /// Raw host from the request target (`:authority` or absolute-form URI).
    pub host: Option<&'a str>,
    /// Raw `Host` header.
    pub header: Option<&'a str>,
}

impl<'a> HostSources<'a> {
    /// Gather host sources from a full request.
    pub fn from_request<B>(req: &'a Request<B>) -> Self {
        Self::collect(req.extensions(), req.uri(), req.headers())
    }

    /// Gather host sources from request parts.
    pub fn from_parts(parts: &'a Parts) -> Self {
        Self::collect(&parts.extensions, &parts.uri, &parts.headers)
    }

    fn collect(extensions: &'a Extensions, uri: &'a Uri, headers: &'a HeaderMap) -> Self {
        Self {
            hostname: extensions
                .get::<ResolvedHostname>()
                .map(|h| h.0.as_str()),
            host: uri.authority().map(|a| without_userinfo(a.as_str())),
            header: host_header(headers),
        }
    }

    /// First non-empty source.
    pub fn select(&self) -> Option<&'a str> {
        [self.hostname, self.host, self.header]
            .into_iter()
            .flatten()
            .find(|h| !h.is_empty())
    }
}

/// Drop a `user:pass@` prefix from an authority.
fn without_userinfo(authority: &str) -> &str {
    authority
        .rsplit_once('@')
        .map_or(authority, |(_, host)| host)
}

/// The raw `Host` header, if present and valid UTF-8.
pub fn host_header(headers: &HeaderMap) -> Option<&str> {
    headers.get(HOST).and_then(|h| h.to_str().ok())
}

/// Derive the canonical hostname (no port) from the request's host sources.
pub fn extract_hostname<'a>(sources: &HostSources<'a>) -> Option<&'a str> {
    sources.select().map(strip_port)
}

/// Cut a host value at its port separator.
pub fn strip_port(host: &str) -> &str {
    let offset = if host.starts_with('[') {
        host.find(']').map_or(0, |i| i + 1)
    } else {
        0
    };

    match host[offset..].find(':') {
        Some(i) => &host[..offset + i],
        None => host,
    }
}
