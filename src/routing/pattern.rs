//! Hostname pattern compilation.
//!
//! # Responsibilities
//! - Turn a literal hostname (with optional `*` wildcards) into a regex source
//! - Accept pre-built regexes as-is
//! - Force anchoring at both ends
//! - Compile case-insensitively
//!
//! # Design Decisions
//! - Compiled once at setup time, shared read-only across requests
//! - A wildcard covers exactly one non-empty DNS label (`[^.]+`)
//! - Uses the `regex` crate (linear time, no catastrophic backtracking)

use std::fmt;

use regex::{Captures, Regex, RegexBuilder};

use crate::error::VhostError;

/// Characters escaped in literal hostnames before wildcard expansion.
const ESCAPED: &[char] = &[
    '.', '+', '?', '^', '=', '!', ':', '$', '{', '}', '(', ')', '|', '[', ']', '/', '\\',
];

/// Replacement for each `*` in a literal hostname.
const WILDCARD: &str = "([^.]+)";

/// What the user asked to match.
#[derive(Debug, Clone)]
pub enum HostnameSpec {
    /// Literal hostname; `*` matches a single label.
    Literal(String),
    /// Pre-built expression; its source is reused verbatim before anchoring.
    Pattern(Regex),
}

impl HostnameSpec {
    /// Regex source before anchoring.
    fn source(&self) -> String {
        match self {
            Self::Literal(host) => escape_literal(host),
            Self::Pattern(re) => re.as_str().to_string(),
        }
    }
}

impl From<&str> for HostnameSpec {
    fn from(host: &str) -> Self {
        Self::Literal(host.to_string())
    }
}

impl From<String> for HostnameSpec {
    fn from(host: String) -> Self {
        Self::Literal(host)
    }
}

impl From<Regex> for HostnameSpec {
    fn from(re: Regex) -> Self {
        Self::Pattern(re)
    }
}

impl fmt::Display for HostnameSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(host) => write!(f, "{}", host),
            Self::Pattern(re) => write!(f, "/{}/", re.as_str()),
        }
    }
}

/// An anchored, case-insensitive hostname matcher.
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    regex: Regex,
}

impl CompiledPattern {
    /// Run the pattern against an extracted hostname.
    pub fn captures<'h>(&self, hostname: &'h str) -> Option<Captures<'h>> {
        self.regex.captures(hostname)
    }

    /// Returns true if the whole hostname matches.
    pub fn is_match(&self, hostname: &str) -> bool {
        self.regex.is_match(hostname)
    }

    /// Final anchored source.
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    /// The underlying regex, for named group lookups.
    pub fn regex(&self) -> &Regex {
        &self.regex
    }
}

/// Compile a hostname specification.
pub fn compile(spec: &HostnameSpec) -> Result<CompiledPattern, VhostError> {
    if let HostnameSpec::Literal(host) = spec {
        if host.is_empty() {
            return Err(VhostError::MissingHostname);
        }
    }

    let source = anchor(spec.source());
    let regex = RegexBuilder::new(&source)
        .case_insensitive(true)
        .build()
        .map_err(|source_err| VhostError::InvalidPattern {
            pattern: source.clone(),
            source: source_err,
        })?;

    tracing::debug!(spec = %spec, source = %source, "Compiled hostname pattern");

    Ok(CompiledPattern { regex })
}

fn escape_literal(host: &str) -> String {
    let mut out = String::with_capacity(host.len() * 2);
    for c in host.chars() {
        if c == '*' {
            out.push_str(WILDCARD);
        } else {
            if ESCAPED.contains(&c) {
                out.push('\\');
            }
            out.push(c);
        }
    }
    out
}

fn anchor(mut source: String) -> String {
    if !source.starts_with('^') {
        source.insert(0, '^');
    }
    if !is_end_anchored(&source) {
        source.push('$');
    }
    source
}

/// A trailing `$` is an anchor only if an even number of backslashes
/// precede it; an odd count means it is an escaped literal dollar.
fn is_end_anchored(source: &str) -> bool {
    let Some(rest) = source.strip_suffix('$') else {
        return false;
    };
    let backslashes = rest.bytes().rev().take_while(|&b| b == b'\\').count();
    backslashes % 2 == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compile_str(host: &str) -> CompiledPattern {
        compile(&HostnameSpec::from(host)).unwrap()
    }

    #[test]
    fn test_literal_is_anchored() {
        let p = compile_str("example.com");
        assert_eq!(p.as_str(), r"^example\.com$");
        assert!(p.is_match("example.com"));
        assert!(p.is_match("EXAMPLE.COM")); // Case insensitive
        assert!(!p.is_match("sub.example.com"));
        assert!(!p.is_match("example.com.au"));
    }

    #[test]
    fn test_dots_are_escaped() {
        let p = compile_str("example.com");
        assert!(!p.is_match("exampleXcom"));
    }

    #[test]
    fn test_wildcard_single_label() {
        let p = compile_str("*.example.com");
        assert_eq!(p.as_str(), r"^([^.]+)\.example\.com$");

        let caps = p.captures("foo.example.com").unwrap();
        assert_eq!(caps.len() - 1, 1);
        assert_eq!(caps.get(1).map(|m| m.as_str()), Some("foo"));

        assert!(!p.is_match("foo.bar.example.com"));
        assert!(!p.is_match(".example.com"));
    }

    #[test]
    fn test_multiple_wildcards() {
        let p = compile_str("*.*.example.com");
        let caps = p.captures("a.b.example.com").unwrap();
        assert_eq!(caps.get(1).map(|m| m.as_str()), Some("a"));
        assert_eq!(caps.get(2).map(|m| m.as_str()), Some("b"));
    }

    #[test]
    fn test_metacharacters_escaped() {
        let p = compile_str("a+b(c)[d]$");
        assert_eq!(p.as_str(), r"^a\+b\(c\)\[d\]\$$");
        assert!(p.is_match("a+b(c)[d]$"));
        assert!(!p.is_match("aab(c)[d]"));
    }

    #[test]
    fn test_ipv6_literal_escaped() {
        let p = compile_str("[::1]");
        assert_eq!(p.as_str(), r"^\[\:\:1\]$");
        assert!(p.is_match("[::1]"));
        assert!(!p.is_match("::1"));
        assert!(!p.is_match("[::2]"));
    }

    #[test]
    fn test_punctuation_literal_escaped() {
        let p = compile_str("a=b!c/d");
        assert_eq!(p.as_str(), r"^a\=b\!c\/d$");
        assert!(p.is_match("A=B!C/D"));
    }

    #[test]
    fn test_empty_literal_rejected() {
        let err = compile(&HostnameSpec::from("")).unwrap_err();
        assert!(matches!(err, VhostError::MissingHostname));
    }

    #[test]
    fn test_prebuilt_pattern_anchored() {
        let re = Regex::new(r"(\w+)\.example\.com").unwrap();
        let p = compile(&HostnameSpec::from(re)).unwrap();
        assert_eq!(p.as_str(), r"^(\w+)\.example\.com$");
        assert!(p.is_match("API.example.com"));
        assert!(!p.is_match("api.example.com.evil"));
    }

    #[test]
    fn test_prebuilt_pattern_keeps_existing_anchors() {
        let re = Regex::new(r"^www\.example\.com$").unwrap();
        let p = compile(&HostnameSpec::from(re)).unwrap();
        assert_eq!(p.as_str(), r"^www\.example\.com$");
    }

    #[test]
    fn test_end_anchor_backslash_parity() {
        assert!(is_end_anchored("^a$"));
        assert!(is_end_anchored(r"^a\\$"));
        assert!(!is_end_anchored(r"^a\$"));
        assert!(!is_end_anchored(r"^a\\\$"));
        assert!(!is_end_anchored("^a"));
        assert!(is_end_anchored("$"));
    }

    #[test]
    fn test_escaped_dollar_gets_anchor() {
        let re = Regex::new(r"cost\$").unwrap();
        let p = compile(&HostnameSpec::from(re)).unwrap();
        assert_eq!(p.as_str(), r"^cost\$$");
        assert!(p.is_match("cost$"));
        assert!(!p.is_match("cost$x"));
    }

    #[test]
    fn test_independent_compilation() {
        let a = compile_str("*.example.com");
        let b = compile_str("*.example.com");
        for host in ["foo.example.com", "example.com", "a.b.example.com"] {
            assert_eq!(a.is_match(host), b.is_match(host));
        }
    }
}
