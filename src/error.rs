//! Setup-time error definitions.

use thiserror::Error;

/// Errors raised while constructing a virtual host middleware.
///
/// These are configuration mistakes and surface before any request is
/// served. A request that simply does not match never produces one.
#[derive(Debug, Error)]
pub enum VhostError {
    /// No hostname, or an empty literal hostname, was supplied.
    #[error("argument hostname is required")]
    MissingHostname,

    /// No handler was supplied to the builder.
    #[error("argument handle is required")]
    MissingHandler,

    /// The anchored pattern source could not be compiled.
    #[error("invalid hostname pattern `{pattern}`: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}
