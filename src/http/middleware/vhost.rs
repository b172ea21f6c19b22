//! Virtual host middleware.
//! Dispatches requests whose hostname matches a pattern to a dedicated handler.
//!
//! ```ignore
//! let vhost = Vhost::route("*.example.com", tenant_app)?;
//! let app = Router::new()
//!     .fallback(not_found)
//!     .layer(axum::middleware::from_fn_with_state(vhost, vhost_middleware));
//! ```

use std::convert::Infallible;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

use axum::{
    body::Body,
    extract::{FromRequestParts, State},
    http::{request::Parts, Request, StatusCode},
    middleware::Next,
    response::Response,
    Router,
};
use futures_util::future::BoxFuture;
use tower::{Service, ServiceExt};

use crate::error::VhostError;
use crate::routing::matcher::{VhostMatch, VhostMatcher};
use crate::routing::pattern::{compile, HostnameSpec};

/// Receives requests whose hostname matched.
///
/// The handler owns the rest of the chain: it may call `next.run(req)` to
/// continue, or answer the request itself.
pub trait VhostHandler: Send + Sync + 'static {
    fn call(&self, req: Request<Body>, next: Next) -> BoxFuture<'static, Response>;
}

impl<F, Fut> VhostHandler for F
where
    F: Fn(Request<Body>, Next) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Response> + Send + 'static,
{
    fn call(&self, req: Request<Body>, next: Next) -> BoxFuture<'static, Response> {
        Box::pin(self(req, next))
    }
}

/// Adapts an infallible tower service (such as an axum `Router`) into a
/// handler. The service answers every matched request; `next` is not called.
#[derive(Debug, Clone)]
pub struct ServiceHandler<S> {
    service: S,
}

impl<S> ServiceHandler<S> {
    pub fn new(service: S) -> Self {
        Self { service }
    }
}

impl<S> VhostHandler for ServiceHandler<S>
where
    S: Service<Request<Body>, Response = Response, Error = Infallible>
        + Clone
        + Send
        + Sync
        + 'static,
    S::Future: Send + 'static,
{
    fn call(&self, req: Request<Body>, _next: Next) -> BoxFuture<'static, Response> {
        let service = self.service.clone();
        Box::pin(async move {
            match service.oneshot(req).await {
                Ok(response) => response,
                Err(never) => match never {},
            }
        })
    }
}

/// A compiled hostname pattern bound to its handler.
///
/// Cheap to clone; the pattern and handler are shared.
#[derive(Clone)]
pub struct Vhost {
    matcher: VhostMatcher,
    handler: Arc<dyn VhostHandler>,
}

impl Vhost {
    /// Compile `hostname` and bind it to `handler`.
    pub fn new<H: VhostHandler>(
        hostname: impl Into<HostnameSpec>,
        handler: H,
    ) -> Result<Self, VhostError> {
        Self::builder().hostname(hostname).handler(handler).build()
    }

    /// Mount an axum `Router` for every request whose hostname matches.
    pub fn route(hostname: impl Into<HostnameSpec>, router: Router) -> Result<Self, VhostError> {
        Self::new(hostname, ServiceHandler::new(router))
    }

    pub fn builder() -> VhostBuilder {
        VhostBuilder::default()
    }

    pub fn matcher(&self) -> &VhostMatcher {
        &self.matcher
    }
}

impl fmt::Debug for Vhost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Vhost")
            .field("pattern", &self.matcher.pattern().as_str())
            .finish_non_exhaustive()
    }
}

/// Step-by-step construction of a [`Vhost`].
#[derive(Default)]
pub struct VhostBuilder {
    hostname: Option<HostnameSpec>,
    handler: Option<Arc<dyn VhostHandler>>,
}

impl VhostBuilder {
    pub fn hostname(mut self, hostname: impl Into<HostnameSpec>) -> Self {
        self.hostname = Some(hostname.into());
        self
    }

    pub fn handler<H: VhostHandler>(mut self, handler: H) -> Self {
        self.handler = Some(Arc::new(handler));
        self
    }

    /// Validate arguments and compile the pattern.
    pub fn build(self) -> Result<Vhost, VhostError> {
        let hostname = match self.hostname {
            Some(HostnameSpec::Literal(ref host)) if host.is_empty() => None,
            other => other,
        }
        .ok_or(VhostError::MissingHostname)?;
        let handler = self.handler.ok_or(VhostError::MissingHandler)?;

        Ok(Vhost {
            matcher: VhostMatcher::new(compile(&hostname)?),
            handler,
        })
    }
}

/// Middleware function for virtual host dispatch.
///
/// Use with `axum::middleware::from_fn_with_state`.
pub async fn vhost_middleware(
    State(vhost): State<Vhost>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let Some(found) = vhost.matcher.match_request(&req) else {
        return next.run(req).await;
    };

    tracing::trace!(
        host = %found.host(),
        pattern = %vhost.matcher.pattern().as_str(),
        "Virtual host matched"
    );

    req.extensions_mut().insert(found);
    vhost.handler.call(req, next).await
}

impl<S> FromRequestParts<S> for VhostMatch
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, &'static str);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts.extensions.get::<VhostMatch>().cloned().ok_or((
            StatusCode::INTERNAL_SERVER_ERROR,
            "Missing virtual host match. Is vhost_middleware installed?",
        ))
    }
}
