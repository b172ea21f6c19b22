//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Compile one vhost middleware per configured virtual host
//! - Wire up middleware (tracing, vhost dispatch)
//! - Answer unmatched hosts with 404
//! - Bind server to listener and shut down gracefully

use axum::{
    body::Body,
    http::{Request, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    Json, Router,
};
use futures_util::future::BoxFuture;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::trace::TraceLayer;

use crate::config::{VhostServerConfig, VirtualHostConfig};
use crate::error::VhostError;
use crate::http::middleware::{vhost_middleware, Vhost, VhostHandler};
use crate::routing::VhostMatch;

/// Body returned when no virtual host claims the request.
pub const NO_VHOST_BODY: &str = "No virtual host matched";

/// Answers matched requests for one configured virtual host.
#[derive(Debug, Clone)]
pub struct ConfiguredHandler {
    name: String,
    body: Option<String>,
}

impl ConfiguredHandler {
    pub fn new(config: &VirtualHostConfig) -> Self {
        Self {
            name: config.name.clone(),
            body: config.body.clone(),
        }
    }
}

impl VhostHandler for ConfiguredHandler {
    fn call(&self, req: Request<Body>, _next: Next) -> BoxFuture<'static, Response> {
        let response = match &self.body {
            Some(body) => body.clone().into_response(),
            None => {
                let found = req.extensions().get::<VhostMatch>();
                Json(serde_json::json!({ "vhost": self.name, "match": found })).into_response()
            }
        };
        Box::pin(async move { response })
    }
}

/// Build the application router for a configuration.
///
/// Virtual hosts are tried in configuration order; the first match answers.
pub fn build_router(config: &VhostServerConfig) -> Result<Router, VhostError> {
    let mut router = Router::new().fallback(no_vhost_handler);

    // Layers wrap outward, so the last one added runs first.
    for vhost_config in config.vhosts.iter().rev() {
        let vhost = Vhost::new(vhost_config.to_spec()?, ConfiguredHandler::new(vhost_config))?;
        tracing::info!(
            vhost = %vhost_config.name,
            pattern = %vhost.matcher().pattern().as_str(),
            "Virtual host registered"
        );
        router = router.layer(middleware::from_fn_with_state(vhost, vhost_middleware));
    }

    Ok(router.layer(TraceLayer::new_for_http()))
}

async fn no_vhost_handler() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, NO_VHOST_BODY)
}

/// HTTP server for configured virtual hosts.
pub struct HttpServer {
    router: Router,
    config: VhostServerConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: VhostServerConfig) -> Result<Self, VhostError> {
        let router = build_router(&config)?;
        Ok(Self { router, config })
    }

    /// Run the server until the shutdown signal fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            vhosts = self.config.vhosts.len(),
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &VhostServerConfig {
        &self.config
    }

    /// Get the assembled router.
    pub fn router(&self) -> Router {
        self.router.clone()
    }
}
