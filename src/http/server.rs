//! HTTP server setup.
//!
//! # Responsibilities
//! - Create the Axum router with all handlers
//! - Wire up middleware (tracing, timeout, request ID)
//! - Build the two outbound clients and the shared state
//! - Serve with graceful shutdown

use std::sync::Arc;
use std::time::Duration;

use axum::http::HeaderValue;
use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::config::ServiceConfig;
use crate::http::handlers;
use crate::upstream::client;

/// Application state injected into handlers.
///
/// Cheap to clone: the clients are pool handles and the rest sits behind an
/// `Arc`. Nothing here is mutated after startup; per-request state (the
/// redirect recorder) lives inside each handler invocation.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServiceConfig>,
    /// Client with default redirect behavior, for pass-through fetches.
    pub passthrough: reqwest::Client,
    /// Client with redirects disabled, for chain-following.
    pub tracer: reqwest::Client,
    /// Precomputed `x-served-by` value: `<service_name>/<instance-uuid>`.
    pub served_by: HeaderValue,
}

/// HTTP server for the forwarding service.
pub struct HttpServer {
    router: Router,
    config: ServiceConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ServiceConfig) -> Result<Self, reqwest::Error> {
        let passthrough = client::passthrough_client(config.upstream.timeout_secs)?;
        let tracer = client::tracing_client(config.upstream.timeout_secs)?;

        let instance_id = Uuid::new_v4();
        let served_by = format!("{}/{}", config.server.service_name, instance_id)
            .parse()
            .unwrap_or_else(|_| HeaderValue::from_static("trace-proxy"));

        let state = AppState {
            config: Arc::new(config.clone()),
            passthrough,
            tracer,
            served_by,
        };

        let router = Self::build_router(&config, state);
        Ok(Self { router, config })
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &ServiceConfig, state: AppState) -> Router {
        Router::new()
            .route("/", get(handlers::index))
            .route("/ping", get(handlers::ping))
            .route("/proxy", get(handlers::proxy))
            .route("/redirect", get(handlers::redirects))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.server.request_timeout_secs,
            )))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server until Ctrl-C or a message on `shutdown`.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            environment = %self.config.environment,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                tokio::select! {
                    _ = shutdown_signal() => {}
                    _ = shutdown.recv() => {}
                }
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Wait for shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        tracing::info!("shutdown signal received");
    }
}
