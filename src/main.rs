//! trace-proxy service entry point.
//!
//! ```text
//!                    ┌──────────────────────────────────────────────┐
//!                    │                 TRACE PROXY                  │
//!                    │                                              │
//!   GET /proxy?url=  │  ┌──────────┐   ┌───────────┐   ┌─────────┐  │
//!   ─────────────────┼─▶│ validate │──▶│ upstream  │──▶│  body   │  │
//!                    │  └──────────┘   │  fetch    │   │  write  │  │
//!                    │                 └───────────┘   └─────────┘  │
//!                    │                                              │
//!   GET /redirect?   │  ┌──────────┐   ┌───────────┐   ┌─────────┐  │
//!   url=             │  │ validate │──▶│ follow +  │──▶│ present │  │
//!   ─────────────────┼─▶└──────────┘   │ recorder  │   │JSON/HTML│  │
//!                    │                 └───────────┘   └─────────┘  │
//!                    └──────────────────────────────────────────────┘
//! ```
//!
//! Configuration comes from the environment; a malformed numeric variable
//! aborts startup before the listener binds.

use tokio::net::TcpListener;

use trace_proxy::config;
use trace_proxy::http::HttpServer;
use trace_proxy::lifecycle::Shutdown;
use trace_proxy::observability::logging;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // The debug flag feeds the default log filter, so peek at it before the
    // full (logged) config load.
    let debug = std::env::var("DEBUG").is_ok_and(|v| v.eq_ignore_ascii_case("true"));
    logging::init(debug);

    tracing::info!("trace-proxy {} starting", env!("CARGO_PKG_VERSION"));

    let config = config::load_from_env()?;
    tracing::info!(
        port = config.server.port,
        base_url = %config.server.base_url,
        https = config.server.https,
        upstream_timeout_secs = config.upstream.timeout_secs,
        max_redirects = config.upstream.max_redirects,
        "configuration loaded"
    );

    let listener = TcpListener::bind(config.bind_address()).await?;
    tracing::info!(address = %listener.local_addr()?, "listening for connections");

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config)?;
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("shutdown complete");
    Ok(())
}
