//! Construction of the two outbound clients.
//!
//! Both are built once at startup and cloned into handlers (reqwest clients
//! are cheap handles over a shared pool). The pass-through client keeps
//! reqwest's default redirect behavior; the tracing client disables it
//! entirely so chain-following can observe every hop itself.

use std::time::Duration;

use reqwest::redirect;

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Client for pass-through fetches. Redirects are followed transparently by
/// the transport.
pub fn passthrough_client(timeout_secs: u64) -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .user_agent(USER_AGENT)
        .build()
}

/// Client for redirect tracing. The redirect policy is `none` so every 3xx
/// response is returned to the caller instead of being chased internally.
pub fn tracing_client(timeout_secs: u64) -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .user_agent(USER_AGENT)
        .redirect(redirect::Policy::none())
        .build()
}
