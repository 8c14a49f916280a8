//! Configuration schema definitions.
//!
//! All values have serviceable defaults so the process can start with an
//! empty environment. Serde derives keep the config printable and reusable
//! in tests.

use serde::{Deserialize, Serialize};

/// Root configuration for the forwarding service.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Inbound listener and identity settings.
    pub server: ServerConfig,

    /// Outbound request settings.
    pub upstream: UpstreamConfig,

    /// Deployment environment name (for logs only).
    pub environment: String,

    /// Verbose logging when set.
    pub debug: bool,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            upstream: UpstreamConfig::default(),
            environment: "production".to_string(),
            debug: false,
        }
    }
}

impl ServiceConfig {
    /// Address the listener binds to.
    pub fn bind_address(&self) -> String {
        format!("0.0.0.0:{}", self.server.port)
    }
}

/// Inbound server configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Port to listen on.
    pub port: u16,

    /// Externally visible host name.
    pub base_url: String,

    /// Whether the service is reached over HTTPS. Affects the advertised
    /// base URL only; TLS termination happens upstream of this process.
    pub https: bool,

    /// Name advertised in the `x-served-by` response header.
    pub service_name: String,

    /// Inbound request timeout in seconds. Sized above the upstream timeout
    /// so a slow upstream surfaces as a transport error, not a cut request.
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            base_url: "localhost".to_string(),
            https: false,
            service_name: "trace-proxy".to_string(),
            request_timeout_secs: 60,
        }
    }
}

/// Outbound request configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Timeout for each outbound request in seconds.
    pub timeout_secs: u64,

    /// Maximum redirect hops recorded per trace.
    pub max_redirects: usize,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            max_redirects: crate::trace::DEFAULT_MAX_HOPS,
        }
    }
}
