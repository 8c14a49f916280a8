//! HTTP forwarding service with redirect-chain inspection.
//!
//! Two modes over one `url` query parameter:
//! - pass-through proxying: one outbound GET, body returned verbatim;
//! - redirect inspection: follow the target's redirect chain hop by hop,
//!   record each hop's URL, status, and headers, and render the ordered
//!   trace as JSON or HTML.

// Core subsystems
pub mod config;
pub mod error;
pub mod http;
pub mod trace;
pub mod upstream;
pub mod validate;

// Cross-cutting concerns
pub mod lifecycle;
pub mod observability;

pub use config::ServiceConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
