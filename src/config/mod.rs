//! Service configuration.
//!
//! Loaded once from the environment at startup into an immutable
//! [`ServiceConfig`]; nothing else in the crate reads environment variables.

pub mod loader;
pub mod schema;

pub use loader::{load_from_env, ConfigError};
pub use schema::{ServerConfig, ServiceConfig, UpstreamConfig};
