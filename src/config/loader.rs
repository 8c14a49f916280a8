//! Configuration loading from the environment.
//!
//! Unset variables fall back to defaults with a log line saying so.
//! Malformed numeric values are a fatal startup condition: the loader
//! returns an error and the process must not begin serving.

use std::env;
use std::str::FromStr;

use crate::config::schema::ServiceConfig;

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A numeric variable held something that is not a number.
    #[error("invalid value `{value}` for {name}: expected an integer")]
    InvalidInteger { name: String, value: String },
}

/// Load and validate configuration from environment variables.
pub fn load_from_env() -> Result<ServiceConfig, ConfigError> {
    tracing::info!("loading configuration from environment");

    let mut config = ServiceConfig::default();
    config.server.port = int_var("PORT", config.server.port)?;
    config.server.base_url = string_var("BASE_URL", config.server.base_url);
    config.server.https = bool_var("HTTPS", config.server.https);
    config.server.service_name = string_var("SERVICE_NAME", config.server.service_name);
    config.server.request_timeout_secs =
        int_var("REQUEST_TIMEOUT_SECS", config.server.request_timeout_secs)?;
    config.upstream.timeout_secs = int_var("UPSTREAM_TIMEOUT_SECS", config.upstream.timeout_secs)?;
    config.upstream.max_redirects = int_var("MAX_REDIRECTS", config.upstream.max_redirects)?;
    config.environment = string_var("ENVIRONMENT", config.environment);
    config.debug = bool_var("DEBUG", config.debug);

    Ok(config)
}

fn string_var(name: &str, default: String) -> String {
    match env::var(name) {
        Ok(value) if !value.is_empty() => value,
        _ => {
            tracing::debug!(name, default = %default, "env var unset, using default");
            default
        }
    }
}

fn bool_var(name: &str, default: bool) -> bool {
    match env::var(name) {
        Ok(value) => value.eq_ignore_ascii_case("true"),
        Err(_) => {
            tracing::debug!(name, default, "env var unset, using default");
            default
        }
    }
}

fn int_var<T>(name: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr + std::fmt::Display,
{
    match env::var(name) {
        Ok(value) => value.parse().map_err(|_| ConfigError::InvalidInteger {
            name: name.to_string(),
            value,
        }),
        Err(_) => {
            tracing::debug!(name, default = %default, "env var unset, using default");
            Ok(default)
        }
    }
}
