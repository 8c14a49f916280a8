//! Error taxonomy for the forwarding service.
//!
//! Every failure a request can hit maps onto one of these variants, and each
//! variant maps onto the HTTP status the endpoints answer with. Client input
//! problems are 400s, upstream problems are 5xxs, and a redirect chain that
//! blows the hop limit is surfaced distinctly so callers can tell "too many
//! hops" apart from "target unreachable".

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Errors produced while validating a target or talking to an upstream.
#[derive(Debug, Error)]
pub enum ProxyError {
    /// The `url` query parameter was absent or empty.
    #[error("no url provided; pass a target in the `url` query parameter")]
    MissingUrl,

    /// The provided target could not be parsed as an absolute URL.
    #[error("failed to parse the provided url: {0}")]
    MalformedUrl(#[from] url::ParseError),

    /// The target parsed, but its scheme is not http or https.
    #[error("unsupported url scheme `{0}`: must be http or https")]
    UnsupportedScheme(String),

    /// The redirect chain exceeded the configured hop limit.
    #[error("stopped after {0} redirects")]
    LimitExceeded(usize),

    /// An upstream sent a Location header that does not resolve to an
    /// absolute http(s) URL.
    #[error("invalid redirect location `{location}`")]
    InvalidLocation { location: String },

    /// Network-level failure reaching the upstream (connect, DNS, timeout).
    #[error("upstream request failed: {0}")]
    Transport(#[source] reqwest::Error),
}

impl ProxyError {
    /// Status code this error is answered with at the request boundary.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ProxyError::MissingUrl
            | ProxyError::MalformedUrl(_)
            | ProxyError::UnsupportedScheme(_) => StatusCode::BAD_REQUEST,
            ProxyError::LimitExceeded(_) | ProxyError::InvalidLocation { .. } => {
                StatusCode::BAD_GATEWAY
            }
            ProxyError::Transport(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::debug!(error = %self, "rejected request");
        }
        (status, format!("Error: {self}")).into_response()
    }
}
