//! Manual redirect chain-following.
//!
//! # Responsibilities
//! - Issue one GET per hop with the no-redirect client
//! - Record every redirect response into the caller's [`RedirectRecorder`]
//!   before moving to the next target
//! - Stop at the first non-redirect response, or abort once the recorder
//!   refuses a hop
//!
//! The recorder is borrowed exclusively for the duration of one call; there
//! is no shared accumulator anywhere.

use http::header;
use url::Url;

use crate::error::ProxyError;
use crate::trace::{Hop, RedirectRecorder};
use crate::validate::TargetUrl;

/// Follow `target`'s redirect chain, recording one hop per redirect.
///
/// Returns the final, non-redirect response. The terminal response is never
/// recorded as a hop; only the redirects leading to it are. On any failure
/// (transport error at any hop, hop limit exceeded, unusable Location) the
/// whole call fails and whatever the recorder holds is up to the caller to
/// discard or inspect.
pub async fn follow_redirects(
    client: &reqwest::Client,
    target: &TargetUrl,
    recorder: &mut RedirectRecorder,
) -> Result<reqwest::Response, ProxyError> {
    let mut current: Url = target.as_url().clone();

    loop {
        let response = client
            .get(current.clone())
            .send()
            .await
            .map_err(ProxyError::Transport)?;

        let status = response.status();
        if !status.is_redirection() {
            return Ok(response);
        }

        // A 3xx without a usable Location (304 typically) terminates the
        // chain; it is the final response, not a hop.
        let Some(location) = response
            .headers()
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned)
        else {
            return Ok(response);
        };

        let hop = Hop::from_response(&current, status, response.headers());
        tracing::debug!(url = %hop.url, status = hop.status, location = %location, "redirect hop");

        recorder
            .observe(hop)
            .map_err(|e| ProxyError::LimitExceeded(e.max_hops))?;

        // Location may be relative; resolve it against the hop we just left.
        let next = current
            .join(&location)
            .map_err(|_| ProxyError::InvalidLocation {
                location: location.clone(),
            })?;
        if !matches!(next.scheme(), "http" | "https") {
            return Err(ProxyError::InvalidLocation { location });
        }

        current = next;
    }
}
