//! Pass-through fetching.

use bytes::Bytes;

use crate::error::ProxyError;
use crate::validate::TargetUrl;

/// Issue one GET to `target` and buffer the full response body.
///
/// Redirects are handled by the client's own policy; nothing is traced and
/// no hop limit beyond the transport default applies. The body is returned
/// verbatim regardless of content type.
pub async fn fetch(client: &reqwest::Client, target: &TargetUrl) -> Result<Bytes, ProxyError> {
    let response = client
        .get(target.as_url().clone())
        .send()
        .await
        .map_err(ProxyError::Transport)?;

    tracing::debug!(url = %target, status = %response.status(), "upstream responded");

    response.bytes().await.map_err(ProxyError::Transport)
}
