//! Request handlers.
//!
//! Each handler validates its input, talks to the upstream subsystem, and
//! maps the outcome onto the 200/400/500 convention via `ProxyError`'s
//! `IntoResponse` impl. All state touched per request is private to that
//! request; failures never leak across request boundaries.

use axum::extract::{Query, State};
use axum::http::{header, HeaderMap};
use axum::response::{Html, IntoResponse, Json, Response};
use serde::Deserialize;

use crate::error::ProxyError;
use crate::http::server::AppState;
use crate::trace::{present, RedirectRecorder};
use crate::upstream;
use crate::validate::validate_target;

/// Query parameters shared by the proxy and redirect endpoints.
#[derive(Debug, Deserialize)]
pub struct TargetQuery {
    #[serde(default)]
    url: Option<String>,
}

impl TargetQuery {
    fn target(&self) -> Result<crate::validate::TargetUrl, ProxyError> {
        validate_target(self.url.as_deref().unwrap_or_default())
    }
}

/// Index page with a form for the two endpoints.
pub async fn index() -> Html<&'static str> {
    Html(include_str!("../../assets/index.html"))
}

/// Liveness probe. No side effects.
pub async fn ping() -> &'static str {
    "pong"
}

/// Pass-through proxying: one GET, body returned verbatim.
pub async fn proxy(
    State(state): State<AppState>,
    Query(query): Query<TargetQuery>,
) -> Result<Response, ProxyError> {
    let target = query.target()?;
    tracing::info!(url = %target, "proxying request");

    let body = upstream::fetch(&state.passthrough, &target).await?;
    Ok(body.into_response())
}

/// Redirect inspection: follow the chain, record every hop, render the
/// trace. JSON when the client asks for it, HTML otherwise.
pub async fn redirects(
    State(state): State<AppState>,
    Query(query): Query<TargetQuery>,
    headers: HeaderMap,
) -> Result<Response, ProxyError> {
    let target = query.target()?;
    tracing::info!(url = %target, "tracing redirect chain");

    let mut recorder = RedirectRecorder::new(state.config.upstream.max_redirects);
    let final_response = upstream::follow_redirects(&state.tracer, &target, &mut recorder).await?;

    tracing::info!(
        url = %target,
        hops = recorder.hops().len(),
        final_status = %final_response.status(),
        "redirect chain complete"
    );
    // The final body is not part of the trace.
    drop(final_response);

    let trace = recorder.into_trace();
    let mut response = if wants_json(&headers) {
        Json(&trace).into_response()
    } else {
        Html(present::render_html(&trace)).into_response()
    };
    response
        .headers_mut()
        .insert("x-served-by", state.served_by.clone());
    Ok(response)
}

/// True when the Accept header lists `application/json` as an acceptable
/// media type. Parameters are ignored except an explicit `q=0`, which opts
/// the type back out.
fn wants_json(headers: &HeaderMap) -> bool {
    let Some(accept) = headers.get(header::ACCEPT).and_then(|v| v.to_str().ok()) else {
        return false;
    };
    accept.split(',').any(|entry| {
        let mut parts = entry.split(';');
        let media_type = parts.next().unwrap_or("").trim();
        if !media_type.eq_ignore_ascii_case("application/json") {
            return false;
        }
        !parts.any(|param| {
            let param = param.trim();
            param
                .strip_prefix("q=")
                .or_else(|| param.strip_prefix("Q="))
                .is_some_and(|q| q.trim().parse::<f32>() == Ok(0.0))
        })
    })
}
