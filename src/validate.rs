//! Target URL validation.
//!
//! Both endpoints accept an arbitrary string from the query and must reject
//! everything that is not a well-formed absolute http(s) URL before any
//! outbound call is made. Validation is pure: no I/O, no side effects.

use std::fmt;

use url::Url;

use crate::error::ProxyError;

/// A target URL that has passed validation.
///
/// Constructible only through [`validate_target`], so downstream code can
/// rely on it being an absolute URL with an http or https scheme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetUrl(Url);

impl TargetUrl {
    /// Borrow the inner URL.
    pub fn as_url(&self) -> &Url {
        &self.0
    }
}

impl fmt::Display for TargetUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Validate a candidate target string.
///
/// Rejects empty input, anything `url::Url` cannot parse as an absolute URL
/// (relative references included), and any scheme other than `http` or
/// `https`. The `url` crate normalizes schemes to lowercase during parsing,
/// so `HTTP://...` is accepted and `FTP://...` is rejected as `ftp`.
pub fn validate_target(input: &str) -> Result<TargetUrl, ProxyError> {
    if input.is_empty() {
        return Err(ProxyError::MissingUrl);
    }

    let url = Url::parse(input)?;
    match url.scheme() {
        "http" | "https" => Ok(TargetUrl(url)),
        other => Err(ProxyError::UnsupportedScheme(other.to_string())),
    }
}
