//! Per-request accumulation of redirect hops.
//!
//! # Responsibilities
//! - Record one [`Hop`] per redirect response, in chronological order
//! - Enforce the hop limit: refuse the append that would exceed it
//! - Hand the finished sequence over as an immutable [`Trace`]
//!
//! A recorder belongs to exactly one chain-following call. It is never
//! shared between requests; every inbound trace request constructs its own.

use std::collections::BTreeMap;

use http::{HeaderMap, StatusCode};
use serde::Serialize;
use url::Url;

/// Default hop limit for a single redirect chain.
pub const DEFAULT_MAX_HOPS: usize = 20;

/// One observed redirect step: the URL that was requested, the status code
/// it answered with, and the response headers it sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Hop {
    pub url: String,
    pub status: u16,
    /// Header names are lowercased (HTTP names are case-insensitive);
    /// multiple values for one name keep their arrival order.
    pub headers: BTreeMap<String, Vec<String>>,
}

impl Hop {
    /// Build a hop from the response observed at `url`.
    pub fn from_response(url: &Url, status: StatusCode, headers: &HeaderMap) -> Self {
        let mut collected: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for (name, value) in headers {
            collected
                .entry(name.as_str().to_string())
                .or_default()
                .push(String::from_utf8_lossy(value.as_bytes()).into_owned());
        }
        Self {
            url: url.to_string(),
            status: status.as_u16(),
            headers: collected,
        }
    }
}

/// Returned by [`RedirectRecorder::observe`] when the chain is already at
/// the hop limit. The offending hop is not appended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LimitExceeded {
    pub max_hops: usize,
}

/// Append-only hop accumulator scoped to one chain-following call.
#[derive(Debug)]
pub struct RedirectRecorder {
    hops: Vec<Hop>,
    max_hops: usize,
}

impl RedirectRecorder {
    /// Create a recorder that refuses to grow past `max_hops` entries.
    pub fn new(max_hops: usize) -> Self {
        Self {
            hops: Vec::new(),
            max_hops,
        }
    }

    /// Append a hop, unless doing so would exceed the hop limit.
    ///
    /// On `LimitExceeded` the caller must abort the chain; continuing to
    /// follow redirects past the limit would silently truncate the trace.
    pub fn observe(&mut self, hop: Hop) -> Result<(), LimitExceeded> {
        if self.hops.len() >= self.max_hops {
            return Err(LimitExceeded {
                max_hops: self.max_hops,
            });
        }
        self.hops.push(hop);
        Ok(())
    }

    /// Hops recorded so far, in insertion order.
    pub fn hops(&self) -> &[Hop] {
        &self.hops
    }

    /// Consume the recorder into an immutable trace.
    pub fn into_trace(self) -> Trace {
        Trace { hops: self.hops }
    }
}

impl Default for RedirectRecorder {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_HOPS)
    }
}

/// The finished, ordered hop sequence for one chain-following operation.
///
/// Serializes as a JSON array of hop objects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Trace {
    hops: Vec<Hop>,
}

impl Trace {
    pub fn hops(&self) -> &[Hop] {
        &self.hops
    }

    pub fn len(&self) -> usize {
        self.hops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hops.is_empty()
    }
}
