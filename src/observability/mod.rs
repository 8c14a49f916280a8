//! Observability.

pub mod logging;
