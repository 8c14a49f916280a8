//! HTTP surface of the service.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware, shared state)
//!     → handlers.rs (validate target, dispatch to upstream)
//!     → upstream subsystem (pass-through fetch / chain-following)
//!     → trace presenters or raw body write
//! ```

pub mod handlers;
pub mod server;

pub use server::{AppState, HttpServer};
