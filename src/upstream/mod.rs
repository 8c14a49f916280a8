//! Outbound HTTP subsystem.
//!
//! # Data Flow
//! ```text
//! validated TargetUrl
//!     → client.rs (shared reqwest clients, timeouts)
//!     → fetch.rs  (single GET, transport follows redirects itself)
//!  or → follow.rs (manual chain-following, one Hop recorded per redirect)
//! ```

pub mod client;
pub mod fetch;
pub mod follow;

pub use fetch::fetch;
pub use follow::follow_redirects;
