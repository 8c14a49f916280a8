//! Redirect trace accumulation and presentation.
//!
//! # Data Flow
//! ```text
//! upstream::follow (one hop observed)
//!     → recorder.rs (append Hop, enforce hop limit)
//!     → Trace (immutable, insertion order)
//!     → present.rs (JSON via serde / rendered HTML)
//! ```

pub mod present;
pub mod recorder;

pub use recorder::{Hop, LimitExceeded, RedirectRecorder, Trace, DEFAULT_MAX_HOPS};
