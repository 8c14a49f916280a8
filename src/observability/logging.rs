//! Structured logging.
//!
//! Initializes the tracing subscriber once at startup. `RUST_LOG` wins when
//! set; otherwise the default filter is derived from the `DEBUG` config
//! flag.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Install the global tracing subscriber.
pub fn init(debug: bool) {
    let default_filter = if debug {
        "trace_proxy=debug,tower_http=debug"
    } else {
        "trace_proxy=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
