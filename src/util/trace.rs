//! Creates the stdout trace subscriber using `tracing_subscriber`,
//! filtered by the environment.
//!
//! An example environment is shown:
//! ```bash
//! RUST_LOG=shaperoute=debug
//! ```

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Initialises the tracer, using tracing subscription.
/// This is optional, not calling this function will simply
/// not log traces.
///
/// Records from the `log` facade are bridged into the same
/// subscriber, so bundle construction timings show up alongside
/// the `load` and path query spans.
pub fn initialize_tracer() {
    let fmt_layer = tracing_subscriber::fmt::layer();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(fmt_layer)
        .init();
}
