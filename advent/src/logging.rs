//! Diagnostic tracing for the solvers.
//!
//! Answers go to stdout through [`crate::io::report`]; everything here goes
//! to stderr and is controlled by `RUST_LOG`, so logging never changes what a
//! command prints as its result.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Install the stderr subscriber.
///
/// Reads `RUST_LOG`, defaulting to `warn`. Output is compact.
///
/// # Example
/// ```bash
/// RUST_LOG=advent=trace advent almanac --ranges
/// ```
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .init();
}
