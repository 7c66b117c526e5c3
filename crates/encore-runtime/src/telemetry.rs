//! Tracing subscriber setup for embedding processes.
//!
//! The domain crates only *emit* spans and events; installing a
//! subscriber is the host process's job and happens exactly once at
//! startup, before any store is touched.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Installs a formatted stderr subscriber.
///
/// The filter comes from `RUST_LOG` when set, falling back to the
/// given directive (for example `"info"` or `"encore_grant=debug"`).
///
/// Returns `false` when a global subscriber was already installed, in
/// which case the existing one stays in place.
pub fn init_tracing(default_directive: &str) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));
    let stderr_layer = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);
    tracing_subscriber::registry()
        .with(stderr_layer.with_filter(filter))
        .try_init()
        .is_ok()
}
