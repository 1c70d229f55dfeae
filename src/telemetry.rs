// SYNOID Genre Telemetry
// Copyright (c) 2026 Xing_The_Creator | SYNOID

use tracing_subscriber::EnvFilter;

/// Install the fmt subscriber. Honors `RUST_LOG`, defaults to `info`.
/// Safe to call more than once; later calls are no-ops.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
