//! Helpers shared by the integration tests.

/// Initializes tracing based logging.
///
/// Override the level with the env var RUST_LOG, e.g., RUST_LOG=trace.
/// DEBUG level shows the outcome of signing and verification, TRACE level
/// adds the canonical boundary and the length of the signing data.
pub fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .without_time()
        .try_init()
        .ok();
}
