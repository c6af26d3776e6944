//! Test log output

use tracing_subscriber::EnvFilter;

/// Route `tracing` output through the test harness, filtered by `RUST_LOG`
///
/// Safe to call from every test; only the first call installs a subscriber.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
