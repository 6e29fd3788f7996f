// Tracing setup for test binaries

use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset
const DEFAULT_FILTER: &str = "warn,onboarding_e2e=info";

/// Installs a test-friendly fmt subscriber once per process.
///
/// Later calls, or calls after another subscriber was installed, are no-ops.
pub fn init() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .with_target(false)
        .try_init();
}
