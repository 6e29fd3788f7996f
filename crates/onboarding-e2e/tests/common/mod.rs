// Shared helpers for integration test binaries

#![allow(dead_code)]

/// Installs the crate's test subscriber. Safe to call from every test.
pub fn init_tracing() {
    onboarding_e2e::logging::init();
}

/// Browser tests against the local fake server run only when this is set.
pub const LOCAL_BROWSER_ENV: &str = "PLAYWRIGHT_INTEGRATION";

/// Specs against the hosted onboarding environment run only when this is set.
pub const HOSTED_ENV: &str = "ONBOARDING_E2E";

/// True when `var` is set to `1` or `true`.
pub fn enabled(var: &str) -> bool {
    matches!(
        std::env::var(var).as_deref(),
        Ok("1") | Ok("true") | Ok("TRUE")
    )
}
