// Assertions - Auto-retry URL checkpoints between wizard steps
//
// Mirrors the shape of `playwright_rs::expect` (with_timeout, not(), polling
// until the condition holds) but for the page URL, which is how the suite
// knows the wizard moved on.

use crate::error::{Error, Result};
use crate::wizard::WizardStep;
use playwright_rs::Page;
use regex::Regex;
use std::time::Duration;
use tokio::time::Instant;

/// Default timeout for URL assertions
const DEFAULT_ASSERTION_TIMEOUT: Duration = Duration::from_secs(5);

/// Default polling interval for URL assertions
const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Anything that can report the URL it currently shows.
pub trait CurrentUrl {
    fn current_url(&self) -> String;
}

impl CurrentUrl for Page {
    fn current_url(&self) -> String {
        self.url()
    }
}

/// Creates a URL expectation for a page.
///
/// ```ignore
/// expect_page(&page)
///     .with_timeout(config.expect_timeout)
///     .to_be_at(WizardStep::PersonalDetails)
///     .await?;
/// ```
pub fn expect_page<P: CurrentUrl + ?Sized>(page: &P) -> PageExpectation<'_, P> {
    PageExpectation {
        page,
        timeout: DEFAULT_ASSERTION_TIMEOUT,
        poll_interval: DEFAULT_POLL_INTERVAL,
        negate: false,
    }
}

/// Expectation on a page URL with auto-retry.
pub struct PageExpectation<'a, P: ?Sized> {
    page: &'a P,
    timeout: Duration,
    poll_interval: Duration,
    negate: bool,
}

#[allow(clippy::wrong_self_convention)]
impl<'a, P: CurrentUrl + ?Sized> PageExpectation<'a, P> {
    /// Sets a custom timeout for this assertion.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets a custom poll interval for this assertion.
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Negates the assertion.
    #[allow(clippy::should_implement_trait)]
    pub fn not(mut self) -> Self {
        self.negate = true;
        self
    }

    /// Asserts that the URL matches the regex `pattern`.
    pub async fn to_have_url_matching(self, pattern: &str) -> Result<()> {
        let re = Regex::new(pattern)
            .map_err(|e| Error::InvalidArgument(format!("Invalid regex: {}", e)))?;
        let description = format!("match /{}/", pattern);
        self.poll(&description, |url| re.is_match(url)).await
    }

    /// Asserts that the page shows wizard `step`.
    pub async fn to_be_at(self, step: WizardStep) -> Result<()> {
        let description = format!("be at {}", step.path());
        self.poll(&description, |url| step.matches(url)).await
    }

    async fn poll<F>(self, description: &str, condition: F) -> Result<()>
    where
        F: Fn(&str) -> bool,
    {
        let start = Instant::now();

        loop {
            let url = self.page.current_url();
            let holds = condition(&url);
            let matches = if self.negate { !holds } else { holds };

            if matches {
                return Ok(());
            }

            if start.elapsed() >= self.timeout {
                let message = if self.negate {
                    format!(
                        "Expected URL NOT to {}, but it was '{}' after {:?}",
                        description, url, self.timeout
                    )
                } else {
                    format!(
                        "Expected URL to {}, but it was '{}' after {:?}",
                        description, url, self.timeout
                    )
                };
                return Err(Error::AssertionTimeout(message));
            }

            tokio::time::sleep(self.poll_interval).await;
        }
    }
}
