// Browser harness for test specs

use crate::config::{BrowserKind, SuiteConfig};
use crate::error::Result;
use crate::mfa::{MfaPoller, PlaywrightInbox};
use crate::mfa_log::MfaLog;
use crate::wizard::Screen;
use playwright_rs::{Browser, BrowserContext, Page, Playwright};

/// A launched browser with one context and the page the wizard runs in.
///
/// The MFA poller opens its inbox tab in `context`, so it shares cookies
/// with `page`.
pub struct BrowserHarness {
    pub playwright: Playwright,
    pub browser: Browser,
    pub context: BrowserContext,
    pub page: Page,
    config: SuiteConfig,
}

impl BrowserHarness {
    /// Launches the configured browser and opens the wizard page.
    pub async fn launch(config: SuiteConfig) -> Result<Self> {
        let playwright = Playwright::launch().await?;
        let browser_type = match config.browser {
            BrowserKind::Chromium => playwright.chromium(),
            BrowserKind::Firefox => playwright.firefox(),
            BrowserKind::Webkit => playwright.webkit(),
        };
        tracing::info!(browser = ?config.browser, headless = config.headless, "launching browser");
        let browser = browser_type
            .launch_with_options(config.launch_options())
            .await?;
        let context = browser.new_context().await?;
        let page = context.new_page().await?;

        Ok(Self {
            playwright,
            browser,
            context,
            page,
            config,
        })
    }

    pub fn config(&self) -> &SuiteConfig {
        &self.config
    }

    /// Page-object base for the wizard page.
    pub fn screen(&self) -> Screen {
        Screen::new(&self.page, self.config.expect_timeout)
    }

    /// Poller reading codes through this harness's browser context.
    pub fn mfa_poller(&self) -> MfaPoller<PlaywrightInbox> {
        let inbox = PlaywrightInbox::new(self.context.clone())
            .with_selectors(self.config.inbox.clone())
            .with_action_timeout(self.config.poll.action_timeout);
        MfaPoller::new(inbox, self.config.inbox_url.clone())
            .with_options(self.config.poll.clone())
            .with_log(MfaLog::from_path(self.config.mfa_log_path.as_deref()))
    }

    /// Closes the browser and stops the Playwright driver.
    pub async fn close(self) -> Result<()> {
        self.browser.close().await?;
        self.playwright.shutdown().await?;
        Ok(())
    }
}
