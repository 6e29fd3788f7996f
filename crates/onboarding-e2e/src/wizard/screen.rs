// Shared plumbing for page objects

use super::WizardStep;
use crate::assertions::expect_page;
use crate::error::Result;
use crate::locate;
use playwright_rs::{GotoOptions, Page, SelectOption, WaitUntil};
use std::time::Duration;

/// Buttons that advance the wizard
pub(crate) const CONTINUE: &[&str] = &[
    "button[type='submit']",
    "button:has-text(\"Continue\")",
    "text=Continue",
];

/// Inline validation messages
pub(crate) const VALIDATION_ERRORS: &[&str] = &[
    "[role='alert']",
    ".error-message",
    "[data-testid$='-error']",
];

/// A wizard page plus the timeout its interactions use.
#[derive(Clone)]
pub struct Screen {
    page: Page,
    timeout: Duration,
}

impl Screen {
    pub fn new(page: &Page, timeout: Duration) -> Self {
        Self {
            page: page.clone(),
            timeout,
        }
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Loads `step` directly.
    pub async fn open(&self, base_url: &str, step: WizardStep) -> Result<()> {
        let options = GotoOptions::new()
            .wait_until(WaitUntil::DomContentLoaded)
            .timeout(self.timeout);
        self.page.goto(&step.url(base_url), Some(options)).await?;
        Ok(())
    }

    /// Waits until the URL shows `step`.
    pub async fn wait_for(&self, step: WizardStep) -> Result<()> {
        expect_page(&self.page)
            .with_timeout(self.timeout)
            .to_be_at(step)
            .await
    }

    pub async fn fill(&self, candidates: &[&str], value: &str) -> Result<()> {
        locate::fill_any(&self.page, candidates, value, self.timeout).await
    }

    pub async fn click(&self, candidates: &[&str]) -> Result<()> {
        locate::click_any(&self.page, candidates, self.timeout).await
    }

    pub async fn check(&self, candidates: &[&str]) -> Result<()> {
        let target = locate::resolve_attached(&self.page, candidates).await?;
        target.check(None).await?;
        Ok(())
    }

    /// Picks the `<select>` option whose visible text is `label`.
    pub async fn select_label(&self, candidates: &[&str], label: &str) -> Result<()> {
        let target = locate::resolve(&self.page, candidates).await?;
        target
            .select_option(SelectOption::Label(label.to_string()), None)
            .await?;
        Ok(())
    }

    /// Visible text of the first visible candidate.
    pub async fn text(&self, candidates: &[&str]) -> Result<String> {
        let target = locate::resolve(&self.page, candidates).await?;
        Ok(target.inner_text().await?.trim().to_string())
    }

    /// True if any candidate is visible right now.
    pub async fn is_shown(&self, candidates: &[&str]) -> bool {
        locate::resolve(&self.page, candidates).await.is_ok()
    }

    /// Clicks the step's continue button.
    pub async fn submit(&self) -> Result<()> {
        self.click(CONTINUE).await
    }

    /// Texts of every visible validation message.
    pub async fn validation_errors(&self) -> Result<Vec<String>> {
        let mut messages = Vec::new();
        for selector in VALIDATION_ERRORS {
            let matches = self.page.locator(selector).await;
            for i in 0..matches.count().await? {
                let message = matches.nth(i as i32);
                if !message.is_visible().await? {
                    continue;
                }
                let text = message.inner_text().await?;
                let text = text.trim();
                if !text.is_empty() && !messages.iter().any(|m| m == text) {
                    messages.push(text.to_string());
                }
            }
        }
        Ok(messages)
    }
}
