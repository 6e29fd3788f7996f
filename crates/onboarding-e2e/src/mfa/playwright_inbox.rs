// Disposable inbox driven through Playwright

use super::inbox::{InboxSession, InboxTab};
use crate::config::InboxSelectors;
use crate::error::Result;
use async_trait::async_trait;
use parking_lot::Mutex;
use playwright_rs::{
    BrowserContext, ClickOptions, FillOptions, GotoOptions, Page, PressOptions, Viewport,
    WaitUntil,
};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

/// Navigation timeout for the inbox landing page
const INBOX_NAVIGATION_TIMEOUT: Duration = Duration::from_secs(30);

/// Opens inbox tabs inside an existing browser context.
///
/// Tabs share cookies and storage with the wizard page that owns the context.
#[derive(Clone)]
pub struct PlaywrightInbox {
    context: BrowserContext,
    selectors: InboxSelectors,
    action_timeout: Duration,
}

impl PlaywrightInbox {
    pub fn new(context: BrowserContext) -> Self {
        Self {
            context,
            selectors: InboxSelectors::default(),
            action_timeout: Duration::from_secs(5),
        }
    }

    /// Uses the context that owns `page`.
    pub fn from_page(page: &Page) -> Result<Self> {
        Ok(Self::new(page.context()?))
    }

    /// Overrides the inbox selectors
    pub fn with_selectors(mut self, selectors: InboxSelectors) -> Self {
        self.selectors = selectors;
        self
    }

    /// Sets the timeout for clicks and fills inside the inbox
    pub fn with_action_timeout(mut self, timeout: Duration) -> Self {
        self.action_timeout = timeout;
        self
    }
}

#[async_trait]
impl InboxSession for PlaywrightInbox {
    type Tab = PlaywrightInboxTab;

    async fn open_tab(&self) -> Result<Self::Tab> {
        let page = self.context.new_page().await?;
        Ok(PlaywrightInboxTab {
            page,
            selectors: self.selectors.clone(),
            action_timeout_ms: self.action_timeout.as_millis() as f64,
            results: Mutex::new(None),
            message_open: AtomicBool::new(false),
        })
    }
}

/// Inbox URL and searched prefix, enough to reload the results list
#[derive(Debug, Clone)]
struct ResultsView {
    inbox_url: String,
    email_prefix: Option<String>,
}

/// A Playwright page showing the disposable inbox.
///
/// Opening a message leaves the results list behind, so the next
/// [`InboxTab::open_verification_message`] reloads the inbox and repeats
/// the search first.
pub struct PlaywrightInboxTab {
    page: Page,
    selectors: InboxSelectors,
    action_timeout_ms: f64,
    results: Mutex<Option<ResultsView>>,
    message_open: AtomicBool,
}

impl PlaywrightInboxTab {
    pub fn page(&self) -> &Page {
        &self.page
    }

    async fn goto_inbox(&self, url: &str) -> Result<()> {
        let options = GotoOptions::new()
            .wait_until(WaitUntil::NetworkIdle)
            .timeout(INBOX_NAVIGATION_TIMEOUT);
        self.page.goto(url, Some(options)).await?;
        Ok(())
    }

    async fn submit_search(&self, email_prefix: &str) -> Result<()> {
        let input = self.page.locator(&self.selectors.search_input).await;
        input
            .fill(
                email_prefix,
                Some(FillOptions::builder().timeout(self.action_timeout_ms).build()),
            )
            .await?;

        let submit = self.page.locator(&self.selectors.search_submit).await;
        let click = ClickOptions::builder()
            .timeout(self.action_timeout_ms)
            .build();
        if let Err(e) = submit.first().click(Some(click)).await {
            tracing::debug!(error = %e, "search button unavailable, submitting with Enter");
            input
                .press(
                    "Enter",
                    Some(PressOptions::builder().timeout(self.action_timeout_ms).build()),
                )
                .await?;
        }
        Ok(())
    }

    /// Reloads the inbox and repeats the last search.
    async fn return_to_results(&self) -> Result<()> {
        let Some(view) = self.results.lock().clone() else {
            return Ok(());
        };
        tracing::debug!(inbox = %view.inbox_url, "returning to inbox results");
        self.goto_inbox(&view.inbox_url).await?;
        if let Some(prefix) = &view.email_prefix {
            self.submit_search(prefix).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl InboxTab for PlaywrightInboxTab {
    async fn set_viewport(&self, viewport: &Viewport) -> Result<()> {
        self.page.set_viewport_size(viewport.clone()).await?;
        Ok(())
    }

    async fn open_inbox(&self, url: &str) -> Result<()> {
        self.goto_inbox(url).await?;
        *self.results.lock() = Some(ResultsView {
            inbox_url: url.to_string(),
            email_prefix: None,
        });
        self.message_open.store(false, Ordering::SeqCst);
        Ok(())
    }

    async fn search(&self, email_prefix: &str) -> Result<()> {
        self.submit_search(email_prefix).await?;
        if let Some(view) = self.results.lock().as_mut() {
            view.email_prefix = Some(email_prefix.to_string());
        }
        Ok(())
    }

    async fn open_verification_message(&self) -> Result<bool> {
        if self.message_open.load(Ordering::SeqCst) {
            self.return_to_results().await?;
            self.message_open.store(false, Ordering::SeqCst);
        }
        let row = self
            .page
            .locator(&self.selectors.labelled_row())
            .await
            .first();
        if row.count().await? == 0 {
            return Ok(false);
        }
        row.click(Some(
            ClickOptions::builder()
                .timeout(self.action_timeout_ms)
                .build(),
        ))
        .await?;
        self.message_open.store(true, Ordering::SeqCst);
        Ok(true)
    }

    async fn message_body(&self) -> Result<String> {
        let body = self.page.locator(&self.selectors.message_body).await;
        if body.count().await? == 0 {
            return Ok(String::new());
        }
        Ok(body.first().inner_text().await?)
    }

    async fn close(&self) -> Result<()> {
        self.page.close().await?;
        Ok(())
    }
}
