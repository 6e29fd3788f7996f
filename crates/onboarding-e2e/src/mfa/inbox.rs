// Inbox seam
//
// The poller only needs a handful of operations from the disposable inbox.
// Keeping them behind traits lets the poll loop run against a scripted
// inbox in tests.

use crate::error::Result;
use async_trait::async_trait;
use playwright_rs::Viewport;

/// Something that can open tabs sharing the caller's cookies and storage.
#[async_trait]
pub trait InboxSession: Send + Sync {
    type Tab: InboxTab;

    /// Opens a new, blank tab.
    async fn open_tab(&self) -> Result<Self::Tab>;
}

/// A tab showing the disposable inbox.
#[async_trait]
pub trait InboxTab: Send + Sync {
    async fn set_viewport(&self, viewport: &Viewport) -> Result<()>;

    /// Navigates to the inbox landing page and waits for the network to settle.
    async fn open_inbox(&self, url: &str) -> Result<()>;

    /// Submits `email_prefix` into the inbox search field.
    async fn search(&self, email_prefix: &str) -> Result<()>;

    /// Opens the verification email if one is listed.
    ///
    /// Returns `Ok(false)` when no matching row is present yet.
    async fn open_verification_message(&self) -> Result<bool>;

    /// Text content of the opened message.
    async fn message_body(&self) -> Result<String>;

    async fn close(&self) -> Result<()>;
}
