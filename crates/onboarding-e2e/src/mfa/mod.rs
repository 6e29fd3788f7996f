//! MFA code retrieval from a disposable inbox.
//!
//! The onboarding wizard emails a 6-digit one-time passcode to the
//! applicant's throwaway address. [`MfaPoller`] opens a second tab in the
//! caller's browser context, searches the public inbox for that address,
//! and polls until the verification email shows up.
//!
//! ```ignore
//! use onboarding_e2e::mfa::{MfaPoller, PlaywrightInbox};
//!
//! let inbox = PlaywrightInbox::from_page(&page)?;
//! let poller = MfaPoller::new(inbox, config.inbox_url.clone());
//! let code = poller.fetch_code("Filler4821").await?;
//! otp_field.fill(code.as_str(), None).await?;
//! ```

mod inbox;
mod playwright_inbox;
mod poller;

pub use inbox::{InboxSession, InboxTab};
pub use playwright_inbox::{PlaywrightInbox, PlaywrightInboxTab};
pub use poller::{MfaPoller, PollState};

use regex::Regex;
use std::sync::LazyLock;
use tokio::time::Instant;

/// Exactly six digits, not embedded in a longer digit run
static CODE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|[^0-9])([0-9]{6})(?:[^0-9]|$)").expect("code pattern is valid")
});

/// A one-time passcode: exactly six ASCII digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MfaCode(String);

impl MfaCode {
    /// Validates `raw` as a passcode.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.len() == 6 && raw.bytes().all(|b| b.is_ascii_digit()) {
            Some(Self(raw.to_string()))
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for MfaCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for MfaCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Returns the first standalone 6-digit run in `text`, in document order.
///
/// Only the message body should be passed here. Scanning a whole rendered
/// page would pick up phone numbers and postcodes.
pub fn extract_code(text: &str) -> Option<MfaCode> {
    CODE_PATTERN
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| MfaCode(m.as_str().to_string()))
}

/// One poll for one inbox, consumed by [`MfaPoller::run`].
#[derive(Debug, Clone)]
pub struct MfaRequest {
    /// Local part of the applicant's disposable address
    pub email_prefix: String,
    /// No attempt starts after this instant
    pub deadline: Instant,
}
