// MFA poll loop
//
// Idle -> TabOpened -> Searching -> {Polling <-> NoCodeYet}
//      -> {Found | Exhausted} -> TabClosed

use super::inbox::{InboxSession, InboxTab};
use super::{MfaCode, MfaRequest, extract_code};
use crate::config::PollOptions;
use crate::error::{Error, Result, SetupStage};
use crate::mfa_log::MfaLog;
use std::time::Duration;
use tokio::time::{Instant, sleep};
use tracing::Instrument;

/// Stand-in deadline when the poll budget does not fit in an `Instant`
const FAR_FUTURE: Duration = Duration::from_secs(86_400 * 365 * 30);

/// Where a poll currently stands. Reported in tracing events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollState {
    Idle,
    TabOpened,
    Searching,
    Polling,
    NoCodeYet,
    Found,
    Exhausted,
    TabClosed,
}

impl std::fmt::Display for PollState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PollState::Idle => "idle",
            PollState::TabOpened => "tab_opened",
            PollState::Searching => "searching",
            PollState::Polling => "polling",
            PollState::NoCodeYet => "no_code_yet",
            PollState::Found => "found",
            PollState::Exhausted => "exhausted",
            PollState::TabClosed => "tab_closed",
        };
        f.write_str(name)
    }
}

/// Retrieves one-time passcodes from a disposable inbox.
///
/// Each call to [`MfaPoller::fetch_code`] opens exactly one tab through the
/// session and closes it again on every exit path.
pub struct MfaPoller<S> {
    session: S,
    inbox_url: String,
    options: PollOptions,
    log: MfaLog,
}

impl<S: InboxSession> MfaPoller<S> {
    /// Creates a poller with default timing and no log file.
    pub fn new(session: S, inbox_url: impl Into<String>) -> Self {
        Self {
            session,
            inbox_url: inbox_url.into(),
            options: PollOptions::default(),
            log: MfaLog::disabled(),
        }
    }

    /// Sets the poll timing
    pub fn with_options(mut self, options: PollOptions) -> Self {
        self.options = options;
        self
    }

    /// Sets where found codes are logged
    pub fn with_log(mut self, log: MfaLog) -> Self {
        self.log = log;
        self
    }

    pub fn options(&self) -> &PollOptions {
        &self.options
    }

    /// Builds a request whose deadline is the options' worst-case budget.
    pub fn request(&self, email_prefix: &str) -> Result<MfaRequest> {
        let email_prefix = email_prefix.trim();
        if email_prefix.is_empty() {
            return Err(Error::InvalidArgument(
                "email prefix must not be empty".to_string(),
            ));
        }
        let now = Instant::now();
        let deadline = now
            .checked_add(self.options.budget())
            .unwrap_or_else(|| now + FAR_FUTURE);
        Ok(MfaRequest {
            email_prefix: email_prefix.to_string(),
            deadline,
        })
    }

    /// Polls the inbox for `email_prefix` and returns its code.
    ///
    /// # Errors
    ///
    /// - `Error::InvalidArgument` for an empty prefix (no tab is opened)
    /// - `Error::Setup` if the tab cannot be opened, navigated or searched
    /// - `Error::CodeNotFound` once every attempt came back empty
    pub async fn fetch_code(&self, email_prefix: &str) -> Result<MfaCode> {
        let request = self.request(email_prefix)?;
        self.run(request).await
    }

    /// Runs one poll for `request`.
    pub async fn run(&self, request: MfaRequest) -> Result<MfaCode> {
        let span = tracing::info_span!("mfa_poll", email_prefix = %request.email_prefix);
        async move {
            tracing::debug!(state = %PollState::Idle, inbox = %self.inbox_url, "starting MFA poll");

            let tab = self
                .session
                .open_tab()
                .await
                .map_err(|e| e.at_setup(SetupStage::OpenTab))?;
            tracing::debug!(state = %PollState::TabOpened);

            let outcome = self.poll_in_tab(&tab, &request).await;

            // The tab is ours alone; close it whatever happened above.
            if let Err(e) = tab.close().await {
                tracing::warn!(error = %e, "failed to close inbox tab");
            }
            tracing::debug!(state = %PollState::TabClosed);

            let code = outcome?;
            self.log.append(&request.email_prefix, &code).await;
            Ok(code)
        }
        .instrument(span)
        .await
    }

    async fn poll_in_tab(&self, tab: &S::Tab, request: &MfaRequest) -> Result<MfaCode> {
        tab.set_viewport(&self.options.viewport)
            .await
            .map_err(|e| e.at_setup(SetupStage::Viewport))?;
        tab.open_inbox(&self.inbox_url)
            .await
            .map_err(|e| e.at_setup(SetupStage::Navigate))?;
        tracing::debug!(state = %PollState::Searching);
        tab.search(&request.email_prefix)
            .await
            .map_err(|e| e.at_setup(SetupStage::Search))?;

        sleep(self.options.initial_delay).await;

        let total = self.options.total_attempts();
        let mut attempts = 0;
        loop {
            attempts += 1;
            tracing::debug!(state = %PollState::Polling, attempt = attempts, of = total);

            if let Some(code) = self.attempt(tab).await {
                tracing::info!(state = %PollState::Found, attempts, "MFA code found");
                return Ok(code);
            }
            tracing::debug!(state = %PollState::NoCodeYet, attempt = attempts);

            if attempts >= total {
                break;
            }
            let next_attempt = Instant::now().checked_add(self.options.interval);
            if next_attempt.is_none_or(|next| next > request.deadline) {
                tracing::warn!(attempts, "MFA poll deadline passed before attempts ran out");
                break;
            }
            sleep(self.options.interval).await;
        }

        tracing::warn!(state = %PollState::Exhausted, attempts, "no MFA code found");
        Err(Error::CodeNotFound {
            email_prefix: request.email_prefix.clone(),
            attempts,
        })
    }

    /// One extraction attempt. Browser errors here only mean "not yet".
    async fn attempt(&self, tab: &S::Tab) -> Option<MfaCode> {
        match self.try_extract(tab).await {
            Ok(code) => code,
            Err(e) => {
                tracing::debug!(error = %e, "extraction attempt failed");
                None
            }
        }
    }

    async fn try_extract(&self, tab: &S::Tab) -> Result<Option<MfaCode>> {
        if !tab.open_verification_message().await? {
            return Ok(None);
        }
        sleep(self.options.render_delay).await;
        let body = tab.message_body().await?;
        Ok(extract_code(&body))
    }
}
