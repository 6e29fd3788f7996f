// Suite configuration
//
// Defaults target the hosted integration environment. Every value can be
// overridden from the environment so CI can point the suite elsewhere
// without code changes.

use crate::error::{Error, Result};
use playwright_rs::{LaunchOptions, Viewport};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// Hosted onboarding wizard used when `ONBOARDING_BASE_URL` is unset
pub const DEFAULT_BASE_URL: &str = "https://onboarding-int.example.com";

/// Public disposable inbox used for throwaway applicant addresses
pub const DEFAULT_INBOX_URL: &str = "https://www.mailinator.com/v4/public/inboxes.jsp";

/// Domain the disposable inbox receives mail for
pub const DEFAULT_EMAIL_DOMAIN: &str = "mailinator.com";

/// Default timeout for auto-retrying assertions between wizard steps
pub const DEFAULT_EXPECT_TIMEOUT: Duration = Duration::from_secs(15);

/// Which browser engine the suite launches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BrowserKind {
    #[default]
    Chromium,
    Firefox,
    Webkit,
}

impl FromStr for BrowserKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "chromium" | "chrome" => Ok(BrowserKind::Chromium),
            "firefox" => Ok(BrowserKind::Firefox),
            "webkit" | "safari" => Ok(BrowserKind::Webkit),
            other => Err(Error::Config(format!("unknown browser '{}'", other))),
        }
    }
}

/// Timing of the MFA poll loop.
///
/// The defaults wait 3s for delivery, then retry every 2s up to 20 times,
/// for a bounded wait of about 43s.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PollOptions {
    /// Delay before the first extraction attempt
    #[serde(with = "duration_ms")]
    pub initial_delay: Duration,
    /// Delay between extraction attempts
    #[serde(with = "duration_ms")]
    pub interval: Duration,
    /// Attempts after the first one
    pub max_retries: u32,
    /// Wait after opening a message before reading its body
    #[serde(with = "duration_ms")]
    pub render_delay: Duration,
    /// Timeout handed to each browser action inside an attempt
    #[serde(with = "duration_ms")]
    pub action_timeout: Duration,
    /// Viewport of the inbox tab
    pub viewport: Viewport,
}

impl Default for PollOptions {
    fn default() -> Self {
        Self {
            initial_delay: Duration::from_secs(3),
            interval: Duration::from_secs(2),
            max_retries: 20,
            render_delay: Duration::from_secs(1),
            action_timeout: Duration::from_secs(5),
            viewport: Viewport {
                width: 1920,
                height: 1080,
            },
        }
    }
}

impl PollOptions {
    /// Creates poll options with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the delay before the first attempt
    pub fn initial_delay(mut self, delay: Duration) -> Self {
        self.initial_delay = delay;
        self
    }

    /// Sets the delay between attempts
    pub fn interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Sets how many attempts follow the first one
    pub fn max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Sets the wait between opening a message and reading it
    pub fn render_delay(mut self, delay: Duration) -> Self {
        self.render_delay = delay;
        self
    }

    /// Sets the per-action timeout inside an attempt
    pub fn action_timeout(mut self, timeout: Duration) -> Self {
        self.action_timeout = timeout;
        self
    }

    /// Total number of extraction attempts
    pub fn total_attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }

    /// Worst-case wall-clock budget for one poll.
    ///
    /// Covers every scheduled delay plus one action timeout per attempt.
    /// Saturates at `Duration::MAX` for extreme settings.
    pub fn budget(&self) -> Duration {
        let attempts = self.total_attempts();
        let waits = self
            .interval
            .checked_mul(self.max_retries)
            .unwrap_or(Duration::MAX);
        let per_attempt = self
            .render_delay
            .saturating_add(self.action_timeout)
            .checked_mul(attempts)
            .unwrap_or(Duration::MAX);
        self.initial_delay
            .saturating_add(waits)
            .saturating_add(per_attempt)
    }
}

/// Selectors making up the UI contract with the disposable inbox.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InboxSelectors {
    /// Search-by-prefix text field
    pub search_input: String,
    /// Button submitting the search
    pub search_submit: String,
    /// A row in the results list
    pub message_row: String,
    /// Visible text identifying a verification email
    pub code_label: String,
    /// Container whose text holds the code
    pub message_body: String,
}

impl Default for InboxSelectors {
    fn default() -> Self {
        Self {
            search_input: "#search".to_string(),
            search_submit: "button:has-text(\"GO\")".to_string(),
            message_row: "table tr".to_string(),
            code_label: "verification code".to_string(),
            message_body: "iframe#html_msg_body >> internal:control=enter-frame >> body"
                .to_string(),
        }
    }
}

impl InboxSelectors {
    /// Selector for a result row mentioning the code label
    pub fn labelled_row(&self) -> String {
        format!("{}:has-text(\"{}\")", self.message_row, self.code_label)
    }
}

/// Configuration for one run of the suite.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SuiteConfig {
    /// Root URL of the onboarding wizard
    pub base_url: String,
    /// Disposable inbox landing page
    pub inbox_url: String,
    /// Domain applicant addresses are created under
    pub email_domain: String,
    pub browser: BrowserKind,
    pub headless: bool,
    /// Timeout for URL and element assertions
    #[serde(with = "duration_ms")]
    pub expect_timeout: Duration,
    pub poll: PollOptions,
    pub inbox: InboxSelectors,
    /// Where extracted codes are logged; `None` disables the log
    pub mfa_log_path: Option<PathBuf>,
}

impl Default for SuiteConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            inbox_url: DEFAULT_INBOX_URL.to_string(),
            email_domain: DEFAULT_EMAIL_DOMAIN.to_string(),
            browser: BrowserKind::default(),
            headless: true,
            expect_timeout: DEFAULT_EXPECT_TIMEOUT,
            poll: PollOptions::default(),
            inbox: InboxSelectors::default(),
            mfa_log_path: Some(PathBuf::from("test-results/mfa-codes.log")),
        }
    }
}

impl SuiteConfig {
    /// Loads defaults overridden by process environment variables.
    ///
    /// Recognised variables: `ONBOARDING_BASE_URL`, `MFA_INBOX_URL`,
    /// `MFA_EMAIL_DOMAIN`, `BROWSER`, `HEADLESS`, `EXPECT_TIMEOUT_MS`,
    /// `MFA_INITIAL_DELAY_MS`, `MFA_POLL_INTERVAL_MS`, `MFA_MAX_RETRIES`,
    /// `MFA_LOG_PATH`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`SuiteConfig::from_env`] but reading from `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup("ONBOARDING_BASE_URL") {
            config.base_url = url.trim_end_matches('/').to_string();
        }
        if let Some(url) = lookup("MFA_INBOX_URL") {
            config.inbox_url = url;
        }
        if let Some(domain) = lookup("MFA_EMAIL_DOMAIN") {
            config.email_domain = domain;
        }
        if let Some(browser) = lookup("BROWSER") {
            config.browser = browser.parse()?;
        }
        if let Some(headless) = lookup("HEADLESS") {
            config.headless = parse_bool("HEADLESS", &headless)?;
        }
        if let Some(ms) = parse_var::<u64, _>(&lookup, "EXPECT_TIMEOUT_MS")? {
            config.expect_timeout = Duration::from_millis(ms);
        }
        if let Some(ms) = parse_var::<u64, _>(&lookup, "MFA_INITIAL_DELAY_MS")? {
            config.poll.initial_delay = Duration::from_millis(ms);
        }
        if let Some(ms) = parse_var::<u64, _>(&lookup, "MFA_POLL_INTERVAL_MS")? {
            config.poll.interval = Duration::from_millis(ms);
        }
        if let Some(retries) = parse_var::<u32, _>(&lookup, "MFA_MAX_RETRIES")? {
            config.poll.max_retries = retries;
        }
        if let Some(path) = lookup("MFA_LOG_PATH") {
            config.mfa_log_path = if path.is_empty() {
                None
            } else {
                Some(PathBuf::from(path))
            };
        }

        Ok(config)
    }

    /// Parses a JSON document; missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| Error::Config(format!("invalid JSON config: {}", e)))
    }

    /// Sets the wizard root URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the disposable inbox URL
    pub fn inbox_url(mut self, url: impl Into<String>) -> Self {
        self.inbox_url = url.into();
        self
    }

    /// Sets the MFA poll timing
    pub fn poll(mut self, poll: PollOptions) -> Self {
        self.poll = poll;
        self
    }

    /// Sets the MFA log location
    pub fn mfa_log_path(mut self, path: Option<PathBuf>) -> Self {
        self.mfa_log_path = path;
        self
    }

    /// Launch options for the configured browser
    pub fn launch_options(&self) -> LaunchOptions {
        LaunchOptions::new().headless(self.headless)
    }
}

fn parse_var<T, F>(lookup: &F, key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| Error::Config(format!("{}='{}': {}", key, raw, e))),
        None => Ok(None),
    }
}

fn parse_bool(key: &str, raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(Error::Config(format!("{}='{}' is not a boolean", key, raw))),
    }
}

mod duration_ms {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_match_documented_poll_bound() {
        let poll = PollOptions::default();
        assert_eq!(poll.total_attempts(), 21);
        assert_eq!(
            poll.initial_delay + poll.interval * poll.max_retries,
            Duration::from_secs(43)
        );
        assert!(poll.budget() > Duration::from_secs(43));
    }

    #[test]
    fn test_budget_saturates_on_extreme_values() {
        let config = SuiteConfig::from_lookup(lookup_from(&[
            ("MFA_POLL_INTERVAL_MS", "18446744073709551615"),
            ("MFA_MAX_RETRIES", "4294967295"),
        ]))
        .unwrap();
        assert_eq!(config.poll.budget(), Duration::MAX);

        let poll = PollOptions::new()
            .render_delay(Duration::MAX)
            .action_timeout(Duration::from_secs(1));
        assert_eq!(poll.budget(), Duration::MAX);
    }

    #[test]
    fn test_env_overrides() {
        let config = SuiteConfig::from_lookup(lookup_from(&[
            ("ONBOARDING_BASE_URL", "http://127.0.0.1:4000/"),
            ("BROWSER", "Firefox"),
            ("HEADLESS", "false"),
            ("MFA_POLL_INTERVAL_MS", "250"),
            ("MFA_MAX_RETRIES", "3"),
            ("MFA_LOG_PATH", ""),
        ]))
        .unwrap();

        assert_eq!(config.base_url, "http://127.0.0.1:4000");
        assert_eq!(config.browser, BrowserKind::Firefox);
        assert!(!config.headless);
        assert_eq!(config.poll.interval, Duration::from_millis(250));
        assert_eq!(config.poll.max_retries, 3);
        assert_eq!(config.poll.initial_delay, Duration::from_secs(3));
        assert!(config.mfa_log_path.is_none());
        assert_eq!(config.inbox_url, DEFAULT_INBOX_URL);
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let err = SuiteConfig::from_lookup(lookup_from(&[("MFA_MAX_RETRIES", "many")]))
            .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert!(err.to_string().contains("MFA_MAX_RETRIES"));

        let err = SuiteConfig::from_lookup(lookup_from(&[("BROWSER", "lynx")])).unwrap_err();
        assert!(err.to_string().contains("lynx"));

        assert!(SuiteConfig::from_lookup(lookup_from(&[("HEADLESS", "maybe")])).is_err());
    }

    #[test]
    fn test_deserialize_partial_json() {
        let config = SuiteConfig::from_json(
            r#"{"base_url": "http://localhost:3000", "poll": {"max_retries": 5, "interval": 100}}"#,
        )
        .unwrap();
        assert_eq!(config.base_url, "http://localhost:3000");
        assert_eq!(config.poll.max_retries, 5);
        assert_eq!(config.poll.interval, Duration::from_millis(100));
        assert_eq!(config.poll.render_delay, Duration::from_secs(1));
        assert_eq!(config.inbox.code_label, "verification code");

        let err = SuiteConfig::from_json(r#"{"poll": {"interval": "fast"}}"#).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_labelled_row_selector() {
        let selectors = InboxSelectors::default();
        assert_eq!(
            selectors.labelled_row(),
            "table tr:has-text(\"verification code\")"
        );
    }
}
