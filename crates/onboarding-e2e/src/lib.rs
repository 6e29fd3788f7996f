//! onboarding-e2e: Playwright end-to-end suite for the account-opening wizard
//!
//! The crate bundles everything the test specs under `tests/` need to walk an
//! applicant through the hosted onboarding wizard:
//!
//! - [`wizard`] page objects, one per wizard step, plus the URL checkpoints
//!   ([`WizardStep`]) the wizard moves through
//! - [`mfa`], which reads the emailed one-time passcode out of a public
//!   disposable inbox in a second tab
//! - [`locate`], resolving elements from ordered candidate selector lists
//! - [`expect_page`], auto-retrying URL assertions
//! - [`SuiteConfig`], defaults plus environment overrides
//!
//! # Example
//!
//! ```ignore
//! use onboarding_e2e::{Applicant, BrowserHarness, SuiteConfig};
//! use onboarding_e2e::wizard::{EmailVerificationPage, WelcomePage};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = SuiteConfig::from_env()?;
//!     let harness = BrowserHarness::launch(config.clone()).await?;
//!     let applicant = Applicant::random();
//!
//!     let welcome = WelcomePage::open(harness.screen(), &config.base_url).await?;
//!     welcome.start(&applicant.email(&config.email_domain)).await?;
//!
//!     EmailVerificationPage::new(harness.screen())
//!         .verify_with_poller(&harness.mfa_poller(), &applicant.email_prefix)
//!         .await?;
//!
//!     harness.close().await?;
//!     Ok(())
//! }
//! ```

pub mod assertions;
pub mod config;
mod error;
pub mod fixtures;
mod harness;
pub mod locate;
pub mod logging;
pub mod mfa;
pub mod mfa_log;
pub mod wizard;

// Re-export error types
pub use error::{Error, Result, SetupStage};

// Re-export the commonly used entry points
pub use assertions::expect_page;
pub use config::{PollOptions, SuiteConfig};
pub use fixtures::Applicant;
pub use harness::BrowserHarness;
pub use mfa::{MfaCode, MfaPoller, extract_code};
pub use mfa_log::MfaLog;
pub use wizard::WizardStep;
