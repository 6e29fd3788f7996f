// Welcome and email-verification pages

use super::{Screen, WizardStep};
use crate::error::Result;
use crate::mfa::{InboxSession, MfaCode, MfaPoller};
use playwright_rs::FillOptions;

const EMAIL: &[&str] = &[
    "input[name='email']",
    "#email",
    "input[type='email']",
];
const TERMS: &[&str] = &[
    "input[name='terms']",
    "input[type='checkbox'][id*='terms']",
    "label:has-text(\"Terms\") input[type='checkbox']",
];
const EMAIL_ERROR: &[&str] = &["#email-error", "[data-testid='email-error']"];

const OTP: &[&str] = &[
    "input[autocomplete='one-time-code']",
    "input[name='code']",
    "#otp",
];
/// Some builds split the code over one box per digit
const OTP_DIGITS: &str = "input[maxlength='1'][inputmode='numeric']";
const VERIFY: &[&str] = &[
    "button:has-text(\"Verify\")",
    "button[type='submit']",
];
const RESEND: &[&str] = &[
    "button:has-text(\"Resend\")",
    "text=Resend code",
];

/// `/welcome`: the applicant enters their email and accepts the terms.
pub struct WelcomePage {
    screen: Screen,
}

impl WelcomePage {
    pub const STEP: WizardStep = WizardStep::Welcome;

    pub fn new(screen: Screen) -> Self {
        Self { screen }
    }

    /// Navigates to `/welcome` under `base_url`.
    pub async fn open(screen: Screen, base_url: &str) -> Result<Self> {
        screen.open(base_url, Self::STEP).await?;
        screen.wait_for(Self::STEP).await?;
        Ok(Self::new(screen))
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub async fn enter_email(&self, email: &str) -> Result<()> {
        self.screen.fill(EMAIL, email).await
    }

    pub async fn accept_terms(&self) -> Result<()> {
        self.screen.check(TERMS).await
    }

    pub async fn submit(&self) -> Result<()> {
        self.screen.submit().await
    }

    /// Inline error under the email field, if shown.
    pub async fn email_error(&self) -> Option<String> {
        self.screen.text(EMAIL_ERROR).await.ok()
    }

    /// Fills the page and waits for the email-verification step.
    pub async fn start(&self, email: &str) -> Result<()> {
        tracing::info!(email, "starting onboarding");
        self.enter_email(email).await?;
        self.accept_terms().await?;
        self.submit().await?;
        self.screen.wait_for(WizardStep::EmailVerification).await
    }
}

/// `/email-verification`: the applicant types the code emailed to them.
pub struct EmailVerificationPage {
    screen: Screen,
}

impl EmailVerificationPage {
    pub const STEP: WizardStep = WizardStep::EmailVerification;

    pub fn new(screen: Screen) -> Self {
        Self { screen }
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    /// Types `code` into the single OTP field or the per-digit boxes.
    pub async fn enter_code(&self, code: &MfaCode) -> Result<()> {
        let digits = self.screen.page().locator(OTP_DIGITS).await;
        if digits.count().await? == code.as_str().len() {
            let options = FillOptions::builder()
                .timeout(self.screen.timeout().as_millis() as f64)
                .build();
            for (i, digit) in code.as_str().chars().enumerate() {
                digits
                    .nth(i as i32)
                    .fill(&digit.to_string(), Some(options.clone()))
                    .await?;
            }
            return Ok(());
        }
        self.screen.fill(OTP, code.as_str()).await
    }

    pub async fn submit(&self) -> Result<()> {
        self.screen.click(VERIFY).await
    }

    pub async fn resend(&self) -> Result<()> {
        self.screen.click(RESEND).await
    }

    /// Fetches the emailed code with `poller`, enters it, and waits for the
    /// personal-details step.
    pub async fn verify_with_poller<S: InboxSession>(
        &self,
        poller: &MfaPoller<S>,
        email_prefix: &str,
    ) -> Result<MfaCode> {
        self.screen.wait_for(Self::STEP).await?;
        let code = poller.fetch_code(email_prefix).await?;
        tracing::info!(email_prefix, %code, "entering MFA code");
        self.enter_code(&code).await?;
        self.submit().await?;
        self.screen.wait_for(WizardStep::PersonalDetails).await?;
        Ok(code)
    }
}
