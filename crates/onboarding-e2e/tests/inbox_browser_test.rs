// Browser tests against the local fake inbox and wizard
//
// These launch a real browser, so they only run with PLAYWRIGHT_INTEGRATION=1
// (browsers installed via `npx playwright install`).
//
// Tests cover:
// - Polling the fake inbox until the email shows up
// - Exhaustion when nothing is ever delivered
// - Going back to the results list after a message without a code
// - Welcome -> email verification -> personal details with a polled code

mod common;
mod test_server;

use onboarding_e2e::config::InboxSelectors;
use onboarding_e2e::wizard::{EmailVerificationPage, WelcomePage};
use onboarding_e2e::{
    Applicant, BrowserHarness, Error, PollOptions, SuiteConfig, WizardStep, expect_page,
};
use playwright_rs::expect;
use std::path::Path;
use std::time::Duration;
use test_server::{TestServer, VERIFICATION_CODE};

fn local_config(server: &TestServer, log_path: &Path) -> SuiteConfig {
    let mut config = SuiteConfig::default()
        .base_url(server.url())
        .inbox_url(server.inbox_url())
        .poll(
            PollOptions::new()
                .initial_delay(Duration::from_millis(500))
                .interval(Duration::from_millis(500))
                .render_delay(Duration::from_millis(200))
                .max_retries(20),
        )
        .mfa_log_path(Some(log_path.to_path_buf()));
    config.expect_timeout = Duration::from_secs(10);
    config.inbox = InboxSelectors {
        message_body: "#msg_body".to_string(),
        ..InboxSelectors::default()
    };
    config
}

#[tokio::test]
async fn test_poller_reads_code_from_fake_inbox() {
    if !common::enabled(common::LOCAL_BROWSER_ENV) {
        return;
    }
    common::init_tracing();
    let server = TestServer::start().await;
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let log_path = dir.path().join("mfa.log");

    let harness = BrowserHarness::launch(local_config(&server, &log_path))
        .await
        .expect("Failed to launch browser");

    server.deliver("Filler1234");
    let code = harness
        .mfa_poller()
        .fetch_code("Filler1234")
        .await
        .expect("Failed to fetch MFA code");

    assert_eq!(code.as_str(), VERIFICATION_CODE);
    assert!(server.polls("Filler1234") >= 3);

    let log = std::fs::read_to_string(&log_path).expect("Failed to read MFA log");
    assert_eq!(log.lines().count(), 1);
    assert!(log.trim_end().ends_with("| Filler1234 | MFA: 730104"));

    harness.close().await.expect("Failed to close browser");
    server.shutdown();
}

#[tokio::test]
async fn test_poller_returns_to_results_after_codeless_message() {
    if !common::enabled(common::LOCAL_BROWSER_ENV) {
        return;
    }
    common::init_tracing();
    let server = TestServer::start().await;
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let log_path = dir.path().join("mfa.log");

    let mut config = local_config(&server, &log_path);
    config.poll = config.poll.clone().max_retries(40);
    let harness = BrowserHarness::launch(config)
        .await
        .expect("Failed to launch browser");

    // The email is listed after 3 polls but only carries the code after 8
    server.deliver_code_after("Filler5678", 8);
    let code = harness
        .mfa_poller()
        .fetch_code("Filler5678")
        .await
        .expect("Failed to fetch MFA code");

    assert_eq!(code.as_str(), VERIFICATION_CODE);
    assert!(
        server.opens("Filler5678") >= 2,
        "message should be reopened from the results list"
    );

    harness.close().await.expect("Failed to close browser");
    server.shutdown();
}

#[tokio::test]
async fn test_poller_gives_up_when_nothing_arrives() {
    if !common::enabled(common::LOCAL_BROWSER_ENV) {
        return;
    }
    common::init_tracing();
    let server = TestServer::start().await;
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let log_path = dir.path().join("mfa.log");

    let mut config = local_config(&server, &log_path);
    config.poll = config.poll.clone().max_retries(2);
    let harness = BrowserHarness::launch(config)
        .await
        .expect("Failed to launch browser");

    let err = harness
        .mfa_poller()
        .fetch_code("Filler9999")
        .await
        .expect_err("No email was sent, polling should fail");

    match err {
        Error::CodeNotFound { attempts, .. } => assert_eq!(attempts, 3),
        other => panic!("expected CodeNotFound, got {other}"),
    }
    assert!(!log_path.exists());
    // The wizard page is untouched by the inbox tab
    assert!(harness.page.url().starts_with("about:blank"));

    harness.close().await.expect("Failed to close browser");
    server.shutdown();
}

#[tokio::test]
async fn test_welcome_to_personal_details_with_polled_code() {
    if !common::enabled(common::LOCAL_BROWSER_ENV) {
        return;
    }
    common::init_tracing();
    let server = TestServer::start().await;
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let config = local_config(&server, &dir.path().join("mfa.log"));

    let harness = BrowserHarness::launch(config.clone())
        .await
        .expect("Failed to launch browser");
    let applicant = Applicant::random();

    let welcome = WelcomePage::open(harness.screen(), &config.base_url)
        .await
        .expect("Failed to open welcome page");
    welcome
        .start(&applicant.email(&config.email_domain))
        .await
        .expect("Failed to submit welcome page");

    let code = EmailVerificationPage::new(harness.screen())
        .verify_with_poller(&harness.mfa_poller(), &applicant.email_prefix)
        .await
        .expect("Failed to verify email");
    assert_eq!(code.as_str(), VERIFICATION_CODE);

    expect_page(&harness.page)
        .to_be_at(WizardStep::PersonalDetails)
        .await
        .expect("Wizard should be on personal details");

    harness.close().await.expect("Failed to close browser");
    server.shutdown();
}

#[tokio::test]
async fn test_welcome_rejects_malformed_email() {
    if !common::enabled(common::LOCAL_BROWSER_ENV) {
        return;
    }
    common::init_tracing();
    let server = TestServer::start().await;
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let config = local_config(&server, &dir.path().join("mfa.log"));

    let harness = BrowserHarness::launch(config.clone())
        .await
        .expect("Failed to launch browser");

    let welcome = WelcomePage::open(harness.screen(), &config.base_url)
        .await
        .expect("Failed to open welcome page");
    welcome
        .enter_email("not-an-email")
        .await
        .expect("Failed to fill email");
    welcome.accept_terms().await.expect("Failed to accept terms");
    welcome.submit().await.expect("Failed to submit");

    expect_page(&harness.page)
        .with_timeout(Duration::from_secs(2))
        .not()
        .to_be_at(WizardStep::EmailVerification)
        .await
        .expect("Malformed email must not advance the wizard");

    expect(harness.page.locator("#email-error").await)
        .to_have_text("Please enter a valid email address")
        .await
        .expect("Email error should be shown");
    let error = welcome.email_error().await;
    assert_eq!(
        error.as_deref(),
        Some("Please enter a valid email address")
    );

    harness.close().await.expect("Failed to close browser");
    server.shutdown();
}
