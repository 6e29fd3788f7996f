// Test Server - local stand-in for the onboarding wizard and the public inbox
//
// Serves just enough of both for offline browser tests:
// - /welcome and /email-verification, wired to /api/send-code and /api/verify
// - /inbox, a search page whose rows appear after a few polls of /inbox/api
// - /inbox/message, the message view a row click navigates to
//
// Every code sent is VERIFICATION_CODE.

// Note: Functions appear "unused" because each test binary compiles separately,
// but they ARE used across multiple test files. Suppress false-positive warnings.
#![allow(dead_code)]

use axum::{
    Json, Router,
    body::Body,
    extract::{Query, State},
    http::{Response, StatusCode},
    routing::get,
};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Code carried by every email the fake wizard sends
pub const VERIFICATION_CODE: &str = "730104";

/// Inbox API polls before a sent email shows up
const DELIVERY_POLLS: u32 = 3;

#[derive(Default)]
struct Mailbox {
    /// Inbox API polls seen per email prefix that was sent a code
    polls: HashMap<String, u32>,
    /// Polls before the message body carries the code, per prefix
    code_after: HashMap<String, u32>,
    /// Message views served per prefix
    opens: HashMap<String, u32>,
}

impl Mailbox {
    fn deliver(&mut self, prefix: &str, code_after: u32) {
        let key = prefix.to_lowercase();
        self.polls.insert(key.clone(), 0);
        self.code_after.insert(key, code_after);
    }
}

type Shared = Arc<Mutex<Mailbox>>;

/// Test server handle
pub struct TestServer {
    addr: SocketAddr,
    handle: JoinHandle<()>,
    mailbox: Shared,
}

impl TestServer {
    /// Start the test server on a random available port
    pub async fn start() -> Self {
        let mailbox = Shared::default();
        let app = Router::new()
            .route("/welcome", get(welcome_page))
            .route("/email-verification", get(email_verification_page))
            .route("/personal-details", get(personal_details_page))
            .route("/inbox", get(inbox_page))
            .route("/inbox/api", get(inbox_api))
            .route("/inbox/message", get(message_page))
            .route("/api/send-code", get(send_code))
            .route("/api/verify", get(verify))
            .with_state(mailbox.clone());

        // Bind to port 0 to get any available port
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test server");

        let addr = listener.local_addr().expect("Failed to get local address");

        let handle = tokio::spawn(async move {
            axum::serve(listener, app)
                .await
                .expect("Test server failed");
        });

        TestServer {
            addr,
            handle,
            mailbox,
        }
    }

    /// Get the base URL of the test server
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// URL of the fake public inbox
    pub fn inbox_url(&self) -> String {
        format!("{}/inbox", self.url())
    }

    /// Queues an email for `prefix` without going through the wizard
    pub fn deliver(&self, prefix: &str) {
        self.mailbox.lock().deliver(prefix, DELIVERY_POLLS);
    }

    /// Queues an email whose body only shows the code after `polls` inbox polls
    pub fn deliver_code_after(&self, prefix: &str, polls: u32) {
        self.mailbox.lock().deliver(prefix, polls);
    }

    /// Times the message view was opened for `prefix`
    pub fn opens(&self, prefix: &str) -> u32 {
        self.mailbox
            .lock()
            .opens
            .get(&prefix.to_lowercase())
            .copied()
            .unwrap_or(0)
    }

    /// Inbox API polls seen for `prefix`
    pub fn polls(&self, prefix: &str) -> u32 {
        self.mailbox
            .lock()
            .polls
            .get(&prefix.to_lowercase())
            .copied()
            .unwrap_or(0)
    }

    /// Shutdown the test server
    pub fn shutdown(self) {
        self.handle.abort();
    }
}

fn html(body: &'static str) -> Response<Body> {
    Response::builder()
        .status(StatusCode::OK)
        .header("Content-Type", "text/html")
        .body(Body::from(body))
        .unwrap()
}

// Wizard pages

async fn welcome_page() -> Response<Body> {
    html(
        r#"<!DOCTYPE html>
<html>
<head><title>Welcome</title></head>
<body>
  <h1>Open your account</h1>
  <form id="welcome">
    <input type="text" id="email" name="email" />
    <div id="email-error" role="alert" style="display: none;"></div>
    <label><input type="checkbox" id="terms" name="terms" /> I accept the Terms</label>
    <button type="submit">Continue</button>
  </form>
  <script>
    document.getElementById('welcome').addEventListener('submit', async (event) => {
      event.preventDefault();
      const email = document.getElementById('email').value;
      const error = document.getElementById('email-error');
      if (!/^[^@\s]+@[^@\s]+$/.test(email)) {
        error.textContent = 'Please enter a valid email address';
        error.style.display = 'block';
        return;
      }
      if (!document.getElementById('terms').checked) {
        error.textContent = 'You must accept the terms';
        error.style.display = 'block';
        return;
      }
      await fetch('/api/send-code?email=' + encodeURIComponent(email));
      window.location.href = '/email-verification';
    });
  </script>
</body>
</html>"#,
    )
}

async fn email_verification_page() -> Response<Body> {
    html(
        r#"<!DOCTYPE html>
<html>
<head><title>Verify your email</title></head>
<body>
  <h1>Check your email</h1>
  <input type="text" name="code" autocomplete="one-time-code" />
  <div id="code-error" role="alert" style="display: none;"></div>
  <button type="button" id="verify">Verify</button>
  <button type="button" id="resend">Resend code</button>
  <script>
    document.getElementById('verify').addEventListener('click', async () => {
      const code = document.querySelector("input[name='code']").value;
      const response = await fetch('/api/verify?code=' + encodeURIComponent(code));
      if (response.ok) {
        window.location.href = '/personal-details';
      } else {
        const error = document.getElementById('code-error');
        error.textContent = 'That code is not valid';
        error.style.display = 'block';
      }
    });
  </script>
</body>
</html>"#,
    )
}

async fn personal_details_page() -> Response<Body> {
    html(
        r#"<!DOCTYPE html>
<html>
<head><title>Personal details</title></head>
<body>
  <h1>Tell us about yourself</h1>
  <input type="text" name="firstName" />
</body>
</html>"#,
    )
}

// Fake public inbox

async fn inbox_page() -> Response<Body> {
    html(
        r#"<!DOCTYPE html>
<html>
<head><title>Public inbox</title></head>
<body>
  <input type="text" id="search" placeholder="Enter public inbox" />
  <button id="go">GO</button>
  <table id="messages"><tbody></tbody></table>
  <script>
    let messages = [];
    let timer = null;

    async function refresh(to) {
      const response = await fetch('/inbox/api?to=' + encodeURIComponent(to));
      const data = await response.json();
      if (data.messages.length === messages.length) return;
      messages = data.messages;
      const tbody = document.querySelector('#messages tbody');
      tbody.innerHTML = '';
      messages.forEach((message) => {
        const row = document.createElement('tr');
        row.innerHTML = '<td>' + message.from + '</td><td>' + message.subject + '</td>';
        row.addEventListener('click', () => {
          window.location.href = '/inbox/message?to=' + encodeURIComponent(to);
        });
        tbody.appendChild(row);
      });
    }

    document.getElementById('go').addEventListener('click', () => {
      const to = document.getElementById('search').value.trim();
      if (timer) clearInterval(timer);
      messages = [];
      refresh(to);
      timer = setInterval(() => refresh(to), 500);
    });
  </script>
</body>
</html>"#,
    )
}

#[derive(Deserialize)]
struct InboxQuery {
    to: String,
}

#[derive(Serialize)]
struct Message {
    from: &'static str,
    subject: &'static str,
}

#[derive(Serialize)]
struct InboxListing {
    messages: Vec<Message>,
}

async fn inbox_api(
    State(mailbox): State<Shared>,
    Query(query): Query<InboxQuery>,
) -> Json<InboxListing> {
    let mut mailbox = mailbox.lock();
    let mut messages = Vec::new();
    if let Some(polls) = mailbox.polls.get_mut(&query.to.to_lowercase()) {
        *polls += 1;
        if *polls >= DELIVERY_POLLS {
            messages.push(Message {
                from: "Onboarding",
                subject: "Your verification code",
            });
        }
    }
    Json(InboxListing { messages })
}

async fn message_page(
    State(mailbox): State<Shared>,
    Query(query): Query<InboxQuery>,
) -> Response<Body> {
    let key = query.to.to_lowercase();
    let body = {
        let mut mailbox = mailbox.lock();
        *mailbox.opens.entry(key.clone()).or_default() += 1;
        let polls = mailbox.polls.get(&key).copied().unwrap_or(0);
        let code_after = mailbox.code_after.get(&key).copied().unwrap_or(u32::MAX);
        if polls >= code_after {
            format!(
                "Hi there,\nYour verification code is {VERIFICATION_CODE}. \
                 It expires in 10 minutes.\nReference 12345678"
            )
        } else {
            "Hi there,\nYour verification code is on its way.".to_string()
        }
    };
    Response::builder()
        .status(StatusCode::OK)
        .header("Content-Type", "text/html")
        .body(Body::from(format!(
            r#"<!DOCTYPE html>
<html>
<head><title>Message</title></head>
<body>
  <a href="/inbox">Back to inbox</a>
  <div id="msg_body">{body}</div>
</body>
</html>"#
        )))
        .unwrap()
}

#[derive(Deserialize)]
struct SendCodeQuery {
    email: String,
}

async fn send_code(
    State(mailbox): State<Shared>,
    Query(query): Query<SendCodeQuery>,
) -> StatusCode {
    let Some((prefix, _domain)) = query.email.split_once('@') else {
        return StatusCode::BAD_REQUEST;
    };
    mailbox.lock().deliver(prefix, DELIVERY_POLLS);
    StatusCode::NO_CONTENT
}

#[derive(Deserialize)]
struct VerifyQuery {
    code: String,
}

async fn verify(Query(query): Query<VerifyQuery>) -> StatusCode {
    if query.code == VERIFICATION_CODE {
        StatusCode::NO_CONTENT
    } else {
        StatusCode::UNPROCESSABLE_ENTITY
    }
}
