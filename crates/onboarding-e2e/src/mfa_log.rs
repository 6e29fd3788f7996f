// Append-only debug log of extracted MFA codes
//
// Line format: `<ISO-8601 UTC> | <email prefix> | MFA: <code>`
// Nothing reads this file back; write failures are logged and dropped.

use crate::mfa::MfaCode;
use chrono::{DateTime, SecondsFormat, Utc};
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;

/// Best-effort log of every code the poller hands out.
#[derive(Debug, Clone, Default)]
pub struct MfaLog {
    path: Option<PathBuf>,
}

impl MfaLog {
    /// Log appending to `path`, created on first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    /// Log that writes nothing.
    pub fn disabled() -> Self {
        Self { path: None }
    }

    /// Log at `path`, or a disabled one for `None`.
    pub fn from_path(path: Option<&Path>) -> Self {
        Self {
            path: path.map(Path::to_path_buf),
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Appends one line for `code`. Never fails.
    pub async fn append(&self, email_prefix: &str, code: &MfaCode) {
        let Some(path) = &self.path else {
            return;
        };
        let line = format_line(Utc::now(), email_prefix, code);
        if let Err(e) = write_line(path, &line).await {
            tracing::warn!(path = %path.display(), error = %e, "could not write MFA log");
        }
    }
}

pub(crate) fn format_line(at: DateTime<Utc>, email_prefix: &str, code: &MfaCode) -> String {
    format!(
        "{} | {} | MFA: {}\n",
        at.to_rfc3339_opts(SecondsFormat::Millis, true),
        email_prefix,
        code
    )
}

async fn write_line(path: &Path, line: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }
    let mut file = tokio::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .await?;
    file.write_all(line.as_bytes()).await?;
    file.flush().await
}
