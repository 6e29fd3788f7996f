// Error types for the onboarding suite

use thiserror::Error;

/// Result type alias for onboarding suite operations
pub type Result<T> = std::result::Result<T, Error>;

/// Stage of MFA poller setup that failed.
///
/// Failures in these stages abandon the poll immediately, since the
/// poll loop cannot run without an open, searched inbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetupStage {
    OpenTab,
    Viewport,
    Navigate,
    Search,
}

impl std::fmt::Display for SetupStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SetupStage::OpenTab => "open inbox tab",
            SetupStage::Viewport => "set inbox viewport",
            SetupStage::Navigate => "navigate to inbox",
            SetupStage::Search => "search inbox",
        };
        f.write_str(name)
    }
}

/// Errors that can occur while driving the onboarding wizard
#[derive(Debug, Error)]
pub enum Error {
    /// The MFA poller could not get its inbox tab ready
    #[error("MFA setup failed ({stage}): {source}")]
    Setup {
        stage: SetupStage,
        #[source]
        source: Box<Error>,
    },

    /// Every poll attempt finished without a verification code
    #[error("No MFA code for '{email_prefix}' after {attempts} attempts")]
    CodeNotFound {
        email_prefix: String,
        attempts: u32,
    },

    /// None of the candidate selectors produced a usable element
    #[error("Element not found: tried {}", candidates.join(", "))]
    ElementNotFound { candidates: Vec<String> },

    /// Auto-retrying assertion did not hold before its timeout
    #[error("Assertion timeout: {0}")]
    AssertionTimeout(String),

    /// A page showed something the suite cannot interpret
    #[error("Unexpected page content: {0}")]
    UnexpectedContent(String),

    /// Invalid argument provided to a helper
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Configuration value could not be parsed
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Error reported by the Playwright bindings
    #[error("Browser error: {0}")]
    Browser(#[from] playwright_rs::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error with additional context
    #[error("{0}: {1}")]
    Context(String, #[source] Box<Error>),
}

impl Error {
    /// Adds context to the error
    pub fn context(self, msg: impl Into<String>) -> Self {
        Error::Context(msg.into(), Box::new(self))
    }

    /// Wraps the error as a fatal setup failure at `stage`
    pub fn at_setup(self, stage: SetupStage) -> Self {
        Error::Setup {
            stage,
            source: Box::new(self),
        }
    }

    /// Returns true for the poller's exhaustion outcome
    pub fn is_code_not_found(&self) -> bool {
        matches!(self, Error::CodeNotFound { .. })
    }
}
