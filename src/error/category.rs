//! Error category classification for unified error handling.

use std::fmt;

/// High-level categorization of errors for handling decisions.
///
/// Categories decide how a failure is presented: whether the screen offers
/// "try again", whether the user is sent to sign in, or whether the problem
/// is in the input they just typed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Connection, DNS or timeout failures. Worth trying again.
    Network,

    /// The backend answered with a non-2xx status.
    Server,

    /// Input rejected locally before any request was made.
    Validation,

    /// No usable session, or the backend refused the credentials.
    Auth,

    /// A payload (JSON body or token claims) could not be decoded.
    Decode,

    /// Filesystem or OS failures.
    System,

    /// Missing or invalid configuration.
    Configuration,
}

impl ErrorCategory {
    /// Returns true if a manual "try again" makes sense for this category.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ErrorCategory::Network | ErrorCategory::Server)
    }

    /// Returns a short label for the category suitable for logging.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Network => "network",
            ErrorCategory::Server => "server",
            ErrorCategory::Validation => "validation",
            ErrorCategory::Auth => "auth",
            ErrorCategory::Decode => "decode",
            ErrorCategory::System => "system",
            ErrorCategory::Configuration => "configuration",
        }
    }

    /// Returns suggested recovery actions for this category.
    pub fn recovery_hint(&self) -> &'static str {
        match self {
            ErrorCategory::Network => "Check your internet connection and press r to try again",
            ErrorCategory::Server => {
                "The server may be experiencing issues. Press r to try again"
            }
            ErrorCategory::Validation => "Please check your input and try again",
            ErrorCategory::Auth => "Please sign in and try again",
            ErrorCategory::Decode => "Try signing out and signing back in",
            ErrorCategory::System => "Check file permissions and available disk space",
            ErrorCategory::Configuration => "Check your configuration settings",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
