use std::fmt;

#[cfg(feature = "with-serde")]
use serde::{Deserialize, Serialize};

/// Result of one verification attempt. Every case carries the message shown
/// to the person registering.
#[cfg_attr(feature = "with-serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "with-serde", serde(tag = "outcome", rename_all = "snake_case"))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerificationOutcome {
    /// Every enabled check passed (or the engine is switched off).
    Valid { message: String },
    /// The address does not match the registration grammar.
    InvalidFormat { message: String },
    /// The domain is on the blocklist.
    BlockedHost { message: String },
    /// No TCP connection could be opened to the mail server.
    Unreachable { message: String },
    /// The server did not greet with `220`.
    NoResponse { message: String },
    /// `MAIL FROM` or `RCPT TO` was not answered with `250`.
    Rejected { message: String },
    /// Connecting or waiting for a reply exceeded the configured timeout.
    TimedOut { message: String },
    /// The caller abandoned the check while it was in flight.
    Cancelled { message: String },
}

/// Fieldless tag of a [`VerificationOutcome`], handy for logs and matching.
#[cfg_attr(feature = "with-serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "with-serde", serde(rename_all = "snake_case"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutcomeKind {
    Valid,
    InvalidFormat,
    BlockedHost,
    Unreachable,
    NoResponse,
    Rejected,
    TimedOut,
    Cancelled,
}

impl OutcomeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Valid => "valid",
            Self::InvalidFormat => "invalid_format",
            Self::BlockedHost => "blocked_host",
            Self::Unreachable => "unreachable",
            Self::NoResponse => "no_response",
            Self::Rejected => "rejected",
            Self::TimedOut => "timed_out",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for OutcomeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl VerificationOutcome {
    pub(crate) fn valid(email: &str) -> Self {
        Self::Valid {
            message: format!("\"{email}\" appears to be a valid email address"),
        }
    }

    pub(crate) fn disabled() -> Self {
        Self::Valid {
            message: "email verification is disabled".to_string(),
        }
    }

    pub(crate) fn invalid_format(email: &str) -> Self {
        Self::InvalidFormat {
            message: format!("\"{email}\" is not a valid email address!"),
        }
    }

    pub(crate) fn blocked_host(host: &str) -> Self {
        Self::BlockedHost {
            message: format!("\"{host}\" email addresses are not allowed!"),
        }
    }

    pub(crate) fn unreachable(host: &str) -> Self {
        Self::Unreachable {
            message: format!("Cannot connect to the server \"{host}\"!"),
        }
    }

    pub(crate) fn no_response(host: &str) -> Self {
        Self::NoResponse {
            message: format!("No response from server \"{host}\"!"),
        }
    }

    pub(crate) fn rejected(host: &str, email: &str) -> Self {
        Self::Rejected {
            message: format!("Server \"{host}\" rejected address \"{email}\"!"),
        }
    }

    pub(crate) fn timed_out(host: &str) -> Self {
        Self::TimedOut {
            message: format!("Server \"{host}\" did not respond in time!"),
        }
    }

    pub(crate) fn cancelled(email: &str) -> Self {
        Self::Cancelled {
            message: format!("Verification of \"{email}\" was cancelled"),
        }
    }

    pub fn kind(&self) -> OutcomeKind {
        match self {
            Self::Valid { .. } => OutcomeKind::Valid,
            Self::InvalidFormat { .. } => OutcomeKind::InvalidFormat,
            Self::BlockedHost { .. } => OutcomeKind::BlockedHost,
            Self::Unreachable { .. } => OutcomeKind::Unreachable,
            Self::NoResponse { .. } => OutcomeKind::NoResponse,
            Self::Rejected { .. } => OutcomeKind::Rejected,
            Self::TimedOut { .. } => OutcomeKind::TimedOut,
            Self::Cancelled { .. } => OutcomeKind::Cancelled,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::Valid { message }
            | Self::InvalidFormat { message }
            | Self::BlockedHost { message }
            | Self::Unreachable { message }
            | Self::NoResponse { message }
            | Self::Rejected { message }
            | Self::TimedOut { message }
            | Self::Cancelled { message } => message,
        }
    }

    /// Registration may continue only on `true`.
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid { .. })
    }
}

impl fmt::Display for VerificationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}
