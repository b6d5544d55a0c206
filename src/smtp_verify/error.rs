use std::io;

use thiserror::Error;

/// Transport failures seen while talking to a mail server. They never leave
/// the crate: the probe folds them into a `VerificationOutcome`.
#[derive(Debug, Error)]
pub(crate) enum SessionError {
    #[error("cannot resolve {host}: {source}")]
    Resolve {
        host: String,
        #[source]
        source: io::Error,
    },
    #[error("no socket address available for {host}")]
    NoAddress { host: String },
    #[error("connection to {host} failed: {source}")]
    Connect {
        host: String,
        #[source]
        source: io::Error,
    },
    #[error("timed out waiting for {host}")]
    Timeout { host: String },
    #[error("connection closed by {host}")]
    Closed { host: String },
    #[error("verification cancelled")]
    Cancelled,
    #[error("I/O error with {host}: {source}")]
    Io {
        host: String,
        #[source]
        source: io::Error,
    },
}
