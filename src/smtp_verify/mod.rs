//! Live mailbox probing over a partial SMTP dialog.
//!
//! The entry point is [`probe`], which connects to a mail exchanger on port
//! 25, runs `HELO` / `MAIL FROM` / `RCPT TO` / `QUIT` and classifies the
//! replies into a [`VerificationOutcome`](crate::VerificationOutcome). No
//! message is ever sent.

mod cancel;
mod error;
mod options;
mod probe;
mod session;
mod types;

#[cfg(test)]
pub(crate) mod mock;

pub use cancel::CancelHandle;
pub use options::ProbeOptions;
pub use probe::{probe, probe_with_options};
pub use types::SmtpResponse;
