#![forbid(unsafe_code)]
//! regcheck_lib — registration e-mail check: address syntax, disposable-host
//! blocklist and an optional live SMTP probe of the destination mailbox.
//!
//! ```no_run
//! use regcheck_lib::{VerificationConfig, verify};
//!
//! let outcome = verify("alice@example.com", &VerificationConfig::default(), "forum.example.org");
//! if !outcome.is_valid() {
//!     eprintln!("registration refused: {outcome}");
//! }
//! ```

pub mod blocklist;
pub mod mx;
mod outcome;
pub mod smtp_verify;
pub mod validator;
mod verify;

pub use blocklist::{DEFAULT_BLOCKED_HOSTS, is_blocked};
pub use mx::{MxRecord, MxTarget};
pub use outcome::{OutcomeKind, VerificationOutcome};
pub use smtp_verify::{CancelHandle, ProbeOptions, SmtpResponse, probe, probe_with_options};
pub use validator::{EmailAddress, LegacyGrammar, SyntaxValidator};
pub use verify::{RegistrationSettings, SettingsError, VerificationConfig, Verifier, verify};
