//! Three-stage registration check: syntax, blocklist, live SMTP probe.

mod config;

pub use config::{RegistrationSettings, SettingsError, VerificationConfig};

use std::fmt;

use crate::blocklist::is_blocked;
use crate::mx::{self, MxTarget};
use crate::outcome::VerificationOutcome;
use crate::smtp_verify::{CancelHandle, ProbeOptions, probe_with_options};
use crate::validator::{EmailAddress, LegacyGrammar, SyntaxValidator};

/// Verifies `raw_email` with the legacy grammar, the system resolver and
/// default probe timeouts.
pub fn verify(
    raw_email: &str,
    config: &VerificationConfig,
    local_identity: &str,
) -> VerificationOutcome {
    Verifier::new().verify(raw_email, config, local_identity)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    Start,
    SyntaxChecked,
    BlocklistChecked,
    LiveChecked,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Start => "start",
            Self::SyntaxChecked => "syntax_checked",
            Self::BlocklistChecked => "blocklist_checked",
            Self::LiveChecked => "live_checked",
        })
    }
}

/// Runs the checks in order and stops at the first failure.
///
/// Holds no state between calls; one `Verifier` can serve any number of
/// registrations, from any number of threads. Cancellation is per call, see
/// [`Verifier::verify_cancellable`].
pub struct Verifier {
    syntax: Box<dyn SyntaxValidator + Send + Sync>,
    options: ProbeOptions,
}

impl Default for Verifier {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Verifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Verifier")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl Verifier {
    pub fn new() -> Self {
        Self {
            syntax: Box::new(LegacyGrammar),
            options: ProbeOptions::default(),
        }
    }

    pub fn with_syntax_validator<V>(mut self, validator: V) -> Self
    where
        V: SyntaxValidator + Send + Sync + 'static,
    {
        self.syntax = Box::new(validator);
        self
    }

    pub fn with_probe_options(mut self, options: ProbeOptions) -> Self {
        self.options = options;
        self
    }

    pub fn verify(
        &self,
        raw_email: &str,
        config: &VerificationConfig,
        local_identity: &str,
    ) -> VerificationOutcome {
        self.verify_with(raw_email, config, local_identity, None, mx::resolve)
    }

    /// Same as [`verify`](Self::verify), but firing `cancel` from another
    /// thread aborts the SMTP dialog and yields `Cancelled`. A handle may be
    /// shared by several calls; it cancels all of them.
    pub fn verify_cancellable(
        &self,
        raw_email: &str,
        config: &VerificationConfig,
        local_identity: &str,
        cancel: &CancelHandle,
    ) -> VerificationOutcome {
        self.verify_with(raw_email, config, local_identity, Some(cancel), mx::resolve)
    }

    pub(crate) fn verify_with<F>(
        &self,
        raw_email: &str,
        config: &VerificationConfig,
        local_identity: &str,
        cancel: Option<&CancelHandle>,
        resolve: F,
    ) -> VerificationOutcome
    where
        F: FnOnce(&str) -> MxTarget,
    {
        let span = tracing::debug_span!("verify", email = raw_email);
        let _entered = span.enter();

        if !config.enabled {
            tracing::debug!("verification disabled");
            return VerificationOutcome::disabled();
        }

        let mut stage = Stage::Start;
        let outcome = self.run(raw_email, config, local_identity, cancel, resolve, &mut stage);
        tracing::info!(
            outcome = %outcome.kind(),
            stage = %stage,
            "{}",
            outcome.message()
        );
        outcome
    }

    fn run<F>(
        &self,
        raw_email: &str,
        config: &VerificationConfig,
        local_identity: &str,
        cancel: Option<&CancelHandle>,
        resolve: F,
        stage: &mut Stage,
    ) -> VerificationOutcome
    where
        F: FnOnce(&str) -> MxTarget,
    {
        if !self.syntax.validate(raw_email) {
            return VerificationOutcome::invalid_format(raw_email);
        }
        let Ok(address) = EmailAddress::parse(raw_email) else {
            return VerificationOutcome::invalid_format(raw_email);
        };
        *stage = Stage::SyntaxChecked;

        let host = address.normalized_domain();
        if is_blocked(&host, &config.blocked_hosts) {
            return VerificationOutcome::blocked_host(&host);
        }
        *stage = Stage::BlocklistChecked;

        if !config.live_check_enabled {
            return VerificationOutcome::valid(raw_email);
        }

        let target = resolve(&address.domain);
        let outcome = probe_with_options(
            target.primary(),
            &address,
            local_identity,
            &self.options,
            cancel,
        );
        *stage = Stage::LiveChecked;
        outcome
    }
}
