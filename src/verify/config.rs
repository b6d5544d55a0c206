use thiserror::Error;

#[cfg(feature = "with-serde")]
use serde::{Deserialize, Serialize};

use crate::blocklist::{DEFAULT_BLOCKED_HOSTS, default_blocked_hosts, parse_host_list};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingsError {
    #[error("setting `{name}` must be `yes` or `no`, got `{value}`")]
    InvalidToggle { name: &'static str, value: String },
}

/// What a single verification runs with. Built once from the host
/// application's settings and only read afterwards.
#[cfg_attr(feature = "with-serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationConfig {
    pub enabled: bool,
    pub live_check_enabled: bool,
    pub blocked_hosts: Vec<String>,
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            live_check_enabled: true,
            blocked_hosts: default_blocked_hosts(),
        }
    }
}

impl VerificationConfig {
    pub fn from_settings(settings: &RegistrationSettings) -> Result<Self, SettingsError> {
        Ok(Self {
            enabled: parse_toggle("rmc_on", &settings.rmc_on)?,
            live_check_enabled: parse_toggle("rmc_live_check", &settings.rmc_live_check)?,
            blocked_hosts: parse_host_list(&settings.rmc_disallowed_hosts),
        })
    }

    pub fn with_live_check(mut self, enabled: bool) -> Self {
        self.live_check_enabled = enabled;
        self
    }

    pub fn with_blocked_hosts<I, S>(mut self, hosts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.blocked_hosts = hosts.into_iter().map(Into::into).collect();
        self
    }
}

impl TryFrom<&RegistrationSettings> for VerificationConfig {
    type Error = SettingsError;

    fn try_from(settings: &RegistrationSettings) -> Result<Self, Self::Error> {
        Self::from_settings(settings)
    }
}

/// Raw values of the three board settings, as the host application stores
/// them: `rmc_on` and `rmc_live_check` hold `yes`/`no`,
/// `rmc_disallowed_hosts` one host per line.
#[cfg_attr(feature = "with-serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "with-serde", serde(default))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationSettings {
    pub rmc_on: String,
    pub rmc_disallowed_hosts: String,
    pub rmc_live_check: String,
}

impl Default for RegistrationSettings {
    fn default() -> Self {
        Self {
            rmc_on: "yes".to_string(),
            rmc_disallowed_hosts: DEFAULT_BLOCKED_HOSTS.join("\n"),
            rmc_live_check: "yes".to_string(),
        }
    }
}

fn parse_toggle(name: &'static str, value: &str) -> Result<bool, SettingsError> {
    let trimmed = value.trim();
    if trimmed.eq_ignore_ascii_case("yes") {
        Ok(true)
    } else if trimmed.eq_ignore_ascii_case("no") {
        Ok(false)
    } else {
        Err(SettingsError::InvalidToggle {
            name,
            value: value.to_string(),
        })
    }
}
