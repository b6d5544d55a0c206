use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use regcheck_lib::{VerificationConfig, blocklist::parse_host_list};

use crate::args::Cli;

/// Settings file first, then the command-line overrides on top.
pub fn build_config(cli: &Cli) -> Result<VerificationConfig> {
    let mut config = match &cli.settings {
        Some(path) => load_settings(path)?,
        None => VerificationConfig::default(),
    };

    if let Some(path) = &cli.blocklist_file {
        let text = fs::read_to_string(path)
            .with_context(|| format!("read blocklist {}", path.display()))?;
        config.blocked_hosts = parse_host_list(&text);
        tracing::debug!(
            path = %path.display(),
            hosts = config.blocked_hosts.len(),
            "blocklist loaded"
        );
    }
    config
        .blocked_hosts
        .extend(cli.extra_blocked.iter().map(|h| h.trim().to_string()));

    if cli.no_live {
        config.live_check_enabled = false;
    }
    if cli.disabled {
        config.enabled = false;
    }
    Ok(config)
}

#[cfg(feature = "with-serde")]
fn load_settings(path: &Path) -> Result<VerificationConfig> {
    use regcheck_lib::RegistrationSettings;

    let text =
        fs::read_to_string(path).with_context(|| format!("read settings {}", path.display()))?;
    let settings: RegistrationSettings = serde_json::from_str(&text)
        .with_context(|| format!("parse settings {}", path.display()))?;
    let config = VerificationConfig::from_settings(&settings)
        .with_context(|| format!("invalid settings in {}", path.display()))?;
    Ok(config)
}

#[cfg(not(feature = "with-serde"))]
fn load_settings(_path: &Path) -> Result<VerificationConfig> {
    anyhow::bail!("--settings nécessite la feature 'with-serde'")
}
