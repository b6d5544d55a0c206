use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use regcheck_lib::ProbeOptions;

#[derive(Parser)]
#[command(name = "regcheck-cli", version, about = "Vérifie une adresse e-mail d'inscription")]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Option<Commands>,

    /// lit des adresses depuis stdin (une par ligne)
    #[arg(long)]
    pub stdin: bool,

    /// format: human|json
    #[arg(long, default_value = "human")]
    pub format: String,

    /// nom annoncé dans HELO
    #[arg(long, default_value = "localhost")]
    pub helo: String,

    /// désactive la vérification SMTP en direct
    #[arg(long)]
    pub no_live: bool,

    /// désactive toutes les vérifications (tout est accepté)
    #[arg(long)]
    pub disabled: bool,

    /// liste d'hôtes interdits (un par ligne), remplace la liste par défaut
    #[arg(long)]
    pub blocklist_file: Option<PathBuf>,

    /// ajoute un hôte interdit (répétable)
    #[arg(long = "extra-blocked")]
    pub extra_blocked: Vec<String>,

    /// fichier JSON de réglages (rmc_on, rmc_disallowed_hosts, rmc_live_check)
    #[arg(long)]
    pub settings: Option<PathBuf>,

    /// port SMTP
    #[arg(long, default_value_t = 25)]
    pub port: u16,

    /// timeout connexion/lecture (ms)
    #[arg(long = "timeout-ms", default_value_t = 10_000)]
    pub timeout_ms: u64,

    /// logs détaillés (transcript SMTP)
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// vérifie une adresse
    Verify { email: String },
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    pub fn clap_command() -> clap::Command {
        <Self as clap::CommandFactory>::command()
    }

    pub fn probe_options(&self) -> ProbeOptions {
        ProbeOptions::default()
            .with_port(self.port)
            .with_timeout(Duration::from_millis(self.timeout_ms))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_verify_subcommand() {
        let cli = Cli::try_parse_from([
            "regcheck-cli",
            "--no-live",
            "--extra-blocked",
            "example.org",
            "--extra-blocked",
            "spam.test",
            "verify",
            "bob@example.com",
        ])
        .expect("parse");
        assert!(cli.no_live);
        assert_eq!(cli.extra_blocked, vec!["example.org", "spam.test"]);
        assert!(matches!(cli.cmd, Some(Commands::Verify { ref email }) if email == "bob@example.com"));
    }

    #[test]
    fn timeout_flows_into_probe_options() {
        let cli = Cli::try_parse_from(["regcheck-cli", "--timeout-ms", "250", "--port", "2525"])
            .expect("parse");
        let options = cli.probe_options();
        assert_eq!(options.port, 2525);
        assert_eq!(options.read_timeout, Duration::from_millis(250));
    }

    #[test]
    fn command_is_well_formed() {
        Cli::clap_command().debug_assert();
    }
}
