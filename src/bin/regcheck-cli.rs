#[path = "regcheck-cli/args.rs"]
mod args;
#[path = "regcheck-cli/config.rs"]
mod config;
#[path = "regcheck-cli/output.rs"]
mod output;

use std::io::{self, BufRead};

use anyhow::{Context, Result};
use regcheck_lib::Verifier;
use tracing_subscriber::EnvFilter;

use args::{Cli, Commands};
use output::OutputRow;

fn init_tracing(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = config::build_config(&cli)?;
    let verifier = Verifier::new().with_probe_options(cli.probe_options());

    let mut emails = Vec::new();
    if cli.stdin {
        for line in io::stdin().lock().lines() {
            let line = line.context("read stdin")?;
            let email = line.trim();
            if !email.is_empty() {
                emails.push(email.to_string());
            }
        }
    } else if let Some(Commands::Verify { email }) = &cli.cmd {
        emails.push(email.clone());
    } else {
        Cli::clap_command().print_help()?;
        println!();
        return Ok(());
    }

    let rows: Vec<OutputRow> = emails
        .into_iter()
        .map(|email| {
            let outcome = verifier.verify(&email, &config, &cli.helo);
            OutputRow::new(email, outcome)
        })
        .collect();

    output::write_reports(&rows, &cli.format)?;

    // codes de sortie : 0 OK, 2 refusées, 1 fatal
    if output::any_invalid(&rows) {
        std::process::exit(2);
    }
    Ok(())
}
