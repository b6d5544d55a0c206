use anyhow::{Result, bail};
use regcheck_lib::VerificationOutcome;

#[cfg_attr(feature = "with-serde", derive(serde::Serialize))]
#[derive(Debug, Clone)]
pub struct OutputRow {
    pub email: String,
    #[cfg_attr(feature = "with-serde", serde(flatten))]
    pub outcome: VerificationOutcome,
}

impl OutputRow {
    pub fn new(email: impl Into<String>, outcome: VerificationOutcome) -> Self {
        Self {
            email: email.into(),
            outcome,
        }
    }

    pub fn human_line(&self) -> String {
        if self.outcome.is_valid() {
            format!("[OK]    {} :: {}", self.email, self.outcome.message())
        } else {
            format!(
                "[{}] {} :: {}",
                self.outcome.kind().as_str().to_ascii_uppercase(),
                self.email,
                self.outcome.message()
            )
        }
    }
}

pub fn write_reports(rows: &[OutputRow], format: &str) -> Result<()> {
    match format {
        "human" => {
            for row in rows {
                println!("{}", row.human_line());
            }
            Ok(())
        }
        "json" => write_json(rows),
        other => bail!("unknown --format '{other}', use: human|json"),
    }
}

#[cfg(feature = "with-serde")]
fn write_json(rows: &[OutputRow]) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(rows)?);
    Ok(())
}

#[cfg(not(feature = "with-serde"))]
fn write_json(_rows: &[OutputRow]) -> Result<()> {
    bail!("format=json nécessite la feature 'with-serde'")
}

pub fn any_invalid(rows: &[OutputRow]) -> bool {
    rows.iter().any(|row| !row.outcome.is_valid())
}
