#[cfg(feature = "with-serde")]
use serde::{Deserialize, Serialize};

/// One reply line from the server. Only the leading 3-digit code matters to
/// the dialog; continuation lines are not read.
#[cfg_attr(feature = "with-serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmtpResponse {
    pub code: Option<u16>,
    pub raw_line: String,
}

impl SmtpResponse {
    pub fn parse(line: &str) -> Self {
        let raw_line = line.trim_end_matches(['\r', '\n']).to_string();
        let code = raw_line
            .get(..3)
            .filter(|digits| digits.bytes().all(|b| b.is_ascii_digit()))
            .and_then(|digits| digits.parse().ok());
        Self { code, raw_line }
    }

    /// What a dead connection reads as: no code at all.
    pub(crate) fn empty() -> Self {
        Self {
            code: None,
            raw_line: String::new(),
        }
    }

    pub fn has_code(&self, code: u16) -> bool {
        self.code == Some(code)
    }
}
