use std::fmt;
use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressError {
    #[error("must contain an '@'")]
    MissingAt,
    #[error("must contain exactly one '@'")]
    MultipleAt,
    #[error("local part is empty")]
    EmptyLocalPart,
    #[error("domain is empty")]
    EmptyDomain,
}

/// An address split on its `@`.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress {
    pub local_part: String,
    pub domain: String,
}

impl EmailAddress {
    pub fn parse(raw: &str) -> Result<Self, AddressError> {
        let (local, domain) = raw.split_once('@').ok_or(AddressError::MissingAt)?;
        if domain.contains('@') {
            return Err(AddressError::MultipleAt);
        }
        if local.trim().is_empty() {
            return Err(AddressError::EmptyLocalPart);
        }
        if domain.trim().is_empty() {
            return Err(AddressError::EmptyDomain);
        }
        Ok(Self {
            local_part: local.to_string(),
            domain: domain.to_string(),
        })
    }

    /// Domain as compared against the blocklist: trimmed and lower-cased.
    pub fn normalized_domain(&self) -> String {
        self.domain.trim().to_ascii_lowercase()
    }
}

impl FromStr for EmailAddress {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.local_part, self.domain)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_at() {
        let addr = EmailAddress::parse("alice@Example.COM").unwrap();
        assert_eq!(addr.local_part, "alice");
        assert_eq!(addr.domain, "Example.COM");
        assert_eq!(addr.normalized_domain(), "example.com");
        assert_eq!(addr.to_string(), "alice@Example.COM");
    }

    #[test]
    fn rejects_malformed() {
        assert_eq!(EmailAddress::parse("alice"), Err(AddressError::MissingAt));
        assert_eq!(EmailAddress::parse("a@b@c"), Err(AddressError::MultipleAt));
        assert_eq!(EmailAddress::parse(" @b.com"), Err(AddressError::EmptyLocalPart));
        assert_eq!(EmailAddress::parse("a@  "), Err(AddressError::EmptyDomain));
    }

    #[test]
    fn from_str_matches_parse() {
        let addr: EmailAddress = "bob@example.org".parse().unwrap();
        assert_eq!(addr.domain, "example.org");
    }
}
