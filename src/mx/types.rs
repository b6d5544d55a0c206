#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct MxRecord {
    pub preference: u16,
    pub exchange: String,
}

impl MxRecord {
    pub fn new(preference: u16, exchange: impl Into<String>) -> Self {
        Self {
            preference,
            exchange: exchange.into(),
        }
    }
}

/// Hosts to contact for a domain, most preferred first. Never empty.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MxTarget {
    hosts: Vec<String>,
    fallback: bool,
}

impl MxTarget {
    /// Target made of the domain alone (no usable MX records).
    pub fn fallback(domain: &str) -> Self {
        Self {
            hosts: vec![domain.to_string()],
            fallback: true,
        }
    }

    /// Builds a target from records sorted by ascending preference. Empty
    /// exchanges (null MX) are skipped; if nothing remains the domain is used.
    pub(crate) fn from_records(domain: &str, records: &[MxRecord]) -> Self {
        let mut hosts: Vec<String> = Vec::with_capacity(records.len());
        for record in records {
            if record.exchange.is_empty() || hosts.contains(&record.exchange) {
                continue;
            }
            hosts.push(record.exchange.clone());
        }
        if hosts.is_empty() {
            return Self::fallback(domain);
        }
        Self {
            hosts,
            fallback: false,
        }
    }

    /// The host the probe connects to.
    pub fn primary(&self) -> &str {
        self.hosts.first().map(String::as_str).unwrap_or_default()
    }

    pub fn hosts(&self) -> &[String] {
        &self.hosts
    }

    /// `true` when no MX record was usable and the domain stands in.
    pub fn is_fallback(&self) -> bool {
        self.fallback
    }
}
