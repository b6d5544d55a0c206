use trust_dns_resolver::{
    Resolver,
    error::{ResolveError, ResolveErrorKind},
};

use super::{MxError, MxRecord, MxTarget};

/// Resolves `domain` to its mail exchangers with the system resolver.
///
/// Resolver setup failures, lookup failures and domains without MX records
/// all yield [`MxTarget::fallback`].
pub fn resolve(domain: &str) -> MxTarget {
    match Resolver::from_system_conf().map_err(|source| MxError::ResolverUnavailable { source }) {
        Ok(resolver) => resolve_with(&resolver, domain),
        Err(err) => {
            tracing::warn!(domain, error = %err, "MX resolver unavailable, using domain");
            MxTarget::fallback(domain)
        }
    }
}

pub(crate) fn resolve_with<R>(resolver: &R, domain: &str) -> MxTarget
where
    R: LookupMx + ?Sized,
{
    match lookup_records(resolver, domain) {
        Ok(records) => {
            let target = MxTarget::from_records(domain, &records);
            tracing::debug!(
                domain,
                hosts = ?target.hosts(),
                fallback = target.is_fallback(),
                "MX resolution"
            );
            target
        }
        Err(err) if err.is_benign() => {
            tracing::debug!(domain, reason = %err, "no MX answer, using domain");
            MxTarget::fallback(domain)
        }
        Err(err) => {
            tracing::warn!(domain, error = %err, "MX lookup failed, using domain");
            MxTarget::fallback(domain)
        }
    }
}

/// Sorted (ascending preference) and de-duplicated MX records. An empty
/// answer and NXDOMAIN-style "no records" both give [`MxError::NoRecords`].
pub(crate) fn lookup_records<R>(resolver: &R, domain: &str) -> Result<Vec<MxRecord>, MxError>
where
    R: LookupMx + ?Sized,
{
    let ascii = normalize_domain(domain)?;
    let no_records = || MxError::NoRecords {
        domain: ascii.clone(),
    };
    let mut records = match resolver.lookup_mx(&ascii) {
        Ok(records) if records.is_empty() => return Err(no_records()),
        Ok(records) => records,
        Err(err) if is_no_records(&err) => return Err(no_records()),
        Err(source) => {
            return Err(MxError::Lookup {
                domain: ascii.clone(),
                source,
            });
        }
    };
    records.sort();
    records.dedup();
    Ok(records)
}

pub(crate) fn normalize_domain(domain: &str) -> Result<String, MxError> {
    let trimmed = domain.trim();
    if trimmed.is_empty() {
        return Err(MxError::EmptyDomain);
    }
    idna::domain_to_ascii(trimmed).map_err(|source| MxError::InvalidDomain {
        domain: trimmed.to_string(),
        source,
    })
}

pub(crate) fn normalize_exchange(exchange: String) -> String {
    let trimmed = exchange.trim_end_matches('.');
    trimmed.to_ascii_lowercase()
}

fn is_no_records(err: &ResolveError) -> bool {
    matches!(err.kind(), ResolveErrorKind::NoRecordsFound { .. })
}

pub(crate) trait LookupMx {
    fn lookup_mx(&self, domain: &str) -> Result<Vec<MxRecord>, ResolveError>;
}

impl LookupMx for Resolver {
    fn lookup_mx(&self, domain: &str) -> Result<Vec<MxRecord>, ResolveError> {
        let lookup = Resolver::mx_lookup(self, domain)?;
        let mut records = Vec::new();
        for mx in lookup.iter() {
            let exchange = normalize_exchange(mx.exchange().to_utf8());
            records.push(MxRecord::new(mx.preference(), exchange));
        }
        Ok(records)
    }
}

#[cfg(test)]
impl LookupMx for crate::mx::tests::StubResolver {
    fn lookup_mx(&self, domain: &str) -> Result<Vec<MxRecord>, ResolveError> {
        (self.on_lookup)(domain)
    }
}
