use thiserror::Error;
use trust_dns_resolver::error::ResolveError;

/// Why a domain has no usable MX answer. Internal only: every case ends in
/// [`MxTarget::fallback`](super::MxTarget::fallback), the error just picks
/// the log level.
#[derive(Debug, Error)]
pub(crate) enum MxError {
    #[error("domain is empty")]
    EmptyDomain,
    #[error("{domain:?} is not a valid IDNA domain")]
    InvalidDomain {
        domain: String,
        #[source]
        source: idna::Errors,
    },
    #[error("system resolver unavailable: {source}")]
    ResolverUnavailable {
        #[source]
        source: std::io::Error,
    },
    #[error("{domain} publishes no MX records")]
    NoRecords { domain: String },
    #[error("MX lookup for {domain} failed: {source}")]
    Lookup {
        domain: String,
        #[source]
        source: ResolveError,
    },
}

impl MxError {
    /// Logged at `debug` rather than `warn`.
    pub(crate) fn is_benign(&self) -> bool {
        matches!(self, Self::NoRecords { .. })
    }
}
