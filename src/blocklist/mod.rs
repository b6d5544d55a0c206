//! Disposable-host blocklist.
//!
//! Matching is exact on the whole domain (no suffix or substring rules), so
//! `notmailinator.com` is not caught by a `mailinator.com` entry.

mod hosts;

pub use hosts::DEFAULT_BLOCKED_HOSTS;

/// Returns `true` when `domain` equals one of `blocked_hosts`, ignoring ASCII
/// case and surrounding whitespace on both sides.
pub fn is_blocked<S: AsRef<str>>(domain: &str, blocked_hosts: &[S]) -> bool {
    let host = domain.trim().to_ascii_lowercase();
    blocked_hosts
        .iter()
        .any(|entry| entry.as_ref().trim().eq_ignore_ascii_case(&host))
}

/// Splits a newline-separated host list (the `rmc_disallowed_hosts` setting).
/// Entries are trimmed and blank lines dropped.
pub fn parse_host_list(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Owned copy of [`DEFAULT_BLOCKED_HOSTS`], used to seed a fresh config.
pub fn default_blocked_hosts() -> Vec<String> {
    DEFAULT_BLOCKED_HOSTS.iter().map(|h| h.to_string()).collect()
}
