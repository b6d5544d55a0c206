use std::sync::LazyLock;

use regex::{Regex, RegexBuilder};

// ASCII only: with Unicode case folding `[a-z]` would also match the Kelvin sign.
static LEGACY_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    RegexBuilder::new(r"^[_a-z0-9-]+(\.[_a-z0-9-]+)*@[a-z0-9-]+(\.[a-z0-9-]+)*(\.[a-z]{2,3})$")
        .case_insensitive(true)
        .unicode(false)
        .build()
        .expect("legacy e-mail pattern is valid")
});

/// Decides whether a raw address is acceptable before anything else runs.
pub trait SyntaxValidator {
    fn validate(&self, raw: &str) -> bool;
}

/// Registration grammar kept for compatibility with existing forums:
/// dot-separated `[a-z0-9_-]` segments, `@`, dot-separated `[a-z0-9-]`
/// labels and a final alphabetic label of 2 or 3 characters.
///
/// Longer top-level labels (`.info`, `.museum`, most new gTLDs) are refused.
/// Widening that is a behaviour change, so it belongs in a separate
/// [`SyntaxValidator`] rather than here.
#[derive(Debug, Clone, Copy, Default)]
pub struct LegacyGrammar;

impl SyntaxValidator for LegacyGrammar {
    fn validate(&self, raw: &str) -> bool {
        LEGACY_PATTERN.is_match(raw)
    }
}

impl<F> SyntaxValidator for F
where
    F: Fn(&str) -> bool,
{
    fn validate(&self, raw: &str) -> bool {
        self(raw)
    }
}
