//! Address syntax checks.
//!
//! [`validate`] applies the default [`LegacyGrammar`]. Callers that need a
//! different grammar plug their own [`SyntaxValidator`] into
//! [`Verifier`](crate::Verifier).

mod address;
mod grammar;

pub use address::{AddressError, EmailAddress};
pub use grammar::{LegacyGrammar, SyntaxValidator};

/// Checks `raw` against the default registration grammar.
pub fn validate(raw: &str) -> bool {
    LegacyGrammar.validate(raw)
}
