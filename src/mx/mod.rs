//! Mail exchanger resolution.
//!
//! [`resolve`] never fails: DNS errors and empty answers both fall back to
//! the domain itself, mirroring the implicit-MX rule SMTP clients follow.

mod error;
mod resolver;
mod types;

pub(crate) use error::MxError;
pub use resolver::resolve;
pub use types::{MxRecord, MxTarget};

#[cfg(test)]
pub(crate) use resolver::resolve_with;
