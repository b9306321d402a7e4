//! Whitelist error types.
//!
//! Loading a whitelist can fail in exactly two ways: the document cannot be
//! read, or its content does not have the organization / repository / branch
//! shape. Both abort the provisioning run.

use thiserror::Error;

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Errors raised while loading or parsing a whitelist document.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum WhitelistError {
    /// The whitelist file is missing or could not be read.
    #[error("Failed to load whitelist document: {path} - {reason}")]
    DocumentLoad { path: String, reason: String },

    /// The document does not match the expected three-level nesting, or one
    /// of its names breaks the trust pattern grammar.
    ///
    /// `location` points at the offending node, e.g. `acme/widgets[1]`.
    #[error("Invalid whitelist structure at '{location}': {reason}")]
    Structure { location: String, reason: String },
}

impl WhitelistError {
    pub(crate) fn structure(location: impl Into<String>, reason: impl Into<String>) -> Self {
        WhitelistError::Structure {
            location: location.into(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for whitelist operations.
pub type WhitelistResult<T> = Result<T, WhitelistError>;
