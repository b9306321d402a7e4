use std::io;

use stack_template::TemplateError;
use thiserror::Error;
use trust_whitelist::WhitelistError;

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Errors that can occur in the github-oidc CLI.
///
/// Library errors are wrapped transparently so the operator sees the
/// original message unchanged.
#[derive(Error, Debug)]
pub enum Error {
    /// The settings file could not be found, read, parsed or written.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid or incompatible command-line arguments.
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// The whitelist document could not be loaded.
    #[error(transparent)]
    Whitelist(#[from] WhitelistError),

    /// The stack template could not be synthesized.
    #[error(transparent)]
    Template(#[from] TemplateError),

    /// No pattern in the whitelist accepts the given subject claim.
    #[error("Subject is not trusted by any whitelist pattern: {0}")]
    SubjectNotTrusted(String),

    /// Command output could not be rendered in the requested format.
    #[error("Failed to render {what}: {reason}")]
    Render { what: &'static str, reason: String },

    /// Writing the synthesized template failed.
    #[error("Failed to write output to {path}: {source}")]
    WriteOutput { path: String, source: io::Error },
}
