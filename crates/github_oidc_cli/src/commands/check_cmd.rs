//! Preview whether a token subject would be allowed to assume the role.
//!
//! The subject is matched against every trust pattern with the same
//! `StringLike` rules IAM applies, e.g.
//!
//! ```bash
//! github-oidc check repo:acme/widgets:ref:refs/heads/main
//! ```

use clap::Args;
use colored::Colorize;
use tracing::{info, instrument};
use trust_whitelist::TrustPattern;

use super::load_patterns;
use crate::config::AppConfig;
use crate::errors::Error;

#[cfg(test)]
#[path = "check_cmd_tests.rs"]
mod tests;

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// The `sub` claim to test, e.g. repo:acme/widgets:ref:refs/heads/main
    pub subject: String,

    /// Path to the whitelist document (defaults to the configured path)
    #[arg(short, long)]
    pub whitelist: Option<String>,
}

/// Execute the check command
#[instrument(skip(config))]
pub fn execute(config: &AppConfig, args: &CheckArgs) -> Result<(), Error> {
    let matches = matching_patterns(config, args)?;
    if matches.is_empty() {
        println!("{} {} is not trusted", "✘".red(), args.subject);
        return Err(Error::SubjectNotTrusted(args.subject.clone()));
    }

    println!("{} {} is trusted by:", "✔".green(), args.subject);
    for pattern in &matches {
        println!("  {}", pattern);
    }
    Ok(())
}

/// Trust patterns accepting `args.subject`, in whitelist order.
pub fn matching_patterns(
    config: &AppConfig,
    args: &CheckArgs,
) -> Result<Vec<TrustPattern>, Error> {
    if args.subject.trim().is_empty() {
        return Err(Error::InvalidArguments("subject cannot be empty".to_string()));
    }

    let (_, patterns) = load_patterns(config, args.whitelist.as_deref(), None)?;
    let matches: Vec<TrustPattern> = patterns
        .into_iter()
        .filter(|p| p.matches_subject(&args.subject))
        .collect();

    info!(
        message = "Checked subject",
        subject = %args.subject,
        matches = matches.len()
    );
    Ok(matches)
}
