//! Print the trust patterns a whitelist expands to.
//!
//! ```bash
//! github-oidc patterns --whitelist ./AccessConfigOIDC.yaml --format json
//! ```

use clap::{Args, ValueEnum};
use tracing::{info, instrument};
use trust_whitelist::ClaimDimension;

use super::load_patterns;
use crate::config::AppConfig;
use crate::errors::Error;

#[cfg(test)]
#[path = "patterns_cmd_tests.rs"]
mod tests;

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// One pattern per line
    Text,
    /// JSON array, ready to paste into a condition block
    Json,
}

#[derive(Args, Debug)]
pub struct PatternsArgs {
    /// Path to the whitelist document (defaults to the configured path)
    #[arg(short, long)]
    pub whitelist: Option<String>,

    /// Claim dimension to interpret the leaf entries as (ref or environment)
    #[arg(long)]
    pub claim: Option<ClaimDimension>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// Execute the patterns command
#[instrument(skip(config))]
pub fn execute(config: &AppConfig, args: &PatternsArgs) -> Result<(), Error> {
    let rendered = render_patterns(config, args)?;
    println!("{}", rendered);
    Ok(())
}

/// Expand the whitelist and render the patterns in the requested format.
pub fn render_patterns(config: &AppConfig, args: &PatternsArgs) -> Result<String, Error> {
    let (_, patterns) = load_patterns(config, args.whitelist.as_deref(), args.claim)?;
    info!(message = "Expanded trust patterns", patterns = patterns.len());

    match args.format {
        OutputFormat::Text => Ok(patterns
            .iter()
            .map(|p| p.as_str())
            .collect::<Vec<_>>()
            .join("\n")),
        OutputFormat::Json => serde_json::to_string_pretty(&patterns).map_err(|e| Error::Render {
            what: "trust patterns",
            reason: e.to_string(),
        }),
    }
}
