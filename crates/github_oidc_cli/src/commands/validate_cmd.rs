//! Validate the settings and the whitelist without rendering anything.

use clap::Args;
use colored::Colorize;
use stack_template::TemplateError;
use tracing::{error, info, instrument};

use super::load_patterns;
use crate::config::AppConfig;
use crate::errors::Error;

#[cfg(test)]
#[path = "validate_cmd_tests.rs"]
mod tests;

#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Path to the whitelist document (defaults to the configured path)
    #[arg(short, long)]
    pub whitelist: Option<String>,
}

/// Counts reported after a successful validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationSummary {
    pub organizations: usize,
    pub repositories: usize,
    pub patterns: usize,
}

/// Execute the validate command
#[instrument(skip(config))]
pub fn execute(config: &AppConfig, args: &ValidateArgs) -> Result<(), Error> {
    match validate(config, args) {
        Ok(summary) => {
            println!("{} Settings are valid", "✔".green());
            println!(
                "{} Whitelist is valid: {} organization(s), {} repositor{}, {} trust pattern(s)",
                "✔".green(),
                summary.organizations,
                summary.repositories,
                if summary.repositories == 1 { "y" } else { "ies" },
                summary.patterns
            );
            Ok(())
        }
        Err(e) => {
            error!(message = "Validation failed", error = %e);
            println!("{} {}", "✘".red(), e);
            Err(e)
        }
    }
}

/// Check settings and whitelist as `synth` would, without building the
/// template.
pub fn validate(config: &AppConfig, args: &ValidateArgs) -> Result<ValidationSummary, Error> {
    config.stack.validate()?;

    let (whitelist, patterns) = load_patterns(config, args.whitelist.as_deref(), None)?;
    if patterns.is_empty() {
        return Err(TemplateError::EmptyWhitelist.into());
    }

    let summary = ValidationSummary {
        organizations: whitelist.organization_count(),
        repositories: whitelist.repository_count(),
        patterns: patterns.len(),
    };
    info!(message = "Validation succeeded", summary = ?summary);
    Ok(summary)
}
