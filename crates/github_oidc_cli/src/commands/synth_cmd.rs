//! Render the CloudFormation template for the OIDC provider and role.
//!
//! ```bash
//! CDK_DEFAULT_ACCOUNT=123456789012 github-oidc synth \
//!     --output cdk.out/GithubOidcStack.template.json
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use clap::Args;
use stack_template::{synthesize, Template};
use tracing::{debug, info, instrument};

use super::load_patterns;
use crate::config::AppConfig;
use crate::errors::Error;

#[cfg(test)]
#[path = "synth_cmd_tests.rs"]
mod tests;

#[derive(Args, Debug)]
pub struct SynthArgs {
    /// Path to the whitelist document (defaults to the configured path)
    #[arg(short, long)]
    pub whitelist: Option<String>,

    /// Write the template to this file instead of standard output
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Execute the synth command
#[instrument(skip(config))]
pub fn execute(config: &AppConfig, args: &SynthArgs) -> Result<(), Error> {
    let template = build_template(config, args.whitelist.as_deref())?;
    let rendered = template.to_json_pretty()?;

    match &args.output {
        Some(path) => {
            write_output(path, &rendered)?;
            info!(message = "Template written", path = ?path);
        }
        None => println!("{}", rendered),
    }
    Ok(())
}

/// Load and expand the whitelist, then synthesize the template.
pub fn build_template(
    config: &AppConfig,
    whitelist_override: Option<&str>,
) -> Result<Template, Error> {
    let (_, patterns) = load_patterns(config, whitelist_override, None)?;
    debug!(
        message = "Synthesizing for environment",
        account = ?config.stack.account,
        region = ?config.stack.region
    );
    Ok(synthesize(&config.stack, &patterns)?)
}

fn write_output(path: &Path, content: &str) -> Result<(), Error> {
    let to_error = |source: io::Error| Error::WriteOutput {
        path: path.display().to_string(),
        source,
    };

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(to_error)?;
        }
    }
    fs::write(path, content).map_err(to_error)
}
