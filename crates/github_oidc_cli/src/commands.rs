//! Command modules for the github-oidc CLI.
//!
//! - `check_cmd`: test a subject claim against the whitelist
//! - `config_cmd`: create and inspect the settings file
//! - `patterns_cmd`: print the expanded trust patterns
//! - `synth_cmd`: render the CloudFormation template
//! - `validate_cmd`: validate settings and whitelist together

use trust_whitelist::{expand_with, ClaimDimension, TrustPattern, WhitelistConfig};

use crate::config::AppConfig;
use crate::errors::Error;

pub mod check_cmd;
pub mod config_cmd;
pub mod patterns_cmd;
pub mod synth_cmd;
pub mod validate_cmd;

/// Load the whitelist for this run and expand it.
///
/// `claim` overrides the configured claim dimension.
pub(crate) fn load_patterns(
    config: &AppConfig,
    whitelist_override: Option<&str>,
    claim: Option<ClaimDimension>,
) -> Result<(WhitelistConfig, Vec<TrustPattern>), Error> {
    let path = config.whitelist_path(whitelist_override);
    let whitelist = WhitelistConfig::load(&path)?;
    let patterns = expand_with(&whitelist, claim.unwrap_or(config.whitelist.claim));
    Ok((whitelist, patterns))
}
