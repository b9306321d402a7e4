//! Settings file for the github-oidc CLI.
//!
//! The settings are stored in TOML. Every field has a default, so running
//! without a settings file declares the standard GitHub Actions provider and
//! role trusting the whitelist at `./AccessConfigOIDC.yaml`.
//!
//! Account and region are finally overridden from `CDK_DEFAULT_ACCOUNT` and
//! `CDK_DEFAULT_REGION` when those are set.

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use stack_template::StackSettings;
use tracing::{debug, info};
use trust_whitelist::{ClaimDimension, DEFAULT_WHITELIST_PATH};

use crate::errors::Error;

/// Default settings file name
pub const DEFAULT_CONFIG_FILENAME: &str = "github-oidc.toml";

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;

/// Main configuration structure for the CLI.
///
/// # Example TOML Configuration
///
/// ```toml
/// [whitelist]
/// path = "./AccessConfigOIDC.yaml"
/// claim = "ref"
///
/// [stack]
/// role_name = "github_actions_role"
/// max_session_duration_hours = 1
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Where the whitelist lives and how its entries are read
    #[serde(default)]
    pub whitelist: WhitelistSettings,

    /// Provider, role and policy settings
    #[serde(default)]
    pub stack: StackSettings,
}

impl AppConfig {
    /// Loads configuration from a TOML file at the specified path.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if the file does not exist, cannot be read, or
    /// contains invalid TOML.
    pub fn load(path: &Path) -> Result<Self, Error> {
        debug!("Loading configuration from {:?}", path);

        if !path.exists() {
            return Err(Error::Config(format!(
                "Configuration file not found: {:?}",
                path
            )));
        }

        let content = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read configuration file: {}", e)))?;

        let config: AppConfig = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("Failed to parse configuration file: {}", e)))?;

        Ok(config)
    }

    /// Saves the configuration as pretty TOML, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<(), Error> {
        debug!("Saving configuration to {:?}", path);

        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize configuration: {}", e)))?;

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .map_err(|e| Error::Config(format!("Failed to create directory: {}", e)))?;
            }
        }

        fs::write(path, content)
            .map_err(|e| Error::Config(format!("Failed to write configuration file: {}", e)))?;

        info!("Configuration saved to {:?}", path);
        Ok(())
    }

    /// Resolve the effective configuration for a run.
    ///
    /// # Behaviour
    ///
    /// - An explicitly given path must exist
    /// - Without a path, `./github-oidc.toml` is used when present and the
    ///   defaults otherwise
    /// - `CDK_DEFAULT_ACCOUNT` / `CDK_DEFAULT_REGION` are applied last
    pub fn resolve(config_path: Option<&str>) -> Result<Self, Error> {
        let path = get_config_path(config_path);

        let mut config = if config_path.is_some() || path.exists() {
            Self::load(&path)?
        } else {
            debug!(
                message = "No configuration file, using defaults",
                path = ?path
            );
            Self::default()
        };

        config.stack.apply_environment_overrides();
        Ok(config)
    }

    /// Whitelist path for this run: the command-line override if given,
    /// otherwise the configured one.
    pub fn whitelist_path(&self, override_path: Option<&str>) -> PathBuf {
        override_path
            .map(PathBuf::from)
            .unwrap_or_else(|| self.whitelist.path.clone())
    }
}

/// The `[whitelist]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WhitelistSettings {
    /// Path of the YAML whitelist document.
    pub path: PathBuf,

    /// Claim dimension the leaf entries are interpreted as.
    pub claim: ClaimDimension,
}

impl Default for WhitelistSettings {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_WHITELIST_PATH),
            claim: ClaimDimension::default(),
        }
    }
}

/// Resolves the path to the configuration file.
///
/// Returns `config_path` when given, otherwise `github-oidc.toml` in the
/// current directory.
pub fn get_config_path(config_path: Option<&str>) -> PathBuf {
    if let Some(path) = config_path {
        PathBuf::from(path)
    } else {
        let current_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        current_dir.join(DEFAULT_CONFIG_FILENAME)
    }
}
