use clap::Subcommand;
use tracing::{debug, error, info, instrument};

use crate::config::{get_config_path, AppConfig};
use crate::errors::Error;

#[cfg(test)]
#[path = "config_cmd_tests.rs"]
mod tests;

/// Subcommands for the config command
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Create a settings file holding the defaults
    Init {
        /// Path to save the settings file
        #[arg(short, long)]
        path: Option<String>,
    },

    /// Show the effective settings, including environment overrides
    Show,
}

/// Execute the config command
#[instrument]
pub fn execute(cmd: &ConfigCommands, config_path: Option<&str>) -> Result<(), Error> {
    match cmd {
        ConfigCommands::Init { path } => init_config(path.as_deref().or(config_path)),
        ConfigCommands::Show => {
            println!("{}", show_config(config_path)?);
            Ok(())
        }
    }
}

/// Initialize a new settings file
#[instrument]
fn init_config(path: Option<&str>) -> Result<(), Error> {
    let config_path = get_config_path(path);
    debug!(message = "Initializing configuration", path = ?config_path);

    if config_path.exists() {
        let err = Error::Config(format!(
            "Configuration file already exists at {:?}",
            config_path
        ));
        error!(
            message = "Configuration file already exists",
            path = ?config_path,
            error = ?err
        );
        return Err(err);
    }

    AppConfig::default().save(&config_path)?;

    info!(message = "Configuration initialized", path = ?config_path);
    println!("Configuration initialized at {:?}", config_path);
    Ok(())
}

/// Render the effective settings as TOML.
pub fn show_config(config_path: Option<&str>) -> Result<String, Error> {
    let config = AppConfig::resolve(config_path)?;
    toml::to_string_pretty(&config)
        .map_err(|e| Error::Config(format!("Failed to serialize configuration: {}", e)))
}
