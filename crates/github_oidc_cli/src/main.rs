use clap::{Parser, Subcommand};
use tracing::error;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use github_oidc_cli::commands::{
    check_cmd::{self, CheckArgs},
    config_cmd::{self, ConfigCommands},
    patterns_cmd::{self, PatternsArgs},
    synth_cmd::{self, SynthArgs},
    validate_cmd::{self, ValidateArgs},
};
use github_oidc_cli::config::AppConfig;
use github_oidc_cli::errors::Error;

/// github-oidc: trust GitHub Actions workflows to deploy into an AWS account
#[derive(Parser)]
#[command(name = "github-oidc")]
#[command(
    about = "Declare the GitHub Actions OIDC provider and a role trusting whitelisted repositories",
    long_about = None
)]
struct Cli {
    /// Path to the settings file (defaults to ./github-oidc.toml when present)
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the trust patterns the whitelist expands to
    Patterns(PatternsArgs),

    /// Render the CloudFormation template
    Synth(SynthArgs),

    /// Validate settings and whitelist
    Validate(ValidateArgs),

    /// Test whether a token subject would be trusted
    Check(CheckArgs),

    #[command(subcommand)]
    Config(ConfigCommands),

    /// Show the CLI version
    Version,
}

fn run(cli: &Cli) -> Result<(), Error> {
    let config_path = cli.config.as_deref();
    match &cli.command {
        Commands::Patterns(args) => patterns_cmd::execute(&AppConfig::resolve(config_path)?, args),
        Commands::Synth(args) => synth_cmd::execute(&AppConfig::resolve(config_path)?, args),
        Commands::Validate(args) => validate_cmd::execute(&AppConfig::resolve(config_path)?, args),
        Commands::Check(args) => check_cmd::execute(&AppConfig::resolve(config_path)?, args),
        Commands::Config(cmd) => config_cmd::execute(cmd, config_path),
        Commands::Version => {
            println!(
                "github-oidc version {}",
                option_env!("GITHUB_OIDC_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"))
            );
            Ok(())
        }
    }
}

fn main() {
    // Logs go to stderr so templates and patterns can be piped from stdout
    tracing_subscriber::registry()
        .with(fmt::layer().pretty().with_writer(std::io::stderr))
        .with(EnvFilter::from_env("GITHUB_OIDC_LOG"))
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(&cli) {
        error!("Error: {e}");
        std::process::exit(1);
    }
}
