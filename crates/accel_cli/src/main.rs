//! accel CLI - Main entry point.
//!
//! Exit codes:
//! - 0: Success
//! - 1: General error
//! - 2: Invalid arguments
//! - 3: Validation failure
//! - 5: Synthesis error

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use accel_config::ConfigError;
use accel_network::NetworkError;

mod commands;

use commands::{Cli, Commands};

/// CI-friendly exit codes
pub struct ExitCodes;

impl ExitCodes {
    pub const SUCCESS: u8 = 0;
    pub const GENERAL_ERROR: u8 = 1;
    pub const INVALID_ARGS: u8 = 2;
    pub const VALIDATION_FAILURE: u8 = 3;
    pub const SYNTH_ERROR: u8 = 5;
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.verbose {
        "accel=debug"
    } else if cli.quiet {
        "accel=warn"
    } else {
        "accel=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(format!("{},warn", default_level)));

    // Logging may already be initialized
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .try_init();

    let result = match cli.command {
        Commands::Synth(args) => commands::synth::execute(args).await,
        Commands::Validate(args) => commands::validate::execute(args).await,
        Commands::Parameters(args) => commands::parameters::execute(args).await,
    };

    match result {
        Ok(()) => ExitCode::from(ExitCodes::SUCCESS),
        Err(e) => {
            let exit_code = categorize_error(&e);
            eprintln!("Error: {:#}", e);
            ExitCode::from(exit_code)
        }
    }
}

/// Categorize error to determine exit code
fn categorize_error(e: &anyhow::Error) -> u8 {
    if e.chain().any(|cause| cause.is::<NetworkError>()) {
        return ExitCodes::SYNTH_ERROR;
    }
    if let Some(config_error) = e.chain().find_map(|cause| cause.downcast_ref::<ConfigError>()) {
        return match config_error {
            ConfigError::NotFound(_) | ConfigError::MissingFile { .. } => ExitCodes::INVALID_ARGS,
            _ => ExitCodes::GENERAL_ERROR,
        };
    }

    let msg = e.to_string().to_lowercase();
    if msg.contains("validation") {
        ExitCodes::VALIDATION_FAILURE
    } else if msg.contains("argument") {
        ExitCodes::INVALID_ARGS
    } else {
        ExitCodes::GENERAL_ERROR
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_categorize_error() {
        let missing = anyhow::Error::new(ConfigError::NotFound(PathBuf::from("config")));
        assert_eq!(categorize_error(&missing), ExitCodes::INVALID_ARGS);

        let synth = anyhow::Error::new(NetworkError::UnknownAccount {
            context: "VPC A".into(),
            account: "Missing".into(),
        })
        .context("Synthesis failed");
        assert_eq!(categorize_error(&synth), ExitCodes::SYNTH_ERROR);

        let validation = anyhow::anyhow!("Validation failed with 1 error(s) and 0 warning(s)");
        assert_eq!(categorize_error(&validation), ExitCodes::VALIDATION_FAILURE);

        assert_eq!(categorize_error(&anyhow::anyhow!("boom")), ExitCodes::GENERAL_ERROR);
    }
}
