//! Validate command - Check the configuration without synthesizing.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use tracing::info;

use accel_config::ConfigValidator;

use super::load_config;

#[derive(Args)]
pub struct ValidateArgs {
    /// Directory holding network-config and accounts-config
    #[arg(short, long, env = "ACCEL_CONFIG_DIR", default_value = "config")]
    config_dir: PathBuf,

    /// Treat warnings as errors
    #[arg(long)]
    strict: bool,
}

pub async fn execute(args: ValidateArgs) -> Result<()> {
    info!("Validating configuration in {:?}", args.config_dir);

    let config = load_config(&args.config_dir)?;
    let result = ConfigValidator::validate(&config);

    println!("📋 Validating {} VPC(s)...", config.network.vpcs.len());
    for error in &result.errors {
        println!("   ❌ {}", error);
    }
    for warning in &result.warnings {
        println!("   ⚠️  {}", warning);
    }

    let failed = !result.is_valid() || (args.strict && !result.warnings.is_empty());
    println!();
    if failed {
        anyhow::bail!(
            "Validation failed with {} error(s) and {} warning(s)",
            result.errors.len(),
            result.warnings.len()
        );
    }

    println!("✅ Configuration is valid");
    Ok(())
}
