//! CLI command definitions.
//!
//! Every command reads the same configuration directory; `synth` and
//! `parameters` also take the environment to build for.

use std::path::Path;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};

use accel_config::{AcceleratorConfig, ConfigReader};
use accel_constructs::Environment;
use accel_network::NetworkApp;

pub mod parameters;
pub mod synth;
pub mod validate;

/// accel - accelerator network stack synthesizer
#[derive(Parser)]
#[command(name = "accel")]
#[command(version, about = "Synthesize accelerator network VPC stacks")]
#[command(long_about = r#"
Reads network-config and accounts-config from a configuration directory and
synthesizes one CloudFormation template per account and region that owns a VPC.

COMMANDS:
  synth       → Render network VPC stack templates
  validate    → Check the configuration without synthesizing
  parameters  → List the SSM parameters a stack publishes

EXIT CODES:
  0 - Success
  1 - General error
  2 - Invalid arguments
  3 - Validation failure
  5 - Synthesis error
"#)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Synthesize network VPC stack templates
    Synth(synth::SynthArgs),

    /// Validate the configuration directory
    Validate(validate::ValidateArgs),

    /// List parameters published by a stack
    Parameters(parameters::ParametersArgs),
}

/// Account and region selection shared by `synth` and `parameters`.
#[derive(Args, Debug, Clone)]
pub struct EnvironmentArgs {
    /// Account id of the stack to build (all environments when omitted)
    #[arg(long, env = "ACCEL_ACCOUNT_ID")]
    pub account_id: Option<String>,

    /// Region of the stack to build (all environments when omitted)
    #[arg(long, env = "ACCEL_REGION")]
    pub region: Option<String>,
}

impl EnvironmentArgs {
    /// The requested environment, or every environment the VPCs name.
    pub fn resolve(&self, app: &NetworkApp<'_>) -> Result<Vec<Environment>> {
        match (&self.account_id, &self.region) {
            (Some(account_id), Some(region)) => Ok(vec![Environment::new(account_id.clone(), region.clone())]),
            (None, None) => Ok(app.environments()?.into_iter().collect()),
            _ => anyhow::bail!("Invalid arguments: --account-id and --region must be given together"),
        }
    }
}

/// Load the configuration directory.
pub fn load_config(dir: &Path) -> Result<AcceleratorConfig> {
    ConfigReader::load_dir(dir).with_context(|| format!("Failed to load configuration from {:?}", dir))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    const NETWORK: &str = r#"
vpcs:
  - name: A
    account: Network
    region: us-east-1
    cidr: 10.0.0.0/16
  - name: B
    account: Network
    region: eu-west-1
    cidr: 10.1.0.0/16
"#;

    const ACCOUNTS: &str = r#"
mandatoryAccounts:
  - name: Network
    accountId: "111111111111"
"#;

    fn config_dir() -> tempfile::TempDir {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("network-config.yaml"), NETWORK).unwrap();
        fs::write(dir.path().join("accounts-config.yaml"), ACCOUNTS).unwrap();
        dir
    }

    #[test]
    fn test_resolve_all_environments() {
        let dir = config_dir();
        let config = load_config(dir.path()).unwrap();
        let app = NetworkApp::new(&config);

        let args = EnvironmentArgs {
            account_id: None,
            region: None,
        };
        let environments = args.resolve(&app).unwrap();
        assert_eq!(
            environments,
            vec![
                Environment::new("111111111111", "eu-west-1"),
                Environment::new("111111111111", "us-east-1"),
            ]
        );
    }

    #[test]
    fn test_resolve_requires_account_and_region_together() {
        let dir = config_dir();
        let config = load_config(dir.path()).unwrap();
        let app = NetworkApp::new(&config);

        let args = EnvironmentArgs {
            account_id: Some("111111111111".into()),
            region: None,
        };
        let err = args.resolve(&app).unwrap_err();
        assert!(err.to_string().contains("--region"));
    }

    #[test]
    fn test_load_config_missing_dir() {
        let dir = tempdir().unwrap();
        let err = load_config(&dir.path().join("missing")).unwrap_err();
        assert!(err.to_string().contains("Failed to load configuration"));
    }
}
