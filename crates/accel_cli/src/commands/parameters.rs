//! Parameters command - List the SSM parameters a stack publishes.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use accel_network::NetworkApp;

use super::{load_config, EnvironmentArgs};

#[derive(Args)]
pub struct ParametersArgs {
    /// Directory holding network-config and accounts-config
    #[arg(short, long, env = "ACCEL_CONFIG_DIR", default_value = "config")]
    config_dir: PathBuf,

    #[command(flatten)]
    environment: EnvironmentArgs,

    /// Print as JSON keyed by stack name
    #[arg(long)]
    json: bool,
}

pub async fn execute(args: ParametersArgs) -> Result<()> {
    let config = load_config(&args.config_dir)?;
    let app = NetworkApp::new(&config);

    let mut listing = serde_json::Map::new();
    for env in args.environment.resolve(&app)? {
        let stack = app.stack_for(env).synth()?;
        let published = stack.published_parameters();

        if args.json {
            listing.insert(stack.name().to_string(), serde_json::to_value(published)?);
            continue;
        }

        println!("{} ({} parameter(s))", stack.name(), published.len());
        for (path, value) in published {
            println!("  {} = {}", path, value);
        }
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&listing)?);
    }
    Ok(())
}
