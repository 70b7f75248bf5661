//! Synth command - Render network VPC stack templates.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use tracing::info;

use accel_network::NetworkApp;

use super::{load_config, EnvironmentArgs};

#[derive(Args)]
pub struct SynthArgs {
    /// Directory holding network-config and accounts-config
    #[arg(short, long, env = "ACCEL_CONFIG_DIR", default_value = "config")]
    config_dir: PathBuf,

    #[command(flatten)]
    environment: EnvironmentArgs,

    /// Directory to write templates to (stdout when omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

pub async fn execute(args: SynthArgs) -> Result<()> {
    let config = load_config(&args.config_dir)?;
    let app = NetworkApp::new(&config);
    let environments = args.environment.resolve(&app)?;

    if environments.is_empty() {
        println!("No VPCs configured; nothing to synthesize");
        return Ok(());
    }

    if let Some(output) = &args.output {
        tokio::fs::create_dir_all(output)
            .await
            .with_context(|| format!("Failed to create output directory {:?}", output))?;
    }

    for env in environments {
        let stack = app.stack_for(env.clone()).synth()?;
        let template = stack.synth().to_json()?;

        match &args.output {
            Some(output) => {
                let path = output.join(format!("{}.template.json", env));
                tokio::fs::write(&path, template)
                    .await
                    .with_context(|| format!("Failed to write {:?}", path))?;
                info!("Wrote {} ({} resources) to {:?}", stack.name(), stack.resource_count(), path);
                println!("✅ {} -> {}", stack.name(), path.display());
            }
            None => println!("{}", template),
        }
    }

    Ok(())
}
