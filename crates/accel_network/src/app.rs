//! Synthesis across every environment the configuration deploys to.

use std::collections::BTreeSet;

use tracing::info;

use accel_config::{AcceleratorConfig, AccountResolver};
use accel_constructs::{Environment, Stack};

use crate::error::{NetworkError, NetworkResult};
use crate::vpc_stack::NetworkVpcStack;

/// Builds one network stack per account and region that owns a VPC.
pub struct NetworkApp<'a> {
    config: &'a AcceleratorConfig,
}

impl<'a> NetworkApp<'a> {
    pub fn new(config: &'a AcceleratorConfig) -> Self {
        Self { config }
    }

    /// Distinct environments referenced by the configured VPCs.
    pub fn environments(&self) -> NetworkResult<BTreeSet<Environment>> {
        let mut environments = BTreeSet::new();
        for vpc in &self.config.network.vpcs {
            let account_id =
                self.config
                    .accounts
                    .account_id(&vpc.account)
                    .ok_or_else(|| NetworkError::UnknownAccount {
                        context: format!("VPC {}", vpc.name),
                        account: vpc.account.clone(),
                    })?;
            environments.insert(Environment::new(account_id, vpc.region.clone()));
        }
        Ok(environments)
    }

    /// Stack for a single environment.
    pub fn stack_for(&self, env: Environment) -> NetworkVpcStack<'a> {
        NetworkVpcStack::new(env, &self.config.network, &self.config.accounts)
    }

    /// Synthesize every environment's stack, ordered by account then region.
    pub fn synth_all(&self) -> NetworkResult<Vec<Stack>> {
        let environments = self.environments()?;
        info!("Synthesizing network stacks for {} environment(s)", environments.len());
        environments
            .into_iter()
            .map(|env| self.stack_for(env).synth())
            .collect()
    }
}
