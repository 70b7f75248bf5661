//! Transit gateway identifier resolution.
//!
//! A transit gateway in the stack's own account is read from the parameter
//! it was published under. One owned by another account is found through the
//! resource share that account publishes for it.

use std::collections::{BTreeMap, BTreeSet};

use tracing::{debug, info};

use accel_constructs::{
    logical_id, ParameterLookup, ResourceShareItemLookup, ResourceShareItemLookupProps,
    ResourceShareLookup, ResourceShareLookupProps, Stack, Token,
};

use crate::error::NetworkResult;
use crate::paths;

/// RAM resource type of a shared transit gateway.
pub const TRANSIT_GATEWAY_RESOURCE_TYPE: &str = "ec2:TransitGateway";

/// Name of the resource share an owner publishes for a transit gateway.
pub fn share_name(transit_gateway: &str) -> String {
    format!("{}TransitGatewayShare", transit_gateway)
}

/// Where a transit gateway identifier comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransitGatewaySource {
    /// Same account: the owner's published parameter.
    LocalParameter { parameter_path: String },
    /// Another account: the item of a resource share it owns.
    ResourceShare {
        owner_account_id: String,
        share_name: String,
    },
}

impl TransitGatewaySource {
    pub fn for_owner(transit_gateway: &str, owner_account_id: &str, stack_account_id: &str) -> Self {
        if owner_account_id == stack_account_id {
            TransitGatewaySource::LocalParameter {
                parameter_path: paths::transit_gateway_id(transit_gateway),
            }
        } else {
            TransitGatewaySource::ResourceShare {
                owner_account_id: owner_account_id.to_string(),
                share_name: share_name(transit_gateway),
            }
        }
    }

    fn resolve(&self, stack: &mut Stack, transit_gateway: &str) -> NetworkResult<Token> {
        match self {
            TransitGatewaySource::LocalParameter { parameter_path } => {
                Ok(ParameterLookup::value_for_string_parameter(stack, parameter_path)?)
            }
            TransitGatewaySource::ResourceShare {
                owner_account_id,
                share_name,
            } => {
                let share_id = stack.unique_logical_id(&logical_id(&[share_name.as_str()]));
                let share = ResourceShareLookup::from_lookup(
                    stack,
                    &share_id,
                    ResourceShareLookupProps {
                        resource_share_name: share_name,
                        owner_account_id,
                    },
                )?;
                let item_id = stack.unique_logical_id(&logical_id(&[transit_gateway, "TransitGatewayShareItem"]));
                let item = ResourceShareItemLookup::from_lookup(
                    stack,
                    &item_id,
                    ResourceShareItemLookupProps {
                        resource_share: &share,
                        resource_type: TRANSIT_GATEWAY_RESOURCE_TYPE,
                    },
                )?;
                Ok(item.resource_share_item_id().clone())
            }
        }
    }
}

/// Per-synthesis cache of transit gateway identifiers.
#[derive(Debug)]
pub struct TransitGatewayResolver {
    stack_account_id: String,
    ids: BTreeMap<String, Token>,
    foreign_owners: BTreeSet<String>,
}

impl TransitGatewayResolver {
    pub fn new(stack_account_id: impl Into<String>) -> Self {
        Self {
            stack_account_id: stack_account_id.into(),
            ids: BTreeMap::new(),
            foreign_owners: BTreeSet::new(),
        }
    }

    /// Resolve a transit gateway once; later calls return the cached token.
    pub fn resolve(
        &mut self,
        stack: &mut Stack,
        transit_gateway: &str,
        owner_account_id: &str,
    ) -> NetworkResult<Token> {
        if let Some(id) = self.ids.get(transit_gateway) {
            debug!("Transit gateway {} already resolved", transit_gateway);
            return Ok(id.clone());
        }

        let source = TransitGatewaySource::for_owner(transit_gateway, owner_account_id, &self.stack_account_id);
        info!("Resolving transit gateway {} from {:?}", transit_gateway, source);
        let id = source.resolve(stack, transit_gateway)?;

        if let TransitGatewaySource::ResourceShare { owner_account_id, .. } = source {
            self.foreign_owners.insert(owner_account_id);
        }
        self.ids.insert(transit_gateway.to_string(), id.clone());
        Ok(id)
    }

    pub fn get(&self, transit_gateway: &str) -> Option<&Token> {
        self.ids.get(transit_gateway)
    }

    /// Accounts owning a transit gateway shared into this stack's account.
    pub fn foreign_owner_accounts(&self) -> &BTreeSet<String> {
        &self.foreign_owners
    }

}
