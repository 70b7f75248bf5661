//! Network VPC stack assembly.
//!
//! One stack per account and region. Synthesis runs in a fixed order:
//!
//! 1. resolve every transit gateway referenced by an in-scope attachment
//! 2. create the describe-attachments role when any of them is shared in
//! 3. build each VPC: VPC, route tables, subnets, NAT gateways, transit
//!    gateway attachments, routes, gateway endpoints, query-log associations
//!
//! Each step may only reference constructs made by an earlier one; the first
//! unresolved name aborts the pass.

use std::collections::{BTreeMap, BTreeSet};

use tracing::{debug, info, warn};

use accel_config::{
    AccountResolver, GatewayEndpointService, InstanceTenancy, NetworkConfig, RouteTableEntryConfig,
    RouteTargetType, VpcConfig,
};
use accel_constructs::{
    logical_id, CrossAccountRole, CrossAccountRoleProps, Environment, GatewayEndpoint,
    GatewayEndpointProps, ParameterLookup, PublishedParameter, QueryLoggingConfigAssociation,
    SecureNatGateway, SecureRouteTable, SecureSubnet, SecureSubnetProps, SecureVpc, SecureVpcProps,
    Stack, Token, TransitGatewayAttachment, TransitGatewayAttachmentOptions,
    TransitGatewayAttachmentProps,
};

use crate::error::{NetworkError, NetworkResult};
use crate::maps::IdentifierMap;
use crate::paths;
use crate::transit_gateway::TransitGatewayResolver;

/// Role assumed by transit gateway owners to inspect attachments.
pub const DESCRIBE_TGW_ATTACHMENTS_ROLE: &str = "AcceleratorDescribeTgwAttachRole";

const DESCRIBE_TGW_ATTACHMENTS_ACTIONS: &[&str] = &["ec2:DescribeTransitGatewayAttachments"];

/// Assembles the network stack for one environment.
pub struct NetworkVpcStack<'a> {
    env: Environment,
    network: &'a NetworkConfig,
    accounts: &'a dyn AccountResolver,
}

impl<'a> NetworkVpcStack<'a> {
    pub fn new(env: Environment, network: &'a NetworkConfig, accounts: &'a dyn AccountResolver) -> Self {
        Self {
            env,
            network,
            accounts,
        }
    }

    pub fn stack_name(&self) -> String {
        format!("AcceleratorNetworkVpcStack-{}-{}", self.env.account_id, self.env.region)
    }

    /// VPCs owned by this stack's account and region, in declaration order.
    pub fn vpcs_in_scope(&self) -> NetworkResult<Vec<&'a VpcConfig>> {
        let mut vpcs = Vec::new();
        for vpc in &self.network.vpcs {
            let account_id = self.account_id(&vpc.account, || format!("VPC {}", vpc.name))?;
            if account_id == self.env.account_id && vpc.region == self.env.region {
                vpcs.push(vpc);
            }
        }
        Ok(vpcs)
    }

    /// Run synthesis and return the populated stack.
    pub fn synth(&self) -> NetworkResult<Stack> {
        let mut stack = Stack::new(self.stack_name(), self.env.clone())
            .with_description("Accelerator network VPC resources");
        let vpcs = self.vpcs_in_scope()?;
        info!("Synthesizing {} VPC(s) for {}", vpcs.len(), self.env);

        let mut transit_gateways = TransitGatewayResolver::new(self.env.account_id.clone());
        for vpc in &vpcs {
            for attachment in &vpc.transit_gateway_attachments {
                let tgw = &attachment.transit_gateway;
                let owner = self.account_id(&tgw.account, || {
                    format!("Transit gateway attachment {} in VPC {}", attachment.name, vpc.name)
                })?;
                transit_gateways.resolve(&mut stack, &tgw.name, &owner)?;
            }
        }

        let foreign_owners = transit_gateways.foreign_owner_accounts();
        if !foreign_owners.is_empty() {
            let role_name = format!("{}-{}", DESCRIBE_TGW_ATTACHMENTS_ROLE, self.env.region);
            info!(
                "Creating {} trusted by {} transit gateway owner account(s)",
                role_name,
                foreign_owners.len()
            );
            CrossAccountRole::new(
                &mut stack,
                DESCRIBE_TGW_ATTACHMENTS_ROLE,
                CrossAccountRoleProps {
                    role_name: &role_name,
                    trusted_account_ids: foreign_owners,
                    actions: DESCRIBE_TGW_ATTACHMENTS_ACTIONS,
                },
            )?;
        }

        for vpc in vpcs {
            VpcBuild::new(&mut stack, vpc, &transit_gateways).run()?;
        }

        info!("Stack {} has {} resources", stack.name(), stack.resource_count());
        Ok(stack)
    }

    fn account_id(&self, account: &str, context: impl FnOnce() -> String) -> NetworkResult<String> {
        self.accounts
            .account_id(account)
            .ok_or_else(|| NetworkError::UnknownAccount {
                context: context(),
                account: account.to_string(),
            })
    }
}

/// State of one VPC pass.
struct VpcBuild<'s> {
    stack: &'s mut Stack,
    config: &'s VpcConfig,
    transit_gateways: &'s TransitGatewayResolver,
    route_tables: IdentifierMap<SecureRouteTable>,
    subnets: IdentifierMap<SecureSubnet>,
    nat_gateways: IdentifierMap<SecureNatGateway>,
    /// Keyed by transit gateway name, so only one attachment per transit
    /// gateway is addressable by routes.
    attachments: IdentifierMap<TransitGatewayAttachment>,
    endpoint_route_tables: BTreeMap<GatewayEndpointService, BTreeSet<Token>>,
}

impl<'s> VpcBuild<'s> {
    fn new(stack: &'s mut Stack, config: &'s VpcConfig, transit_gateways: &'s TransitGatewayResolver) -> Self {
        Self {
            stack,
            config,
            transit_gateways,
            route_tables: IdentifierMap::new("route table"),
            subnets: IdentifierMap::new("subnet"),
            nat_gateways: IdentifierMap::new("NAT gateway"),
            attachments: IdentifierMap::new("transit gateway attachment"),
            endpoint_route_tables: BTreeMap::new(),
        }
    }

    fn run(mut self) -> NetworkResult<()> {
        info!("Building VPC {}", self.config.name);
        let vpc = self.create_vpc()?;
        self.create_route_tables(&vpc)?;
        self.create_subnets(&vpc)?;
        self.create_nat_gateways()?;
        self.create_transit_gateway_attachments(&vpc)?;
        self.create_routes()?;
        self.create_gateway_endpoints(&vpc)?;
        self.create_query_log_associations(&vpc)?;
        Ok(())
    }

    /// Logical id for a construct of this VPC, unique within the stack.
    fn id(&self, parts: &[&str]) -> String {
        let mut all = vec!["Vpc", self.config.name.as_str()];
        all.extend_from_slice(parts);
        self.stack.unique_logical_id(&logical_id(&all))
    }

    fn publish(&mut self, id: &str, path: String, value: &Token) -> NetworkResult<()> {
        PublishedParameter::publish(self.stack, &format!("{}Parameter", id), &path, value)?;
        Ok(())
    }

    fn create_vpc(&mut self) -> NetworkResult<SecureVpc> {
        let config = self.config;
        let id = self.id(&[]);
        let vpc = SecureVpc::new(
            self.stack,
            &id,
            SecureVpcProps {
                name: config.name.clone(),
                ipv4_cidr_block: config.cidr.clone(),
                enable_dns_hostnames: config.enable_dns_hostnames,
                enable_dns_support: config.enable_dns_support,
                instance_tenancy: config.instance_tenancy.map(|t| match t {
                    InstanceTenancy::Default => accel_constructs::InstanceTenancy::Default,
                    InstanceTenancy::Dedicated => accel_constructs::InstanceTenancy::Dedicated,
                }),
                internet_gateway: config.has_internet_gateway(),
                tags: config.tags.clone(),
            },
        )?;
        self.publish(&id, paths::vpc_id(&config.name), vpc.vpc_id())?;
        Ok(vpc)
    }

    fn create_route_tables(&mut self, vpc: &SecureVpc) -> NetworkResult<()> {
        let config = self.config;
        for table in &config.route_tables {
            let id = self.id(&["RouteTable", &table.name]);
            let route_table = SecureRouteTable::new(self.stack, &id, &table.name, vpc)?;
            self.publish(
                &id,
                paths::route_table_id(&config.name, &table.name),
                route_table.route_table_id(),
            )?;
            self.route_tables.insert(table.name.clone(), route_table);
        }
        debug!("VPC {}: {} route table(s)", config.name, self.route_tables.len());
        Ok(())
    }

    fn create_subnets(&mut self, vpc: &SecureVpc) -> NetworkResult<()> {
        let config = self.config;
        for subnet in &config.subnets {
            let route_table = self.route_tables.get(&subnet.route_table).ok_or_else(|| {
                NetworkError::UnknownRouteTable {
                    vpc: config.name.clone(),
                    subnet: subnet.name.clone(),
                    route_table: subnet.route_table.clone(),
                }
            })?;

            let id = self.id(&["Subnet", &subnet.name]);
            let secure_subnet = SecureSubnet::new(
                self.stack,
                &id,
                SecureSubnetProps {
                    name: subnet.name.clone(),
                    availability_zone: availability_zone(&config.region, &subnet.availability_zone),
                    ipv4_cidr_block: subnet.ipv4_cidr_block.clone(),
                    route_table,
                    vpc,
                    map_public_ip_on_launch: subnet.map_public_ip_on_launch,
                    tags: config.tags.clone(),
                },
            )?;
            self.publish(&id, paths::subnet_id(&config.name, &subnet.name), secure_subnet.subnet_id())?;
            self.subnets.insert(subnet.name.clone(), secure_subnet);
        }
        Ok(())
    }

    fn create_nat_gateways(&mut self) -> NetworkResult<()> {
        let config = self.config;
        for nat in &config.nat_gateways {
            let subnet = self.subnets.get(&nat.subnet).ok_or_else(|| NetworkError::UnknownSubnet {
                vpc: config.name.clone(),
                owner: format!("NAT gateway {}", nat.name),
                subnet: nat.subnet.clone(),
            })?;

            let id = self.id(&["NatGateway", &nat.name]);
            let nat_gateway = SecureNatGateway::new(self.stack, &id, &nat.name, subnet)?;
            self.publish(
                &id,
                paths::nat_gateway_id(&config.name, &nat.name),
                nat_gateway.nat_gateway_id(),
            )?;
            self.nat_gateways.insert(nat.name.clone(), nat_gateway);
        }
        Ok(())
    }

    fn create_transit_gateway_attachments(&mut self, vpc: &SecureVpc) -> NetworkResult<()> {
        let config = self.config;
        for attachment in &config.transit_gateway_attachments {
            let tgw_name = &attachment.transit_gateway.name;
            let transit_gateway_id = self.transit_gateways.get(tgw_name).cloned().ok_or_else(|| {
                NetworkError::UnknownTransitGateway {
                    vpc: config.name.clone(),
                    context: format!("Transit gateway attachment {}", attachment.name),
                    transit_gateway: tgw_name.clone(),
                }
            })?;

            let mut subnet_ids = Vec::with_capacity(attachment.subnets.len());
            for subnet in &attachment.subnets {
                let secure_subnet = self.subnets.get(subnet).ok_or_else(|| NetworkError::UnknownSubnet {
                    vpc: config.name.clone(),
                    owner: format!("Transit gateway attachment {}", attachment.name),
                    subnet: subnet.clone(),
                })?;
                subnet_ids.push(secure_subnet.subnet_id().clone());
            }

            let options = attachment.options;
            let id = self.id(&["TransitGatewayAttachment", &attachment.name]);
            let tgw_attachment = TransitGatewayAttachment::new(
                self.stack,
                &id,
                TransitGatewayAttachmentProps {
                    name: attachment.name.clone(),
                    transit_gateway_id,
                    subnet_ids,
                    vpc,
                    options: TransitGatewayAttachmentOptions {
                        appliance_mode_support: options.appliance_mode_support,
                        dns_support: options.dns_support,
                        ipv6_support: options.ipv6_support,
                    },
                },
            )?;
            self.publish(
                &id,
                paths::transit_gateway_attachment_id(&config.name, &attachment.name),
                tgw_attachment.transit_gateway_attachment_id(),
            )?;
            self.attachments.insert(tgw_name.clone(), tgw_attachment);
        }
        Ok(())
    }

    fn create_routes(&mut self) -> NetworkResult<()> {
        let config = self.config;
        for table in &config.route_tables {
            // Every declared table was created in the route table step.
            let Some(route_table) = self.route_tables.get(&table.name).cloned() else {
                continue;
            };
            for route in &table.routes {
                self.create_route(&route_table, route)?;
            }
        }
        Ok(())
    }

    fn create_route(&mut self, route_table: &SecureRouteTable, route: &RouteTableEntryConfig) -> NetworkResult<()> {
        let config = self.config;
        let vpc_name = config.name.as_str();
        let table_name = route_table.name();
        let missing = |field: &'static str| NetworkError::MissingRouteField {
            vpc: vpc_name.to_string(),
            route_table: table_name.to_string(),
            route: route.name.clone(),
            field,
        };

        let id = self.id(&["RouteTable", table_name, "Route", &route.name]);

        match route.target_type {
            RouteTargetType::TransitGateway => {
                let destination = route.destination.as_deref().ok_or_else(|| missing("destination"))?;
                let target = route.target.as_deref().ok_or_else(|| missing("target"))?;
                let transit_gateway_id = self.transit_gateways.get(target).ok_or_else(|| {
                    NetworkError::UnknownTransitGateway {
                        vpc: vpc_name.to_string(),
                        context: format!("Route {} in route table {}", route.name, table_name),
                        transit_gateway: target.to_string(),
                    }
                })?;
                let attachment = self.attachments.get(target).ok_or_else(|| {
                    NetworkError::UnknownTransitGatewayAttachment {
                        vpc: vpc_name.to_string(),
                        route_table: table_name.to_string(),
                        route: route.name.clone(),
                        transit_gateway: target.to_string(),
                    }
                })?;
                route_table.add_transit_gateway_route(
                    self.stack,
                    &id,
                    destination,
                    transit_gateway_id,
                    attachment,
                )?;
            }
            RouteTargetType::NatGateway => {
                let destination = route.destination.as_deref().ok_or_else(|| missing("destination"))?;
                let target = route.target.as_deref().ok_or_else(|| missing("target"))?;
                let nat_gateway = self.nat_gateways.get(target).ok_or_else(|| NetworkError::UnknownNatGateway {
                    vpc: vpc_name.to_string(),
                    route_table: table_name.to_string(),
                    route: route.name.clone(),
                    nat_gateway: target.to_string(),
                })?;
                route_table.add_nat_gateway_route(self.stack, &id, destination, nat_gateway.nat_gateway_id())?;
            }
            RouteTargetType::InternetGateway => {
                let destination = route.destination.as_deref().ok_or_else(|| missing("destination"))?;
                route_table.add_internet_gateway_route(self.stack, &id, destination)?;
            }
            RouteTargetType::GatewayEndpoint => {
                let target = route.target.as_deref().ok_or_else(|| missing("target"))?;
                let service = GatewayEndpointService::from_name(target).ok_or_else(|| {
                    NetworkError::UnknownEndpointService {
                        vpc: vpc_name.to_string(),
                        route_table: table_name.to_string(),
                        route: route.name.clone(),
                        service: target.to_string(),
                    }
                })?;
                let route_table_id = route_table.route_table_id().clone();
                self.endpoint_route_tables
                    .entry(service)
                    .or_default()
                    .insert(route_table_id);
            }
        }
        Ok(())
    }

    fn create_gateway_endpoints(&mut self, vpc: &SecureVpc) -> NetworkResult<()> {
        let config = self.config;
        for service in config.gateway_endpoint_services() {
            let Some(route_table_ids) = self.endpoint_route_tables.get(&service) else {
                warn!(
                    "VPC {} declares a {} gateway endpoint but no route table uses it; skipping",
                    config.name, service
                );
                continue;
            };
            let route_table_ids: Vec<Token> = route_table_ids.iter().cloned().collect();

            let id = self.id(&["GatewayEndpoint", service.as_str()]);
            GatewayEndpoint::new(
                self.stack,
                &id,
                GatewayEndpointProps {
                    vpc,
                    service: service.as_str(),
                    route_table_ids,
                },
            )?;
        }
        Ok(())
    }

    fn create_query_log_associations(&mut self, vpc: &SecureVpc) -> NetworkResult<()> {
        let config = self.config;
        for name in &config.query_logs {
            let config_id =
                ParameterLookup::value_for_string_parameter(self.stack, &paths::query_log_config_id(name))?;
            let id = self.id(&["QueryLogAssociation", name]);
            QueryLoggingConfigAssociation::new(self.stack, &id, &config_id, vpc)?;
        }
        Ok(())
    }
}

/// Expand a bare zone letter (`a`) into a zone name in `region`.
fn availability_zone(region: &str, zone: &str) -> String {
    if zone.len() == 1 && zone.chars().all(|c| c.is_ascii_alphabetic()) {
        format!("{}{}", region, zone)
    } else {
        zone.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_availability_zone_expansion() {
        assert_eq!(availability_zone("us-east-1", "a"), "us-east-1a");
        assert_eq!(availability_zone("us-east-1", "eu-west-1b"), "eu-west-1b");
    }
}
