//! Configuration validation.
//!
//! Validation reports every problem it finds instead of stopping at the
//! first one. Synthesis still fails fast on its own; this is the
//! operator-facing pre-flight check.

use std::collections::{BTreeMap, HashSet};

use ipnet::Ipv4Net;

use crate::accounts::AccountResolver;
use crate::models::{GatewayEndpointService, RouteTargetType, VpcConfig};
use crate::reader::AcceleratorConfig;

/// Errors block synthesis; warnings describe config that synthesizes but
/// probably not as intended.
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }

    pub fn add_warning(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    pub fn merge(&mut self, other: ValidationResult) {
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
    }
}

/// Validator for accelerator configuration.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate network configuration against the declared accounts.
    pub fn validate(config: &AcceleratorConfig) -> ValidationResult {
        let mut result = ValidationResult::default();

        let mut vpc_names = HashSet::new();
        for vpc in &config.network.vpcs {
            if !vpc_names.insert(vpc.name.as_str()) {
                result.add_error(format!("Duplicate VPC name: {}", vpc.name));
            }
            result.merge(Self::validate_vpc(vpc, &config.accounts));
        }

        result.merge(Self::validate_transit_gateway_owners(config));
        result
    }

    /// Parse an IPv4 CIDR block, e.g. `10.0.0.0/16`.
    pub fn parse_cidr(value: &str) -> Option<Ipv4Net> {
        value.parse::<Ipv4Net>().ok()
    }

    /// Validate a single VPC definition.
    pub fn validate_vpc(vpc: &VpcConfig, accounts: &dyn AccountResolver) -> ValidationResult {
        let mut result = ValidationResult::default();
        let name = &vpc.name;

        if name.is_empty() {
            result.add_error("VPC name cannot be empty");
        }
        if accounts.account_id(&vpc.account).is_none() {
            result.add_error(format!("VPC {} references unknown account: {}", name, vpc.account));
        }
        let vpc_cidr = Self::parse_cidr(&vpc.cidr);
        if vpc_cidr.is_none() {
            result.add_error(format!("VPC {} has invalid CIDR: {}", name, vpc.cidr));
        }

        let scope = format!("VPC {}", name);
        let route_tables = unique_names(
            &mut result,
            &scope,
            "route table",
            vpc.route_tables.iter().map(|r| r.name.as_str()),
        );
        let subnets = unique_names(
            &mut result,
            &scope,
            "subnet",
            vpc.subnets.iter().map(|s| s.name.as_str()),
        );
        let nat_gateways = unique_names(
            &mut result,
            &scope,
            "NAT gateway",
            vpc.nat_gateways.iter().map(|n| n.name.as_str()),
        );
        unique_names(
            &mut result,
            &scope,
            "transit gateway attachment",
            vpc.transit_gateway_attachments.iter().map(|t| t.name.as_str()),
        );

        for subnet in &vpc.subnets {
            if !route_tables.contains(subnet.route_table.as_str()) {
                result.add_error(format!(
                    "Subnet {} in VPC {} references unknown route table: {}",
                    subnet.name, name, subnet.route_table
                ));
            }
            match (Self::parse_cidr(&subnet.ipv4_cidr_block), vpc_cidr) {
                (None, _) => result.add_error(format!(
                    "Subnet {} in VPC {} has invalid CIDR: {}",
                    subnet.name, name, subnet.ipv4_cidr_block
                )),
                (Some(block), Some(vpc_block)) if !vpc_block.contains(&block) => result.add_error(format!(
                    "Subnet {} CIDR {} is outside VPC {} CIDR {}",
                    subnet.name, block, name, vpc_block
                )),
                _ => {}
            }
        }

        for nat in &vpc.nat_gateways {
            if !subnets.contains(nat.subnet.as_str()) {
                result.add_error(format!(
                    "NAT gateway {} in VPC {} references unknown subnet: {}",
                    nat.name, name, nat.subnet
                ));
            }
        }

        let mut attached: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
        for attachment in &vpc.transit_gateway_attachments {
            attached
                .entry(attachment.transit_gateway.name.as_str())
                .or_default()
                .push(attachment.name.as_str());
            if accounts.account_id(&attachment.transit_gateway.account).is_none() {
                result.add_error(format!(
                    "Transit gateway attachment {} in VPC {} references unknown account: {}",
                    attachment.name, name, attachment.transit_gateway.account
                ));
            }
            for subnet in &attachment.subnets {
                if !subnets.contains(subnet.as_str()) {
                    result.add_error(format!(
                        "Transit gateway attachment {} in VPC {} references unknown subnet: {}",
                        attachment.name, name, subnet
                    ));
                }
            }
        }
        for (tgw, names) in &attached {
            if names.len() > 1 {
                result.add_warning(format!(
                    "VPC {} has {} attachments to transit gateway {} ({}); only the last is used for routes",
                    name,
                    names.len(),
                    tgw,
                    names.join(", ")
                ));
            }
        }

        let declared_services = vpc.gateway_endpoint_services();
        let mut requested_services = HashSet::new();

        for table in &vpc.route_tables {
            unique_names(
                &mut result,
                &format!("route table {} of VPC {}", table.name, name),
                "route",
                table.routes.iter().map(|r| r.name.as_str()),
            );
            for route in &table.routes {
                let context = format!("Route {} in route table {} of VPC {}", route.name, table.name, name);

                match (&route.destination, route.target_type) {
                    (None, RouteTargetType::GatewayEndpoint) => {}
                    (None, _) => result.add_error(format!("{} has no destination", context)),
                    (Some(destination), _) if Self::parse_cidr(destination).is_none() => {
                        result.add_error(format!("{} has invalid destination: {}", context, destination))
                    }
                    _ => {}
                }

                let target = route.target.as_deref();
                match route.target_type {
                    RouteTargetType::InternetGateway => {
                        if !vpc.has_internet_gateway() {
                            result.add_error(format!(
                                "{} targets an internet gateway but the VPC has none",
                                context
                            ));
                        }
                    }
                    RouteTargetType::NatGateway => match target {
                        Some(t) if nat_gateways.contains(t) => {}
                        Some(t) => result.add_error(format!("{} references unknown NAT gateway: {}", context, t)),
                        None => result.add_error(format!("{} has no NAT gateway target", context)),
                    },
                    RouteTargetType::TransitGateway => match target {
                        Some(t) if attached.contains_key(t) => {}
                        Some(t) => result.add_error(format!(
                            "{} references transit gateway {} without an attachment in the VPC",
                            context, t
                        )),
                        None => result.add_error(format!("{} has no transit gateway target", context)),
                    },
                    RouteTargetType::GatewayEndpoint => {
                        match target.and_then(GatewayEndpointService::from_name) {
                            Some(service) => {
                                requested_services.insert(service);
                                if !declared_services.contains(&service) {
                                    result.add_warning(format!(
                                        "{} requests a {} endpoint that is not declared in gatewayEndpoints",
                                        context, service
                                    ));
                                }
                            }
                            None => result.add_error(format!(
                                "{} references unknown endpoint service: {}",
                                context,
                                target.unwrap_or("<none>")
                            )),
                        }
                    }
                }
            }
        }

        for service in declared_services {
            if !requested_services.contains(&service) {
                result.add_warning(format!(
                    "VPC {} declares a {} gateway endpoint that no route table uses",
                    name, service
                ));
            }
        }

        for query_log in &vpc.query_logs {
            if query_log.is_empty() {
                result.add_error(format!("VPC {} has an empty query log name", name));
            }
        }
        unique_names(&mut result, &scope, "query log", vpc.query_logs.iter().map(String::as_str));

        result
    }

    /// A transit gateway must be owned by the same account everywhere it is referenced.
    pub fn validate_transit_gateway_owners(config: &AcceleratorConfig) -> ValidationResult {
        let mut result = ValidationResult::default();
        let mut owners: BTreeMap<&str, &str> = BTreeMap::new();

        for vpc in &config.network.vpcs {
            for attachment in &vpc.transit_gateway_attachments {
                let tgw = &attachment.transit_gateway;
                match owners.get(tgw.name.as_str()) {
                    Some(owner) if *owner != tgw.account => result.add_error(format!(
                        "Transit gateway {} is referenced with owners {} and {}",
                        tgw.name, owner, tgw.account
                    )),
                    Some(_) => {}
                    None => {
                        owners.insert(&tgw.name, &tgw.account);
                    }
                }
            }
        }

        result
    }
}

fn unique_names<'a>(
    result: &mut ValidationResult,
    scope: &str,
    kind: &str,
    names: impl Iterator<Item = &'a str>,
) -> HashSet<&'a str> {
    let mut seen = HashSet::new();
    for name in names {
        if !seen.insert(name) {
            result.add_error(format!("Duplicate {} name in {}: {}", kind, scope, name));
        }
    }
    seen
}
