//! Data models for the network configuration.
//!
//! Child definitions reference their siblings by name. References must point
//! at definitions declared earlier in dependency order: route tables before
//! subnets, subnets before NAT gateways and attachments.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Root of `network-config`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkConfig {
    #[serde(default)]
    pub vpcs: Vec<VpcConfig>,
}

/// Instance tenancy of a VPC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InstanceTenancy {
    Default,
    Dedicated,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VpcConfig {
    pub name: String,
    /// Owning account name, resolved through `accounts-config`.
    pub account: String,
    pub region: String,
    /// Primary IPv4 CIDR block.
    pub cidr: String,
    #[serde(default)]
    pub internet_gateway: Option<bool>,
    #[serde(default)]
    pub enable_dns_hostnames: Option<bool>,
    #[serde(default)]
    pub enable_dns_support: Option<bool>,
    #[serde(default)]
    pub instance_tenancy: Option<InstanceTenancy>,
    #[serde(default)]
    pub route_tables: Vec<RouteTableConfig>,
    #[serde(default)]
    pub subnets: Vec<SubnetConfig>,
    #[serde(default)]
    pub nat_gateways: Vec<NatGatewayConfig>,
    #[serde(default)]
    pub transit_gateway_attachments: Vec<TransitGatewayAttachmentConfig>,
    #[serde(default)]
    pub gateway_endpoints: Option<GatewayEndpointsConfig>,
    /// Route53 Resolver query-logging configs to associate.
    #[serde(default)]
    pub query_logs: Vec<String>,
    #[serde(default)]
    pub tags: BTreeMap<String, String>,
}

impl VpcConfig {
    pub fn has_internet_gateway(&self) -> bool {
        self.internet_gateway.unwrap_or(false)
    }

    /// Services with a declared gateway endpoint, in declaration order.
    pub fn gateway_endpoint_services(&self) -> Vec<GatewayEndpointService> {
        self.gateway_endpoints
            .as_ref()
            .map(|g| g.endpoints.iter().map(|e| e.service).collect())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteTableConfig {
    pub name: String,
    #[serde(default)]
    pub routes: Vec<RouteTableEntryConfig>,
}

/// Kind of target a route entry points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RouteTargetType {
    TransitGateway,
    NatGateway,
    InternetGateway,
    GatewayEndpoint,
}

impl RouteTargetType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RouteTargetType::TransitGateway => "transitGateway",
            RouteTargetType::NatGateway => "natGateway",
            RouteTargetType::InternetGateway => "internetGateway",
            RouteTargetType::GatewayEndpoint => "gatewayEndpoint",
        }
    }
}

impl std::fmt::Display for RouteTargetType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteTableEntryConfig {
    pub name: String,
    #[serde(default)]
    pub destination: Option<String>,
    #[serde(rename = "type")]
    pub target_type: RouteTargetType,
    /// NAT gateway name, transit gateway name, or endpoint service
    /// (`s3`, `dynamodb`). Not used for internet gateway routes.
    #[serde(default)]
    pub target: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubnetConfig {
    pub name: String,
    /// Either a full zone name (`us-east-1a`) or the zone letter (`a`).
    pub availability_zone: String,
    pub route_table: String,
    pub ipv4_cidr_block: String,
    #[serde(default)]
    pub map_public_ip_on_launch: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NatGatewayConfig {
    pub name: String,
    pub subnet: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransitGatewayReference {
    pub name: String,
    /// Account name owning the transit gateway.
    pub account: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransitGatewayAttachmentOptions {
    #[serde(default)]
    pub appliance_mode_support: Option<bool>,
    #[serde(default)]
    pub dns_support: Option<bool>,
    #[serde(default)]
    pub ipv6_support: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransitGatewayAttachmentConfig {
    pub name: String,
    pub transit_gateway: TransitGatewayReference,
    pub subnets: Vec<String>,
    #[serde(default)]
    pub options: TransitGatewayAttachmentOptions,
}

/// Services reachable through a gateway endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GatewayEndpointService {
    S3,
    Dynamodb,
}

impl GatewayEndpointService {
    pub fn as_str(&self) -> &'static str {
        match self {
            GatewayEndpointService::S3 => "s3",
            GatewayEndpointService::Dynamodb => "dynamodb",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "s3" => Some(GatewayEndpointService::S3),
            "dynamodb" => Some(GatewayEndpointService::Dynamodb),
            _ => None,
        }
    }
}

impl std::fmt::Display for GatewayEndpointService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayEndpointConfig {
    pub service: GatewayEndpointService,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayEndpointsConfig {
    #[serde(default)]
    pub endpoints: Vec<GatewayEndpointConfig>,
}
