//! SSM parameter paths shared with other stacks.
//!
//! Consumers read identifiers by these exact paths, so segment order and
//! spelling must not change.

/// Root of every network parameter.
pub const NETWORK_PREFIX: &str = "/accelerator/network";

pub fn vpc_id(vpc: &str) -> String {
    format!("{}/vpc/{}/id", NETWORK_PREFIX, vpc)
}

pub fn route_table_id(vpc: &str, route_table: &str) -> String {
    format!("{}/vpc/{}/routeTable/{}/id", NETWORK_PREFIX, vpc, route_table)
}

pub fn subnet_id(vpc: &str, subnet: &str) -> String {
    format!("{}/vpc/{}/subnet/{}/id", NETWORK_PREFIX, vpc, subnet)
}

pub fn nat_gateway_id(vpc: &str, nat_gateway: &str) -> String {
    format!("{}/vpc/{}/natGateway/{}/id", NETWORK_PREFIX, vpc, nat_gateway)
}

pub fn transit_gateway_attachment_id(vpc: &str, attachment: &str) -> String {
    format!(
        "{}/vpc/{}/transitGatewayAttachment/{}/id",
        NETWORK_PREFIX, vpc, attachment
    )
}

/// Published by the stack that owns the transit gateway.
pub fn transit_gateway_id(transit_gateway: &str) -> String {
    format!("{}/transitGateways/{}/id", NETWORK_PREFIX, transit_gateway)
}

/// Published by the stack that owns the query-logging config.
pub fn query_log_config_id(name: &str) -> String {
    format!("{}/route53Resolver/queryLogConfigs/{}/id", NETWORK_PREFIX, name)
}
