//! Error types for network stack assembly.

use thiserror::Error;

use accel_constructs::ConstructError;

/// Result type alias for network operations.
pub type NetworkResult<T> = Result<T, NetworkError>;

/// Errors that abort synthesis of a network stack.
///
/// Every variant names the unresolved reference and where it was made.
#[derive(Error, Debug)]
pub enum NetworkError {
    #[error("{context} references unknown account: {account}")]
    UnknownAccount { context: String, account: String },

    #[error("Subnet {subnet} in VPC {vpc} references unknown route table: {route_table}")]
    UnknownRouteTable {
        vpc: String,
        subnet: String,
        route_table: String,
    },

    #[error("{owner} in VPC {vpc} references unknown subnet: {subnet}")]
    UnknownSubnet {
        vpc: String,
        owner: String,
        subnet: String,
    },

    #[error(
        "Route {route} in route table {route_table} of VPC {vpc} references unknown NAT gateway: {nat_gateway}"
    )]
    UnknownNatGateway {
        vpc: String,
        route_table: String,
        route: String,
        nat_gateway: String,
    },

    #[error("{context} in VPC {vpc} references unknown transit gateway: {transit_gateway}")]
    UnknownTransitGateway {
        vpc: String,
        context: String,
        transit_gateway: String,
    },

    #[error(
        "Route {route} in route table {route_table} of VPC {vpc} references transit gateway {transit_gateway}, which has no attachment in the VPC"
    )]
    UnknownTransitGatewayAttachment {
        vpc: String,
        route_table: String,
        route: String,
        transit_gateway: String,
    },

    #[error(
        "Route {route} in route table {route_table} of VPC {vpc} references unknown gateway endpoint service: {service}"
    )]
    UnknownEndpointService {
        vpc: String,
        route_table: String,
        route: String,
        service: String,
    },

    #[error("Route {route} in route table {route_table} of VPC {vpc} has no {field}")]
    MissingRouteField {
        vpc: String,
        route_table: String,
        route: String,
        field: &'static str,
    },

    #[error(transparent)]
    Construct(#[from] ConstructError),
}

impl NetworkError {
    /// True for the internet gateway invariant violation raised by the
    /// route table construct.
    pub fn is_missing_internet_gateway(&self) -> bool {
        matches!(
            self,
            NetworkError::Construct(ConstructError::MissingInternetGateway { .. })
        )
    }
}
