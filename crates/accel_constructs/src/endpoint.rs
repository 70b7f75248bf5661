//! Gateway VPC endpoints.

use crate::error::ConstructResult;
use crate::stack::Stack;
use crate::token::Token;
use crate::vpc::SecureVpc;

pub struct GatewayEndpointProps<'a> {
    pub vpc: &'a SecureVpc,
    /// Short service name, e.g. `s3`.
    pub service: &'a str,
    pub route_table_ids: Vec<Token>,
}

/// `AWS::EC2::VPCEndpoint` of type `Gateway`.
pub struct GatewayEndpoint;

impl GatewayEndpoint {
    /// Create the endpoint and return a `Ref` to it.
    pub fn new(stack: &mut Stack, id: &str, props: GatewayEndpointProps<'_>) -> ConstructResult<Token> {
        let service_name = format!("com.amazonaws.{}.{}", stack.env().region, props.service);
        let logical_id = stack.add_resource(
            id,
            "AWS::EC2::VPCEndpoint",
            serde_json::json!({
                "RouteTableIds": props.route_table_ids,
                "ServiceName": service_name,
                "VpcEndpointType": "Gateway",
                "VpcId": props.vpc.vpc_id(),
            }),
        )?;
        Ok(Token::Ref(logical_id))
    }
}
