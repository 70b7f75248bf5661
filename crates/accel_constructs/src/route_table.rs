//! `SecureRouteTable` and its routes.

use tracing::debug;

use crate::error::{ConstructError, ConstructResult};
use crate::stack::{name_tags, Stack};
use crate::token::Token;
use crate::transit_gateway::TransitGatewayAttachment;
use crate::vpc::{InternetGateway, SecureVpc};

#[derive(Debug, Clone)]
pub struct SecureRouteTable {
    name: String,
    vpc_name: String,
    route_table_id: Token,
    internet_gateway: Option<InternetGateway>,
}

impl SecureRouteTable {
    pub fn new(stack: &mut Stack, id: &str, name: &str, vpc: &SecureVpc) -> ConstructResult<Self> {
        let logical_id = stack.add_resource(
            id,
            "AWS::EC2::RouteTable",
            serde_json::json!({
                "Tags": name_tags(name, &Default::default()),
                "VpcId": vpc.vpc_id(),
            }),
        )?;

        Ok(Self {
            name: name.to_string(),
            vpc_name: vpc.name().to_string(),
            route_table_id: Token::Ref(logical_id),
            internet_gateway: vpc.internet_gateway().cloned(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn route_table_id(&self) -> &Token {
        &self.route_table_id
    }

    /// Route `destination` through a transit gateway. The route deploys after
    /// the VPC's attachment to that gateway.
    pub fn add_transit_gateway_route(
        &self,
        stack: &mut Stack,
        id: &str,
        destination: &str,
        transit_gateway_id: &Token,
        attachment: &TransitGatewayAttachment,
    ) -> ConstructResult<Token> {
        let route = self.add_route(stack, id, destination, "TransitGatewayId", transit_gateway_id)?;
        stack.add_dependency(&route, attachment.logical_id())?;
        Ok(Token::Ref(route))
    }

    pub fn add_nat_gateway_route(
        &self,
        stack: &mut Stack,
        id: &str,
        destination: &str,
        nat_gateway_id: &Token,
    ) -> ConstructResult<Token> {
        let route = self.add_route(stack, id, destination, "NatGatewayId", nat_gateway_id)?;
        Ok(Token::Ref(route))
    }

    /// Route `destination` through the VPC's internet gateway.
    ///
    /// Fails when the owning VPC was created without one.
    pub fn add_internet_gateway_route(
        &self,
        stack: &mut Stack,
        id: &str,
        destination: &str,
    ) -> ConstructResult<Token> {
        let igw = self
            .internet_gateway
            .as_ref()
            .ok_or_else(|| ConstructError::MissingInternetGateway {
                vpc: self.vpc_name.clone(),
                route_table: self.name.clone(),
            })?;

        let route = self.add_route(stack, id, destination, "GatewayId", &igw.internet_gateway_id)?;
        stack.add_dependency(&route, &igw.attachment_logical_id)?;
        Ok(Token::Ref(route))
    }

    fn add_route(
        &self,
        stack: &mut Stack,
        id: &str,
        destination: &str,
        target_property: &str,
        target: &Token,
    ) -> ConstructResult<String> {
        debug!(
            "Route table {}: {} via {} {}",
            self.name, destination, target_property, target
        );
        let mut properties = serde_json::json!({
            "DestinationCidrBlock": destination,
            "RouteTableId": self.route_table_id,
        });
        properties[target_property] = target.to_value();
        stack.add_resource(id, "AWS::EC2::Route", properties)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stack::Environment;
    use crate::vpc::SecureVpcProps;

    fn vpc(stack: &mut Stack, internet_gateway: bool) -> SecureVpc {
        SecureVpc::new(
            stack,
            "VpcA",
            SecureVpcProps {
                name: "A".into(),
                ipv4_cidr_block: "10.0.0.0/16".into(),
                internet_gateway,
                ..Default::default()
            },
        )
        .unwrap()
    }

    #[test]
    fn test_internet_route_requires_gateway() {
        let mut stack = Stack::new("Test", Environment::new("111111111111", "us-east-1"));
        let vpc = vpc(&mut stack, false);
        let table = SecureRouteTable::new(&mut stack, "VpcARouteTablePublic", "Public", &vpc).unwrap();
        let before = stack.resource_count();

        let err = table
            .add_internet_gateway_route(&mut stack, "VpcARouteTablePublicDefault", "0.0.0.0/0")
            .unwrap_err();

        assert!(matches!(
            err,
            ConstructError::MissingInternetGateway { ref vpc, ref route_table }
                if vpc == "A" && route_table == "Public"
        ));
        assert_eq!(stack.resource_count(), before);
    }

    #[test]
    fn test_internet_route_depends_on_attachment() {
        let mut stack = Stack::new("Test", Environment::new("111111111111", "us-east-1"));
        let vpc = vpc(&mut stack, true);
        let table = SecureRouteTable::new(&mut stack, "VpcARouteTablePublic", "Public", &vpc).unwrap();

        let route = table
            .add_internet_gateway_route(&mut stack, "VpcARouteTablePublicDefault", "0.0.0.0/0")
            .unwrap();

        let resource = stack.resource(route.logical_id().unwrap()).unwrap();
        assert_eq!(
            resource.property("GatewayId").unwrap(),
            &serde_json::json!({ "Ref": "VpcAInternetGateway" })
        );
        assert!(resource.depends_on.contains("VpcAInternetGatewayAttachment"));
    }

    #[test]
    fn test_nat_route_targets_nat_gateway() {
        let mut stack = Stack::new("Test", Environment::new("111111111111", "us-east-1"));
        let vpc = vpc(&mut stack, false);
        let table = SecureRouteTable::new(&mut stack, "VpcARouteTablePrivate", "Private", &vpc).unwrap();

        table
            .add_nat_gateway_route(&mut stack, "VpcARouteTablePrivateNat", "0.0.0.0/0", &Token::reference("Nat"))
            .unwrap();

        let resource = stack.resource("VpcARouteTablePrivateNat").unwrap();
        assert_eq!(resource.property("NatGatewayId").unwrap(), &serde_json::json!({ "Ref": "Nat" }));
        assert_eq!(resource.property("DestinationCidrBlock").unwrap(), "0.0.0.0/0");
    }
}
