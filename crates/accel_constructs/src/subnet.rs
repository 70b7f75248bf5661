//! `SecureSubnet`: a subnet that is always associated with a route table.

use std::collections::BTreeMap;

use crate::error::ConstructResult;
use crate::route_table::SecureRouteTable;
use crate::stack::{name_tags, Stack};
use crate::token::Token;
use crate::vpc::SecureVpc;

pub struct SecureSubnetProps<'a> {
    pub name: String,
    pub availability_zone: String,
    pub ipv4_cidr_block: String,
    pub route_table: &'a SecureRouteTable,
    pub vpc: &'a SecureVpc,
    pub map_public_ip_on_launch: Option<bool>,
    pub tags: BTreeMap<String, String>,
}

#[derive(Debug, Clone)]
pub struct SecureSubnet {
    name: String,
    subnet_id: Token,
}

impl SecureSubnet {
    pub fn new(stack: &mut Stack, id: &str, props: SecureSubnetProps<'_>) -> ConstructResult<Self> {
        let mut properties = serde_json::json!({
            "AvailabilityZone": props.availability_zone,
            "CidrBlock": props.ipv4_cidr_block,
            "Tags": name_tags(&props.name, &props.tags),
            "VpcId": props.vpc.vpc_id(),
        });
        if let Some(map_public_ip) = props.map_public_ip_on_launch {
            properties["MapPublicIpOnLaunch"] = serde_json::Value::Bool(map_public_ip);
        }

        let subnet_id = Token::Ref(stack.add_resource(id, "AWS::EC2::Subnet", properties)?);

        stack.add_resource(
            &format!("{}RouteTableAssociation", id),
            "AWS::EC2::SubnetRouteTableAssociation",
            serde_json::json!({
                "RouteTableId": props.route_table.route_table_id(),
                "SubnetId": subnet_id,
            }),
        )?;

        Ok(Self {
            name: props.name,
            subnet_id,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn subnet_id(&self) -> &Token {
        &self.subnet_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stack::Environment;
    use crate::vpc::SecureVpcProps;

    #[test]
    fn test_subnet_is_associated_with_route_table() {
        let mut stack = Stack::new("Test", Environment::new("111111111111", "us-east-1"));
        let vpc = SecureVpc::new(
            &mut stack,
            "VpcA",
            SecureVpcProps {
                name: "A".into(),
                ipv4_cidr_block: "10.0.0.0/16".into(),
                ..Default::default()
            },
        )
        .unwrap();
        let route_table = SecureRouteTable::new(&mut stack, "VpcARouteTablePublic", "Public", &vpc).unwrap();

        let subnet = SecureSubnet::new(
            &mut stack,
            "VpcASubnetWeb",
            SecureSubnetProps {
                name: "Web".into(),
                availability_zone: "us-east-1a".into(),
                ipv4_cidr_block: "10.0.0.0/24".into(),
                route_table: &route_table,
                vpc: &vpc,
                map_public_ip_on_launch: Some(true),
                tags: BTreeMap::new(),
            },
        )
        .unwrap();

        assert_eq!(subnet.subnet_id(), &Token::reference("VpcASubnetWeb"));
        let association = stack.resource("VpcASubnetWebRouteTableAssociation").unwrap();
        assert_eq!(
            association.property("RouteTableId").unwrap(),
            &serde_json::json!({ "Ref": "VpcARouteTablePublic" })
        );
        assert_eq!(
            stack.resource("VpcASubnetWeb").unwrap().property("MapPublicIpOnLaunch").unwrap(),
            true
        );
    }
}
