//! `SecureNatGateway`: an elastic IP plus a NAT gateway in one subnet.

use crate::error::ConstructResult;
use crate::stack::{name_tags, Stack};
use crate::subnet::SecureSubnet;
use crate::token::Token;

#[derive(Debug, Clone)]
pub struct SecureNatGateway {
    name: String,
    nat_gateway_id: Token,
}

impl SecureNatGateway {
    pub fn new(stack: &mut Stack, id: &str, name: &str, subnet: &SecureSubnet) -> ConstructResult<Self> {
        let tags = name_tags(name, &Default::default());
        let eip = stack.add_resource(
            &format!("{}Eip", id),
            "AWS::EC2::EIP",
            serde_json::json!({ "Domain": "vpc", "Tags": tags }),
        )?;

        let nat = stack.add_resource(
            id,
            "AWS::EC2::NatGateway",
            serde_json::json!({
                "AllocationId": Token::get_att(eip, "AllocationId"),
                "SubnetId": subnet.subnet_id(),
                "Tags": tags,
            }),
        )?;

        Ok(Self {
            name: name.to_string(),
            nat_gateway_id: Token::Ref(nat),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn nat_gateway_id(&self) -> &Token {
        &self.nat_gateway_id
    }
}
