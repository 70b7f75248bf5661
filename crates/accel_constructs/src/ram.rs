//! Resource Access Manager lookups.
//!
//! Shared resources owned by another account are discovered through two
//! custom resources: one finds the share by owner and name, the other finds
//! an item of a given type inside that share. Both are point-in-time reads
//! performed by the deployment engine; synthesis only wires them up.

use crate::error::ConstructResult;
use crate::stack::Stack;
use crate::token::Token;

/// Lambda backing the share lookups, deployed by the accelerator's
/// bootstrap stack in every account and region.
pub const LOOKUP_PROVIDER_FUNCTION: &str = "AcceleratorResourceShareLookup";

/// Lookups are always made from the consuming side of a share.
const RESOURCE_OWNER_OTHER_ACCOUNTS: &str = "OTHER-ACCOUNTS";

pub struct ResourceShareLookupProps<'a> {
    pub resource_share_name: &'a str,
    pub owner_account_id: &'a str,
}

#[derive(Debug, Clone)]
pub struct ResourceShareLookup {
    logical_id: String,
    resource_share_arn: Token,
}

impl ResourceShareLookup {
    pub fn from_lookup(
        stack: &mut Stack,
        id: &str,
        props: ResourceShareLookupProps<'_>,
    ) -> ConstructResult<Self> {
        let logical_id = stack.add_resource(
            id,
            "Custom::ResourceShareLookup",
            serde_json::json!({
                "OwningAccountId": props.owner_account_id,
                "ResourceOwner": RESOURCE_OWNER_OTHER_ACCOUNTS,
                "ResourceShareName": props.resource_share_name,
                "ServiceToken": service_token(),
            }),
        )?;
        Ok(Self {
            resource_share_arn: Token::get_att(logical_id.clone(), "ResourceShareArn"),
            logical_id,
        })
    }

    pub fn resource_share_arn(&self) -> &Token {
        &self.resource_share_arn
    }
}

pub struct ResourceShareItemLookupProps<'a> {
    pub resource_share: &'a ResourceShareLookup,
    /// RAM resource type, e.g. `ec2:TransitGateway`.
    pub resource_type: &'a str,
}

#[derive(Debug, Clone)]
pub struct ResourceShareItemLookup {
    resource_share_item_id: Token,
}

impl ResourceShareItemLookup {
    pub fn from_lookup(
        stack: &mut Stack,
        id: &str,
        props: ResourceShareItemLookupProps<'_>,
    ) -> ConstructResult<Self> {
        let logical_id = stack.add_resource(
            id,
            "Custom::ResourceShareItemLookup",
            serde_json::json!({
                "ResourceShareArn": props.resource_share.resource_share_arn(),
                "ResourceType": props.resource_type,
                "ServiceToken": service_token(),
            }),
        )?;
        stack.add_dependency(&logical_id, &props.resource_share.logical_id)?;
        Ok(Self {
            resource_share_item_id: Token::get_att(logical_id, "ResourceShareItemId"),
        })
    }

    pub fn resource_share_item_id(&self) -> &Token {
        &self.resource_share_item_id
    }
}

fn service_token() -> Token {
    Token::sub(format!(
        "arn:${{AWS::Partition}}:lambda:${{AWS::Region}}:${{AWS::AccountId}}:function:{}",
        LOOKUP_PROVIDER_FUNCTION
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stack::Environment;

    #[test]
    fn test_item_lookup_chains_share_lookup() {
        let mut stack = Stack::new("Test", Environment::new("111111111111", "us-east-1"));
        let share = ResourceShareLookup::from_lookup(
            &mut stack,
            "MainTransitGatewayShare",
            ResourceShareLookupProps {
                resource_share_name: "MainTransitGatewayShare",
                owner_account_id: "222222222222",
            },
        )
        .unwrap();
        let item = ResourceShareItemLookup::from_lookup(
            &mut stack,
            "MainTransitGatewayShareItem",
            ResourceShareItemLookupProps {
                resource_share: &share,
                resource_type: "ec2:TransitGateway",
            },
        )
        .unwrap();

        assert_eq!(
            item.resource_share_item_id(),
            &Token::get_att("MainTransitGatewayShareItem", "ResourceShareItemId")
        );
        let share_resource = stack.resource("MainTransitGatewayShare").unwrap();
        assert_eq!(share_resource.property("ResourceOwner").unwrap(), "OTHER-ACCOUNTS");
        assert_eq!(share_resource.property("OwningAccountId").unwrap(), "222222222222");

        let item_resource = stack.resource("MainTransitGatewayShareItem").unwrap();
        assert_eq!(
            item_resource.property("ResourceShareArn").unwrap(),
            &serde_json::json!({ "Fn::GetAtt": ["MainTransitGatewayShare", "ResourceShareArn"] })
        );
        assert!(item_resource.depends_on.contains("MainTransitGatewayShare"));
    }
}
