//! `SecureVpc`: a VPC with an optional attached internet gateway.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::error::ConstructResult;
use crate::stack::{name_tags, Stack};
use crate::token::Token;

/// Tenancy of instances launched into the VPC.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstanceTenancy {
    Default,
    Dedicated,
}

impl InstanceTenancy {
    pub fn as_str(&self) -> &'static str {
        match self {
            InstanceTenancy::Default => "default",
            InstanceTenancy::Dedicated => "dedicated",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SecureVpcProps {
    pub name: String,
    pub ipv4_cidr_block: String,
    pub enable_dns_hostnames: Option<bool>,
    pub enable_dns_support: Option<bool>,
    pub instance_tenancy: Option<InstanceTenancy>,
    pub internet_gateway: bool,
    pub tags: BTreeMap<String, String>,
}

/// Internet gateway attached to a VPC.
#[derive(Debug, Clone)]
pub struct InternetGateway {
    pub internet_gateway_id: Token,
    /// Logical id of the `VPCGatewayAttachment`; routes through the gateway
    /// must deploy after it.
    pub attachment_logical_id: String,
}

#[derive(Debug, Clone)]
pub struct SecureVpc {
    name: String,
    vpc_id: Token,
    internet_gateway: Option<InternetGateway>,
}

impl SecureVpc {
    pub fn new(stack: &mut Stack, id: &str, props: SecureVpcProps) -> ConstructResult<Self> {
        let mut properties = Map::new();
        properties.insert("CidrBlock".into(), Value::String(props.ipv4_cidr_block.clone()));
        if let Some(hostnames) = props.enable_dns_hostnames {
            properties.insert("EnableDnsHostnames".into(), Value::Bool(hostnames));
        }
        if let Some(support) = props.enable_dns_support {
            properties.insert("EnableDnsSupport".into(), Value::Bool(support));
        }
        if let Some(tenancy) = props.instance_tenancy {
            properties.insert("InstanceTenancy".into(), Value::String(tenancy.as_str().into()));
        }
        properties.insert("Tags".into(), name_tags(&props.name, &props.tags));

        let vpc_logical_id = stack.add_resource(id, "AWS::EC2::VPC", Value::Object(properties))?;
        let vpc_id = Token::Ref(vpc_logical_id);

        let internet_gateway = if props.internet_gateway {
            let igw_logical_id = stack.add_resource(
                &format!("{}InternetGateway", id),
                "AWS::EC2::InternetGateway",
                serde_json::json!({ "Tags": name_tags(&props.name, &props.tags) }),
            )?;
            let internet_gateway_id = Token::Ref(igw_logical_id);
            let attachment_logical_id = stack.add_resource(
                &format!("{}InternetGatewayAttachment", id),
                "AWS::EC2::VPCGatewayAttachment",
                serde_json::json!({
                    "InternetGatewayId": internet_gateway_id,
                    "VpcId": vpc_id,
                }),
            )?;
            Some(InternetGateway {
                internet_gateway_id,
                attachment_logical_id,
            })
        } else {
            None
        };

        Ok(Self {
            name: props.name,
            vpc_id,
            internet_gateway,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn vpc_id(&self) -> &Token {
        &self.vpc_id
    }

    /// `None` when the VPC was created without an internet gateway.
    pub fn internet_gateway_id(&self) -> Option<&Token> {
        self.internet_gateway.as_ref().map(|igw| &igw.internet_gateway_id)
    }

    pub fn internet_gateway(&self) -> Option<&InternetGateway> {
        self.internet_gateway.as_ref()
    }
}
