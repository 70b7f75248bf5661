//! Transit gateway VPC attachments.

use serde_json::{Map, Value};

use crate::error::ConstructResult;
use crate::stack::{name_tags, Stack};
use crate::token::Token;
use crate::vpc::SecureVpc;

/// Optional attachment features. `None` leaves the service default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransitGatewayAttachmentOptions {
    pub appliance_mode_support: Option<bool>,
    pub dns_support: Option<bool>,
    pub ipv6_support: Option<bool>,
}

impl TransitGatewayAttachmentOptions {
    fn to_value(self) -> Option<Value> {
        let mut options = Map::new();
        let flags = [
            ("ApplianceModeSupport", self.appliance_mode_support),
            ("DnsSupport", self.dns_support),
            ("Ipv6Support", self.ipv6_support),
        ];
        for (key, flag) in flags {
            if let Some(enabled) = flag {
                let state = if enabled { "enable" } else { "disable" };
                options.insert(key.to_string(), Value::String(state.to_string()));
            }
        }
        (!options.is_empty()).then_some(Value::Object(options))
    }
}

pub struct TransitGatewayAttachmentProps<'a> {
    pub name: String,
    pub transit_gateway_id: Token,
    pub subnet_ids: Vec<Token>,
    pub vpc: &'a SecureVpc,
    pub options: TransitGatewayAttachmentOptions,
}

#[derive(Debug, Clone)]
pub struct TransitGatewayAttachment {
    name: String,
    logical_id: String,
    transit_gateway_attachment_id: Token,
}

impl TransitGatewayAttachment {
    pub fn new(
        stack: &mut Stack,
        id: &str,
        props: TransitGatewayAttachmentProps<'_>,
    ) -> ConstructResult<Self> {
        let mut properties = serde_json::json!({
            "SubnetIds": props.subnet_ids,
            "Tags": name_tags(&props.name, &Default::default()),
            "TransitGatewayId": props.transit_gateway_id,
            "VpcId": props.vpc.vpc_id(),
        });
        if let Some(options) = props.options.to_value() {
            properties["Options"] = options;
        }

        let logical_id = stack.add_resource(id, "AWS::EC2::TransitGatewayVpcAttachment", properties)?;

        Ok(Self {
            name: props.name,
            transit_gateway_attachment_id: Token::Ref(logical_id.clone()),
            logical_id,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn logical_id(&self) -> &str {
        &self.logical_id
    }

    pub fn transit_gateway_attachment_id(&self) -> &Token {
        &self.transit_gateway_attachment_id
    }
}
