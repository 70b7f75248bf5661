//! # accel_constructs
//!
//! Typed CloudFormation constructs for accelerator networking.
//!
//! Each construct registers one or more resources on a [`Stack`] and hands
//! back identifier [`Token`]s. The secure wrappers add the invariants the
//! underlying resource types do not enforce themselves.
//!
//! ## Constructs
//!
//! - [`SecureVpc`] - VPC with an optional attached internet gateway
//! - [`SecureRouteTable`] - route table with transit gateway, NAT and internet routes
//! - [`SecureSubnet`] - subnet plus its mandatory route table association
//! - [`SecureNatGateway`] - elastic IP and NAT gateway
//! - [`TransitGatewayAttachment`], [`GatewayEndpoint`], [`QueryLoggingConfigAssociation`]
//! - [`ParameterLookup`] / [`PublishedParameter`] - SSM parameter exchange
//! - [`ResourceShareLookup`] / [`ResourceShareItemLookup`] - cross-account discovery
//! - [`CrossAccountRole`]
//!
//! ## Example
//!
//! ```rust
//! use accel_constructs::{Environment, SecureRouteTable, SecureVpc, SecureVpcProps, Stack};
//!
//! let mut stack = Stack::new("Network", Environment::new("111111111111", "us-east-1"));
//! let vpc = SecureVpc::new(
//!     &mut stack,
//!     "VpcA",
//!     SecureVpcProps {
//!         name: "A".into(),
//!         ipv4_cidr_block: "10.0.0.0/16".into(),
//!         internet_gateway: true,
//!         ..Default::default()
//!     },
//! )
//! .unwrap();
//! let table = SecureRouteTable::new(&mut stack, "VpcARouteTablePublic", "Public", &vpc).unwrap();
//! table.add_internet_gateway_route(&mut stack, "VpcARouteTablePublicDefault", "0.0.0.0/0").unwrap();
//!
//! println!("{}", stack.synth().to_json().unwrap());
//! ```

pub mod endpoint;
pub mod error;
pub mod iam;
pub mod nat_gateway;
pub mod ram;
pub mod resolver;
pub mod route_table;
pub mod ssm;
pub mod stack;
pub mod subnet;
pub mod token;
pub mod transit_gateway;
pub mod vpc;

pub use endpoint::{GatewayEndpoint, GatewayEndpointProps};
pub use error::{ConstructError, ConstructResult};
pub use iam::{CrossAccountRole, CrossAccountRoleProps};
pub use nat_gateway::SecureNatGateway;
pub use ram::{
    ResourceShareItemLookup, ResourceShareItemLookupProps, ResourceShareLookup,
    ResourceShareLookupProps,
};
pub use resolver::QueryLoggingConfigAssociation;
pub use route_table::SecureRouteTable;
pub use ssm::{ParameterLookup, PublishedParameter};
pub use stack::{logical_id, name_tags, CfnParameter, CfnResource, Environment, Stack, Template};
pub use subnet::{SecureSubnet, SecureSubnetProps};
pub use token::Token;
pub use transit_gateway::{
    TransitGatewayAttachment, TransitGatewayAttachmentOptions, TransitGatewayAttachmentProps,
};
pub use vpc::{InstanceTenancy, InternetGateway, SecureVpc, SecureVpcProps};
