//! # accel_network
//!
//! Assembles the per-account, per-region network VPC stack.
//!
//! For every VPC the configuration places in the stack's environment this
//! crate creates the VPC, its route tables, subnets, NAT gateways, transit
//! gateway attachments, routes, gateway endpoints and query-log
//! associations, and publishes each identifier as an SSM parameter under
//! `/accelerator/network/vpc/{vpc}/...`.
//!
//! Transit gateways owned by another account are found through the resource
//! share that account publishes; those owners are then trusted by a role
//! allowed to describe the resulting attachments.
//!
//! ## Example
//!
//! ```rust,no_run
//! use accel_config::ConfigReader;
//! use accel_network::NetworkApp;
//!
//! let config = ConfigReader::load_dir("./config").unwrap();
//! for stack in NetworkApp::new(&config).synth_all().unwrap() {
//!     println!("{}", stack.synth().to_json().unwrap());
//! }
//! ```

pub mod app;
pub mod error;
mod maps;
pub mod paths;
pub mod transit_gateway;
pub mod vpc_stack;

pub use app::NetworkApp;
pub use error::{NetworkError, NetworkResult};
pub use transit_gateway::{share_name, TransitGatewayResolver, TransitGatewaySource};
pub use vpc_stack::{NetworkVpcStack, DESCRIBE_TGW_ATTACHMENTS_ROLE};
