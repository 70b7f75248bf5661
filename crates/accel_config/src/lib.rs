//! # accel_config
//!
//! Declarative configuration for accelerator networking.
//!
//! A configuration directory holds two files:
//! - `network-config` - VPCs and their route tables, subnets, NAT gateways,
//!   transit gateway attachments, gateway endpoints and query logs
//! - `accounts-config` - account names and ids
//!
//! Each may be YAML, JSON or TOML; the format follows the file extension.
//!
//! ## Example
//!
//! ```rust,no_run
//! use accel_config::{ConfigReader, ConfigValidator};
//!
//! let config = ConfigReader::load_dir("./config").unwrap();
//! let result = ConfigValidator::validate(&config);
//! for error in &result.errors {
//!     eprintln!("Error: {}", error);
//! }
//! ```

pub mod accounts;
pub mod error;
pub mod models;
pub mod reader;
pub mod validator;

pub use accounts::{AccountConfig, AccountResolver, AccountsConfig};
pub use error::{ConfigError, ConfigResult};
pub use models::*;
pub use reader::{AcceleratorConfig, ConfigFormat, ConfigReader, ACCOUNTS_CONFIG, NETWORK_CONFIG};
pub use validator::{ConfigValidator, ValidationResult};
