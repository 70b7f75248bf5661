//! Error types for the construct layer.

use thiserror::Error;

/// Result type alias for construct operations.
pub type ConstructResult<T> = Result<T, ConstructError>;

/// Errors that can occur while building a stack.
#[derive(Error, Debug)]
pub enum ConstructError {
    #[error("Duplicate logical id in stack {stack}: {logical_id}")]
    DuplicateLogicalId { stack: String, logical_id: String },

    #[error("Unknown resource in stack {stack}: {logical_id}")]
    UnknownResource { stack: String, logical_id: String },

    #[error("Invalid logical id: {0:?}")]
    InvalidLogicalId(String),

    #[error("Properties of {0} must be a JSON object")]
    InvalidProperties(String),

    #[error("Parameter {path} is already published by stack {stack}")]
    DuplicateParameter { stack: String, path: String },

    #[error(
        "Route table {route_table} cannot route to an internet gateway: VPC {vpc} has no internet gateway"
    )]
    MissingInternetGateway { vpc: String, route_table: String },

    #[error("Cross-account role {0} needs at least one trusted account")]
    NoTrustedAccounts(String),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}
