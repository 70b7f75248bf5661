//! Error types for configuration loading.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors that can occur while loading or validating configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration directory not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Missing configuration file {name} in {}", .dir.display())]
    MissingFile { dir: PathBuf, name: String },

    #[error("Unsupported configuration format: {}", .0.display())]
    UnsupportedFormat(PathBuf),

    #[error("Invalid configuration in file {}: {message}", .path.display())]
    InvalidFormat { path: PathBuf, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),
}
