//! Configuration file reading utilities.

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::accounts::AccountsConfig;
use crate::error::{ConfigError, ConfigResult};
use crate::models::NetworkConfig;

/// File stem of the network configuration.
pub const NETWORK_CONFIG: &str = "network-config";
/// File stem of the accounts configuration.
pub const ACCOUNTS_CONFIG: &str = "accounts-config";

/// Supported serialization formats, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Yaml,
    Json,
    Toml,
}

impl ConfigFormat {
    pub const EXTENSIONS: [&'static str; 4] = ["yaml", "yml", "json", "toml"];

    pub fn from_path(path: &Path) -> ConfigResult<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => Ok(ConfigFormat::Yaml),
            Some("json") => Ok(ConfigFormat::Json),
            Some("toml") => Ok(ConfigFormat::Toml),
            _ => Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
        }
    }
}

/// Network and accounts configuration loaded together.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AcceleratorConfig {
    pub network: NetworkConfig,
    pub accounts: AccountsConfig,
}

/// Reader for configuration files.
pub struct ConfigReader;

impl ConfigReader {
    /// Load `network-config` and `accounts-config` from a directory.
    pub fn load_dir(dir: impl AsRef<Path>) -> ConfigResult<AcceleratorConfig> {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            return Err(ConfigError::NotFound(dir.to_path_buf()));
        }

        let network = Self::read_file(Self::find(dir, NETWORK_CONFIG)?)?;
        let accounts = Self::read_file(Self::find(dir, ACCOUNTS_CONFIG)?)?;
        Ok(AcceleratorConfig { network, accounts })
    }

    /// Locate `{stem}.{ext}` in `dir`, trying each supported extension.
    pub fn find(dir: &Path, stem: &str) -> ConfigResult<PathBuf> {
        ConfigFormat::EXTENSIONS
            .iter()
            .map(|ext| dir.join(format!("{}.{}", stem, ext)))
            .find(|candidate| candidate.is_file())
            .ok_or_else(|| ConfigError::MissingFile {
                dir: dir.to_path_buf(),
                name: stem.to_string(),
            })
    }

    /// Read and deserialize a single file.
    pub fn read_file<T: DeserializeOwned>(path: impl AsRef<Path>) -> ConfigResult<T> {
        let path = path.as_ref();
        debug!("Reading configuration from {:?}", path);

        let format = ConfigFormat::from_path(path)?;
        let content = fs::read_to_string(path)?;
        Self::parse(&content, format).map_err(|e| ConfigError::InvalidFormat {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Deserialize configuration text in the given format.
    pub fn parse<T: DeserializeOwned>(content: &str, format: ConfigFormat) -> ConfigResult<T> {
        let value = match format {
            ConfigFormat::Yaml => serde_yaml::from_str(content)?,
            ConfigFormat::Json => serde_json::from_str(content)?,
            ConfigFormat::Toml => toml::from_str(content)?,
        };
        Ok(value)
    }
}
