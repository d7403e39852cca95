// Copyright(C) Mundis.
pub mod client;
pub mod contract;

pub use {
    client::{BindingConfig, ClientConfig, NetworkConfig},
    contract::ContractConfig,
};

use {
    serde::{Deserialize, Serialize},
    std::{fs, path::Path},
    thiserror::Error,
};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("HTTPS endpoint required")]
    MissingEndpoint,
    #[error("Invalid endpoint `{0}`")]
    InvalidEndpoint(String),
    #[error("Could not read config file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("Could not parse config file {path}: {source}")]
    Json {
        path: String,
        source: serde_json::Error,
    },
}

/// Everything a command needs, as read from an optional JSON file:
/// `{ "network": {..}, "binding": {..}, "contract": {..} }`.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct ToolConfig {
    #[serde(flatten)]
    pub client: ClientConfig,
    pub contract: ContractConfig,
}

impl ToolConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let display = path.display().to_string();
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: display.clone(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| ConfigError::Json {
            path: display,
            source,
        })
    }

    /// Loads `path` when given, falls back to defaults otherwise.
    pub fn load_or_default<P: AsRef<Path>>(path: Option<P>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }
}
