//! Defines the structure mirroring the TOML configuration file format.

use crate::core::error::{AppError, Result};
use serde::Deserialize;
use std::path::Path;

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    #[serde(default)]
    pub(crate) network: NetworkConfig,
    #[serde(default)]
    pub(crate) smtp: SmtpConfig,
    #[serde(default)]
    pub(crate) proxy: ProxyConfig,
    #[serde(default)]
    pub(crate) output: OutputConfig,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub(crate) struct NetworkConfig {
    pub(crate) request_timeout: Option<u64>,
    pub(crate) precall_delay_ms: Option<u64>,
    pub(crate) threads: Option<usize>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub(crate) struct SmtpConfig {
    pub(crate) from_email: Option<String>,
    pub(crate) hello_name: Option<String>,
    pub(crate) smtp_port: Option<u16>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub(crate) struct ProxyConfig {
    pub(crate) host: Option<String>,
    pub(crate) port: Option<u16>,
    pub(crate) username: Option<String>,
    pub(crate) password: Option<String>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub(crate) struct OutputConfig {
    pub(crate) directory: Option<String>,
    pub(crate) max_write_attempts: Option<u32>,
    pub(crate) retry_backoff_ms: Option<u64>,
}

impl ConfigFile {
    /// Reads and parses a TOML configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!(
                "cannot read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        toml::from_str(&raw).map_err(|e| {
            AppError::Config(format!(
                "cannot parse config file '{}': {}",
                path.display(),
                e
            ))
        })
    }
}
