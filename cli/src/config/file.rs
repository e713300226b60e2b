//! Configuration file structure and operations.

use config::ConfigError;
use devhub_shared::github::GITHUB_API_ENDPOINT;
use devhub_shared::oauth::config::DEFAULT_API_ENDPOINT;
use serde::{Deserialize, Serialize};
use std::io;
use std::path::Path;

use super::{DEFAULT_CALLBACK_PORT, DEFAULT_OAUTH_TIMEOUT_SECS};

/// The configuration file as written on disk.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct ConfigFile {
    /// DevHub API endpoint brokering the GitHub OAuth flow
    pub api_endpoint: Option<String>,
    /// GitHub REST endpoint (GitHub Enterprise users point this elsewhere)
    pub github_api_endpoint: Option<String>,
    /// First loopback port tried for the OAuth callback
    pub callback_port: Option<u16>,
    /// Seconds to wait for the browser flow before giving up
    pub oauth_timeout_secs: Option<u64>,
    /// Launch the system browser automatically
    pub open_browser: Option<bool>,
    /// Write logs to this file in addition to the console
    pub log_file: Option<String>,
}

impl ConfigFile {
    /// Load from disk; a missing file yields an empty configuration.
    pub fn load<P: AsRef<Path>>(config_path: P) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(config_path.as_ref()) {
            Ok(content) => toml::from_str::<ConfigFile>(&content).map_err(|e| {
                ConfigError::Message(format!(
                    "Failed to parse config file {}: {}",
                    config_path.as_ref().display(),
                    e
                ))
            }),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(ConfigFile::default()),
            Err(e) => Err(ConfigError::Message(format!(
                "Failed to read config file: {}",
                e
            ))),
        }
    }

    /// A complete file with every key set to its default.
    pub fn sample() -> Self {
        ConfigFile {
            api_endpoint: Some(DEFAULT_API_ENDPOINT.to_string()),
            github_api_endpoint: Some(GITHUB_API_ENDPOINT.to_string()),
            callback_port: Some(DEFAULT_CALLBACK_PORT),
            oauth_timeout_secs: Some(DEFAULT_OAUTH_TIMEOUT_SECS),
            open_browser: Some(true),
            log_file: None,
        }
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Message(format!("Failed to serialize config: {}", e)))
    }
}
