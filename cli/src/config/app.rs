use config::ConfigError;
use devhub_shared::github::GITHUB_API_ENDPOINT;
use devhub_shared::oauth::OAuthConfig;
use devhub_shared::oauth::config::DEFAULT_API_ENDPOINT;
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::file::ConfigFile;
use super::{DEFAULT_CALLBACK_PORT, DEFAULT_OAUTH_TIMEOUT_SECS, DEVHUB_CONFIG_PATH};

/// Resolved application configuration
#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
    pub api_endpoint: String,
    pub github_api_endpoint: String,
    pub callback_port: u16,
    pub oauth_timeout: Duration,
    pub open_browser: bool,
    pub log_file: Option<PathBuf>,
    /// Path to the config file the values were read from
    pub config_path: PathBuf,
}

impl AppConfig {
    pub fn load<P: AsRef<Path>>(custom_config_path: Option<P>) -> Result<Self, ConfigError> {
        let config_path = Self::get_config_path(custom_config_path)?;
        let file = ConfigFile::load(&config_path)?;
        Self::build(file, config_path)
    }

    pub(crate) fn build(file: ConfigFile, config_path: PathBuf) -> Result<Self, ConfigError> {
        let oauth_timeout_secs = file.oauth_timeout_secs.unwrap_or(DEFAULT_OAUTH_TIMEOUT_SECS);
        if oauth_timeout_secs == 0 {
            return Err(ConfigError::Message(
                "oauth_timeout_secs must be greater than zero".into(),
            ));
        }

        let api_endpoint = file
            .api_endpoint
            .unwrap_or_else(|| DEFAULT_API_ENDPOINT.to_string());
        Self::validate_endpoint("api_endpoint", &api_endpoint)?;

        let github_api_endpoint = file
            .github_api_endpoint
            .unwrap_or_else(|| GITHUB_API_ENDPOINT.to_string());
        Self::validate_endpoint("github_api_endpoint", &github_api_endpoint)?;

        Ok(Self {
            api_endpoint,
            github_api_endpoint,
            callback_port: file.callback_port.unwrap_or(DEFAULT_CALLBACK_PORT),
            oauth_timeout: Duration::from_secs(oauth_timeout_secs),
            open_browser: file.open_browser.unwrap_or(true),
            log_file: file.log_file.map(PathBuf::from),
            config_path,
        })
    }

    /// Apply command-line / environment overrides
    pub fn with_overrides(
        mut self,
        api_endpoint: Option<String>,
        github_api_endpoint: Option<String>,
    ) -> Result<Self, ConfigError> {
        if let Some(endpoint) = api_endpoint {
            Self::validate_endpoint("api_endpoint", &endpoint)?;
            self.api_endpoint = endpoint;
        }
        if let Some(endpoint) = github_api_endpoint {
            Self::validate_endpoint("github_api_endpoint", &endpoint)?;
            self.github_api_endpoint = endpoint;
        }
        Ok(self)
    }

    /// Executor configuration derived from these settings
    pub fn oauth_config(&self) -> OAuthConfig {
        OAuthConfig::new(&self.api_endpoint, self.callback_port, self.oauth_timeout)
            .with_open_browser(self.open_browser)
    }

    fn get_config_path<P: AsRef<Path>>(custom_path: Option<P>) -> Result<PathBuf, ConfigError> {
        match custom_path {
            Some(path) => Ok(path.as_ref().to_path_buf()),
            None => dirs::home_dir()
                .map(|home| home.join(DEVHUB_CONFIG_PATH))
                .ok_or_else(|| ConfigError::Message("Could not determine home directory".into())),
        }
    }

    fn validate_endpoint(key: &str, endpoint: &str) -> Result<(), ConfigError> {
        if endpoint.starts_with("https://") || endpoint.starts_with("http://") {
            Ok(())
        } else {
            Err(ConfigError::Message(format!(
                "{} must be an http(s) URL, got '{}'",
                key, endpoint
            )))
        }
    }
}
