//! OAuth configuration types

use std::time::Duration;

/// Default DevHub API endpoint that brokers the GitHub OAuth dance
pub const DEFAULT_API_ENDPOINT: &str = "https://api.devhubapp.com";

/// Path the loopback listener answers on
pub const CALLBACK_PATH: &str = "/callback";

/// How many consecutive ports are tried before giving up
pub const CALLBACK_PORT_ATTEMPTS: u16 = 10;

/// Configuration for the browser-based OAuth executor
#[derive(Debug, Clone)]
pub struct OAuthConfig {
    /// DevHub API base URL
    pub api_endpoint: String,
    /// First loopback port to try; `0` lets the OS choose
    pub callback_port: u16,
    /// How long to wait for the callback before failing with `Timeout`
    pub timeout: Duration,
    /// Launch the system browser with the authorization URL
    pub open_browser: bool,
}

impl Default for OAuthConfig {
    fn default() -> Self {
        Self {
            api_endpoint: DEFAULT_API_ENDPOINT.to_string(),
            callback_port: 5269,
            timeout: Duration::from_secs(120),
            open_browser: true,
        }
    }
}

impl OAuthConfig {
    /// Create a new OAuth configuration
    pub fn new(api_endpoint: impl Into<String>, callback_port: u16, timeout: Duration) -> Self {
        Self {
            api_endpoint: api_endpoint.into(),
            callback_port,
            timeout,
            open_browser: true,
        }
    }

    pub fn with_open_browser(mut self, open_browser: bool) -> Self {
        self.open_browser = open_browser;
        self
    }

    /// Loopback redirect URI for a bound port
    pub fn redirect_uri(port: u16) -> String {
        format!("http://127.0.0.1:{}{}", port, CALLBACK_PATH)
    }

    /// Authorization URL for the given scopes and redirect URI
    pub fn authorize_url(&self, scopes: &[&str], redirect_uri: &str) -> String {
        format!(
            "{}/github/oauth?scope={}&callback_url={}",
            self.api_endpoint.trim_end_matches('/'),
            urlencoding::encode(&scopes.join(" ")),
            urlencoding::encode(redirect_uri),
        )
    }
}
