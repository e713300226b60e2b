//! Configuration management for the DevHub CLI.
//!
//! Settings live in `~/.devhub/config.toml`; every key is optional and falls
//! back to the defaults below.

mod app;
mod file;


pub use app::AppConfig;
pub use file::ConfigFile;

// Constants
pub const DEVHUB_CONFIG_PATH: &str = ".devhub/config.toml";
pub const DEFAULT_CALLBACK_PORT: u16 = 5269;
pub const DEFAULT_OAUTH_TIMEOUT_SECS: u64 = 120;
