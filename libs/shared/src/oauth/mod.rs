//! GitHub OAuth sign-in support
//!
//! # Architecture
//!
//! - `method`: the two access levels and the scopes they request
//! - `config`: executor configuration and URL building
//! - `error`: error types for the sign-in flow
//! - `executor`: the `OAuthExecutor` trait the login controller depends on
//! - `callback`: loopback listener receiving the OAuth redirect
//! - `browser`: executor that drives the flow through the system browser

pub mod browser;
pub mod callback;
pub mod config;
pub mod error;
pub mod executor;
pub mod method;

// Re-export commonly used types
pub use browser::{AuthorizationPrompt, BrowserOAuthExecutor};
pub use config::OAuthConfig;
pub use error::{OAuthError, OAuthResult};
pub use executor::OAuthExecutor;
pub use method::LoginMethod;
