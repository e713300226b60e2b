//! Credentials produced by the GitHub sign-in flow
//!
//! The OAuth executor hands back the raw callback parameters as
//! [`OAuthParams`]. Only a result carrying both tokens becomes a
//! [`CredentialPair`]; everything else is a missing-credentials failure.

use crate::oauth::error::{OAuthError, OAuthResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Raw parameters delivered by the OAuth callback
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct OAuthParams {
    /// DevHub application token
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_token: Option<String>,
    /// GitHub access token
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github_token: Option<String>,
    /// Scopes GitHub actually granted (space separated)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github_scope: Option<String>,
    /// Token type reported by GitHub (usually "bearer")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github_token_type: Option<String>,
}

impl OAuthParams {
    /// Create params carrying both tokens
    pub fn with_tokens(app_token: impl Into<String>, github_token: impl Into<String>) -> Self {
        Self {
            app_token: Some(app_token.into()),
            github_token: Some(github_token.into()),
            ..Self::default()
        }
    }

    /// Granted scopes as a list
    pub fn granted_scopes(&self) -> Vec<&str> {
        self.github_scope
            .as_deref()
            .map(|scope| {
                scope
                    .split([' ', ','])
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Token pair forwarded to the store after a successful sign-in
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialPair {
    pub app_token: String,
    pub github_token: String,
}

impl CredentialPair {
    pub fn new(app_token: impl Into<String>, github_token: impl Into<String>) -> Self {
        Self {
            app_token: app_token.into(),
            github_token: github_token.into(),
        }
    }

    /// Validate callback params. An absent or empty token is an error,
    /// never a partial success.
    pub fn from_params(params: OAuthParams) -> OAuthResult<Self> {
        match (params.app_token, params.github_token) {
            (Some(app_token), Some(github_token))
                if !app_token.is_empty() && !github_token.is_empty() =>
            {
                Ok(Self {
                    app_token,
                    github_token,
                })
            }
            _ => Err(OAuthError::MissingCredentials),
        }
    }
}

impl fmt::Debug for CredentialPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialPair")
            .field("app_token", &"[REDACTED]")
            .field("github_token", &"[REDACTED]")
            .finish()
    }
}
