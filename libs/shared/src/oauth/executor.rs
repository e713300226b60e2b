//! The OAuth executor seam used by the login controller

use super::error::OAuthResult;
use crate::models::auth::OAuthParams;
use async_trait::async_trait;

/// Performs an interactive authorization flow for a set of scopes
///
/// Implementations resolve with whatever the provider handed back; the
/// caller decides whether the params are complete. User cancellation and
/// timeouts are reported as [`OAuthError::Canceled`] and
/// [`OAuthError::Timeout`].
///
/// [`OAuthError::Canceled`]: super::error::OAuthError::Canceled
/// [`OAuthError::Timeout`]: super::error::OAuthError::Timeout
#[async_trait]
pub trait OAuthExecutor: Send + Sync {
    async fn authorize(&self, scopes: &[&str]) -> OAuthResult<OAuthParams>;
}
