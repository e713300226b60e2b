//! Browser-based OAuth executor
//!
//! Opens the DevHub authorization page in the system browser and waits for
//! the redirect on a loopback listener. Ctrl-C while waiting counts as the
//! user backing out.

use super::callback::CallbackServer;
use super::config::OAuthConfig;
use super::error::{OAuthError, OAuthResult};
use super::executor::OAuthExecutor;
use crate::models::auth::OAuthParams;
use async_trait::async_trait;
use std::sync::Arc;

/// What the user needs to see while the flow is pending
#[derive(Debug, Clone)]
pub struct AuthorizationPrompt {
    /// Page the user has to visit
    pub url: String,
    /// Where the browser will be redirected once GitHub is done
    pub redirect_uri: String,
    /// Whether the system browser was launched
    pub browser_opened: bool,
}

type PromptHandler = Arc<dyn Fn(&AuthorizationPrompt) + Send + Sync>;

pub struct BrowserOAuthExecutor {
    config: OAuthConfig,
    on_prompt: Option<PromptHandler>,
}

impl BrowserOAuthExecutor {
    pub fn new(config: OAuthConfig) -> Self {
        Self {
            config,
            on_prompt: None,
        }
    }

    /// Called once per flow, after the listener is up and the browser was
    /// (or was not) opened
    pub fn on_prompt<F>(mut self, handler: F) -> Self
    where
        F: Fn(&AuthorizationPrompt) + Send + Sync + 'static,
    {
        self.on_prompt = Some(Arc::new(handler));
        self
    }

    pub fn config(&self) -> &OAuthConfig {
        &self.config
    }
}

#[async_trait]
impl OAuthExecutor for BrowserOAuthExecutor {
    async fn authorize(&self, scopes: &[&str]) -> OAuthResult<OAuthParams> {
        let mut server = CallbackServer::start(self.config.callback_port).await?;
        let redirect_uri = OAuthConfig::redirect_uri(server.port());
        let url = self.config.authorize_url(scopes, &redirect_uri);

        let browser_opened = self.config.open_browser && open_browser(&url);
        if let Some(handler) = &self.on_prompt {
            handler(&AuthorizationPrompt {
                url,
                redirect_uri,
                browser_opened,
            });
        }

        let result = tokio::select! {
            result = server.wait() => result,
            _ = tokio::time::sleep(self.config.timeout) => Err(OAuthError::Timeout),
            _ = interrupted() => Err(OAuthError::Canceled),
        };

        match &result {
            Ok(params) => tracing::debug!(
                granted = ?params.granted_scopes(),
                "OAuth callback received"
            ),
            Err(e) if e.is_silent() => tracing::info!("OAuth flow ended: {}", e),
            Err(e) => tracing::warn!("OAuth flow failed: {}", e),
        }

        result
    }
}

fn open_browser(url: &str) -> bool {
    match open::that(url) {
        Ok(_) => true,
        Err(e) => {
            tracing::warn!("Could not open browser automatically: {}", e);
            false
        }
    }
}

async fn interrupted() {
    if tokio::signal::ctrl_c().await.is_err() {
        std::future::pending::<()>().await;
    }
}
