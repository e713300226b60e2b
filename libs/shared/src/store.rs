//! Store facade consumed by the login controller, plus an in-memory session
//! store backing it for the command line
//!
//! The controller only ever calls `login_request` and reads the two
//! projections. Failures inside the store are the store's own business:
//! they are logged and recorded in the snapshot, never returned.

use crate::github::GitHubClient;
use crate::models::auth::CredentialPair;
use crate::models::user::GitHubUser;
use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::watch;

/// Errors raised while the session store resolves a login
#[derive(Error, Debug)]
pub enum StoreError {
    /// HTTP request error
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// GitHub answered with a non-success status
    #[error("GitHub API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    /// Response body could not be parsed
    #[error("Parse error: {0}")]
    ParseError(String),
}

impl StoreError {
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    pub fn parse(msg: impl Into<String>) -> Self {
        Self::ParseError(msg.into())
    }
}

/// Global application state as seen by the login controller
#[async_trait]
pub trait StoreFacade: Send + Sync {
    /// Start the global login with fresh credentials and wait until the
    /// resulting state update is committed
    async fn login_request(&self, credentials: CredentialPair);

    /// Whether a login is currently being processed
    fn is_logging_in(&self) -> bool;

    /// The signed-in user, if any
    fn current_user(&self) -> Option<GitHubUser>;
}

/// Point-in-time view of the session store
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub is_logging_in: bool,
    pub user: Option<GitHubUser>,
    pub last_error: Option<String>,
}

/// In-memory store that resolves the GitHub user for a credential pair
///
/// Tokens are not kept once the user has been resolved.
pub struct SessionStore {
    github: GitHubClient,
    state: watch::Sender<SessionSnapshot>,
}

impl SessionStore {
    pub fn new(github: GitHubClient) -> Self {
        let (state, _) = watch::channel(SessionSnapshot::default());
        Self { github, state }
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.state.borrow().clone()
    }

    /// Observe every state change
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.state.subscribe()
    }

    /// Forget the signed-in user
    pub fn logout(&self) {
        self.state.send_modify(|state| {
            state.user = None;
            state.last_error = None;
        });
    }
}

#[async_trait]
impl StoreFacade for SessionStore {
    async fn login_request(&self, credentials: CredentialPair) {
        self.state.send_modify(|state| {
            state.is_logging_in = true;
            state.last_error = None;
        });

        let result = self.github.current_user(&credentials.github_token).await;

        self.state.send_modify(|state| {
            state.is_logging_in = false;
            match result {
                Ok(user) => {
                    tracing::info!(login = %user.login, "signed in to GitHub");
                    state.user = Some(user);
                }
                Err(e) => {
                    tracing::error!("Failed to resolve GitHub user: {}", e);
                    state.last_error = Some(e.to_string());
                }
            }
        });
    }

    fn is_logging_in(&self) -> bool {
        self.state.borrow().is_logging_in
    }

    fn current_user(&self) -> Option<GitHubUser> {
        self.state.borrow().user.clone()
    }
}
