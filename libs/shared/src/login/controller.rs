use super::options::LoginOption;
use super::state::LoginAttemptState;
use crate::models::auth::CredentialPair;
use crate::oauth::error::OAuthError;
use crate::oauth::executor::OAuthExecutor;
use crate::oauth::method::LoginMethod;
use crate::store::StoreFacade;
use std::sync::Arc;
use tokio::sync::watch;

/// Blocking, user-visible notification surface
pub trait Notifier: Send + Sync {
    fn alert(&self, message: &str);
}

/// Why an attempt ended without credentials or an alert
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DismissReason {
    Canceled,
    Timeout,
}

/// How a sign-in attempt ended, for callers that want to report it
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    /// Credentials were handed to the store
    Completed,
    /// The user canceled or the flow timed out; nothing was shown
    Dismissed { reason: DismissReason },
    /// The failure was logged and surfaced through the notifier
    Failed { message: String },
}

/// Mediates between a sign-in intent, the OAuth executor and the store
///
/// The attempt state is set when a sign-in starts and is left as is when it
/// ends. Front-ends derive per-method loading from [`is_attempt_active`],
/// which also requires the store to be logging in, so a stale method is
/// harmless. Starting a second sign-in while one is pending overwrites the
/// tracked method without canceling the first.
///
/// [`is_attempt_active`]: LoginController::is_attempt_active
pub struct LoginController {
    executor: Arc<dyn OAuthExecutor>,
    store: Arc<dyn StoreFacade>,
    notifier: Arc<dyn Notifier>,
    state: watch::Sender<LoginAttemptState>,
}

impl LoginController {
    pub fn new(
        executor: Arc<dyn OAuthExecutor>,
        store: Arc<dyn StoreFacade>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let (state, _) = watch::channel(LoginAttemptState::Idle);
        Self {
            executor,
            store,
            notifier,
            state,
        }
    }

    pub fn state(&self) -> LoginAttemptState {
        *self.state.borrow()
    }

    /// Observe attempt state changes
    pub fn subscribe(&self) -> watch::Receiver<LoginAttemptState> {
        self.state.subscribe()
    }

    /// Run one sign-in attempt for `method`
    ///
    /// Never returns an error: cancellation and timeouts are dropped
    /// silently, every other failure is logged and alerted.
    pub async fn begin_login(&self, method: LoginMethod) -> LoginOutcome {
        self.state.send_replace(LoginAttemptState::InProgress(method));
        tracing::info!(method = %method, "starting GitHub sign-in");

        let result = self
            .executor
            .authorize(method.permission_scopes())
            .await
            .and_then(CredentialPair::from_params);

        let credentials = match result {
            Ok(credentials) => credentials,
            Err(e) if e.is_silent() => {
                tracing::info!(method = %method, "sign-in dismissed: {}", e);
                let reason = match e {
                    OAuthError::Timeout => DismissReason::Timeout,
                    _ => DismissReason::Canceled,
                };
                return LoginOutcome::Dismissed { reason };
            }
            Err(e) => {
                tracing::error!(method = %method, "Login failed: {}", e);
                self.notifier.alert(&format!("Login failed. {}", e));
                return LoginOutcome::Failed {
                    message: e.to_string(),
                };
            }
        };

        self.store.login_request(credentials).await;
        tracing::debug!(method = %method, "login request committed");

        LoginOutcome::Completed
    }

    /// True only while the store is logging in *and* `method` is the most
    /// recently requested one
    pub fn is_attempt_active(&self, method: LoginMethod) -> bool {
        self.store.is_logging_in() && self.state() == LoginAttemptState::InProgress(method)
    }

    /// Both sign-in choices with their loading flags
    pub fn login_options(&self) -> Vec<LoginOption> {
        LoginMethod::ALL
            .into_iter()
            .map(|method| LoginOption::for_method(method, self.is_attempt_active(method)))
            .collect()
    }
}
