use async_trait::async_trait;
use devhub_shared::login::{
    DismissReason, LoginAttemptState, LoginController, LoginOutcome, Notifier,
};
use devhub_shared::models::auth::{CredentialPair, OAuthParams};
use devhub_shared::models::user::GitHubUser;
use devhub_shared::oauth::{LoginMethod, OAuthError, OAuthExecutor, OAuthResult};
use devhub_shared::store::StoreFacade;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use test_case::test_case;
use tokio::sync::Notify;

type Script = Box<dyn Fn() -> OAuthResult<OAuthParams> + Send + Sync>;

struct FakeExecutor {
    requests: Mutex<Vec<Vec<String>>>,
    script: Script,
    gate: Option<Arc<Notify>>,
}

impl FakeExecutor {
    fn returning(script: impl Fn() -> OAuthResult<OAuthParams> + Send + Sync + 'static) -> Self {
        Self {
            requests: Mutex::new(Vec::new()),
            script: Box::new(script),
            gate: None,
        }
    }

    fn gated(gate: Arc<Notify>) -> Self {
        Self {
            gate: Some(gate),
            ..Self::returning(|| Err(OAuthError::Canceled))
        }
    }

    fn requests(&self) -> Vec<Vec<String>> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl OAuthExecutor for FakeExecutor {
    async fn authorize(&self, scopes: &[&str]) -> OAuthResult<OAuthParams> {
        let notified = self.gate.as_ref().map(|gate| gate.notified());
        self.requests
            .lock()
            .unwrap()
            .push(scopes.iter().map(|s| s.to_string()).collect());
        if let Some(notified) = notified {
            notified.await;
        }
        (self.script)()
    }
}

#[derive(Default)]
struct RecordingStore {
    logging_in: AtomicBool,
    calls: Mutex<Vec<CredentialPair>>,
}

impl RecordingStore {
    fn calls(&self) -> Vec<CredentialPair> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl StoreFacade for RecordingStore {
    async fn login_request(&self, credentials: CredentialPair) {
        self.calls.lock().unwrap().push(credentials);
    }

    fn is_logging_in(&self) -> bool {
        self.logging_in.load(Ordering::SeqCst)
    }

    fn current_user(&self) -> Option<GitHubUser> {
        None
    }
}

#[derive(Default)]
struct RecordingNotifier {
    alerts: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    fn alerts(&self) -> Vec<String> {
        self.alerts.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn alert(&self, message: &str) {
        self.alerts.lock().unwrap().push(message.to_string());
    }
}

struct Harness {
    executor: Arc<FakeExecutor>,
    store: Arc<RecordingStore>,
    notifier: Arc<RecordingNotifier>,
    controller: Arc<LoginController>,
}

fn harness(executor: FakeExecutor) -> Harness {
    let executor = Arc::new(executor);
    let store = Arc::new(RecordingStore::default());
    let notifier = Arc::new(RecordingNotifier::default());
    let controller = Arc::new(LoginController::new(
        executor.clone(),
        store.clone(),
        notifier.clone(),
    ));
    Harness {
        executor,
        store,
        notifier,
        controller,
    }
}

async fn wait_for_requests(executor: &FakeExecutor, count: usize) {
    while executor.requests().len() < count {
        tokio::task::yield_now().await;
    }
}

#[test_case(LoginMethod::PrivateAccess, &["user", "repo", "notifications", "read:org"]; "private access")]
#[test_case(LoginMethod::PublicAccess, &["user", "public_repo", "notifications", "read:org"]; "public access")]
#[tokio::test]
async fn requests_exact_scope_set(method: LoginMethod, expected: &[&str]) {
    let h = harness(FakeExecutor::returning(|| Err(OAuthError::Canceled)));

    h.controller.begin_login(method).await;

    assert_eq!(h.executor.requests(), vec![expected.to_vec()]);
}

#[test_case("Canceled", DismissReason::Canceled; "user canceled")]
#[test_case("Timeout", DismissReason::Timeout; "timed out")]
#[tokio::test]
async fn canceled_and_timeout_are_silent(message: &'static str, reason: DismissReason) {
    let h = harness(FakeExecutor::returning(move || {
        Err(OAuthError::from_message(message))
    }));

    let outcome = h.controller.begin_login(LoginMethod::PublicAccess).await;

    assert_eq!(outcome, LoginOutcome::Dismissed { reason });
    assert!(h.notifier.alerts().is_empty());
    assert!(h.store.calls().is_empty());
}

#[tokio::test]
async fn successful_flow_forwards_both_tokens_once() {
    let h = harness(FakeExecutor::returning(|| Ok(OAuthParams::with_tokens("a", "g"))));

    let outcome = h.controller.begin_login(LoginMethod::PrivateAccess).await;

    assert_eq!(outcome, LoginOutcome::Completed);
    assert_eq!(h.store.calls(), vec![CredentialPair::new("a", "g")]);
    assert!(h.notifier.alerts().is_empty());
}

#[tokio::test]
async fn empty_app_token_alerts_without_store_call() {
    let h = harness(FakeExecutor::returning(|| Ok(OAuthParams::with_tokens("", "g"))));

    let outcome = h.controller.begin_login(LoginMethod::PublicAccess).await;

    assert_eq!(
        outcome,
        LoginOutcome::Failed {
            message: "No token received.".to_string()
        }
    );
    let alerts = h.notifier.alerts();
    assert_eq!(alerts.len(), 1);
    assert!(alerts[0].contains("No token received."));
    assert!(h.store.calls().is_empty());
}

#[tokio::test]
async fn missing_github_token_alerts_without_store_call() {
    let h = harness(FakeExecutor::returning(|| {
        Ok(OAuthParams {
            app_token: Some("a".to_string()),
            ..OAuthParams::default()
        })
    }));

    h.controller.begin_login(LoginMethod::PrivateAccess).await;

    assert_eq!(h.notifier.alerts(), vec!["Login failed. No token received."]);
    assert!(h.store.calls().is_empty());
}

#[tokio::test]
async fn other_failures_are_alerted_with_their_message() {
    let h = harness(FakeExecutor::returning(|| {
        Err(OAuthError::from_message("access_denied"))
    }));

    let outcome = h.controller.begin_login(LoginMethod::PublicAccess).await;

    assert_eq!(
        outcome,
        LoginOutcome::Failed {
            message: "access_denied".to_string()
        }
    );
    assert_eq!(h.notifier.alerts(), vec!["Login failed. access_denied"]);
    assert!(h.store.calls().is_empty());
}

#[tokio::test]
async fn attempt_state_is_not_reset_after_completion() {
    let h = harness(FakeExecutor::returning(|| Ok(OAuthParams::with_tokens("a", "g"))));
    assert_eq!(h.controller.state(), LoginAttemptState::Idle);

    h.controller.begin_login(LoginMethod::PrivateAccess).await;
    assert_eq!(
        h.controller.state(),
        LoginAttemptState::InProgress(LoginMethod::PrivateAccess)
    );

    // the store is no longer logging in, so nothing shows as active
    assert!(!h.controller.is_attempt_active(LoginMethod::PrivateAccess));
}

#[tokio::test]
async fn attempt_state_is_not_reset_after_failure() {
    let h = harness(FakeExecutor::returning(|| Err(OAuthError::Timeout)));

    h.controller.begin_login(LoginMethod::PublicAccess).await;

    assert_eq!(
        h.controller.state(),
        LoginAttemptState::InProgress(LoginMethod::PublicAccess)
    );
}

#[tokio::test]
async fn attempt_active_requires_store_logging_in() {
    let gate = Arc::new(Notify::new());
    let h = harness(FakeExecutor::gated(gate.clone()));

    let task = {
        let controller = h.controller.clone();
        tokio::spawn(async move { controller.begin_login(LoginMethod::PublicAccess).await })
    };
    wait_for_requests(&h.executor, 1).await;

    assert!(!h.controller.is_attempt_active(LoginMethod::PublicAccess));

    h.store.logging_in.store(true, Ordering::SeqCst);
    assert!(h.controller.is_attempt_active(LoginMethod::PublicAccess));
    assert!(!h.controller.is_attempt_active(LoginMethod::PrivateAccess));

    gate.notify_waiters();
    task.await.unwrap();
}

#[tokio::test]
async fn second_request_takes_over_active_method() {
    let gate = Arc::new(Notify::new());
    let h = harness(FakeExecutor::gated(gate.clone()));
    h.store.logging_in.store(true, Ordering::SeqCst);

    let first = {
        let controller = h.controller.clone();
        tokio::spawn(async move { controller.begin_login(LoginMethod::PublicAccess).await })
    };
    wait_for_requests(&h.executor, 1).await;
    assert!(h.controller.is_attempt_active(LoginMethod::PublicAccess));

    let second = {
        let controller = h.controller.clone();
        tokio::spawn(async move { controller.begin_login(LoginMethod::PrivateAccess).await })
    };
    wait_for_requests(&h.executor, 2).await;

    // the first call is still pending but no longer attributed
    assert!(!h.controller.is_attempt_active(LoginMethod::PublicAccess));
    assert!(h.controller.is_attempt_active(LoginMethod::PrivateAccess));

    let options = h.controller.login_options();
    assert_eq!(options.len(), 2);
    assert_eq!(options[0].method, LoginMethod::PublicAccess);
    assert!(!options[0].loading);
    assert_eq!(options[1].method, LoginMethod::PrivateAccess);
    assert!(options[1].loading);

    gate.notify_waiters();
    first.await.unwrap();
    second.await.unwrap();
    assert!(h.store.calls().is_empty());
}

#[tokio::test]
async fn subscribers_see_in_progress_transition() {
    let h = harness(FakeExecutor::returning(|| Err(OAuthError::Canceled)));
    let mut states = h.controller.subscribe();
    assert_eq!(*states.borrow_and_update(), LoginAttemptState::Idle);

    h.controller.begin_login(LoginMethod::PrivateAccess).await;

    assert!(states.has_changed().unwrap());
    assert_eq!(
        *states.borrow_and_update(),
        LoginAttemptState::InProgress(LoginMethod::PrivateAccess)
    );
}
