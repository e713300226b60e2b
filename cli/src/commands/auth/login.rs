//! Login command - sign in to DevHub with GitHub

use crate::config::AppConfig;
use devhub_shared::github::GitHubClient;
use devhub_shared::login::{DismissReason, LoginController, LoginOption, LoginOutcome, Notifier};
use devhub_shared::oauth::{AuthorizationPrompt, BrowserOAuthExecutor, LoginMethod};
use devhub_shared::store::{SessionSnapshot, SessionStore};
use std::io::{self, Write};
use std::sync::Arc;

/// Alerts go straight to the terminal
struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn alert(&self, message: &str) {
        eprintln!();
        eprintln!("\x1b[1;31m{}\x1b[0m", message);
    }
}

/// Handle the login command
pub async fn handle_login(
    config: &AppConfig,
    access: Option<LoginMethod>,
    no_browser: bool,
) -> Result<(), String> {
    let oauth_config = config
        .oauth_config()
        .with_open_browser(config.open_browser && !no_browser);
    let executor = BrowserOAuthExecutor::new(oauth_config).on_prompt(print_prompt);
    let store = Arc::new(SessionStore::new(GitHubClient::new(
        &config.github_api_endpoint,
    )));
    let controller = LoginController::new(
        Arc::new(executor),
        store.clone(),
        Arc::new(TerminalNotifier),
    );

    let method = match access {
        Some(method) => method,
        None => match select_method(&controller.login_options())? {
            Some(method) => method,
            None => {
                println!("Cancelled.");
                return Ok(());
            }
        },
    };

    println!();
    println!(
        "Signing in with GitHub ({})...",
        LoginOption::for_method(method, false).subtitle.to_lowercase()
    );

    let outcome = controller.begin_login(method).await;
    report_outcome(outcome, store.snapshot())
}

/// Turn a finished attempt into the command result
fn report_outcome(outcome: LoginOutcome, snapshot: SessionSnapshot) -> Result<(), String> {
    match outcome {
        LoginOutcome::Completed => match (snapshot.user, snapshot.last_error) {
            (Some(user), _) => {
                println!();
                println!("Successfully signed in as {}!", user.display());
                Ok(())
            }
            (None, Some(error)) => Err(format!(
                "Signed in, but your GitHub profile could not be loaded: {}",
                error
            )),
            (None, None) => Err("Signed in, but no GitHub profile was returned".into()),
        },
        LoginOutcome::Dismissed {
            reason: DismissReason::Timeout,
        } => {
            println!("Timed out waiting for authorization.");
            Ok(())
        }
        LoginOutcome::Dismissed {
            reason: DismissReason::Canceled,
        } => {
            println!("Cancelled.");
            Ok(())
        }
        LoginOutcome::Failed { message } => Err(format!("Sign-in failed: {}", message)),
    }
}

fn print_prompt(prompt: &AuthorizationPrompt) {
    println!();
    if prompt.browser_opened {
        println!("Opening browser for GitHub authorization...");
        println!();
        println!("If browser doesn't open, visit:");
    } else {
        println!("Visit this URL to authorize DevHub:");
    }
    // Use OSC 8 escape sequence to make the URL clickable in supported terminals
    println!("\x1b]8;;{}\x1b\\{}\x1b]8;;\x1b\\", prompt.url, prompt.url);
    println!();
    println!("Waiting for authorization (Ctrl-C to cancel)...");
}

/// Ask which access level to request. `None` means the user backed out.
fn select_method(options: &[LoginOption]) -> Result<Option<LoginMethod>, String> {
    println!();
    println!("DevHub - TweetDeck for GitHub");
    println!();
    for (i, option) in options.iter().enumerate() {
        println!("  {}) {}", i + 1, option.display());
    }
    println!();
    print!("Select an option [1-{}]: ", options.len());
    io::stdout().flush().map_err(|e| e.to_string())?;

    let mut input = String::new();
    io::stdin()
        .read_line(&mut input)
        .map_err(|e| format!("Failed to read input: {}", e))?;

    Ok(parse_selection(input.trim(), options))
}

fn parse_selection(input: &str, options: &[LoginOption]) -> Option<LoginMethod> {
    if let Ok(index) = input.parse::<usize>() {
        return index
            .checked_sub(1)
            .and_then(|i| options.get(i))
            .map(|option| option.method);
    }
    input.parse::<LoginMethod>().ok()
}
