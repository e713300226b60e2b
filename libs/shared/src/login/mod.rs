//! Login controller: turns "sign in with this access level" into an OAuth
//! request and hands the resulting credentials to the store

mod controller;
mod options;
mod state;

pub use controller::{DismissReason, LoginController, LoginOutcome, Notifier};
pub use options::LoginOption;
pub use state::LoginAttemptState;
