//! Authentication commands
//!
//! # Commands
//!
//! - `devhub auth login` - Sign in with GitHub (public or private access)
//! - `devhub auth scopes` - Show the GitHub scopes each access level requests

mod login;
mod scopes;

use crate::config::AppConfig;
use clap::Subcommand;
use devhub_shared::oauth::LoginMethod;

/// Authentication subcommands
#[derive(Subcommand, PartialEq, Debug)]
pub enum AuthCommands {
    /// Sign in with GitHub
    Login {
        /// Access level to request: "public" or "private" (prompted when omitted)
        #[arg(long)]
        access: Option<LoginMethod>,

        /// Print the authorization URL instead of opening a browser
        #[arg(long, default_value_t = false)]
        no_browser: bool,
    },

    /// Show the GitHub scopes requested for an access level
    Scopes {
        /// Access level to show (both when omitted)
        #[arg(long)]
        access: Option<LoginMethod>,
    },
}

impl AuthCommands {
    /// Run the auth command
    pub async fn run(self, config: AppConfig) -> Result<(), String> {
        match self {
            AuthCommands::Login { access, no_browser } => {
                login::handle_login(&config, access, no_browser).await
            }
            AuthCommands::Scopes { access } => {
                scopes::handle_scopes(access);
                Ok(())
            }
        }
    }
}
