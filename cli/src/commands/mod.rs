use crate::config::{AppConfig, ConfigFile};
use clap::Subcommand;

pub mod auth;

pub use auth::AuthCommands;

#[derive(Subcommand, PartialEq, Debug)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Print a complete sample configuration file
    Sample,
}

#[derive(Subcommand, PartialEq, Debug)]
pub enum Commands {
    /// Get CLI Version
    Version,

    /// Sign in to DevHub with your GitHub account
    #[command(subcommand)]
    Auth(AuthCommands),

    /// Inspect configuration
    #[command(subcommand)]
    Config(ConfigCommands),
}

impl Commands {
    pub async fn run(self, config: AppConfig) -> Result<(), String> {
        match self {
            Commands::Version => {
                println!("devhub v{}", env!("CARGO_PKG_VERSION"));
                Ok(())
            }
            Commands::Auth(command) => command.run(config).await,
            Commands::Config(ConfigCommands::Show) => {
                show_config(&config);
                Ok(())
            }
            Commands::Config(ConfigCommands::Sample) => {
                let sample = ConfigFile::sample().to_toml().map_err(|e| e.to_string())?;
                print!("{}", sample);
                Ok(())
            }
        }
    }
}

fn show_config(config: &AppConfig) {
    println!("Config file:          {}", config.config_path.display());
    println!("API endpoint:         {}", config.api_endpoint);
    println!("GitHub API endpoint:  {}", config.github_api_endpoint);
    println!("Callback port:        {}", config.callback_port);
    println!("OAuth timeout:        {}s", config.oauth_timeout.as_secs());
    println!("Open browser:         {}", config.open_browser);
    match &config.log_file {
        Some(path) => println!("Log file:             {}", path.display()),
        None => println!("Log file:             (none)"),
    }
}
