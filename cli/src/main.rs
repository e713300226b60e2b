use clap::Parser;
use std::path::PathBuf;

mod commands;
mod config;
mod logging;

use commands::Commands;
use config::AppConfig;

#[derive(Parser, PartialEq)]
#[command(name = "devhub")]
#[command(about = "DevHub CLI - TweetDeck for GitHub", long_about = None)]
struct Cli {
    /// Path to the config file (defaults to ~/.devhub/config.toml)
    #[arg(long = "config", global = true)]
    config_path: Option<PathBuf>,

    /// Enable debug output
    #[arg(long = "debug", default_value_t = false, global = true)]
    debug: bool,

    /// DevHub API endpoint
    #[arg(long = "api-endpoint", env = "DEVHUB_API_ENDPOINT", global = true)]
    api_endpoint: Option<String>,

    /// GitHub REST API endpoint
    #[arg(
        long = "github-api-endpoint",
        env = "DEVHUB_GITHUB_API_ENDPOINT",
        global = true
    )]
    github_api_endpoint: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match AppConfig::load(cli.config_path.as_ref())
        .and_then(|config| config.with_overrides(cli.api_endpoint, cli.github_api_endpoint))
    {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config: {}", e);
            std::process::exit(1);
        }
    };

    let log_guard = match logging::init_logging(cli.debug, config.log_file.as_deref()) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {}", e);
            std::process::exit(1);
        }
    };

    let result = cli.command.run(config).await;

    // process::exit skips destructors; flush the log file first
    drop(log_guard);

    if let Err(e) = result {
        eprintln!("Ops! something went wrong: {}", e);
        std::process::exit(1);
    }
}
