//! Tracing setup: errors always reach stderr, `--debug` widens the console
//! filter, and an optional log file records sign-in activity

use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Default console directives; `RUST_LOG` replaces them when set
fn console_filter(debug: bool) -> String {
    if debug {
        format!(
            "error,{}=debug,devhub_shared=debug",
            env!("CARGO_CRATE_NAME")
        )
    } else {
        "error".to_string()
    }
}

fn file_filter() -> String {
    format!("warn,{}=info,devhub_shared=info", env!("CARGO_CRATE_NAME"))
}

fn env_filter(default: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into())
}

/// Install the global subscriber.
///
/// The returned guard flushes the file writer and must be held until exit.
pub fn init_logging(debug: bool, log_file: Option<&Path>) -> Result<Option<WorkerGuard>, String> {
    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_filter(env_filter(&console_filter(debug)));

    let (file_layer, guard) = match log_file {
        Some(path) => {
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));
            std::fs::create_dir_all(dir)
                .map_err(|e| format!("Failed to create log directory: {}", e))?;
            let file_name = path
                .file_name()
                .ok_or_else(|| format!("Invalid log file path: {}", path.display()))?;

            let appender = tracing_appender::rolling::never(dir, file_name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true)
                .with_filter(env_filter(&file_filter()));
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| format!("Failed to initialize logging: {}", e))?;

    Ok(guard)
}
