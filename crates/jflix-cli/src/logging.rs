//! Logging setup
//!
//! Level comes from `JFLIX_LOG`, else from the `-v` count (warn, info,
//! debug, trace). Logs go to stderr, or to `log_file` when it is configured.

use std::fs::OpenOptions;

use tracing::info;
use tracing_subscriber::EnvFilter;

use jflix_core::Config;

/// Map the number of `-v` flags to a level name
pub fn level_for_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Build the filter directive for our crates
fn filter_directive(level: &str) -> String {
    format!("jflix_core={},jflix_cli={}", level, level)
}

/// Initialize logging for CLI commands
pub fn init(config: Option<&Config>, verbose: u8) {
    let level = std::env::var("JFLIX_LOG")
        .unwrap_or_else(|_| level_for_verbosity(verbose).to_string());
    let env_filter = EnvFilter::new(filter_directive(&level));

    let log_path = config.and_then(|c| c.log_file.clone());
    if let Some(path) = log_path {
        match OpenOptions::new().create(true).append(true).open(&path) {
            Ok(file) => {
                // Ignore error if already initialized
                let _ = tracing_subscriber::fmt()
                    .with_env_filter(env_filter)
                    .with_target(false)
                    .with_ansi(false)
                    .with_writer(file)
                    .try_init();
                info!("Logging to {:?}", path);
                return;
            }
            Err(e) => {
                eprintln!("Warning: Could not open log file {:?}: {}", path, e);
            }
        }
    }

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
