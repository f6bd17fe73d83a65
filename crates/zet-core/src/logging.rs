//! Structured logging setup
//!
//! Logs go to stderr so command output stays pipeable. The filter is
//! resolved from, in order: `--log-level`, `--verbose`, `ZET_LOG`,
//! then a quiet default.

use tracing_subscriber::EnvFilter;

/// Initialize the tracing subscriber.
///
/// Returns an error string if a subscriber was already installed.
pub fn init_tracing(verbose: bool, log_level: Option<&str>) -> Result<(), String> {
    let filter = if let Some(level) = log_level {
        EnvFilter::new(format!("zet={level},zet_core={level}"))
    } else if verbose {
        EnvFilter::new("zet=debug,zet_core=debug")
    } else {
        EnvFilter::try_from_env("ZET_LOG").unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| e.to_string())
}
