use std::io::IsTerminal;

use tracing_subscriber::EnvFilter;

/// Filter directive for diagnostics, e.g. `TASK_CLI_LOG=debug`.
pub const LOG_ENV: &str = "TASK_CLI_LOG";

/// Install the stderr subscriber. Stdout stays reserved for command output.
pub fn init() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .try_init();
}
