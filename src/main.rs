//! rWorklog main entrypoint.

use rworklog::run;
use rworklog::ui::messages::error;
use std::env;
use tracing_subscriber::EnvFilter;

fn main() {
    init_logging();

    if let Err(e) = run() {
        if e.is_store_failure() {
            tracing::error!(error = %e, "Work data could not be saved or loaded");
        }
        error(format!("Error: {}", e));
        std::process::exit(1);
    }
}

/// `RWORKLOG_DEBUG_LOG=1` forces debug output; otherwise `RUST_LOG` applies,
/// defaulting to warnings only. Logs go to stderr.
fn init_logging() {
    let debug_enabled = env::var("RWORKLOG_DEBUG_LOG")
        .map(|value| matches!(value.as_str(), "1" | "true" | "TRUE" | "yes" | "YES"))
        .unwrap_or(false);
    let filter = if debug_enabled {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
