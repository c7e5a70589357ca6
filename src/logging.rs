//! Logging setup.
//!
//! All diagnostics go to stderr; stdout is reserved for the RPC protocol.

use std::sync::OnceLock;

use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter, e.g. `brewbrowser=debug`.
pub const LOG_ENV: &str = "BREWBROWSER_LOG";

const DEFAULT_FILTER: &str = "brewbrowser=info";

static INIT: OnceLock<()> = OnceLock::new();

/// Picks the filter: `BREWBROWSER_LOG`, then `RUST_LOG`, then the default.
fn filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Installs the global subscriber. Later calls are no-ops.
pub fn init_logger() {
    INIT.get_or_init(|| {
        let result = tracing_subscriber::fmt()
            .with_env_filter(filter())
            .with_writer(std::io::stderr)
            .with_target(true)
            .try_init();
        if let Err(e) = result {
            eprintln!("logger already installed: {}", e);
        }
    });
}
