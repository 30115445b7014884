//! Logging bootstrap.

use tracing_subscriber::EnvFilter;

/// Environment variable controlling the log filter.
const LOG_ENV: &str = "MODLITE_LOG";

/// Install the global tracing subscriber.
///
/// The filter comes from `MODLITE_LOG` when set, otherwise from
/// `default_directive` (e.g. `"modlite=info"`). Safe to call more than once;
/// later calls are no-ops.
pub fn init_logging(default_directive: &str) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
