use std::sync::Once;

use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt};

/// Filter used when `RUST_LOG` is unset or unparsable.
pub const DEFAULT_FILTER: &str = "perftimer=info";

static INIT: Once = Once::new();

/// Initialise tracing subscriber once per process.
///
/// A subscriber installed elsewhere (a test harness, the host application)
/// wins; this call then leaves it in place.
pub fn init_logging() {
    INIT.call_once(|| {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        if let Err(err) = fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .compact()
            .try_init()
        {
            debug!(error = %err, "tracing subscriber already installed");
        }
    });
}
