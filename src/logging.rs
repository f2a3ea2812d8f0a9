//! Structured logging for the generator binaries.
//!
//! Logs go to stderr so `--stdout` output stays clean. The filter comes from
//! `FEATURE_MATRIX_LOG` (`EnvFilter` syntax) and defaults to `info`.

use std::sync::OnceLock;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

pub const LOG_ENV: &str = "FEATURE_MATRIX_LOG";
const DEFAULT_LOG_LEVEL: &str = "info";

static LOGGER_INITIALIZED: OnceLock<()> = OnceLock::new();

/// Install the global subscriber once; later calls are no-ops.
pub fn init_logging() {
    LOGGER_INITIALIZED.get_or_init(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV)
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL));

        // A subscriber may already exist when embedded in tests; keep it.
        let _ = tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(false)
                    .with_level(true)
                    .with_ansi(false),
            )
            .with(filter)
            .try_init();
    });
}
