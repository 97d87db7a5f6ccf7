use tracing_subscriber::EnvFilter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable that enables diagnostic logging.
pub const LOG_ENV: &str = "ARGDECL_LOG";

/// Initialize tracing on stderr.
///
/// Logging is disabled by default so help and error output stay clean.
/// Set `ARGDECL_LOG` to enable it; `RUST_LOG` selects the filter
/// (default: `debug` for this crate).
pub fn init_tracing() {
    if std::env::var_os(LOG_ENV).is_none() {
        return;
    }

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("argdecl=debug"));

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(true)
        .with_level(true);

    // A second call (e.g., from tests) keeps the first subscriber.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .try_init();
}
