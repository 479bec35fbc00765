use std::io;
use tracing_subscriber::{fmt, EnvFilter};

/// Initialize a compact human-readable subscriber on stderr.
/// - Respects `RUST_LOG` if set
/// - Falls back to `info,storage=info,models=info`
pub fn init_logging_default() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,storage=info,models=info"));
    let _ = fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .with_writer(io::stderr)
        .try_init();
}

/// Initialize a subscriber emitting one JSON object per event.
/// - Respects `RUST_LOG` if set, defaults to `info`
/// - Writes to stderr so stdout stays free for command output
pub fn init_logging_json() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .json()
        .with_writer(io::stderr)
        .try_init();
}
