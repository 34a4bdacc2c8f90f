//! Global tracing subscriber setup.

use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter, Registry};

/// Filter used when `RUST_LOG` is unset or invalid
pub const DEFAULT_LOG_FILTER: &str = "info,tower_http=info,sqlx=warn";

/// Build the level filter from `RUST_LOG`, falling back to [`DEFAULT_LOG_FILTER`]
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
}

/// Install the global subscriber.
///
/// Output is human-readable: timestamp, level, target, message, fields.
/// Fails if a global subscriber is already set.
pub fn init_tracing() -> Result<(), TryInitError> {
    let fmt_layer = fmt::layer().with_target(true).with_thread_ids(false);

    Registry::default()
        .with(env_filter())
        .with(fmt_layer)
        .try_init()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_parses() {
        let filter = EnvFilter::new(DEFAULT_LOG_FILTER);
        assert!(filter.to_string().contains("info"));
    }

    #[test]
    fn test_second_init_fails() {
        let _ = init_tracing();
        assert!(init_tracing().is_err());
    }
}
