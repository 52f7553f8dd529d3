//! Tracing/logging initialization for the doctor listing service.
//!
//! One JSON line per event on stdout. Handler events carry `doctor_id` and
//! `specialty`; storage failures carry `operation` and `error`. The Postgres
//! store's spans record `page`, `limit` and `result_count`. sqlx is held at
//! `warn` by default so per-statement logs stay out of the stream.

use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset or unparseable.
const DEFAULT_FILTER: &str = "info,sqlx=warn";

/// Initialize tracing/logging for the process.
///
/// Safe to call multiple times (subsequent calls are no-ops).
pub fn init() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    // JSON logs + timestamps, configurable via RUST_LOG.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .json()
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .with_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_is_idempotent() {
        super::init();
        super::init();
        tracing::info!("still logging after a second init");
    }

    #[test]
    fn default_filter_parses_at_info() {
        let filter = tracing_subscriber::EnvFilter::try_new(super::DEFAULT_FILTER).unwrap();
        assert_eq!(
            filter.max_level_hint(),
            Some(tracing_subscriber::filter::LevelFilter::INFO)
        );
    }
}
