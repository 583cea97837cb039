//! Logger setup for the desktop host.

/// Filter used when `RUST_LOG` is not set.
const DEFAULT_FILTER: &str = "info,ledwatch_common=info";

/// Install `env_logger` as the global logger, with millisecond timestamps so
/// per-second redraws can be lined up against the wall clock.
pub fn init_logging() {
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_FILTER.to_owned());
    env_logger::Builder::new()
        .parse_filters(&filter)
        .format_timestamp_millis()
        .init();
    log::debug!("logging initialized with filter {filter:?}");
}
