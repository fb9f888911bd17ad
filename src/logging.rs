use tracing_subscriber::EnvFilter;

/// Environment variable holding the `tracing` filter directive.
pub const LOG_FILTER_ENV: &str = "VMLAUNCH_LOG";

/// Install the stderr subscriber. `default_filter` applies when
/// `VMLAUNCH_LOG` is unset or unparsable.
pub fn init_tracing(default_filter: &str) {
    let filter = EnvFilter::try_from_env(LOG_FILTER_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();
}
