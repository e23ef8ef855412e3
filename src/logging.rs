use tracing_subscriber::EnvFilter;

/// Environment variable holding an `EnvFilter` directive, e.g. `debug`.
pub const LOG_ENV: &str = "GO_VERSION_UPDATER_LOG";

/// Install the global subscriber. Logs go to stderr so stdout stays readable.
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}
