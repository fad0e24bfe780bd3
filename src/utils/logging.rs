use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber writing to stderr.
///
/// `RUST_LOG` wins over `default_level`; the filter only applies to this
/// crate so rusqlite/tokio internals stay quiet.
pub fn enable_logging(default_level: LevelFilter) {
    let level = std::env::var("RUST_LOG").unwrap_or_else(|_| default_level.to_string());

    let filter = EnvFilter::new(format!(
        "{}={level}",
        env!("CARGO_PKG_NAME").replace('-', "_"),
    ));

    // A second call (tests) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
