use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_LEVEL: &str = "warn";

/// Install the global subscriber. Logs go to stderr so they never mix with
/// model output on stdout.
///
/// `RUST_LOG` wins; otherwise `CHAT_LOG_LEVEL`, otherwise `debug` when
/// `verbose` is set and `warn` when it is not.
pub fn init_logging(verbose: bool) {
    let fallback = std::env::var("CHAT_LOG_LEVEL").unwrap_or_else(|_| {
        if verbose {
            "debug".to_string()
        } else {
            DEFAULT_LEVEL.to_string()
        }
    });
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&fallback));

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(verbose)
        .compact();

    // A second init (tests, embedding) is not an error worth surfacing.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .try_init();
}
