use crate::config::toml_config::LoggingConfig;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Directives used when `RUST_LOG` is not set.
pub fn default_directives(verbose: bool) -> &'static str {
    if verbose {
        "myland_yield=debug,info"
    } else {
        "myland_yield=info,warn"
    }
}

/// Installs the global subscriber. Reports go to stdout, so every log line
/// is written to stderr, either compact text or one JSON object per event.
pub fn init_logger(settings: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(settings.verbose)));

    let json_layer = settings.json.then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .json()
    });
    let text_layer = (!settings.json).then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_thread_ids(false)
            .with_file(false)
            .with_line_number(false)
            .compact()
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(json_layer)
        .with(text_layer)
        .init();
}
