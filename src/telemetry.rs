//! Tracing subscriber setup

use tracing_subscriber::EnvFilter;

/// Build the filter directive used when `RUST_LOG` is not set
fn default_directive(verbose: bool, config_level: &str) -> String {
    let level = if verbose { "debug" } else { config_level };
    format!("record_play={}", level)
}

/// Install the global subscriber, writing to stderr.
///
/// `RUST_LOG` wins over `--verbose`, which wins over the configured level.
/// Calling this twice is harmless.
pub fn init(verbose: bool, config_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::try_new(default_directive(verbose, config_level))
            .unwrap_or_else(|_| EnvFilter::new("warn"))
    });

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
