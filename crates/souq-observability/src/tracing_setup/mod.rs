//! Tracing setup: env-filtered JSON or text output.

pub mod events;

use souq_core::config::ObservabilityConfig;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter directive.
pub const LOG_ENV: &str = "SOUQ_LOG";

/// Install the global subscriber.
///
/// `SOUQ_LOG` wins over `config.log_level`. Returns `false` when a global
/// subscriber was already installed (the existing one is kept).
pub fn init_tracing(config: &ObservabilityConfig) -> bool {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| filter_or_info(&config.log_level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true);

    if config.json {
        builder
            .with_file(true)
            .with_line_number(true)
            .json()
            .try_init()
            .is_ok()
    } else {
        builder.try_init().is_ok()
    }
}

/// Install a JSON subscriber with an explicit filter (tests, embedding).
pub fn init_tracing_with_filter(filter: &str) -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(filter_or_info(filter))
        .with_target(true)
        .json()
        .try_init()
        .is_ok()
}

fn filter_or_info(directive: &str) -> EnvFilter {
    EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::new("info"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_install_is_refused() {
        init_tracing_with_filter("debug");
        assert!(!init_tracing(&ObservabilityConfig::default()));
    }

    #[test]
    fn bad_directive_falls_back() {
        // Must not panic on garbage.
        let _ = filter_or_info("souq=[[[");
    }
}
