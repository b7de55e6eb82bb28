//! Global tracing subscriber setup for hosts embedding sealkit.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LogConfig;

/// Install a global `tracing` subscriber.
///
/// `RUST_LOG` takes precedence over `config.level`. Any format other than
/// `"json"` selects the human-readable text layer. Fails if a global
/// subscriber is already installed.
pub fn init_logging(config: &LogConfig) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    let result = match config.format.as_str() {
        "json" => tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json())
            .try_init(),
        _ => tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer())
            .try_init(),
    };

    result.map_err(|e| anyhow::anyhow!("installing tracing subscriber: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_fails() {
        let config = LogConfig {
            level: "debug".into(),
            format: "json".into(),
        };
        // The first call may already lose to another test in this binary
        let _ = init_logging(&config);
        assert!(init_logging(&LogConfig::default()).is_err());
    }
}
