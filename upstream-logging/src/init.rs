use anyhow::Result;
use tracing_subscriber::EnvFilter;
use upstream_config::{LogFormat, LoggingConfig};

/// Build the filter for a configured level, falling back to `RUST_LOG` then `info`
pub fn build_env_filter(log_level: &str) -> EnvFilter {
    EnvFilter::try_new(log_level)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Initialize the global subscriber from configuration
///
/// Calling this more than once keeps the first subscriber.
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let env_filter = build_env_filter(&config.level.to_string());
    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_file(config.include_location)
        .with_line_number(config.include_location);

    // Use try_init to avoid panic if global subscriber already set
    let installed = match config.format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Compact => builder.compact().try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
        LogFormat::Text => builder.try_init(),
    };

    if installed.is_err() {
        tracing::debug!("Global tracing subscriber already initialized, skipping");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_subscriber::filter::LevelFilter;
    use upstream_config::LogLevel;

    #[test]
    fn test_build_env_filter_accepts_levels() {
        let filter = build_env_filter(&LogLevel::Debug.to_string());
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::DEBUG));
    }

    #[test]
    fn test_reinitialization_is_noop() {
        let config = LoggingConfig {
            level: LogLevel::Warn,
            format: LogFormat::Compact,
            include_location: true,
        };
        assert!(init_logging(&config).is_ok());
        assert!(init_logging(&LoggingConfig::default()).is_ok());
    }
}
