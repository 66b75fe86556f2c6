//! Stderr logging for the demo binary.
//!
//! The canvas owns stdout, so every record goes to stderr. `gtool_core`
//! logs border construction at `trace`, mesh loads at `debug` and
//! degenerate normals at `warn`.
use std::sync::Once;

use env_logger::{Builder, Target, WriteStyle};
use log::LevelFilter;

/// Where log filtering comes from and whether records are colored.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// `env_logger` directives such as `gtool_core=trace`. Takes
    /// precedence over `RUST_LOG`.
    pub env_filter: Option<String>,
    pub write_style: WriteStyle,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            env_filter: None,
            write_style: WriteStyle::Auto,
        }
    }
}

impl LoggingConfig {
    pub fn with_filter(filter: impl Into<String>) -> Self {
        Self {
            env_filter: Some(filter.into()),
            ..Self::default()
        }
    }

    /// The explicit filter, else `RUST_LOG`. `None` means info level.
    fn directives(&self) -> Option<String> {
        self.env_filter
            .clone()
            .or_else(|| std::env::var("RUST_LOG").ok())
    }
}

static LOGGER: Once = Once::new();

/// Install the global logger. Only the first call has an effect.
pub fn init_logging(config: LoggingConfig) {
    LOGGER.call_once(|| {
        let mut builder = Builder::new();
        match config.directives() {
            Some(directives) => builder.parse_filters(&directives),
            None => builder.filter_level(LevelFilter::Info),
        };
        builder
            .write_style(config.write_style)
            .target(Target::Stderr);

        // A test harness may have installed a logger already
        if builder.try_init().is_ok() {
            log::debug!("stderr logger installed");
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_is_idempotent() {
        init_logging(LoggingConfig::with_filter("debug"));
        init_logging(LoggingConfig::default());
        log::info!("still logging after a second init");
    }

    #[test]
    fn test_explicit_filter_wins() {
        let config = LoggingConfig::with_filter("gtool_core=trace");
        assert_eq!(config.env_filter.as_deref(), Some("gtool_core=trace"));
        assert_eq!(config.directives().as_deref(), Some("gtool_core=trace"));
    }
}
