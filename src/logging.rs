//! Logging infrastructure for TrackerDesk
//!
//! Structured logging via the tracing crate. The level comes from the
//! `[logging]` config section and can be overridden with `RUST_LOG`.

use std::str::FromStr;

use tracing_subscriber::{fmt, EnvFilter};

use crate::error::ConfigError;

/// Crates whose chatter is capped at `warn` unless RUST_LOG says otherwise
const QUIET_TARGETS: &[&str] = &["eframe", "egui_glow", "winit", "reqwest", "hyper"];

/// Log level configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Trace level - very verbose
    Trace,
    /// Debug level - detailed information
    Debug,
    /// Info level - general information
    #[default]
    Info,
    /// Warn level - warnings
    Warn,
    /// Error level - errors only
    Error,
}

impl LogLevel {
    /// Converts LogLevel to tracing level filter string
    fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }

    /// Builds the default filter directive string for this level
    fn directives(&self) -> String {
        let mut directives = format!("tracker_desk={}", self.as_filter_str());
        for target in QUIET_TARGETS {
            directives.push_str(&format!(",{}=warn", target));
        }
        directives
    }
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            other => Err(ConfigError::InvalidValue(format!(
                "Unknown log level '{}'",
                other
            ))),
        }
    }
}

/// Initializes the logging system
///
/// Sets up the tracing subscriber with the specified log level. The
/// `RUST_LOG` environment variable takes precedence when present.
/// Calling this more than once is harmless; later calls are ignored.
///
/// # Examples
///
/// ```no_run
/// use tracker_desk::logging::{init_logging, LogLevel};
///
/// init_logging(LogLevel::Debug);
/// ```
pub fn init_logging(level: LogLevel) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.directives()));

    let _ = fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(true)
        .with_line_number(true)
        .try_init();
}
