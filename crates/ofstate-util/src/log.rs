//! Logging setup using tracing.
//!
//! Informational output goes to stdout, warnings and errors go to stderr,
//! so scripts can capture the report and still see problems.

use tracing::Level;
use tracing_subscriber::{fmt::writer::MakeWriterExt, EnvFilter};

/// Verbosity of the ofstate crates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    Debug,
    #[default]
    Info,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Default)]
pub struct LogConfig {
    /// Log level.
    pub level: LogLevel,
    /// Whether to include the event target (module path) in each line.
    pub include_target: bool,
}

impl LogConfig {
    /// Configuration for the `-v/--verbose` command line switch.
    pub fn verbose(verbose: bool) -> Self {
        if verbose {
            Self {
                level: LogLevel::Debug,
                include_target: true,
            }
        } else {
            Self::default()
        }
    }

    /// Filter directive applied to the ofstate crates.
    pub fn directive(&self) -> String {
        let level = self.level.as_str();
        format!("ofstate={level},ofstate_snapshot={level},ofstate_util={level}")
    }
}

/// Initialize logging with the given configuration.
///
/// This should be called once at application startup. `RUST_LOG` takes
/// precedence over the configured level when it is set.
pub fn init(config: LogConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config.directive()));

    let writer = std::io::stderr
        .with_max_level(Level::WARN)
        .or_else(std::io::stdout);

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_target(config.include_target)
        .with_level(true)
        .with_ansi(false)
        .without_time()
        .init();
}
