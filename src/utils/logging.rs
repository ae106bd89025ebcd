//! Logging configuration and output formatting

use std::fmt;
use std::sync::Mutex;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

use crate::domain::errors::DomainError;
use crate::error::{RecutError, RecutResult};
use crate::ports::ProgressCallback;
use crate::utils::time::{estimate_remaining, format_duration};

/// Log level configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Error messages only
    Error,
    /// Warnings and errors
    Warn,
    /// General information
    #[default]
    Info,
    /// Debug information
    Debug,
    /// Very verbose debug information
    Trace,
}

impl LogLevel {
    /// Parse log level from string
    pub fn parse(level_str: &str) -> Result<Self, DomainError> {
        match level_str.to_lowercase().as_str() {
            "error" => Ok(LogLevel::Error),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "info" => Ok(LogLevel::Info),
            "debug" => Ok(LogLevel::Debug),
            "trace" => Ok(LogLevel::Trace),
            _ => Err(DomainError::BadArgs(format!(
                "Invalid log level: {}. Valid levels: trace, debug, info, warn, error",
                level_str
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable multi-line format
    #[default]
    Pretty,
    /// Compact single-line format
    Compact,
    /// JSON format for structured logging
    Json,
}

impl LogFormat {
    pub fn parse(format_str: &str) -> Result<Self, DomainError> {
        match format_str.to_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "compact" => Ok(LogFormat::Compact),
            "json" => Ok(LogFormat::Json),
            _ => Err(DomainError::BadArgs(format!(
                "Invalid log format: {}. Valid formats: pretty, compact, json",
                format_str
            ))),
        }
    }
}

/// Logging configuration options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Global log level, overridden by `RUST_LOG` when set
    pub level: LogLevel,
    /// Output format
    pub format: LogFormat,
    /// Include target module information
    pub target: bool,
    /// Use colored output
    pub ansi: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            format: LogFormat::Pretty,
            target: false,
            ansi: true,
        }
    }
}

/// Logging system manager
pub struct LoggingSystem {
    config: LoggingConfig,
}

impl LoggingSystem {
    /// Create a new logging system with configuration
    pub fn new(config: LoggingConfig) -> Self {
        Self { config }
    }

    /// Filter used when `RUST_LOG` is absent
    pub fn filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(self.config.level.as_str()))
    }

    /// Install the global subscriber. Logs go to stderr so command output
    /// on stdout stays machine-readable.
    pub fn initialize(&self) -> RecutResult<()> {
        let builder = tracing_subscriber::fmt()
            .with_env_filter(self.filter())
            .with_writer(std::io::stderr)
            .with_target(self.config.target)
            .with_ansi(self.config.ansi);

        let result = match self.config.format {
            LogFormat::Pretty => builder.pretty().try_init(),
            LogFormat::Compact => builder.compact().try_init(),
            LogFormat::Json => builder.json().try_init(),
        };
        result.map_err(|e| RecutError::Logging(e.to_string()))?;

        tracing::debug!(
            level = %self.config.level,
            format = ?self.config.format,
            "Logging system initialized"
        );
        Ok(())
    }

    /// Log version and platform
    pub fn log_system_info(&self) {
        tracing::info!("Version: {}", env!("CARGO_PKG_VERSION"));
        tracing::debug!(
            "Platform: {} {}",
            std::env::consts::OS,
            std::env::consts::ARCH
        );
    }
}

impl Default for LoggingSystem {
    fn default() -> Self {
        Self::new(LoggingConfig::default())
    }
}

/// Progress reporter that writes export progress to the log
pub struct ProgressReporter {
    operation: String,
    start_time: Instant,
    last_fraction: Mutex<f64>,
}

impl ProgressReporter {
    pub fn new(operation: &str) -> Self {
        tracing::info!("Starting: {}", operation);
        Self {
            operation: operation.to_string(),
            start_time: Instant::now(),
            last_fraction: Mutex::new(0.0),
        }
    }

    /// Most recent fraction reported, in `[0, 1]`
    pub fn last_fraction(&self) -> f64 {
        self.last_fraction.lock().map(|f| *f).unwrap_or(0.0)
    }

    /// Log the final outcome
    pub fn complete(&self, success: bool) {
        let status = if success { "completed" } else { "failed" };
        tracing::info!(
            "{} {} in {:.2}s",
            self.operation,
            status,
            self.start_time.elapsed().as_secs_f64()
        );
    }
}

impl ProgressCallback for ProgressReporter {
    fn on_progress(&self, processed_frames: u64, total_frames: u64) {
        let fraction = if total_frames == 0 {
            1.0
        } else {
            (processed_frames as f64 / total_frames as f64).clamp(0.0, 1.0)
        };
        if let Ok(mut last) = self.last_fraction.lock() {
            *last = fraction;
        }

        let mut message = format!("[{:>3.0}%] {}", fraction * 100.0, self.operation);
        if let Some(eta) =
            estimate_remaining(processed_frames, total_frames, self.start_time.elapsed())
        {
            message.push_str(&format!(" (ETA: {})", format_duration(eta)));
        }
        tracing::info!("{}", message);
    }
}
