//! Editor configuration and its precedence: CLI > environment > file > defaults

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::domain::errors::DomainError;
use crate::domain::model::VideoOutputType;
use crate::utils::logging::{LogFormat, LogLevel, LoggingConfig};

/// Default CRF for new exports
pub const DEFAULT_CRF: u32 = 12;

/// Progress is reported once per this many encoded frames
pub const DEFAULT_PROGRESS_INTERVAL_FRAMES: u64 = 15;

/// Config file looked up in the working directory
pub const LOCAL_CONFIG_FILE: &str = "recut.toml";

/// Persistent editor settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub log_level: LogLevel,
    pub log_format: LogFormat,
    /// Last CRF used for an export
    pub default_crf: u32,
    /// Last output type used for an export
    pub default_output_type: VideoOutputType,
    pub progress_interval_frames: u64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            log_level: LogLevel::Info,
            log_format: LogFormat::Pretty,
            default_crf: DEFAULT_CRF,
            default_output_type: VideoOutputType::Vp9,
            progress_interval_frames: DEFAULT_PROGRESS_INTERVAL_FRAMES,
        }
    }
}

impl EditorConfig {
    /// Parse a TOML document; absent keys keep their defaults
    pub fn from_toml(content: &str) -> Result<Self, DomainError> {
        let config: EditorConfig = toml::from_str(content)
            .map_err(|e| DomainError::BadArgs(format!("Failed to parse TOML config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String, DomainError> {
        toml::to_string_pretty(self)
            .map_err(|e| DomainError::BadArgs(format!("Failed to serialize config: {}", e)))
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.default_crf > 63 {
            return Err(DomainError::BadArgs("CRF value cannot exceed 63".to_string()));
        }
        if self.progress_interval_frames == 0 {
            return Err(DomainError::BadArgs(
                "Progress interval must be at least one frame".to_string(),
            ));
        }
        Ok(())
    }

    /// Apply `RECUT_*` environment variables
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply overrides from any key lookup. Invalid values are skipped with a warning.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut applied = 0;

        if let Some(value) = lookup("RECUT_LOG_LEVEL") {
            match LogLevel::parse(&value) {
                Ok(level) => {
                    self.log_level = level;
                    applied += 1;
                }
                Err(e) => warn!("Ignoring RECUT_LOG_LEVEL: {}", e),
            }
        }
        if let Some(value) = lookup("RECUT_CRF") {
            match value.trim().parse::<u32>() {
                Ok(crf) if crf <= 63 => {
                    self.default_crf = crf;
                    applied += 1;
                }
                _ => warn!("Ignoring RECUT_CRF: invalid value '{}'", value),
            }
        }
        if let Some(value) = lookup("RECUT_OUTPUT_TYPE") {
            match VideoOutputType::parse(&value) {
                Ok(output_type) => {
                    self.default_output_type = output_type;
                    applied += 1;
                }
                Err(e) => warn!("Ignoring RECUT_OUTPUT_TYPE: {}", e),
            }
        }

        if applied > 0 {
            info!("Applied {} environment variable overrides", applied);
        }
    }

    pub fn logging(&self) -> LoggingConfig {
        LoggingConfig {
            level: self.log_level,
            format: self.log_format,
            ..LoggingConfig::default()
        }
    }
}

/// Candidate config files, most specific first
pub fn default_config_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from(LOCAL_CONFIG_FILE)];
    if let Some(config_home) = std::env::var_os("XDG_CONFIG_HOME") {
        paths.push(PathBuf::from(config_home).join("recut").join("config.toml"));
    } else if let Some(home) = std::env::var_os("HOME") {
        paths.push(
            PathBuf::from(home)
                .join(".config")
                .join("recut")
                .join("config.toml"),
        );
    }
    paths
}
