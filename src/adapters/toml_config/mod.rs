// TOML config adapter - Configuration management using TOML files

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::config::{default_config_paths, EditorConfig};
use crate::domain::errors::*;
use crate::ports::*;

/// TOML configuration adapter
pub struct TomlConfigAdapter {
    /// Candidate files, most specific first
    search_paths: Vec<PathBuf>,
}

impl TomlConfigAdapter {
    /// Adapter over the default config locations
    pub fn new() -> Self {
        Self {
            search_paths: default_config_paths(),
        }
    }

    /// Adapter bound to one explicit config file
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            search_paths: vec![path.into()],
        }
    }

    pub fn search_paths(&self) -> &[PathBuf] {
        &self.search_paths
    }

    fn existing_path(&self) -> Option<&Path> {
        self.search_paths
            .iter()
            .map(PathBuf::as_path)
            .find(|p| p.is_file())
    }

    /// File that `save_config` writes: the loaded file, else the least specific candidate
    pub fn save_path(&self) -> Option<&Path> {
        self.existing_path()
            .or_else(|| self.search_paths.last().map(PathBuf::as_path))
    }
}

impl Default for TomlConfigAdapter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ConfigPort for TomlConfigAdapter {
    async fn load_config(&self) -> Result<EditorConfig, DomainError> {
        let path = match self.existing_path() {
            Some(path) => path,
            None => {
                debug!("No config file found, using defaults");
                return Ok(EditorConfig::default());
            }
        };

        let content = match tokio::fs::read_to_string(path).await {
            Ok(content) => content,
            Err(e) => {
                warn!("Failed to read config file {}: {}. Using defaults", path.display(), e);
                return Ok(EditorConfig::default());
            }
        };

        match EditorConfig::from_toml(&content) {
            Ok(config) => {
                info!("Loaded configuration from {}", path.display());
                Ok(config)
            }
            Err(e) => {
                warn!("Invalid config file {}: {}. Using defaults", path.display(), e);
                Ok(EditorConfig::default())
            }
        }
    }

    async fn save_config(&self, config: &EditorConfig) -> Result<(), DomainError> {
        config.validate()?;
        let path = self
            .save_path()
            .ok_or_else(|| DomainError::BadArgs("No config location available".to_string()))?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                DomainError::Io(format!("Failed to create config directory: {}", e))
            })?;
        }
        tokio::fs::write(path, config.to_toml()?)
            .await
            .map_err(|e| DomainError::Io(format!("Failed to write config file: {}", e)))?;
        debug!("Saved configuration to {}", path.display());
        Ok(())
    }
}
