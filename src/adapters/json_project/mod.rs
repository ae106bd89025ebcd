// JSON project adapter - Project files on disk

use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::ports::*;

/// Project store writing pretty-printed JSON.
///
/// The media path is stored relative to the project directory when the media
/// lives below it, and resolved against that directory on load.
#[derive(Debug, Default, Clone)]
pub struct JsonProjectStore;

impl JsonProjectStore {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ProjectStorePort for JsonProjectStore {
    async fn load_project(&self, path: &Path) -> Result<ProjectFile, DomainError> {
        let content = tokio::fs::read_to_string(path).await?;
        let mut project: ProjectFile = serde_json::from_str(&content)
            .map_err(|e| DomainError::InvalidProject(format!("{}: {}", path.display(), e)))?;
        if project.media_file_name.is_empty() {
            return Err(DomainError::InvalidProject(format!(
                "{}: mediaFileName is empty",
                path.display()
            )));
        }

        let resolved = resolve_media_path(project_dir(path), Path::new(&project.media_file_name));
        debug!(media = %resolved.display(), "Resolved project media");
        project.media_file_name = resolved.to_string_lossy().into_owned();
        Ok(project)
    }

    async fn save_project(&self, path: &Path, project: &ProjectFile) -> Result<(), DomainError> {
        let dir = project_dir(path);
        if !dir.as_os_str().is_empty() {
            tokio::fs::create_dir_all(dir).await?;
        }

        let mut stored = project.clone();
        stored.media_file_name = relative_media_path(dir, Path::new(&project.media_file_name))
            .to_string_lossy()
            .into_owned();
        let json = serde_json::to_string_pretty(&stored)
            .map_err(|e| DomainError::InvalidProject(e.to_string()))?;
        tokio::fs::write(path, json).await?;
        debug!(path = %path.display(), media = %stored.media_file_name, "Project written");
        Ok(())
    }
}

fn project_dir(path: &Path) -> &Path {
    path.parent().unwrap_or_else(|| Path::new(""))
}

/// Resolve a stored media path against the project directory
pub fn resolve_media_path(project_dir: &Path, media: &Path) -> PathBuf {
    if media.is_absolute() {
        return media.to_path_buf();
    }
    let mut resolved = project_dir.to_path_buf();
    for component in media.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !resolved.pop() {
                    resolved.push("..");
                }
            }
            other => resolved.push(other.as_os_str()),
        }
    }
    resolved
}

/// Media path as stored in the project: relative when below the project directory
pub fn relative_media_path(project_dir: &Path, media: &Path) -> PathBuf {
    if project_dir.as_os_str().is_empty() {
        return media.to_path_buf();
    }
    match media.strip_prefix(project_dir) {
        Ok(relative) => relative.to_path_buf(),
        Err(_) => media.to_path_buf(),
    }
}
