// Project interactor - Opening and saving edit sessions

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::ports::*;

/// Session opened from a path
#[derive(Debug, Clone, PartialEq)]
pub struct OpenedSession {
    /// Project file backing the session, `None` for raw media
    pub project_path: Option<PathBuf>,
    pub media_path: PathBuf,
    pub project: ProjectFile,
}

impl OpenedSession {
    /// Session over a media file with no saved edits
    pub fn raw_media(media_path: &Path) -> Self {
        Self {
            project_path: None,
            media_path: media_path.to_path_buf(),
            project: ProjectFile {
                freeze_crop_size_mode: false,
                media_file_name: media_path.to_string_lossy().into_owned(),
                crop_frames: Vec::new(),
                trimming_markers: vec![TrimMarker::new(0)],
            },
        }
    }
}

/// Interactor for the project use cases
pub struct ProjectInteractor {
    store: Arc<dyn ProjectStorePort>,
}

impl ProjectInteractor {
    pub fn new(store: Arc<dyn ProjectStorePort>) -> Self {
        Self { store }
    }

    /// Open a project file, or treat the path as media.
    ///
    /// A `.json` path that cannot be loaded falls back to a raw media session
    /// over that same path.
    pub async fn open(&self, path: &Path) -> OpenedSession {
        if !is_project_path(path) {
            debug!(path = %path.display(), "Opening raw media");
            return OpenedSession::raw_media(path);
        }

        match self.store.load_project(path).await {
            Ok(project) => {
                info!(
                    path = %path.display(),
                    markers = project.trimming_markers.len(),
                    keyframes = project.crop_frames.len(),
                    "Project opened"
                );
                OpenedSession {
                    project_path: Some(path.to_path_buf()),
                    media_path: PathBuf::from(&project.media_file_name),
                    project,
                }
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Could not load project, opening as media");
                OpenedSession::raw_media(path)
            }
        }
    }

    /// Persist a session snapshot
    pub async fn save(&self, path: &Path, project: &ProjectFile) -> Result<(), DomainError> {
        if project.media_file_name.is_empty() {
            return Err(DomainError::InvalidProject(
                "Project has no media file".to_string(),
            ));
        }
        self.store.save_project(path, project).await?;
        info!(path = %path.display(), "Project saved");
        Ok(())
    }
}

/// Project files are JSON documents
pub fn is_project_path(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("json"))
        .unwrap_or(false)
}
