use std::sync::Arc;

use crate::adapters::{JsonProjectStore, ManifestTranscoder, TomlConfigAdapter};
use crate::app::{export_interactor::ExportInteractor, project_interactor::ProjectInteractor};
use crate::config::DEFAULT_PROGRESS_INTERVAL_FRAMES;
use crate::ports::{ConfigPort, ProjectStorePort, TranscoderPort};

pub trait AppContainer: Send + Sync {
    fn export_interactor(&self) -> Arc<ExportInteractor>;
    fn project_interactor(&self) -> Arc<ProjectInteractor>;
    fn config_port(&self) -> Arc<dyn ConfigPort>;
}

pub struct DefaultAppContainer {
    export_interactor: Arc<ExportInteractor>,
    project_interactor: Arc<ProjectInteractor>,
    config_port: Arc<dyn ConfigPort>,
}

impl DefaultAppContainer {
    /// Wire the bundled adapters around an already loaded config port
    pub fn new(config_port: Arc<dyn ConfigPort>, progress_interval_frames: u64) -> Self {
        let transcoder = Arc::new(ManifestTranscoder::new());
        let store = Arc::new(JsonProjectStore::new());

        let export_interactor = Arc::new(ExportInteractor::new(
            Arc::clone(&transcoder) as Arc<dyn TranscoderPort>,
            progress_interval_frames,
        ));
        let project_interactor = Arc::new(ProjectInteractor::new(
            Arc::clone(&store) as Arc<dyn ProjectStorePort>,
        ));

        Self {
            export_interactor,
            project_interactor,
            config_port,
        }
    }
}

impl Default for DefaultAppContainer {
    fn default() -> Self {
        Self::new(
            Arc::new(TomlConfigAdapter::new()),
            DEFAULT_PROGRESS_INTERVAL_FRAMES,
        )
    }
}

impl AppContainer for DefaultAppContainer {
    fn export_interactor(&self) -> Arc<ExportInteractor> {
        Arc::clone(&self.export_interactor)
    }

    fn project_interactor(&self) -> Arc<ProjectInteractor> {
        Arc::clone(&self.project_interactor)
    }

    fn config_port(&self) -> Arc<dyn ConfigPort> {
        Arc::clone(&self.config_port)
    }
}
