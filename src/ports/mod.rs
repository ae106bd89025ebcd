// Ports - Interface definitions (contracts)

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;

use crate::config::EditorConfig;
use crate::domain::errors::*;
use crate::domain::model::*;
use crate::planner::RenderPlan;

/// Port for the media player driving the edit session.
///
/// The timeline controller is single-threaded and synchronous, so player
/// commands are plain calls. Position changes flow back into the controller
/// through `TimelineController::set_input_position`.
pub trait PlayerPort: Send {
    /// Seek to an input-domain position
    fn seek(&mut self, input_position: Duration);

    /// Start or resume playback
    fn play(&mut self);

    /// Pause playback
    fn pause(&mut self);
}

/// Frame-count based progress sink for long-running transcodes
pub trait ProgressCallback: Send + Sync {
    /// Called with the number of output frames produced so far
    fn on_progress(&self, processed_frames: u64, total_frames: u64);
}

/// Port for the external video transcoder
#[async_trait]
pub trait TranscoderPort: Send + Sync {
    /// Encode `input` according to `plan`, reporting every produced frame
    async fn transcode(
        &self,
        input: &VideoTranscodeInput,
        output: &VideoTranscodeOutput,
        plan: &RenderPlan,
        progress: &dyn ProgressCallback,
    ) -> Result<TranscodeReport, DomainError>;
}

/// Port for persisting edit sessions
#[async_trait]
pub trait ProjectStorePort: Send + Sync {
    /// Read a project file
    async fn load_project(&self, path: &Path) -> Result<ProjectFile, DomainError>;

    /// Write a project file
    async fn save_project(&self, path: &Path, project: &ProjectFile) -> Result<(), DomainError>;
}

/// Port for configuration management
#[async_trait]
pub trait ConfigPort: Send + Sync {
    /// Load configuration; missing or unreadable files yield defaults
    async fn load_config(&self) -> Result<EditorConfig, DomainError>;

    /// Persist configuration, including the remembered export settings
    async fn save_config(&self, config: &EditorConfig) -> Result<(), DomainError>;
}
