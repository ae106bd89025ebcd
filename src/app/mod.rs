// Application layer - Use case interactors

pub mod container;
pub mod export_interactor;
pub mod project_interactor;
pub mod timeline_controller;

// Re-export interactors
pub use export_interactor::{ExportInteractor, ExportJob, ExportSettings};
pub use project_interactor::{OpenedSession, ProjectInteractor};
pub use timeline_controller::TimelineController;
