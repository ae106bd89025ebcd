// Adapters - External system implementations

pub mod json_project;
pub mod manifest_transcoder;
pub mod recording_player;
pub mod toml_config;

// Re-export adapters
pub use json_project::JsonProjectStore;
pub use manifest_transcoder::ManifestTranscoder;
pub use recording_player::RecordingPlayer;
pub use toml_config::TomlConfigAdapter;
