//! Crop manifest transcoder adapter
//!
//! Writes the render plan as a JSON manifest next to the requested output,
//! for an external encoder to consume.

use std::path::{Path, PathBuf};
use std::time::Instant;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info};

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::planner::RenderPlan;
use crate::ports::*;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CropManifest<'a> {
    created_at: DateTime<Utc>,
    input: &'a VideoTranscodeInput,
    output: &'a VideoTranscodeOutput,
    plan: &'a RenderPlan,
}

/// Transcoder adapter producing a crop manifest instead of video
#[derive(Debug, Default, Clone)]
pub struct ManifestTranscoder;

impl ManifestTranscoder {
    pub fn new() -> Self {
        Self
    }

    /// Manifest location for an output file: `out.webm` -> `out.recut.json`
    pub fn manifest_path(output: &VideoTranscodeOutput) -> PathBuf {
        Path::new(&output.file_name).with_extension("recut.json")
    }
}

#[async_trait]
impl TranscoderPort for ManifestTranscoder {
    async fn transcode(
        &self,
        input: &VideoTranscodeInput,
        output: &VideoTranscodeOutput,
        plan: &RenderPlan,
        progress: &dyn ProgressCallback,
    ) -> Result<TranscodeReport, DomainError> {
        let start = Instant::now();
        let total = plan.total_output_frames();

        for processed in 1..=total {
            progress.on_progress(processed, total);
        }

        let manifest = CropManifest {
            created_at: Utc::now(),
            input,
            output,
            plan,
        };
        let json = serde_json::to_string_pretty(&manifest)
            .map_err(|e| DomainError::Transcode(format!("Failed to encode manifest: {}", e)))?;

        let path = Self::manifest_path(output);
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(dir).await?;
        }
        tokio::fs::write(&path, json).await?;
        debug!(path = %path.display(), frames = total, "Manifest written");
        info!("Crop manifest written to {}", path.display());

        Ok(TranscodeReport {
            success: true,
            elapsed: start.elapsed(),
            frames_processed: total,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::time::Duration;

    use super::*;
    use crate::domain::keyframes::CropKeyframeTrack;
    use crate::domain::timeline::TrimTimeline;
    use crate::planner::RenderPlanner;

    #[derive(Default)]
    struct CountingProgress {
        calls: AtomicU64,
        last: AtomicU64,
    }

    impl ProgressCallback for CountingProgress {
        fn on_progress(&self, processed_frames: u64, _total_frames: u64) {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.last.store(processed_frames, Ordering::SeqCst);
        }
    }

    #[tokio::test]
    async fn test_manifest_written_next_to_output() {
        let dir = tempfile::tempdir().unwrap();
        let mut timeline = TrimTimeline::new();
        timeline.set_media(30.0, Duration::from_secs(2));
        let mut track = CropKeyframeTrack::new();
        track.seed(Rect::new(50, 50, 20, 20));
        let plan = RenderPlanner::plan(&timeline, &track, Size::new(20, 20), 1.0).unwrap();

        let input = VideoTranscodeInput {
            file_name: "clip.mp4".to_string(),
            encoder_title: "recut test".to_string(),
            crop_frames: track.keyframes().to_vec(),
            trimming_markers: timeline.markers().to_vec(),
            frame_rate: 30.0,
            duration: Duration::from_secs(2),
        };
        let out_file = dir.path().join("out.webm");
        let output = VideoTranscodeOutput::new(
            &out_file.to_string_lossy(),
            None,
            12,
            Size::new(20, 20),
            1.0,
        )
        .unwrap();

        let progress = CountingProgress::default();
        let report = ManifestTranscoder::new()
            .transcode(&input, &output, &plan, &progress)
            .await
            .unwrap();

        assert!(report.success);
        assert_eq!(report.frames_processed, 60);
        assert_eq!(progress.calls.load(Ordering::SeqCst), 60);
        assert_eq!(progress.last.load(Ordering::SeqCst), 60);

        let path = dir.path().join("out.recut.json");
        let manifest: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
        assert_eq!(manifest["input"]["fileName"], "clip.mp4");
        assert_eq!(manifest["output"]["outputType"], "vp9");
        assert_eq!(manifest["plan"]["frames"].as_array().unwrap().len(), 60);
        assert_eq!(manifest["plan"]["frames"][0]["crop"]["x"], 40);
        assert!(manifest["createdAt"].is_string());
    }
}
