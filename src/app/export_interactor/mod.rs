// Export interactor - Hands the edited timeline to the transcoder

use std::sync::Arc;

use tracing::{info, warn};

use crate::app::timeline_controller::TimelineController;
use crate::domain::errors::*;
use crate::domain::model::*;
use crate::planner::{RenderPlan, RenderPlanner};
use crate::ports::*;

/// User choices for one export
#[derive(Debug, Clone, PartialEq)]
pub struct ExportSettings {
    pub file_name: String,
    /// Derived from the file extension when absent
    pub output_type: Option<VideoOutputType>,
    pub crf: u32,
    /// Multiplier applied to the largest crop size
    pub pixel_scale: f64,
    pub frame_rate_multiplier: f64,
}

/// Everything the transcoder needs, captured from the session
#[derive(Debug, Clone)]
pub struct ExportJob {
    pub input: VideoTranscodeInput,
    pub output: VideoTranscodeOutput,
    pub plan: RenderPlan,
}

/// Interactor for the export use case
pub struct ExportInteractor {
    transcoder: Arc<dyn TranscoderPort>,
    progress_interval_frames: u64,
}

impl ExportInteractor {
    /// Create new export interactor with injected transcoder
    pub fn new(transcoder: Arc<dyn TranscoderPort>, progress_interval_frames: u64) -> Self {
        Self {
            transcoder,
            progress_interval_frames: progress_interval_frames.max(1),
        }
    }

    /// Snapshot markers and keyframes and plan the render
    pub fn prepare<P: PlayerPort>(
        &self,
        controller: &TimelineController<P>,
        media_file_name: &str,
        settings: &ExportSettings,
    ) -> Result<ExportJob, DomainError> {
        let media = controller.media().ok_or(DomainError::MediaNotLoaded)?;
        if !settings.pixel_scale.is_finite() || settings.pixel_scale <= 0.0 {
            return Err(DomainError::BadArgs(
                "Pixel scale must be positive".to_string(),
            ));
        }

        let pixel_size = controller
            .largest_output_pixel_size()
            .scale(settings.pixel_scale);
        if pixel_size.width <= 0 || pixel_size.height <= 0 {
            return Err(DomainError::BadArgs(format!(
                "Output size {}x{} is empty",
                pixel_size.width, pixel_size.height
            )));
        }

        let output = VideoTranscodeOutput::new(
            &settings.file_name,
            settings.output_type,
            settings.crf,
            pixel_size,
            settings.frame_rate_multiplier,
        )?;
        let input = VideoTranscodeInput {
            file_name: media_file_name.to_string(),
            encoder_title: format!("recut {}", env!("CARGO_PKG_VERSION")),
            crop_frames: controller.keyframes().keyframes().to_vec(),
            trimming_markers: controller.timeline().markers().to_vec(),
            frame_rate: media.frame_rate,
            duration: media.duration,
        };
        let plan = RenderPlanner::plan(
            controller.timeline(),
            controller.keyframes(),
            pixel_size,
            settings.frame_rate_multiplier,
        )?;

        Ok(ExportJob {
            input,
            output,
            plan,
        })
    }

    /// Run the transcoder, forwarding progress once per interval
    pub async fn execute(
        &self,
        job: &ExportJob,
        progress: &dyn ProgressCallback,
    ) -> Result<TranscodeReport, DomainError> {
        info!(
            "Exporting {} frames to {} ({}, crf {})",
            job.plan.total_output_frames(),
            job.output.file_name,
            job.output.output_type,
            job.output.crf
        );

        let throttled = ThrottledProgress {
            inner: progress,
            interval: self.progress_interval_frames,
        };
        let report = self
            .transcoder
            .transcode(&job.input, &job.output, &job.plan, &throttled)
            .await?;

        if report.success {
            info!(
                "Export finished: {} frames in {:.2}s",
                report.frames_processed,
                report.elapsed.as_secs_f64()
            );
        } else {
            warn!(
                "Export failed after {} frames ({:.2}s)",
                report.frames_processed,
                report.elapsed.as_secs_f64()
            );
        }
        Ok(report)
    }
}

struct ThrottledProgress<'a> {
    inner: &'a dyn ProgressCallback,
    interval: u64,
}

impl ProgressCallback for ThrottledProgress<'_> {
    fn on_progress(&self, processed_frames: u64, total_frames: u64) {
        if processed_frames % self.interval == 0 || processed_frames == total_frames {
            self.inner.on_progress(processed_frames, total_frames);
        }
    }
}
