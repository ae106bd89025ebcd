//! Render plan construction

use tracing::{debug, info};

use crate::domain::errors::DomainError;
use crate::domain::keyframes::CropKeyframeTrack;
use crate::domain::model::{CropRectKind, Size};
use crate::domain::timeline::TrimTimeline;
use crate::planner::{CropWindow, KeptRange, PlannedFrame, RenderPlan};

/// Builds render plans from an edit session
pub struct RenderPlanner;

impl RenderPlanner {
    /// Plan every output frame: its source input frame and its crop window.
    ///
    /// Crop rects come from the keyframe track, so the encoder sees exactly
    /// what the editor shows.
    pub fn plan(
        timeline: &TrimTimeline,
        keyframes: &CropKeyframeTrack,
        output_size: Size,
        frame_rate_multiplier: f64,
    ) -> Result<RenderPlan, DomainError> {
        if !timeline.is_loaded() {
            return Err(DomainError::MediaNotLoaded);
        }
        if keyframes.is_empty() {
            return Err(DomainError::BadArgs(
                "No crop keyframes to render".to_string(),
            ));
        }

        let frame_rate = timeline.frame_rate();
        let kept_ranges: Vec<KeptRange> = timeline
            .segments()
            .filter(|s| !s.trimmed && !s.is_empty())
            .map(|s| KeptRange {
                start_frame: s.start,
                end_frame: s.end,
                start_seconds: s.start as f64 / frame_rate,
                end_seconds: s.end as f64 / frame_rate,
            })
            .collect();

        let total_output_frames = timeline.total_output_frames();
        let mut frames = Vec::with_capacity(total_output_frames.max(0) as usize);
        let mut ranges = kept_ranges.iter();
        let mut current = ranges.next();
        let mut range_output_start = 0;

        for output_frame in 0..total_output_frames {
            // walk kept ranges alongside instead of re-mapping every frame
            while let Some(range) = current {
                if output_frame - range_output_start < range.end_frame - range.start_frame {
                    break;
                }
                range_output_start += range.end_frame - range.start_frame;
                current = ranges.next();
            }
            let range = match current {
                Some(range) => range,
                None => break,
            };

            let crop = keyframes.rect_at(output_frame, timeline);
            if crop.kind == CropRectKind::None {
                return Err(DomainError::BadArgs(format!(
                    "No crop rect for output frame {}",
                    output_frame
                )));
            }
            frames.push(PlannedFrame {
                output_frame,
                input_frame: range.start_frame + (output_frame - range_output_start),
                crop: CropWindow::from(crop.rect),
            });
        }

        debug!(
            kept_ranges = kept_ranges.len(),
            frames = frames.len(),
            "Render plan built"
        );
        info!(
            "Planned {} output frames at {}x{}",
            frames.len(),
            output_size.width,
            output_size.height
        );

        Ok(RenderPlan {
            kept_ranges,
            frames,
            output_size,
            input_frame_rate: frame_rate,
            output_frame_rate: frame_rate * frame_rate_multiplier,
        })
    }
}
