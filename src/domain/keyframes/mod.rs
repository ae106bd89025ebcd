//! Crop keyframe track
//!
//! Sparse, ordered crop rectangles in the output frame domain. The effective
//! rect at any frame is resolved from the surrounding keyframes; edits write
//! new keyframes on demand. Frame rate and duration are never stored here,
//! every query borrows the [`TrimTimeline`] instead.

use tracing::debug;

use crate::domain::model::{CropKeyframe, CropRect, CropRectKind, Rect, Size};
use crate::domain::timeline::TrimTimeline;

/// Ordered crop keyframes plus the freeze crop size mode flag
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CropKeyframeTrack {
    keyframes: Vec<CropKeyframe>,
    frozen: bool,
}

impl CropKeyframeTrack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restore a persisted track.
    ///
    /// Keyframes are sorted and deduplicated by frame. A keyframe at frame 0
    /// is synthesized from the earliest one when missing.
    pub fn with_keyframes(mut keyframes: Vec<CropKeyframe>, frozen: bool) -> Self {
        keyframes.retain(|k| k.frame_number >= 0);
        keyframes.sort_by_key(|k| k.frame_number);
        keyframes.dedup_by_key(|k| k.frame_number);
        if let Some(first) = keyframes.first().copied() {
            if first.frame_number != 0 {
                keyframes.insert(0, CropKeyframe::new(0, first.rect));
            }
        }
        Self { keyframes, frozen }
    }

    pub fn keyframes(&self) -> &[CropKeyframe] {
        &self.keyframes
    }

    pub fn frame_numbers(&self) -> Vec<i64> {
        self.keyframes.iter().map(|k| k.frame_number).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.keyframes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.keyframes.len()
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    pub fn clear(&mut self) {
        self.keyframes.clear();
    }

    /// Seed frame 0 for freshly loaded media; no-op when keyframes exist
    pub fn seed(&mut self, rect: Rect) -> bool {
        if !self.keyframes.is_empty() {
            return false;
        }
        self.keyframes.push(CropKeyframe::new(0, rect));
        debug!(%rect, "Crop keyframe 0 seeded");
        true
    }

    /// Switch freeze crop size mode. Any change collapses the track to keyframe 0.
    pub fn set_frozen(&mut self, frozen: bool) -> bool {
        if self.frozen == frozen {
            return false;
        }
        self.frozen = frozen;
        self.exit_frozen_mode();
        true
    }

    /// Drop every keyframe but the first
    pub fn exit_frozen_mode(&mut self) {
        if self.keyframes.len() > 1 {
            debug!(dropped = self.keyframes.len() - 1, "Crop keyframes collapsed");
            self.keyframes.truncate(1);
        }
    }

    /// Effective crop rect at `output_frame`
    pub fn rect_at(&self, output_frame: i64, timeline: &TrimTimeline) -> CropRect {
        let (first, last) = match (self.keyframes.first(), self.keyframes.last()) {
            (Some(first), Some(last)) if timeline.is_loaded() => (first, last),
            _ => return CropRect::none(),
        };

        if !self.frozen {
            return CropRect::new(first.rect, CropRectKind::FirstFrameUnfrozen);
        }

        let index = self
            .keyframes
            .partition_point(|k| k.frame_number < output_frame);

        if let Some(exact) = self.keyframes.get(index) {
            if exact.frame_number == output_frame && exact.rect.is_valid() {
                return CropRect::new(exact.rect, CropRectKind::KeyFrame);
            }
        }

        // past the last keyframe the rect is held, not projected
        if output_frame > last.frame_number {
            return CropRect::new(last.rect, CropRectKind::Interpolated);
        }

        if index == 0 {
            debug_assert!(
                index > 0,
                "no keyframe bracket for output frame {}",
                output_frame
            );
            return CropRect::none();
        }

        let before = &self.keyframes[index - 1];
        let after = &self.keyframes[index];
        let t = (output_frame - before.frame_number) as f64
            / (after.frame_number - before.frame_number) as f64;
        CropRect::new(
            Rect::interpolate(&before.rect, &after.rect, t),
            CropRectKind::Interpolated,
        )
    }

    /// Write a keyframe at `output_frame`.
    ///
    /// Without an explicit `rect` the current effective rect is captured.
    /// Outside freeze mode an explicit rect always replaces keyframe 0.
    /// Returns true when the track changed.
    pub fn materialize(
        &mut self,
        output_frame: i64,
        rect: Option<Rect>,
        timeline: &TrimTimeline,
    ) -> bool {
        if !timeline.is_loaded() || output_frame < 0 {
            return false;
        }

        if let (false, Some(rect)) = (self.frozen, rect) {
            let keyframe = CropKeyframe::new(0, rect);
            return match self.keyframes.first_mut() {
                Some(first) if *first == keyframe => false,
                Some(first) => {
                    *first = keyframe;
                    debug!(%rect, "Crop keyframe 0 replaced");
                    true
                }
                None => {
                    self.keyframes.push(keyframe);
                    true
                }
            };
        }

        let rect = match rect {
            Some(rect) => rect,
            None => {
                let current = self.rect_at(output_frame, timeline);
                if current.kind == CropRectKind::None {
                    return false;
                }
                current.rect
            }
        };

        let index = self
            .keyframes
            .partition_point(|k| k.frame_number < output_frame);
        match self.keyframes.get_mut(index) {
            Some(existing) if existing.frame_number == output_frame => {
                if existing.rect == rect {
                    return false;
                }
                existing.rect = rect;
                debug!(output_frame, %rect, "Crop keyframe updated");
            }
            _ => {
                self.keyframes
                    .insert(index, CropKeyframe::new(output_frame, rect));
                debug!(output_frame, %rect, "Crop keyframe materialized");
            }
        }
        true
    }

    /// Follow a newly trimmed output range `[cut_start, cut_start + cut_length)`.
    ///
    /// Rects are read from the track as it was before the cut: the frame
    /// before the cut is pinned, and unless a keyframe already sits on
    /// `cut_start` the rect at the end of the cut is captured so the frame
    /// joining the cut keeps its look. Keyframes inside the cut are dropped
    /// and those after `cut_start` move back by `cut_length`.
    pub fn shift_after_trim(&mut self, cut_start: i64, cut_length: i64, timeline: &TrimTimeline) {
        if cut_length <= 0 || self.keyframes.is_empty() {
            return;
        }
        let cut_end = cut_start + cut_length;
        if cut_start > 0 {
            self.materialize(cut_start - 1, None, timeline);
        }
        let start_pinned = self.keyframes.iter().any(|k| k.frame_number == cut_start);
        if !start_pinned {
            self.materialize(cut_end, None, timeline);
        }

        let before = self.keyframes.len();
        self.keyframes.retain(|k| {
            k.frame_number <= cut_start
                || k.frame_number > cut_end
                || (k.frame_number == cut_end && !start_pinned)
        });
        for keyframe in self
            .keyframes
            .iter_mut()
            .filter(|k| k.frame_number > cut_start)
        {
            keyframe.frame_number -= cut_length;
        }
        debug!(
            cut_start,
            cut_length,
            dropped = before - self.keyframes.len(),
            "Crop keyframes shifted after trim"
        );
    }

    /// Pin the rect on both sides of every kept-to-trimmed border, then drop
    /// keyframes outside the output range.
    pub fn prune_and_border(&mut self, timeline: &TrimTimeline) {
        let mut previous_trimmed: Option<bool> = None;
        for marker in timeline.markers() {
            if previous_trimmed == Some(marker.trim_after) {
                continue;
            }
            if !previous_trimmed.unwrap_or(false) {
                let border = timeline.output_frame_from_input(marker.frame_number());
                if border > 0 {
                    self.materialize(border - 1, None, timeline);
                }
                self.materialize(border, None, timeline);
            }
            previous_trimmed = Some(marker.trim_after);
        }

        let total_output_frames = timeline.total_output_frames();
        let before = self.keyframes.len();
        self.keyframes
            .retain(|k| (0..=total_output_frames).contains(&k.frame_number));
        if before != self.keyframes.len() {
            debug!(
                dropped = before - self.keyframes.len(),
                total_output_frames,
                "Crop keyframes outside the output pruned"
            );
        }
    }

    /// Nearest keyframe strictly after `output_frame`
    pub fn next_after(&self, output_frame: i64) -> Option<&CropKeyframe> {
        self.keyframes.iter().find(|k| k.frame_number > output_frame)
    }

    /// Nearest keyframe strictly before `output_frame`
    pub fn previous_before(&self, output_frame: i64) -> Option<&CropKeyframe> {
        self.keyframes
            .iter()
            .rev()
            .find(|k| k.frame_number < output_frame)
    }

    /// Widest width and tallest height over all keyframes
    pub fn largest_size(&self) -> Size {
        self.keyframes.iter().fold(Size::default(), |size, k| {
            Size::new(size.width.max(k.rect.width), size.height.max(k.rect.height))
        })
    }
}
