// Timeline controller - one edit session over a loaded media file

use std::time::Duration;

use tracing::{debug, info};

use crate::domain::errors::DomainError;
use crate::domain::keyframes::CropKeyframeTrack;
use crate::domain::model::*;
use crate::domain::segments::SegmentSummary;
use crate::domain::timeline::TrimTimeline;
use crate::ports::PlayerPort;

/// Edit session state and commands.
///
/// Owns the input position and every collection of the session. All
/// mutations are expected from a single thread; derived views are rebuilt
/// before each mutating command returns.
pub struct TimelineController<P: PlayerPort> {
    player: P,
    timeline: TrimTimeline,
    keyframes: CropKeyframeTrack,
    summary: SegmentSummary,
    media: Option<MediaInfo>,
    input_position: Duration,
    playback: PlaybackState,
}

impl<P: PlayerPort> TimelineController<P> {
    /// Create a controller with no media loaded
    pub fn new(player: P) -> Self {
        Self {
            player,
            timeline: TrimTimeline::new(),
            keyframes: CropKeyframeTrack::new(),
            summary: SegmentSummary::default(),
            media: None,
            input_position: Duration::ZERO,
            playback: PlaybackState::Stopped,
        }
    }

    /// Accept media facts from the player and reset the transport
    pub fn load_media(&mut self, media: MediaInfo) {
        info!(
            frame_rate = media.frame_rate,
            duration = ?media.duration,
            width = media.pixel_size.width,
            height = media.pixel_size.height,
            "Media loaded"
        );
        self.timeline.set_media(media.frame_rate, media.duration);
        self.media = Some(media);
        self.input_position = Duration::ZERO;
        self.playback = PlaybackState::Stopped;
        self.keyframes.seed(media.default_crop_rect());
        self.summary.rebuild(&self.timeline);
    }

    /// Replace markers and keyframes with a persisted session
    pub fn restore(&mut self, project: &ProjectFile) {
        self.timeline.replace_markers(project.trimming_markers.clone());
        self.keyframes = CropKeyframeTrack::with_keyframes(
            project.crop_frames.clone(),
            project.freeze_crop_size_mode,
        );
        if let Some(media) = self.media {
            self.keyframes.seed(media.default_crop_rect());
        }
        self.summary.rebuild(&self.timeline);
        debug!(
            markers = self.timeline.markers().len(),
            keyframes = self.keyframes.len(),
            "Project restored"
        );
    }

    /// Snapshot the session for persistence
    pub fn to_project(&self, media_file_name: &str) -> ProjectFile {
        ProjectFile {
            freeze_crop_size_mode: self.keyframes.is_frozen(),
            media_file_name: media_file_name.to_string(),
            crop_frames: self.keyframes.keyframes().to_vec(),
            trimming_markers: self.timeline.markers().to_vec(),
        }
    }

    pub fn player(&self) -> &P {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut P {
        &mut self.player
    }

    pub fn timeline(&self) -> &TrimTimeline {
        &self.timeline
    }

    pub fn keyframes(&self) -> &CropKeyframeTrack {
        &self.keyframes
    }

    pub fn summary(&self) -> &SegmentSummary {
        &self.summary
    }

    pub fn disjunct_output_trims(&self) -> &[DisjunctSegment] {
        &self.summary.disjunct_segments
    }

    pub fn non_disjunct_output_markers(&self) -> &[NonDisjunctMarker] {
        &self.summary.non_disjunct_markers
    }

    pub fn media(&self) -> Option<&MediaInfo> {
        self.media.as_ref()
    }

    pub fn playback_state(&self) -> PlaybackState {
        self.playback
    }

    pub fn input_position(&self) -> Duration {
        self.input_position
    }

    /// Input frame under the current position, rounded to the nearest frame
    pub fn current_input_frame(&self) -> i64 {
        self.timeline.nearest_frame_from_position(self.input_position)
    }

    pub fn current_output_frame(&self) -> i64 {
        self.timeline
            .output_frame_from_input(self.current_input_frame())
    }

    pub fn output_position(&self) -> Duration {
        self.timeline.position_from_frame(self.current_output_frame())
    }

    pub fn output_duration(&self) -> Duration {
        self.timeline.output_duration()
    }

    /// Position update coming from the player.
    ///
    /// While playing, landing inside a trimmed segment skips forward to the
    /// next kept frame, or pauses when nothing is left to play.
    pub fn set_input_position(&mut self, position: Duration) {
        self.input_position = position;
        if self.playback != PlaybackState::Playing {
            return;
        }

        let frame = self.current_input_frame();
        let in_trim = self
            .timeline
            .segment_containing(frame)
            .map(|s| s.trimmed)
            .unwrap_or(false);
        if !in_trim {
            return;
        }
        match self.timeline.next_non_trimmed_input_frame(frame, true) {
            Some(next) => {
                debug!(from = frame, to = next, "Skipping trimmed segment");
                self.seek_input(self.timeline.position_from_frame(next));
            }
            None => {
                debug!(frame, "Nothing left to play");
                self.pause();
            }
        }
    }

    /// Seek to an output position, clamped to the output duration
    pub fn set_output_position(&mut self, position: Duration) -> Result<(), DomainError> {
        let clamped = position.min(self.output_duration());
        self.seek_output_frame(self.timeline.frame_from_position(clamped))
    }

    /// Seek to an exact output frame, clamped to `[0, total_output_frames]`
    pub fn seek_output_frame(&mut self, output_frame: i64) -> Result<(), DomainError> {
        let output_frame = output_frame.clamp(0, self.timeline.total_output_frames().max(0));
        let input_frame = self.timeline.input_frame_from_output(output_frame)?;
        self.seek_input(self.timeline.position_from_frame(input_frame));
        Ok(())
    }

    /// Seek to a fraction in `[0, 1]` of the output duration
    pub fn seek_output_fraction(&mut self, fraction: f64) -> Result<(), DomainError> {
        if !fraction.is_finite() {
            return Err(DomainError::BadArgs(format!(
                "Seek fraction must be a number, got {}",
                fraction
            )));
        }
        let position = self.output_duration().mul_f64(fraction.clamp(0.0, 1.0));
        self.set_output_position(position)
    }

    pub fn jump_home(&mut self) -> Result<(), DomainError> {
        self.seek_output_frame(0)
    }

    pub fn jump_end(&mut self) -> Result<(), DomainError> {
        self.seek_output_frame(self.timeline.total_output_frames())
    }

    /// Step one frame through kept input.
    ///
    /// Forward moves by two input frames and then resolves to kept input, so a
    /// step out of a kept run lands on the start of the next one.
    pub fn frame_step(&mut self, forward: bool) -> bool {
        let current = self.current_input_frame();
        let candidate = if forward { current + 2 } else { current - 1 };
        match self.timeline.next_non_trimmed_input_frame(candidate, forward) {
            Some(frame) => {
                self.seek_input(self.timeline.position_from_frame(frame));
                true
            }
            None => false,
        }
    }

    /// Jump to the next or previous crop keyframe, or to the output edges
    pub fn crop_frame_step(&mut self, forward: bool) -> Result<(), DomainError> {
        let current = self.current_output_frame();
        let target = if forward {
            self.keyframes
                .next_after(current)
                .map(|k| k.frame_number)
                .unwrap_or_else(|| self.timeline.total_output_frames())
        } else {
            self.keyframes
                .previous_before(current)
                .map(|k| k.frame_number)
                .unwrap_or(0)
        };
        self.seek_output_frame(target)
    }

    /// Add a kept marker at the current input frame
    pub fn add_marker(&mut self) -> bool {
        let frame = self.current_input_frame();
        if !self.timeline.add_marker(frame) {
            return false;
        }
        info!(input_frame = frame, "Marker added");
        self.summary.rebuild(&self.timeline);
        true
    }

    /// Trim the segment under the current input frame.
    ///
    /// Crop keyframes follow the cut: those after it move back, then the
    /// rect is pinned on both sides of every cut edge.
    pub fn add_trim(&mut self) -> bool {
        let frame = self.current_input_frame();
        let cut = match self.timeline.add_trim(frame) {
            Some(cut) => cut,
            None => return false,
        };

        let cut_start = self.timeline.output_frame_from_input(cut.start);
        self.keyframes
            .shift_after_trim(cut_start, cut.len(), &self.timeline);
        self.keyframes.prune_and_border(&self.timeline);
        self.summary.rebuild(&self.timeline);
        info!(
            start = cut.start,
            end = cut.end,
            output_duration = ?self.output_duration(),
            "Segment trimmed"
        );
        true
    }

    /// Set the trim flag of the marker at `index` directly
    pub fn set_trim_after(&mut self, index: usize, trim_after: bool) -> bool {
        if !self.timeline.set_trim_after(index, trim_after) {
            return false;
        }
        self.summary.rebuild(&self.timeline);
        true
    }

    /// Effective crop rect at the current output frame
    pub fn current_crop_rect(&self) -> CropRect {
        self.keyframes
            .rect_at(self.current_output_frame(), &self.timeline)
    }

    /// Write a crop rect at the current output frame, kept inside the media frame
    pub fn set_current_crop_rect(&mut self, rect: Rect) -> bool {
        let rect = match self.media {
            Some(media) => {
                let Size { width, height } = media.pixel_size;
                rect.clamp(&Rect::new(width / 2, height / 2, width, height), false)
            }
            None => rect,
        };
        let frame = self.current_output_frame();
        self.keyframes.materialize(frame, Some(rect), &self.timeline)
    }

    pub fn set_freeze_crop_size_mode(&mut self, frozen: bool) -> bool {
        let changed = self.keyframes.set_frozen(frozen);
        if changed {
            info!(frozen, "Freeze crop size mode changed");
        }
        changed
    }

    /// Largest crop over all keyframes, the natural export size
    pub fn largest_output_pixel_size(&self) -> Size {
        self.keyframes.largest_size()
    }

    pub fn play(&mut self) {
        if self.playback != PlaybackState::Playing {
            self.playback = PlaybackState::Playing;
            self.player.play();
        }
    }

    pub fn pause(&mut self) {
        if self.playback == PlaybackState::Playing {
            self.playback = PlaybackState::Paused;
            self.player.pause();
        }
    }

    pub fn toggle_play_pause(&mut self) {
        if self.playback == PlaybackState::Playing {
            self.pause();
        } else {
            self.play();
        }
    }

    fn seek_input(&mut self, position: Duration) {
        self.input_position = position;
        self.player.seek(position);
    }
}
