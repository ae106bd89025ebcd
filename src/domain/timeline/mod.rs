//! Trim timeline - maps frames between the input and output domains
//!
//! The timeline owns the ordered trim markers together with the media frame
//! rate and duration. Every conversion between input frames (original media)
//! and output frames (media with trimmed segments removed) goes through here.

use std::time::Duration;

use tracing::debug;

use crate::domain::errors::DomainError;
use crate::domain::model::TrimMarker;

const TICKS_PER_SECOND: f64 = 10_000_000.0;
const TICKS_PER_MILLISECOND: i64 = 10_000;
const NANOS_PER_TICK: u64 = 100;

/// Contiguous input range `[start, end)` owned by one marker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub marker_index: usize,
    pub start: i64,
    pub end: i64,
    pub trimmed: bool,
}

impl Segment {
    pub fn len(&self) -> i64 {
        (self.end - self.start).max(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, input_frame: i64) -> bool {
        self.start <= input_frame && input_frame < self.end
    }
}

/// Ordered trim markers over the input frame domain
#[derive(Debug, Clone, PartialEq)]
pub struct TrimTimeline {
    markers: Vec<TrimMarker>,
    frame_rate: f64,
    input_duration: Duration,
}

impl Default for TrimTimeline {
    fn default() -> Self {
        Self::new()
    }
}

impl TrimTimeline {
    /// Create an empty timeline holding only the implicit marker at frame 0
    pub fn new() -> Self {
        Self {
            markers: vec![TrimMarker::new(0)],
            frame_rate: 0.0,
            input_duration: Duration::ZERO,
        }
    }

    /// Create a timeline from persisted markers.
    ///
    /// Markers are sorted, duplicates on the same frame collapse to the first
    /// one seen and a kept marker is synthesized at frame 0 when missing.
    pub fn with_markers(markers: Vec<TrimMarker>) -> Self {
        let mut timeline = Self::new();
        timeline.replace_markers(markers);
        timeline
    }

    /// Replace every marker, restoring the ordering invariants
    pub fn replace_markers(&mut self, mut markers: Vec<TrimMarker>) {
        markers.retain(|m| m.frame_number() >= 0);
        markers.sort_by_key(|m| m.frame_number());
        markers.dedup_by_key(|m| m.frame_number());
        if markers.first().map(|m| m.frame_number()) != Some(0) {
            markers.insert(0, TrimMarker::new(0));
        }
        debug!(count = markers.len(), "Trim markers replaced");
        self.markers = markers;
    }

    /// Drop every marker but the implicit one at frame 0
    pub fn reset(&mut self) {
        self.markers = vec![TrimMarker::new(0)];
    }

    /// Supply media frame rate and duration
    pub fn set_media(&mut self, frame_rate: f64, input_duration: Duration) {
        self.frame_rate = if frame_rate.is_finite() && frame_rate > 0.0 {
            frame_rate
        } else {
            0.0
        };
        self.input_duration = input_duration;
    }

    pub fn markers(&self) -> &[TrimMarker] {
        &self.markers
    }

    pub fn frame_rate(&self) -> f64 {
        self.frame_rate
    }

    pub fn input_duration(&self) -> Duration {
        self.input_duration
    }

    /// Frame math is only meaningful with a frame rate and a duration
    pub fn is_loaded(&self) -> bool {
        self.frame_rate > 0.0 && !self.input_duration.is_zero()
    }

    /// Number of frames in the original media
    pub fn total_input_frames(&self) -> i64 {
        self.frame_from_position(self.input_duration)
    }

    fn segment_end(&self, index: usize) -> i64 {
        match self.markers.get(index + 1) {
            Some(next) => next.frame_number(),
            None => self.total_input_frames(),
        }
    }

    /// Segments in input order, one per marker
    pub fn segments(&self) -> impl Iterator<Item = Segment> + '_ {
        self.markers.iter().enumerate().map(move |(index, marker)| Segment {
            marker_index: index,
            start: marker.frame_number(),
            end: self.segment_end(index).max(marker.frame_number()),
            trimmed: marker.trim_after,
        })
    }

    /// Segment containing `input_frame`, if the frame lies inside the media
    pub fn segment_containing(&self, input_frame: i64) -> Option<Segment> {
        self.segments().find(|s| s.contains(input_frame))
    }

    /// Count of kept frames before `input_frame`; non-decreasing in its argument
    pub fn output_frame_from_input(&self, input_frame: i64) -> i64 {
        if self.frame_rate == 0.0 {
            return 0;
        }

        let mut output_frame = 0;
        for segment in self.segments() {
            if segment.start > input_frame {
                break;
            }
            if !segment.trimmed {
                output_frame += (input_frame - segment.start).min(segment.len());
            }
        }
        output_frame
    }

    /// Input frame showing `output_frame`.
    ///
    /// Trimmed segments are skipped over, so an output frame sitting on a cut
    /// resolves to the first frame of the next kept segment. Asking for more
    /// frames than are kept is an error; callers clamp first.
    pub fn input_frame_from_output(&self, output_frame: i64) -> Result<i64, DomainError> {
        if self.frame_rate == 0.0 {
            return Ok(0);
        }
        if output_frame < 0 {
            return Err(DomainError::OutputFrameOutOfRange {
                requested: output_frame,
                available: self.total_output_frames(),
            });
        }

        let mut remaining = output_frame;
        let mut input_frame = 0;
        let mut last_kept_end = 0;
        for segment in self.segments() {
            if segment.trimmed {
                input_frame += segment.len();
                continue;
            }
            if remaining < segment.len() {
                return Ok(input_frame + remaining);
            }
            input_frame += segment.len();
            remaining -= segment.len();
            last_kept_end = input_frame;
        }

        if remaining == 0 {
            // exactly the end of the output: the frame after the last kept one
            Ok(last_kept_end)
        } else {
            Err(DomainError::OutputFrameOutOfRange {
                requested: output_frame,
                available: output_frame - remaining,
            })
        }
    }

    /// Number of kept frames
    pub fn total_output_frames(&self) -> i64 {
        self.output_frame_from_input(self.total_input_frames())
    }

    /// Duration of the media once trimmed segments are removed
    pub fn output_duration(&self) -> Duration {
        self.position_from_frame(self.total_output_frames())
    }

    /// Insert a kept marker at `input_frame`. Returns false when one already exists.
    pub fn add_marker(&mut self, input_frame: i64) -> bool {
        if input_frame < 0 {
            return false;
        }
        let insert_index = match self
            .markers
            .iter()
            .rposition(|m| m.frame_number() <= input_frame)
        {
            Some(index) if self.markers[index].frame_number() == input_frame => return false,
            Some(index) => index + 1,
            None => 0,
        };
        self.markers.insert(insert_index, TrimMarker::new(input_frame));
        debug!(input_frame, index = insert_index, "Trim marker added");
        true
    }

    /// Trim the segment containing `input_frame`.
    ///
    /// The owning marker is the last one strictly before the frame. Returns the
    /// newly trimmed segment, or `None` when nothing changed.
    pub fn add_trim(&mut self, input_frame: i64) -> Option<Segment> {
        let index = self
            .markers
            .iter()
            .rposition(|m| m.frame_number() < input_frame)?;
        if self.markers[index].trim_after {
            return None;
        }
        self.markers[index].trim_after = true;
        let segment = self.segments().nth(index)?;
        debug!(
            start = segment.start,
            end = segment.end,
            "Segment trimmed"
        );
        Some(segment)
    }

    /// Set the trim flag of the marker at `index`. Returns true on change.
    pub fn set_trim_after(&mut self, index: usize, trim_after: bool) -> bool {
        match self.markers.get_mut(index) {
            Some(marker) if marker.trim_after != trim_after => {
                marker.trim_after = trim_after;
                debug!(index, trim_after, "Trim flag toggled");
                true
            }
            _ => false,
        }
    }

    /// Nearest frame to play at or after (`forward`) / at or before `input_frame`.
    ///
    /// A frame inside a kept segment is returned unchanged. From inside a
    /// trimmed segment the search goes forward to the start of the next kept
    /// segment, or backward to the last frame of the previous kept one.
    /// `None` means there is nothing left to play in that direction.
    pub fn next_non_trimmed_input_frame(&self, input_frame: i64, forward: bool) -> Option<i64> {
        let segments: Vec<Segment> = self.segments().collect();
        let index = segments.iter().position(|s| s.contains(input_frame))?;
        if !segments[index].trimmed {
            return Some(input_frame);
        }

        if forward {
            segments[index..]
                .iter()
                .find(|s| !s.trimmed && !s.is_empty())
                .map(|s| s.start)
        } else {
            segments[..index]
                .iter()
                .rev()
                .find(|s| !s.trimmed && !s.is_empty())
                .map(|s| s.end - 1)
        }
    }

    /// Time of `frame`, snapped to a frame boundary.
    ///
    /// Milliseconds are rounded half-up first, then a position more than half
    /// a frame past a boundary is pushed to the next boundary.
    pub fn position_from_frame(&self, frame: i64) -> Duration {
        if self.frame_rate == 0.0 || frame <= 0 {
            return Duration::ZERO;
        }

        let milliseconds = (frame as f64 / self.frame_rate * 1000.0 + 0.5).floor() as i64;
        let mut ticks = milliseconds * TICKS_PER_MILLISECOND;
        let frame_ticks = (TICKS_PER_SECOND / self.frame_rate) as i64;
        if frame_ticks > 0 {
            let past_boundary = ticks % frame_ticks;
            if past_boundary > frame_ticks / 2 {
                ticks += frame_ticks - past_boundary;
            }
        }
        Duration::from_nanos(ticks as u64 * NANOS_PER_TICK)
    }

    /// Frame shown at `position`, truncated toward zero
    pub fn frame_from_position(&self, position: Duration) -> i64 {
        if self.frame_rate == 0.0 {
            return 0;
        }
        (position.as_secs_f64() * self.frame_rate) as i64
    }

    /// Frame whose position lies nearest to `position`.
    ///
    /// Reads back every position produced by [`Self::position_from_frame`] as
    /// the frame it came from, which truncation does not.
    pub fn nearest_frame_from_position(&self, position: Duration) -> i64 {
        if self.frame_rate == 0.0 {
            return 0;
        }
        (position.as_secs_f64() * self.frame_rate).round() as i64
    }
}
