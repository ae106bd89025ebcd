// Segment summary - display model of the trimmed output timeline

use std::time::Duration;

use serde::Serialize;
use tracing::debug;

use crate::domain::model::{DisjunctSegment, NonDisjunctMarker};
use crate::domain::timeline::TrimTimeline;

/// Kept output runs and the markers that split a run without a gap
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentSummary {
    pub disjunct_segments: Vec<DisjunctSegment>,
    pub non_disjunct_markers: Vec<NonDisjunctMarker>,
}

impl Default for SegmentSummary {
    fn default() -> Self {
        Self {
            disjunct_segments: vec![DisjunctSegment::new(Duration::ZERO, Duration::ZERO)],
            non_disjunct_markers: Vec::new(),
        }
    }
}

impl SegmentSummary {
    /// Recompute from the current markers. Call after every marker mutation.
    pub fn rebuild(&mut self, timeline: &TrimTimeline) {
        *self = SegmentSummarizer::summarize(timeline);
    }
}

/// Derives [`SegmentSummary`] values from a timeline
pub struct SegmentSummarizer;

impl SegmentSummarizer {
    pub fn summarize(timeline: &TrimTimeline) -> SegmentSummary {
        let mut disjunct_segments = Vec::new();
        let mut non_disjunct_markers = Vec::new();
        let mut open_run: Option<Duration> = None;

        for marker in timeline.markers() {
            let position = timeline
                .position_from_frame(timeline.output_frame_from_input(marker.frame_number()));

            match (marker.trim_after, open_run) {
                (false, None) => open_run = Some(position),
                (false, Some(_)) => non_disjunct_markers.push(NonDisjunctMarker::new(position)),
                (true, Some(start)) => {
                    disjunct_segments.push(DisjunctSegment::new(start, position));
                    open_run = None;
                }
                (true, None) => {}
            }
        }

        if let Some(start) = open_run {
            disjunct_segments.push(DisjunctSegment::new(start, timeline.output_duration()));
        }
        if disjunct_segments.is_empty() {
            disjunct_segments.push(DisjunctSegment::new(Duration::ZERO, Duration::ZERO));
        }

        debug!(
            segments = disjunct_segments.len(),
            joins = non_disjunct_markers.len(),
            "Segment summary rebuilt"
        );
        SegmentSummary {
            disjunct_segments,
            non_disjunct_markers,
        }
    }
}
