//! Recut Library
//!
//! Timeline remapping and crop keyframe engine for a trim/crop video editor.
//! Input frames of the source media map onto output frames of the edited
//! result through trim markers; crop rectangles are keyed on output frames
//! and interpolated between keyframes.

pub mod adapters;
pub mod app;
pub mod cli;
pub mod config;
pub mod config_initialization;
pub mod domain;
pub mod error;
pub mod planner;
pub mod ports;
pub mod utils;

// Re-export commonly used types
pub use app::timeline_controller::TimelineController;
pub use domain::errors::DomainError;
pub use domain::keyframes::CropKeyframeTrack;
pub use domain::model::{
    CropKeyframe, CropRect, CropRectKind, DisjunctSegment, MediaInfo, NonDisjunctMarker, Rect,
    Size, TrimMarker,
};
pub use domain::segments::{SegmentSummarizer, SegmentSummary};
pub use domain::timeline::TrimTimeline;
pub use error::{RecutError, RecutResult};
