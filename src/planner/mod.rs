//! Render planning - what an encoder has to produce for the edited timeline

use serde::Serialize;

use crate::domain::model::{Rect, Size};

pub mod render;

pub use render::RenderPlanner;

/// Kept input range `[start_frame, end_frame)`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KeptRange {
    pub start_frame: i64,
    pub end_frame: i64,
    pub start_seconds: f64,
    pub end_seconds: f64,
}

/// Crop window in the form crop filters take: top-left corner plus size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CropWindow {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl From<Rect> for CropWindow {
    fn from(rect: Rect) -> Self {
        Self {
            x: rect.left(),
            y: rect.top(),
            width: rect.width,
            height: rect.height,
        }
    }
}

/// One encoded frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlannedFrame {
    pub output_frame: i64,
    pub input_frame: i64,
    pub crop: CropWindow,
}

/// Full render plan
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderPlan {
    pub kept_ranges: Vec<KeptRange>,
    pub frames: Vec<PlannedFrame>,
    /// Size every cropped frame is scaled to
    pub output_size: Size,
    pub input_frame_rate: f64,
    pub output_frame_rate: f64,
}

impl RenderPlan {
    pub fn total_output_frames(&self) -> u64 {
        self.frames.len() as u64
    }
}
