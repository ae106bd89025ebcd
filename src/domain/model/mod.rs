// Domain models - Core types and data structures

use std::fmt;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::errors::DomainError;
use crate::utils::time::format_duration;

/// Time specification parsed from user input - wraps a non-negative duration
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct TimeSpec {
    pub duration: Duration,
}

impl TimeSpec {
    /// Create a new TimeSpec from seconds
    pub fn from_seconds(seconds: f64) -> Self {
        Self {
            duration: Duration::from_secs_f64(seconds.max(0.0)),
        }
    }

    /// Create a new TimeSpec from a duration
    pub fn from_duration(duration: Duration) -> Self {
        Self { duration }
    }

    /// Parse time string: `12.5`, `12.5s`, `MM:SS.ms` or `HH:MM:SS.ms`
    pub fn parse(time_str: &str) -> Result<Self, DomainError> {
        let trimmed = time_str.trim();
        let trimmed = trimmed.strip_suffix('s').unwrap_or(trimmed);

        if let Ok(seconds) = trimmed.parse::<f64>() {
            if seconds < 0.0 || !seconds.is_finite() {
                return Err(DomainError::BadArgs(format!("Time cannot be negative: {}", time_str)));
            }
            return Ok(Self::from_seconds(seconds));
        }

        let parts: Vec<&str> = trimmed.split(':').collect();
        let (hours, minutes, seconds) = match parts.as_slice() {
            [m, s] => (0u64, Self::parse_component(m, time_str)?, *s),
            [h, m, s] => (
                Self::parse_component(h, time_str)?,
                Self::parse_component(m, time_str)?,
                *s,
            ),
            _ => {
                return Err(DomainError::BadArgs(format!(
                    "Invalid time format '{}'. Supported formats: seconds (e.g., 123.45), MM:SS.ms, HH:MM:SS.ms",
                    time_str
                )))
            }
        };

        if parts.len() == 3 && minutes >= 60 {
            return Err(DomainError::BadArgs("Minutes must be less than 60".to_string()));
        }
        let seconds = seconds
            .parse::<f64>()
            .map_err(|_| DomainError::BadArgs(format!("Invalid seconds in '{}'", time_str)))?;
        if !(0.0..60.0).contains(&seconds) {
            return Err(DomainError::BadArgs("Seconds must be less than 60".to_string()));
        }

        Ok(Self::from_seconds(
            hours as f64 * 3600.0 + minutes as f64 * 60.0 + seconds,
        ))
    }

    fn parse_component(part: &str, original: &str) -> Result<u64, DomainError> {
        part.parse::<u64>()
            .map_err(|_| DomainError::BadArgs(format!("Invalid time component in '{}'", original)))
    }
}

impl fmt::Display for TimeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", format_duration(self.duration))
    }
}

/// Pixel size of a frame or of an encoded output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Scale both dimensions, truncating toward zero
    pub fn scale(&self, factor: f64) -> Self {
        Self {
            width: (self.width as f64 * factor) as i32,
            height: (self.height as f64 * factor) as i32,
        }
    }
}

/// Axis-aligned rectangle stored as center + size, in media pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rect {
    pub center_x: i32,
    pub center_y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub fn new(center_x: i32, center_y: i32, width: i32, height: i32) -> Self {
        Self {
            center_x,
            center_y,
            width,
            height,
        }
    }

    /// A rect is usable only with a positive area
    pub fn is_valid(&self) -> bool {
        self.width > 0 && self.height > 0
    }

    /// Left edge, as consumed by crop filters
    pub fn left(&self) -> i32 {
        self.center_x - self.width / 2
    }

    /// Top edge, as consumed by crop filters
    pub fn top(&self) -> i32 {
        self.center_y - self.height / 2
    }

    /// Linear blend of every field, truncated toward zero.
    ///
    /// `t` is expected in `[0, 1]`; `t == 0` yields `a` and `t == 1` yields `b`.
    pub fn interpolate(a: &Rect, b: &Rect, t: f64) -> Rect {
        let lerp = |from: i32, to: i32| (from as f64 + (to - from) as f64 * t) as i32;
        Rect::new(
            lerp(a.center_x, b.center_x),
            lerp(a.center_y, b.center_y),
            lerp(a.width, b.width),
            lerp(a.height, b.height),
        )
    }

    /// Linear projection past `b`, continuing the `a -> b` motion for
    /// `distance_past_b` frames given `a` and `b` are `distance_ab` frames apart.
    ///
    /// Integer arithmetic throughout; division truncates toward zero.
    pub fn extrapolate(a: &Rect, b: &Rect, distance_ab: i64, distance_past_b: i64) -> Rect {
        if distance_ab == 0 {
            return *b;
        }
        let project = |from: i32, to: i32| {
            (to as i64 + (to as i64 - from as i64) * distance_past_b / distance_ab) as i32
        };
        Rect::new(
            project(a.center_x, b.center_x),
            project(a.center_y, b.center_y),
            project(a.width, b.width),
            project(a.height, b.height),
        )
    }

    /// Shrink to fit inside `bounds` (width first, then height), optionally
    /// keeping the aspect ratio, then move the center so the rect stays inside.
    pub fn clamp(&self, bounds: &Rect, preserve_aspect_ratio: bool) -> Rect {
        if self.width > bounds.width {
            let height = if preserve_aspect_ratio {
                let aspect_ratio = self.width as f64 / self.height as f64;
                (bounds.width as f64 / aspect_ratio) as i32
            } else {
                self.height
            };
            return Rect::new(bounds.center_x, self.center_y, bounds.width, height)
                .clamp(bounds, preserve_aspect_ratio);
        }

        if self.height > bounds.height {
            let width = if preserve_aspect_ratio {
                let aspect_ratio = self.width as f64 / self.height as f64;
                (bounds.height as f64 * aspect_ratio) as i32
            } else {
                self.width
            };
            return Rect::new(self.center_x, bounds.center_y, width, bounds.height)
                .clamp(bounds, preserve_aspect_ratio);
        }

        // min/max instead of i32::clamp: odd sizes can make the window empty
        let fit = |value: i32, center: i32, outer: i32, inner: i32| {
            value
                .min(center + outer / 2 - inner / 2)
                .max(center - outer / 2 + inner / 2)
        };
        Rect::new(
            fit(self.center_x, bounds.center_x, bounds.width, self.width),
            fit(self.center_y, bounds.center_y, bounds.height, self.height),
            self.width.max(0).min(bounds.width),
            self.height.max(0).min(bounds.height),
        )
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}x{} @ ({}, {})",
            self.width, self.height, self.center_x, self.center_y
        )
    }
}

/// How the crop rect for a frame was obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum CropRectKind {
    /// No media or no keyframes
    #[default]
    None,
    /// Freeze mode is off: keyframe 0 applies to the whole timeline
    FirstFrameUnfrozen,
    /// An explicit keyframe sits on this frame
    KeyFrame,
    /// Blended between keyframes, or held past the last one
    Interpolated,
}

/// Effective crop rect at a frame, tagged with its origin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CropRect {
    pub rect: Rect,
    pub kind: CropRectKind,
}

impl CropRect {
    pub fn new(rect: Rect, kind: CropRectKind) -> Self {
        Self { rect, kind }
    }

    pub fn none() -> Self {
        Self::default()
    }
}

/// Boundary in the input frame domain; the segment starting here is kept or trimmed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrimMarker {
    frame_number: i64,
    pub trim_after: bool,
}

impl TrimMarker {
    pub fn new(frame_number: i64) -> Self {
        Self {
            frame_number,
            trim_after: false,
        }
    }

    pub fn with_trim(frame_number: i64, trim_after: bool) -> Self {
        Self {
            frame_number,
            trim_after,
        }
    }

    /// Input frame where this marker's segment starts; fixed at creation
    pub fn frame_number(&self) -> i64 {
        self.frame_number
    }
}

/// Explicit crop rect captured at an output frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CropKeyframe {
    pub frame_number: i64,
    #[serde(rename = "cropRectangle")]
    pub rect: Rect,
}

impl CropKeyframe {
    pub fn new(frame_number: i64, rect: Rect) -> Self {
        Self { frame_number, rect }
    }
}

/// Maximal run of continuously kept output time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DisjunctSegment {
    pub from: Duration,
    pub to: Duration,
}

impl DisjunctSegment {
    pub fn new(from: Duration, to: Duration) -> Self {
        Self { from, to }
    }

    pub fn length(&self) -> Duration {
        self.to.saturating_sub(self.from)
    }
}

/// Output position where two kept segments touch with no trim between them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NonDisjunctMarker {
    pub position: Duration,
}

impl NonDisjunctMarker {
    pub fn new(position: Duration) -> Self {
        Self { position }
    }
}

/// Media facts supplied by the player on load; never probed by this crate
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MediaInfo {
    pub frame_rate: f64,
    pub duration: Duration,
    pub pixel_size: Size,
}

impl MediaInfo {
    /// Create new media info with validation
    pub fn new(frame_rate: f64, duration: Duration, pixel_size: Size) -> Result<Self, DomainError> {
        if !frame_rate.is_finite() || frame_rate <= 0.0 {
            return Err(DomainError::BadArgs("Frame rate must be positive".to_string()));
        }
        if pixel_size.width <= 0 || pixel_size.height <= 0 {
            return Err(DomainError::BadArgs("Video dimensions must be positive".to_string()));
        }
        Ok(Self {
            frame_rate,
            duration,
            pixel_size,
        })
    }

    /// Default crop for fresh media: centred, half the frame in each dimension
    pub fn default_crop_rect(&self) -> Rect {
        let Size { width, height } = self.pixel_size;
        Rect::new(width / 2, height / 2, width / 2, height / 2)
    }
}

/// Player transport state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackState {
    Playing,
    Paused,
    #[default]
    Stopped,
}

/// Encoded output container/codec
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VideoOutputType {
    Mp4,
    Vp8,
    Vp9,
}

impl VideoOutputType {
    /// Parse output type from string
    pub fn parse(value: &str) -> Result<Self, DomainError> {
        match value.to_lowercase().as_str() {
            "mp4" | "h264" => Ok(Self::Mp4),
            "vp8" => Ok(Self::Vp8),
            "vp9" | "webm" => Ok(Self::Vp9),
            other => Err(DomainError::BadArgs(format!(
                "Unknown output type '{}'. Expected mp4, vp8 or vp9",
                other
            ))),
        }
    }

    /// Output type implied by a file name: `.webm` is VP9, anything else MP4
    pub fn from_file_name(file_name: &str) -> Self {
        match Path::new(file_name).extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("webm") => Self::Vp9,
            _ => Self::Mp4,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Mp4 => "mp4",
            Self::Vp8 | Self::Vp9 => "webm",
        }
    }
}

impl fmt::Display for VideoOutputType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Mp4 => "mp4",
            Self::Vp8 => "vp8",
            Self::Vp9 => "vp9",
        };
        write!(f, "{}", name)
    }
}

/// Snapshot handed to the transcoder collaborator
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoTranscodeInput {
    pub file_name: String,
    pub encoder_title: String,
    pub crop_frames: Vec<CropKeyframe>,
    pub trimming_markers: Vec<TrimMarker>,
    pub frame_rate: f64,
    pub duration: Duration,
}

/// Output parameters for the transcoder collaborator
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoTranscodeOutput {
    pub file_name: String,
    pub output_type: VideoOutputType,
    pub crf: u32,
    pub pixel_width: i32,
    pub pixel_height: i32,
    pub frame_rate_multiplier: f64,
}

impl VideoTranscodeOutput {
    /// Build output parameters, keeping file extension and output type in agreement
    pub fn new(
        file_name: &str,
        output_type: Option<VideoOutputType>,
        crf: u32,
        pixel_size: Size,
        frame_rate_multiplier: f64,
    ) -> Result<Self, DomainError> {
        if crf > 63 {
            return Err(DomainError::BadArgs("CRF value cannot exceed 63".to_string()));
        }
        if !frame_rate_multiplier.is_finite() || frame_rate_multiplier <= 0.0 {
            return Err(DomainError::BadArgs(
                "Frame rate multiplier must be positive".to_string(),
            ));
        }
        let output_type = output_type.unwrap_or_else(|| VideoOutputType::from_file_name(file_name));
        let file_name = Path::new(file_name)
            .with_extension(output_type.extension())
            .to_string_lossy()
            .into_owned();

        Ok(Self {
            file_name,
            output_type,
            crf,
            pixel_width: pixel_size.width,
            pixel_height: pixel_size.height,
            frame_rate_multiplier,
        })
    }
}

/// Persisted edit session
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectFile {
    #[serde(default)]
    pub freeze_crop_size_mode: bool,
    pub media_file_name: String,
    #[serde(default)]
    pub crop_frames: Vec<CropKeyframe>,
    #[serde(default)]
    pub trimming_markers: Vec<TrimMarker>,
}

/// Result reported back by the transcoder collaborator
#[derive(Debug, Clone, PartialEq)]
pub struct TranscodeReport {
    pub success: bool,
    pub elapsed: Duration,
    pub frames_processed: u64,
}

#[cfg(test)]
mod tests;
