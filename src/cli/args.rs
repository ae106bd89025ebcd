//! Command-line argument definitions

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use clap::Args;

use crate::domain::errors::DomainError;
use crate::domain::model::{MediaInfo, Rect, Size, TimeSpec};
use crate::error::RecutError;

/// Media facts normally reported by the player
#[derive(Args, Debug, Clone)]
pub struct MediaArgs {
    /// Frame rate of the media in frames per second
    #[arg(long)]
    pub fps: f64,

    /// Media duration (HH:MM:SS.ms, MM:SS.ms, or seconds)
    #[arg(long)]
    pub duration: String,

    /// Frame width in pixels
    #[arg(long, default_value_t = 1920)]
    pub width: i32,

    /// Frame height in pixels
    #[arg(long, default_value_t = 1080)]
    pub height: i32,
}

impl MediaArgs {
    pub fn media_info(&self) -> Result<MediaInfo, DomainError> {
        let duration = TimeSpec::parse(&self.duration)?.duration;
        MediaInfo::new(self.fps, duration, Size::new(self.width, self.height))
    }
}

/// Arguments for the inspect command
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Project file (.json) or media file
    pub path: PathBuf,

    #[command(flatten)]
    pub media: MediaArgs,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the edit command
#[derive(Args, Debug)]
pub struct EditArgs {
    /// Project file (.json) or media file
    pub path: PathBuf,

    #[command(flatten)]
    pub media: MediaArgs,

    /// Where to save the project (default: the opened project, or the media path with a .json extension)
    #[arg(long)]
    pub save: Option<PathBuf>,

    /// Do not write the project after editing
    #[arg(long)]
    pub dry_run: bool,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,

    /// Edit operations, applied in order
    #[arg(required = true, num_args = 1..)]
    pub ops: Vec<EditOp>,
}

/// Arguments for the export command
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Project file (.json) or media file
    pub path: PathBuf,

    #[command(flatten)]
    pub media: MediaArgs,

    /// Output video file
    #[arg(short, long)]
    pub output: String,

    /// Output type: mp4, vp8 or vp9 (default: from the output extension)
    #[arg(long = "type")]
    pub output_type: Option<String>,

    /// Constant Rate Factor (0-63, default: last used)
    #[arg(long)]
    pub crf: Option<u32>,

    /// Multiplier for the largest crop size
    #[arg(long, default_value_t = 1.0)]
    pub scale: f64,

    /// Multiplier for the output frame rate
    #[arg(long, default_value_t = 1.0)]
    pub frame_rate_multiplier: f64,
}

/// One edit operation given on the command line
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EditOp {
    /// `seek=<time>`: seek the input position
    Seek(TimeSpec),
    /// `seek-out=<time>`: seek an output position
    SeekOut(TimeSpec),
    /// `seek-pct=<0..1>`: seek a fraction of the output duration
    SeekFraction(f64),
    Marker,
    Trim,
    /// `trim-after=<index>,<on|off>`
    TrimAfter(usize, bool),
    Step,
    Back,
    CropNext,
    CropPrev,
    Home,
    End,
    /// `freeze=on|off`
    Freeze(bool),
    /// `crop=cx,cy,w,h`
    Crop(Rect),
}

impl FromStr for EditOp {
    type Err = RecutError;

    fn from_str(op: &str) -> Result<Self, Self::Err> {
        let invalid = |message: String| RecutError::InvalidOperation {
            op: op.to_string(),
            message,
        };
        let (name, value) = match op.split_once('=') {
            Some((name, value)) => (name.trim(), Some(value.trim())),
            None => (op.trim(), None),
        };
        let required = || {
            value
                .filter(|v| !v.is_empty())
                .ok_or_else(|| invalid(format!("'{}' needs a value", name)))
        };
        let time = |value: &str| TimeSpec::parse(value).map_err(|e| invalid(e.to_string()));

        let parsed = match name {
            "seek" => EditOp::Seek(time(required()?)?),
            "seek-out" => EditOp::SeekOut(time(required()?)?),
            "seek-pct" => {
                let fraction = required()?
                    .parse::<f64>()
                    .map_err(|e| invalid(e.to_string()))?;
                EditOp::SeekFraction(fraction)
            }
            "marker" => EditOp::Marker,
            "trim" => EditOp::Trim,
            "trim-after" => {
                let raw = required()?;
                let (index, flag) = raw
                    .split_once(',')
                    .ok_or_else(|| invalid("expected <index>,<on|off>".to_string()))?;
                let index = index
                    .trim()
                    .parse::<usize>()
                    .map_err(|e| invalid(e.to_string()))?;
                EditOp::TrimAfter(index, parse_switch(flag).map_err(invalid)?)
            }
            "step" => EditOp::Step,
            "back" => EditOp::Back,
            "crop-next" => EditOp::CropNext,
            "crop-prev" => EditOp::CropPrev,
            "home" => EditOp::Home,
            "end" => EditOp::End,
            "freeze" => EditOp::Freeze(parse_switch(required()?).map_err(invalid)?),
            "crop" => {
                let parts = required()?
                    .split(',')
                    .map(|p| p.trim().parse::<i32>())
                    .collect::<Result<Vec<_>, _>>()
                    .map_err(|e| invalid(e.to_string()))?;
                match parts.as_slice() {
                    [cx, cy, w, h] if *w > 0 && *h > 0 => EditOp::Crop(Rect::new(*cx, *cy, *w, *h)),
                    [_, _, _, _] => return Err(invalid("width and height must be positive".to_string())),
                    _ => return Err(invalid("expected cx,cy,w,h".to_string())),
                }
            }
            _ => return Err(invalid("unknown operation".to_string())),
        };

        let takes_value = matches!(
            parsed,
            EditOp::Seek(_)
                | EditOp::SeekOut(_)
                | EditOp::SeekFraction(_)
                | EditOp::TrimAfter(..)
                | EditOp::Freeze(_)
                | EditOp::Crop(_)
        );
        if !takes_value && value.is_some() {
            return Err(invalid(format!("'{}' takes no value", name)));
        }
        Ok(parsed)
    }
}

impl fmt::Display for EditOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EditOp::Seek(t) => write!(f, "seek={}", t),
            EditOp::SeekOut(t) => write!(f, "seek-out={}", t),
            EditOp::SeekFraction(p) => write!(f, "seek-pct={}", p),
            EditOp::Marker => write!(f, "marker"),
            EditOp::Trim => write!(f, "trim"),
            EditOp::TrimAfter(i, on) => write!(f, "trim-after={},{}", i, if *on { "on" } else { "off" }),
            EditOp::Step => write!(f, "step"),
            EditOp::Back => write!(f, "back"),
            EditOp::CropNext => write!(f, "crop-next"),
            EditOp::CropPrev => write!(f, "crop-prev"),
            EditOp::Home => write!(f, "home"),
            EditOp::End => write!(f, "end"),
            EditOp::Freeze(on) => write!(f, "freeze={}", if *on { "on" } else { "off" }),
            EditOp::Crop(r) => write!(
                f,
                "crop={},{},{},{}",
                r.center_x, r.center_y, r.width, r.height
            ),
        }
    }
}

fn parse_switch(value: &str) -> Result<bool, String> {
    match value.trim().to_lowercase().as_str() {
        "on" | "true" | "1" => Ok(true),
        "off" | "false" | "0" => Ok(false),
        other => Err(format!("expected on or off, got '{}'", other)),
    }
}
