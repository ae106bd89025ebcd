// Unit tests for domain models

use std::time::Duration;

use crate::domain::model::*;

#[test]
fn test_time_spec_parse_seconds() {
    let time = TimeSpec::parse("12.5").unwrap();
    assert_eq!(time.duration, Duration::from_millis(12_500));

    let time = TimeSpec::parse("10s").unwrap();
    assert_eq!(time.duration, Duration::from_secs(10));
}

#[test]
fn test_time_spec_parse_mm_ss() {
    let time = TimeSpec::parse("01:30.5").unwrap();
    assert_eq!(time.duration, Duration::from_millis(90_500));
}

#[test]
fn test_time_spec_parse_hh_mm_ss() {
    let time = TimeSpec::parse("01:02:03").unwrap();
    assert_eq!(time.duration, Duration::from_secs(3723));
}

#[test]
fn test_time_spec_parse_invalid() {
    assert!(TimeSpec::parse("invalid").is_err());
    assert!(TimeSpec::parse("00:60").is_err());
    assert!(TimeSpec::parse("01:60:00").is_err());
    assert!(TimeSpec::parse("-10").is_err());
}

#[test]
fn test_time_spec_display() {
    let time = TimeSpec::from_duration(Duration::from_millis(3_723_456));
    assert_eq!(time.to_string(), "01:02:03.456");
    let time = TimeSpec::from_duration(Duration::from_millis(123_456));
    assert_eq!(time.to_string(), "02:03.456");
}

#[test]
fn test_rect_validity() {
    assert!(Rect::new(10, 10, 4, 4).is_valid());
    assert!(!Rect::new(10, 10, 0, 4).is_valid());
    assert!(!Rect::new(10, 10, 4, -1).is_valid());
}

#[test]
fn test_rect_interpolate_endpoints_and_midpoint() {
    let a = Rect::new(0, 0, 100, 50);
    let b = Rect::new(10, 20, 200, 150);

    assert_eq!(Rect::interpolate(&a, &b, 0.0), a);
    assert_eq!(Rect::interpolate(&a, &b, 1.0), b);
    assert_eq!(Rect::interpolate(&a, &b, 0.5), Rect::new(5, 10, 150, 100));
}

#[test]
fn test_rect_interpolate_truncates() {
    let a = Rect::new(0, 0, 0, 0);
    let b = Rect::new(3, 3, 3, 3);
    // 3 * 0.5 = 1.5 -> 1
    assert_eq!(Rect::interpolate(&a, &b, 0.5), Rect::new(1, 1, 1, 1));
    // shrinking: 3 + (0 - 3) * 0.5 = 1.5 -> 1
    assert_eq!(Rect::interpolate(&b, &a, 0.5), Rect::new(1, 1, 1, 1));
}

#[test]
fn test_rect_extrapolate() {
    let a = Rect::new(0, 0, 100, 100);
    let b = Rect::new(10, 10, 110, 100);
    assert_eq!(Rect::extrapolate(&a, &b, 10, 5), Rect::new(15, 15, 115, 100));
    // integer division truncates toward zero
    assert_eq!(Rect::extrapolate(&a, &b, 3, 1), Rect::new(13, 13, 113, 100));
    assert_eq!(Rect::extrapolate(&a, &b, 0, 5), b);
}

#[test]
fn test_rect_clamp_inside_is_unchanged() {
    let bounds = Rect::new(960, 540, 1920, 1080);
    let rect = Rect::new(500, 500, 200, 100);
    assert_eq!(rect.clamp(&bounds, false), rect);
}

#[test]
fn test_rect_clamp_moves_center() {
    let bounds = Rect::new(960, 540, 1920, 1080);
    let rect = Rect::new(10, 1070, 200, 100);
    assert_eq!(rect.clamp(&bounds, false), Rect::new(100, 1030, 200, 100));
}

#[test]
fn test_rect_clamp_shrinks_without_aspect() {
    let bounds = Rect::new(50, 50, 100, 100);
    let rect = Rect::new(50, 50, 300, 80);
    assert_eq!(rect.clamp(&bounds, false), Rect::new(50, 50, 100, 80));
}

#[test]
fn test_rect_clamp_shrinks_with_aspect() {
    let bounds = Rect::new(50, 50, 100, 100);
    let rect = Rect::new(50, 50, 400, 200);
    assert_eq!(rect.clamp(&bounds, true), Rect::new(50, 50, 100, 50));

    // too tall after the width pass as well
    let rect = Rect::new(50, 50, 200, 400);
    let clamped = rect.clamp(&bounds, true);
    assert_eq!(clamped, Rect::new(50, 50, 50, 100));
    assert!(clamped.width <= bounds.width && clamped.height <= bounds.height);
}

#[test]
fn test_rect_edges() {
    let rect = Rect::new(100, 50, 40, 20);
    assert_eq!(rect.left(), 80);
    assert_eq!(rect.top(), 40);
}

#[test]
fn test_trim_marker_serialization_uses_camel_case() {
    let marker = TrimMarker::with_trim(150, true);
    let json = serde_json::to_string(&marker).unwrap();
    assert_eq!(json, r#"{"frameNumber":150,"trimAfter":true}"#);
}

#[test]
fn test_crop_keyframe_serialization() {
    let keyframe = CropKeyframe::new(10, Rect::new(1, 2, 3, 4));
    let json = serde_json::to_value(keyframe).unwrap();
    assert_eq!(json["frameNumber"], 10);
    assert_eq!(json["cropRectangle"]["centerX"], 1);
    assert_eq!(json["cropRectangle"]["height"], 4);
}

#[test]
fn test_media_info_validation() {
    assert!(MediaInfo::new(30.0, Duration::from_secs(120), Size::new(1920, 1080)).is_ok());
    assert!(MediaInfo::new(0.0, Duration::from_secs(120), Size::new(1920, 1080)).is_err());
    assert!(MediaInfo::new(30.0, Duration::from_secs(120), Size::new(0, 1080)).is_err());
}

#[test]
fn test_media_info_default_crop_rect() {
    let media = MediaInfo::new(30.0, Duration::from_secs(120), Size::new(1920, 1080)).unwrap();
    assert_eq!(media.default_crop_rect(), Rect::new(960, 540, 960, 540));
}

#[test]
fn test_output_type_follows_file_name() {
    assert_eq!(VideoOutputType::from_file_name("out.webm"), VideoOutputType::Vp9);
    assert_eq!(VideoOutputType::from_file_name("out.mkv"), VideoOutputType::Mp4);
    assert_eq!(VideoOutputType::parse("VP8").unwrap(), VideoOutputType::Vp8);
    assert!(VideoOutputType::parse("avi").is_err());
}

#[test]
fn test_transcode_output_extension_follows_type() {
    let output = VideoTranscodeOutput::new("clip.mp4", Some(VideoOutputType::Vp8), 20, Size::new(640, 360), 1.0)
        .unwrap();
    assert_eq!(output.file_name, "clip.webm");
    assert_eq!(output.output_type, VideoOutputType::Vp8);

    let output = VideoTranscodeOutput::new("clip.webm", None, 20, Size::new(640, 360), 1.0).unwrap();
    assert_eq!(output.output_type, VideoOutputType::Vp9);

    assert!(VideoTranscodeOutput::new("clip.mp4", None, 80, Size::new(640, 360), 1.0).is_err());
    assert!(VideoTranscodeOutput::new("clip.mp4", None, 20, Size::new(640, 360), 0.0).is_err());
}
