//! Duration formatting utilities

use std::time::Duration;

/// Format a duration as `MM:SS.mmm`, or `HH:MM:SS.mmm` past one hour
pub fn format_duration(duration: Duration) -> String {
    let total_seconds = duration.as_secs();
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;
    let milliseconds = duration.subsec_millis();

    if hours > 0 {
        format!("{:02}:{:02}:{:02}.{:03}", hours, minutes, seconds, milliseconds)
    } else {
        format!("{:02}:{:02}.{:03}", minutes, seconds, milliseconds)
    }
}

/// Format a frame together with its position, e.g. `301 (00:10.033)`
pub fn format_frame(frame: i64, position: Duration) -> String {
    format!("{} ({})", frame, format_duration(position))
}

/// Estimate remaining time from the fraction of work done so far
pub fn estimate_remaining(processed: u64, total: u64, elapsed: Duration) -> Option<Duration> {
    if processed == 0 || processed >= total {
        return None;
    }
    let rate = processed as f64 / elapsed.as_secs_f64();
    if !rate.is_finite() || rate <= 0.0 {
        return None;
    }
    Some(Duration::from_secs_f64((total - processed) as f64 / rate))
}
