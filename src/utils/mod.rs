//! Common utilities and helpers

pub mod logging;
pub mod time;

pub use time::format_duration;
