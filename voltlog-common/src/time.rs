//! Time formatting helpers
//!
//! Elapsed run time renders as zero-padded `HH:MM:SS` with unbounded hours
//! (a multi-day recording shows `49:10:05`, never wrapped at 24). Absolute
//! timestamps render as UTC `YYYY-MM-DD HH:MM:SS`.

use chrono::DateTime;

/// Format elapsed seconds as zero-padded `HH:MM:SS`, hours unbounded.
pub fn format_run_time(seconds: i64) -> String {
    let seconds = seconds.max(0);
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;
    format!("{:02}:{:02}:{:02}", hours, minutes, secs)
}

/// Format a sample timestamp (seconds since the Unix epoch) as a
/// human-readable UTC date and time. Sub-second precision is dropped.
pub fn format_timestamp(timestamp: f64) -> String {
    match DateTime::from_timestamp(timestamp as i64, 0) {
        Some(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_time_zero() {
        assert_eq!(format_run_time(0), "00:00:00");
    }

    #[test]
    fn run_time_minutes_and_seconds() {
        assert_eq!(format_run_time(125), "00:02:05");
        assert_eq!(format_run_time(59), "00:00:59");
        assert_eq!(format_run_time(3600), "01:00:00");
    }

    #[test]
    fn run_time_hours_unbounded() {
        // 2 days 1 hour 10 minutes 5 seconds: hours do not wrap at 24
        assert_eq!(format_run_time(2 * 86400 + 3600 + 605), "49:10:05");
    }

    #[test]
    fn run_time_negative_clamps_to_zero() {
        assert_eq!(format_run_time(-5), "00:00:00");
    }

    #[test]
    fn timestamp_formatting() {
        assert_eq!(format_timestamp(0.0), "1970-01-01 00:00:00");
        assert_eq!(format_timestamp(1700000000.25), "2023-11-14 22:13:20");
    }
}
