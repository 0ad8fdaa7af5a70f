//! Relative time labels for message timestamps.

use chrono::{DateTime, Utc};

/// How often mounted messages refresh their relative-time label.
pub const REFRESH_INTERVAL_MS: u32 = 60_000;

/// Format a timestamp relative to `now`: "just now", "Nm ago", "Nh ago",
/// "Nd ago". Timestamps in the future (clock skew) read as "just now".
pub fn relative_time_label(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let diff = now.signed_duration_since(timestamp);
    let seconds = diff.num_seconds();
    if seconds < 60 {
        "just now".to_string()
    } else if seconds < 3600 {
        format!("{}m ago", diff.num_minutes())
    } else if seconds < 86_400 {
        format!("{}h ago", diff.num_hours())
    } else {
        format!("{}d ago", diff.num_days())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_just_now_under_a_minute() {
        let now = Utc::now();
        assert_eq!(relative_time_label(now, now), "just now");
        assert_eq!(relative_time_label(now - Duration::seconds(59), now), "just now");
    }

    #[test]
    fn test_minutes() {
        let now = Utc::now();
        assert_eq!(relative_time_label(now - Duration::seconds(60), now), "1m ago");
        assert_eq!(relative_time_label(now - Duration::minutes(59), now), "59m ago");
    }

    #[test]
    fn test_hours() {
        let now = Utc::now();
        assert_eq!(relative_time_label(now - Duration::hours(1), now), "1h ago");
        assert_eq!(relative_time_label(now - Duration::hours(23), now), "23h ago");
    }

    #[test]
    fn test_days() {
        let now = Utc::now();
        assert_eq!(relative_time_label(now - Duration::days(1), now), "1d ago");
        assert_eq!(relative_time_label(now - Duration::days(30), now), "30d ago");
    }

    #[test]
    fn test_future_timestamp_reads_just_now() {
        let now = Utc::now();
        assert_eq!(relative_time_label(now + Duration::minutes(5), now), "just now");
    }
}
