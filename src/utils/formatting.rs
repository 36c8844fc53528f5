use std::time::Duration;

use chrono::{DateTime, Local, Utc};

pub fn format_elapsed(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    if secs < 60 {
        format!("{}s", secs)
    } else if secs < 3_600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m", secs / 3_600, (secs % 3_600) / 60)
    }
}

/// Render a platform timestamp in the user's local time zone.
pub fn format_timestamp(ts: Option<&DateTime<Utc>>) -> String {
    match ts {
        Some(ts) => ts
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M:%S")
            .to_string(),
        None => "-".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_elapsed() {
        assert_eq!(format_elapsed(Duration::from_millis(900)), "0s");
        assert_eq!(format_elapsed(Duration::from_secs(45)), "45s");
        assert_eq!(format_elapsed(Duration::from_secs(130)), "2m 10s");
        assert_eq!(format_elapsed(Duration::from_secs(3_720)), "1h 2m");
    }

    #[test]
    fn test_format_timestamp_missing() {
        assert_eq!(format_timestamp(None), "-");
    }

    #[test]
    fn test_format_timestamp_shape() {
        let ts: DateTime<Utc> = "2025-03-01T10:00:00Z".parse().unwrap();
        let rendered = format_timestamp(Some(&ts));
        assert_eq!(rendered.len(), "2025-03-01 10:00:00".len());
    }
}
