use chrono::{DateTime, Local, Utc};

pub const MS_IN_S: i64 = 1000;

/// Wall clock the desk runs on. Everything time-based in the engine takes `now_ms` as an
/// argument, so this is only called by the host.
pub fn now_timestamp_ms() -> i64 {
    Utc::now().timestamp_millis()
}

/// `HH:MM:SS` in local time, for feed timestamps.
pub fn epoch_ms_to_clock(epoch_ms: i64) -> String {
    match DateTime::from_timestamp_millis(epoch_ms) {
        Some(dt) => dt.with_timezone(&Local).format("%H:%M:%S").to_string(),
        None => "--:--:--".to_string(),
    }
}

/// Remaining time as `m:ss`.
pub fn format_countdown(ms: i64) -> String {
    let secs = (ms.max(0) + MS_IN_S - 1) / MS_IN_S;
    format!("{}:{:02}", secs / 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn countdown_rounds_up_partial_seconds() {
        assert_eq!(format_countdown(300_000), "5:00");
        assert_eq!(format_countdown(59_001), "1:00");
        assert_eq!(format_countdown(1), "0:01");
        assert_eq!(format_countdown(0), "0:00");
        assert_eq!(format_countdown(-5), "0:00");
    }

    #[test]
    fn clock_label_has_fixed_shape() {
        let label = epoch_ms_to_clock(now_timestamp_ms());
        assert_eq!(label.len(), 8);
        assert_eq!(label.matches(':').count(), 2);
    }
}
