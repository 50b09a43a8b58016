//! Epoch helpers

use chrono::{DateTime, Utc};

/// Raw timestamps at or above this are milliseconds
const MILLIS_THRESHOLD: u64 = 1_000_000_000_000;

pub const SECONDS_PER_DAY: u64 = 86_400;

pub fn now_secs() -> u64 {
    u64::try_from(Utc::now().timestamp()).unwrap_or(0)
}

/// Normalize a contract timestamp to seconds
pub fn epoch_secs(raw: u64) -> u64 {
    if raw >= MILLIS_THRESHOLD {
        raw / 1000
    } else {
        raw
    }
}

/// Zero is "unset" on chain
pub fn to_datetime(raw: u64) -> Option<DateTime<Utc>> {
    if raw == 0 {
        return None;
    }
    let secs = i64::try_from(epoch_secs(raw)).ok()?;
    DateTime::from_timestamp(secs, 0)
}

pub fn format_date(raw: u64) -> String {
    to_datetime(raw)
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "—".to_string())
}

pub fn format_datetime(raw: u64) -> String {
    to_datetime(raw)
        .map(|dt| dt.format("%Y-%m-%d %H:%M UTC").to_string())
        .unwrap_or_else(|| "—".to_string())
}

/// Royalty month epochs come either as `YYYYMM` or as epoch seconds
pub fn month_epoch_label(value: u64) -> String {
    if value == 0 {
        return "—".to_string();
    }
    if (100_000..=999_999).contains(&value) {
        let year = value / 100;
        let month = value % 100;
        if (1..=12).contains(&month) {
            return format!("{:04}-{:02}", year, month);
        }
    }
    if value > 1_000_000_000 && value < 10_000_000_000_000 {
        return format_date(value);
    }
    value.to_string()
}

/// "Just now", "5m ago", "3h ago", "2d ago"
pub fn time_ago(raw: u64, now: u64) -> String {
    let seconds = now.saturating_sub(epoch_secs(raw));
    if seconds < 60 {
        return "Just now".to_string();
    }
    let minutes = seconds / 60;
    if minutes < 60 {
        return format!("{}m ago", minutes);
    }
    let hours = minutes / 60;
    if hours < 24 {
        return format!("{}h ago", hours);
    }
    format!("{}d ago", hours / 24)
}
