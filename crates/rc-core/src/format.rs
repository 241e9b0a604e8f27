//! Display formatting for sizes, timestamps and digests.
//! 大小、时间戳与摘要的显示格式化。
//!
//! Pure functions only.

use chrono::{DateTime, Local, TimeZone, Utc};

const UNITS: [&str; 5] = ["Bytes", "KB", "MB", "GB", "TB"];
const NEVER: &str = "Never";

/// Formats a byte count with base 1024 and at most two decimals.
///
/// `0` → `"0 Bytes"`, `1536` → `"1.5 KB"`.
pub fn format_bytes(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }
    let mut exponent = 0;
    let mut unit = 1_u64;
    while exponent < UNITS.len() - 1 && bytes / unit >= 1024 {
        unit *= 1024;
        exponent += 1;
    }
    let scaled = bytes as f64 / unit as f64;
    let rounded = (scaled * 100.0).round() / 100.0;
    format!("{} {}", rounded, UNITS[exponent])
}

/// Coarse "how long ago" label for a pull timestamp.
pub fn format_relative(ts: Option<DateTime<Utc>>, now: DateTime<Utc>) -> String {
    let Some(ts) = ts else {
        return NEVER.to_string();
    };
    let days = (now - ts).num_days();
    match days {
        d if d <= 0 => "Today".to_string(),
        1 => "Yesterday".to_string(),
        d if d < 7 => format!("{d} days ago"),
        d if d < 30 => format!("{} weeks ago", d / 7),
        d if d < 365 => format!("{} months ago", d / 30),
        d => format!("{} years ago", d / 365),
    }
}

/// Local date and time, or `"Never"`.
pub fn format_absolute(ts: Option<DateTime<Utc>>) -> String {
    format_absolute_in(ts, &Local)
}

pub fn format_absolute_in<Tz>(ts: Option<DateTime<Utc>>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    match ts {
        Some(ts) => ts.with_timezone(tz).format("%Y-%m-%d %H:%M:%S").to_string(),
        None => NEVER.to_string(),
    }
}

/// First `keep` characters followed by `...`. Short digests come back unchanged.
pub fn abbreviate_digest(digest: &str, keep: usize) -> String {
    if digest.chars().count() <= keep {
        return digest.to_string();
    }
    let head: String = digest.chars().take(keep).collect();
    format!("{head}...")
}

pub fn tag_label(tag: Option<&str>) -> &str {
    match tag {
        Some(t) if !t.is_empty() => t,
        _ => "untagged",
    }
}
