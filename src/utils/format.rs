//! Display formatting for token cards and scan history.

use chrono::{DateTime, Utc};

/// Compact amount: `1.5M`, `2.3K`, or below 1000 the number rounded to at
/// most three decimals without trailing zeros.
pub fn format_compact(value: f64) -> String {
    if value >= 1_000_000.0 {
        format!("{:.1}M", value / 1_000_000.0)
    } else if value >= 1_000.0 {
        format!("{:.1}K", value / 1_000.0)
    } else {
        let fixed = format!("{:.3}", value);
        let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
        match trimmed {
            "-0" => "0".to_string(),
            _ => trimmed.to_string(),
        }
    }
}

/// Token price with enough precision for micro-cap tokens.
/// Anything below 0.000001 switches to scientific notation.
pub fn format_price(price: f64) -> String {
    if price < 0.000_001 {
        format!("{:.2e}", price)
    } else {
        format!("{:.8}", price)
    }
}

/// Relative age such as `30m ago`, `2h ago` or `3d ago`.
///
/// Timestamps in the future read as `0m ago`.
pub fn format_time_ago(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now.signed_duration_since(then);
    let minutes = elapsed.num_minutes().max(0);
    let hours = elapsed.num_hours().max(0);
    let days = elapsed.num_days().max(0);

    if minutes < 60 {
        format!("{}m ago", minutes)
    } else if hours < 24 {
        format!("{}h ago", hours)
    } else {
        format!("{}d ago", days)
    }
}
