use std::str::FromStr;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ConfigurationError;

/// Recency bound relative to "now".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeWindow {
    #[serde(rename = "1h")]
    OneHour,
    #[serde(rename = "24h")]
    OneDay,
    #[serde(rename = "7d")]
    SevenDays,
    #[default]
    #[serde(rename = "none", alias = "all")]
    None,
}

impl TimeWindow {
    pub fn duration(&self) -> Option<Duration> {
        match self {
            TimeWindow::OneHour => Some(Duration::hours(1)),
            TimeWindow::OneDay => Some(Duration::hours(24)),
            TimeWindow::SevenDays => Some(Duration::days(7)),
            TimeWindow::None => None,
        }
    }

    /// `now - last_updated <= bound`. Timestamps ahead of `now` are always in.
    pub fn contains(&self, last_updated: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        match self.duration() {
            Some(bound) => now.signed_duration_since(last_updated) <= bound,
            None => true,
        }
    }
}

impl FromStr for TimeWindow {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "1h" => Ok(TimeWindow::OneHour),
            "24h" => Ok(TimeWindow::OneDay),
            "7d" => Ok(TimeWindow::SevenDays),
            "none" | "all" => Ok(TimeWindow::None),
            _ => Err(ConfigurationError::UnknownTimeWindow(s.to_string())),
        }
    }
}
