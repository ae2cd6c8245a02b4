//! Risk score classification.
//!
//! Two independent thresholds live here:
//!
//! 1. LEVEL TABLE: scores map onto four display buckets
//!    (0-30 Low, 31-60 Medium, 61-80 High, 81-100 Extreme).
//!
//! 2. HIGH RISK COUNT: aggregate statistics count a token as high risk when
//!    its score is strictly above 60.
//!
//! They currently meet at 60/61. Moving one must not move the other.

use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigurationError;

/// Upper bound (inclusive) of the Low bucket.
pub const LOW_MAX: u8 = 30;

/// Upper bound (inclusive) of the Medium bucket.
pub const MEDIUM_MAX: u8 = 60;

/// Upper bound (inclusive) of the High bucket.
pub const HIGH_MAX: u8 = 80;

/// Scores strictly above this value count towards the high risk total.
pub const HIGH_RISK_THRESHOLD: u8 = 60;

/// Discrete risk bucket derived from a 0-100 risk score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Extreme,
}

impl RiskLevel {
    pub const ALL: [RiskLevel; 4] = [
        RiskLevel::Low,
        RiskLevel::Medium,
        RiskLevel::High,
        RiskLevel::Extreme,
    ];

    /// Human-readable label shown next to the score.
    pub fn label(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
            RiskLevel::Extreme => "Extreme",
        }
    }

    /// Display colour of the risk meter.
    pub fn color_hex(&self) -> &'static str {
        match self {
            RiskLevel::Low => "#00ff88",
            RiskLevel::Medium => "#ffd700",
            RiskLevel::High => "#ff8c00",
            RiskLevel::Extreme => "#ff0066",
        }
    }

    /// Scores that fall in this bucket.
    pub fn score_range(&self) -> RangeInclusive<u8> {
        match self {
            RiskLevel::Low => 0..=LOW_MAX,
            RiskLevel::Medium => (LOW_MAX + 1)..=MEDIUM_MAX,
            RiskLevel::High => (MEDIUM_MAX + 1)..=HIGH_MAX,
            RiskLevel::Extreme => (HIGH_MAX + 1)..=100,
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

impl FromStr for RiskLevel {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(RiskLevel::Low),
            "medium" => Ok(RiskLevel::Medium),
            "high" => Ok(RiskLevel::High),
            "extreme" => Ok(RiskLevel::Extreme),
            _ => Err(ConfigurationError::UnknownRiskLevel(s.to_string())),
        }
    }
}

/// Map a risk score onto its level.
///
/// Scores are range-checked when a `TokenRecord` is built, so anything above
/// 100 is treated as Extreme rather than rejected here.
#[inline]
pub fn classify(score: u8) -> RiskLevel {
    match score {
        0..=LOW_MAX => RiskLevel::Low,
        s if s <= MEDIUM_MAX => RiskLevel::Medium,
        s if s <= HIGH_MAX => RiskLevel::High,
        _ => RiskLevel::Extreme,
    }
}

/// Whether a score counts towards the "high risk" aggregate.
#[inline]
pub fn is_high_risk(score: u8) -> bool {
    score > HIGH_RISK_THRESHOLD
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_score_lands_in_its_bucket() {
        for s in 0..=100u8 {
            let expected = match s {
                0..=30 => RiskLevel::Low,
                31..=60 => RiskLevel::Medium,
                61..=80 => RiskLevel::High,
                _ => RiskLevel::Extreme,
            };
            assert_eq!(classify(s), expected, "score {}", s);
            assert!(classify(s).score_range().contains(&s));
        }
    }

    #[test]
    fn test_level_boundaries() {
        assert_eq!(classify(30), RiskLevel::Low);
        assert_eq!(classify(31), RiskLevel::Medium);
        assert_eq!(classify(60), RiskLevel::Medium);
        assert_eq!(classify(61), RiskLevel::High);
        assert_eq!(classify(80), RiskLevel::High);
        assert_eq!(classify(81), RiskLevel::Extreme);
    }

    #[test]
    fn test_high_risk_boundary() {
        assert!(!is_high_risk(60));
        assert!(is_high_risk(61));
        assert!(!is_high_risk(0));
        assert!(is_high_risk(100));
    }

    #[test]
    fn test_display_helpers() {
        assert_eq!(classify(85).label(), "Extreme");
        assert_eq!(classify(10).color_hex(), "#00ff88");
        assert_eq!(classify(70).color_hex(), "#ff8c00");
        assert_eq!("HIGH".parse::<RiskLevel>().unwrap(), RiskLevel::High);
        assert!("severe".parse::<RiskLevel>().is_err());
    }
}
