use serde::{Deserialize, Serialize};

use crate::models::{Chain, TokenRecord};
use crate::risk::RiskLevel;

/// Inclusive numeric bound; either side may be open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    #[serde(default)]
    pub min: Option<f64>,
    #[serde(default)]
    pub max: Option<f64>,
}

impl Bounds {
    pub fn new(min: Option<f64>, max: Option<f64>) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: f64) -> bool {
        self.min.map_or(true, |min| value >= min) && self.max.map_or(true, |max| value <= max)
    }

    pub fn is_open(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }
}

/// Attribute filter from the scanner sidebar.
///
/// Every criterion is optional and all set criteria must hold. The default
/// filter accepts every record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TokenFilter {
    #[serde(default)]
    pub chain: Option<Chain>,
    #[serde(default)]
    pub risk_level: Option<RiskLevel>,
    #[serde(default)]
    pub liquidity: Bounds,
    #[serde(default)]
    pub age_days: Bounds,
    #[serde(default)]
    pub holders: Bounds,
    #[serde(default)]
    pub volume_24h: Bounds,
}

impl TokenFilter {
    pub fn is_empty(&self) -> bool {
        self.chain.is_none()
            && self.risk_level.is_none()
            && self.liquidity.is_open()
            && self.age_days.is_open()
            && self.holders.is_open()
            && self.volume_24h.is_open()
    }

    pub fn matches(&self, token: &TokenRecord) -> bool {
        if let Some(chain) = self.chain {
            if token.chain() != chain {
                return false;
            }
        }
        if let Some(level) = self.risk_level {
            if token.risk_level() != level {
                return false;
            }
        }

        self.liquidity.contains(token.liquidity())
            && self.age_days.contains(f64::from(token.age_days()))
            && self.holders.contains(token.holder_count() as f64)
            && self.volume_24h.contains(token.volume_24h())
    }
}
