use std::cmp::Ordering;
use std::str::FromStr;

use feruca::Collator;
use serde::{Deserialize, Serialize};

use crate::error::ConfigurationError;
use crate::models::TokenRecord;

/// Field a collection view is ordered by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    #[default]
    #[serde(alias = "risk")]
    RiskScore,
    #[serde(rename = "volume24h", alias = "volume")]
    Volume24h,
    #[serde(alias = "age")]
    AgeDays,
    MarketCap,
    Name,
    Price,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

impl FromStr for SortKey {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "riskScore" | "risk" => Ok(SortKey::RiskScore),
            "volume24h" | "volume" => Ok(SortKey::Volume24h),
            "ageDays" | "age" => Ok(SortKey::AgeDays),
            "marketCap" => Ok(SortKey::MarketCap),
            "name" => Ok(SortKey::Name),
            "price" => Ok(SortKey::Price),
            _ => Err(ConfigurationError::UnknownSortKey(s.to_string())),
        }
    }
}

impl FromStr for SortDirection {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            _ => Err(ConfigurationError::UnknownSortDirection(s.to_string())),
        }
    }
}

/// Name ordering under the CLDR root collation. Accents and case only break
/// ties between otherwise equal letters, lowercase first.
fn compare_names(collator: &mut Collator, a: &str, b: &str) -> Ordering {
    collator.collate(a, b)
}

impl SortKey {
    /// Ascending comparison of two records on this key.
    pub fn compare(&self, a: &TokenRecord, b: &TokenRecord) -> Ordering {
        self.compare_with(&mut Collator::default(), a, b)
    }

    /// Same as [`compare`](Self::compare), reusing `collator` for names.
    pub fn compare_with(
        &self,
        collator: &mut Collator,
        a: &TokenRecord,
        b: &TokenRecord,
    ) -> Ordering {
        match self {
            SortKey::RiskScore => a.risk_score().cmp(&b.risk_score()),
            SortKey::Volume24h => a.volume_24h().total_cmp(&b.volume_24h()),
            SortKey::AgeDays => a.age_days().cmp(&b.age_days()),
            SortKey::MarketCap => a.market_cap().total_cmp(&b.market_cap()),
            SortKey::Name => compare_names(collator, a.name(), b.name()),
            SortKey::Price => a.price().total_cmp(&b.price()),
        }
    }
}

/// Stable in-place sort. Equal elements keep their relative order in both
/// directions.
pub fn sort_records(records: &mut [TokenRecord], key: SortKey, direction: SortDirection) {
    let mut collator = Collator::default();
    records.sort_by(|a, b| {
        let ordering = key.compare_with(&mut collator, a, b);
        match direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });
}
