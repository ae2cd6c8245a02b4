use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Chain;
use crate::error::ValidationError;
use crate::risk::{self, RiskLevel};

/// Contract-level red flags reported alongside a token.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskFlags {
    pub is_honeypot: bool,
    pub liquidity_locked: bool,
    pub ownership_renounced: bool,
    pub has_proxy: bool,
}

/// Unvalidated token attributes as handed over by an ingestion source.
///
/// Converted into a [`TokenRecord`] through `TryFrom`, which enforces the
/// score ranges and non-negative amounts. Field names follow the dashboard
/// feed format (camelCase), with aliases for its short names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenParams {
    pub id: String,
    pub name: String,
    pub symbol: String,
    pub contract_address: String,
    #[serde(alias = "blockchain")]
    pub chain: Chain,
    pub risk_score: i64,
    pub liquidity: f64,
    pub market_cap: f64,
    #[serde(alias = "holders")]
    pub holder_count: u64,
    #[serde(alias = "age")]
    pub age_days: u32,
    pub volume_24h: f64,
    pub price: f64,
    #[serde(alias = "priceChange24h")]
    pub price_change_24h_pct: f64,
    #[serde(flatten)]
    pub flags: RiskFlags,
    pub social_score: i64,
    pub last_updated: DateTime<Utc>,
}

/// One observed snapshot of a token.
///
/// Immutable once built: updates go through [`TokenRecord::updated`], which
/// returns a new record with a fresh `last_updated` so consumers can diff by
/// identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TokenParams", into = "TokenParams")]
pub struct TokenRecord {
    id: String,
    name: String,
    symbol: String,
    contract_address: String,
    chain: Chain,
    risk_score: u8,
    liquidity: f64,
    market_cap: f64,
    holder_count: u64,
    age_days: u32,
    volume_24h: f64,
    price: f64,
    price_change_24h_pct: f64,
    flags: RiskFlags,
    social_score: u8,
    last_updated: DateTime<Utc>,
}

fn score(field: &'static str, value: i64) -> Result<u8, ValidationError> {
    if (0..=100).contains(&value) {
        Ok(value as u8)
    } else {
        Err(ValidationError::ScoreOutOfRange { field, value })
    }
}

fn amount(field: &'static str, value: f64) -> Result<f64, ValidationError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(ValidationError::NegativeAmount { field, value })
    }
}

impl TryFrom<TokenParams> for TokenRecord {
    type Error = ValidationError;

    fn try_from(params: TokenParams) -> Result<Self, Self::Error> {
        if params.id.trim().is_empty() {
            return Err(ValidationError::EmptyIdentifier);
        }
        if !params.price_change_24h_pct.is_finite() {
            return Err(ValidationError::NotFinite {
                field: "price_change_24h_pct",
                value: params.price_change_24h_pct,
            });
        }

        Ok(Self {
            risk_score: score("risk_score", params.risk_score)?,
            social_score: score("social_score", params.social_score)?,
            liquidity: amount("liquidity", params.liquidity)?,
            market_cap: amount("market_cap", params.market_cap)?,
            volume_24h: amount("volume_24h", params.volume_24h)?,
            price: amount("price", params.price)?,
            id: params.id,
            name: params.name,
            symbol: params.symbol,
            contract_address: params.contract_address,
            chain: params.chain,
            holder_count: params.holder_count,
            age_days: params.age_days,
            price_change_24h_pct: params.price_change_24h_pct,
            flags: params.flags,
            last_updated: params.last_updated,
        })
    }
}

impl From<TokenRecord> for TokenParams {
    fn from(record: TokenRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            symbol: record.symbol,
            contract_address: record.contract_address,
            chain: record.chain,
            risk_score: i64::from(record.risk_score),
            liquidity: record.liquidity,
            market_cap: record.market_cap,
            holder_count: record.holder_count,
            age_days: record.age_days,
            volume_24h: record.volume_24h,
            price: record.price,
            price_change_24h_pct: record.price_change_24h_pct,
            flags: record.flags,
            social_score: i64::from(record.social_score),
            last_updated: record.last_updated,
        }
    }
}

impl TokenRecord {
    /// Build a new snapshot from this one.
    ///
    /// `last_updated` is stamped with the current time before `edit` runs.
    /// The edited attributes are validated again.
    pub fn updated(
        &self,
        edit: impl FnOnce(&mut TokenParams),
    ) -> Result<TokenRecord, ValidationError> {
        let mut params = TokenParams::from(self.clone());
        params.last_updated = Utc::now();
        edit(&mut params);
        TokenRecord::try_from(params)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn contract_address(&self) -> &str {
        &self.contract_address
    }

    pub fn chain(&self) -> Chain {
        self.chain
    }

    pub fn risk_score(&self) -> u8 {
        self.risk_score
    }

    pub fn risk_level(&self) -> RiskLevel {
        risk::classify(self.risk_score)
    }

    pub fn is_high_risk(&self) -> bool {
        risk::is_high_risk(self.risk_score)
    }

    pub fn liquidity(&self) -> f64 {
        self.liquidity
    }

    pub fn market_cap(&self) -> f64 {
        self.market_cap
    }

    pub fn holder_count(&self) -> u64 {
        self.holder_count
    }

    pub fn age_days(&self) -> u32 {
        self.age_days
    }

    pub fn volume_24h(&self) -> f64 {
        self.volume_24h
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn price_change_24h_pct(&self) -> f64 {
        self.price_change_24h_pct
    }

    pub fn flags(&self) -> RiskFlags {
        self.flags
    }

    pub fn social_score(&self) -> u8 {
        self.social_score
    }

    pub fn last_updated(&self) -> DateTime<Utc> {
        self.last_updated
    }
}
