//! Randomised stand-in for a real token discovery pipeline.

use anyhow::Result;
use chrono::Utc;
use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::TokenSource;
use crate::config::FeedSettings;
use crate::error::ValidationError;
use crate::models::{Chain, RiskFlags, TokenParams, TokenRecord};

const MOCK_CHAINS: [Chain; 3] = [Chain::Ethereum, Chain::Bsc, Chain::Polygon];

/// Emits at most one freshly "detected" token per poll.
pub struct MockTokenSource {
    rng: StdRng,
    detection_probability: f64,
    detected: u64,
}

impl MockTokenSource {
    pub fn new(detection_probability: f64) -> Self {
        Self::with_rng(StdRng::from_entropy(), detection_probability)
    }

    pub fn with_seed(seed: u64, detection_probability: f64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed), detection_probability)
    }

    pub fn from_settings(settings: &FeedSettings) -> Self {
        match settings.seed {
            Some(seed) => Self::with_seed(seed, settings.detection_probability),
            None => Self::new(settings.detection_probability),
        }
    }

    /// Out-of-range probabilities are clamped; NaN and infinities disable
    /// detection.
    fn with_rng(rng: StdRng, detection_probability: f64) -> Self {
        let detection_probability = if detection_probability.is_finite() {
            detection_probability.clamp(0.0, 1.0)
        } else {
            0.0
        };
        Self {
            rng,
            detection_probability,
            detected: 0,
        }
    }

    fn random_token(&mut self) -> Result<TokenRecord, ValidationError> {
        self.detected += 1;
        let now = Utc::now();
        let rng = &mut self.rng;

        let address: String = (0..20).map(|_| format!("{:02x}", rng.gen::<u8>())).collect();

        let params = TokenParams {
            id: format!("{}-{}", now.timestamp_millis(), self.detected),
            name: format!("Token {}", rng.gen_range(0..1000)),
            symbol: format!("TKN{}", rng.gen_range(0..100)),
            contract_address: format!("0x{}", address),
            chain: MOCK_CHAINS[rng.gen_range(0..MOCK_CHAINS.len())],
            risk_score: rng.gen_range(0..100),
            liquidity: f64::from(rng.gen_range(0..1_000_000u32)),
            market_cap: f64::from(rng.gen_range(0..10_000_000u32)),
            holder_count: rng.gen_range(0..5_000),
            age_days: rng.gen_range(0..30),
            volume_24h: f64::from(rng.gen_range(0..500_000u32)),
            price: rng.gen::<f64>() * 0.001,
            price_change_24h_pct: (rng.gen::<f64>() - 0.5) * 100.0,
            flags: RiskFlags {
                is_honeypot: rng.gen_bool(0.3),
                liquidity_locked: rng.gen_bool(0.5),
                ownership_renounced: rng.gen_bool(0.4),
                has_proxy: rng.gen_bool(0.4),
            },
            social_score: rng.gen_range(0..100),
            last_updated: now,
        };

        TokenRecord::try_from(params)
    }
}

impl TokenSource for MockTokenSource {
    fn poll(&mut self) -> Result<Vec<TokenRecord>> {
        if !self.rng.gen_bool(self.detection_probability) {
            return Ok(Vec::new());
        }

        let token = self.random_token()?;
        debug!(
            "Mock feed detected {} ({}) on {} with risk {}",
            token.name(),
            token.symbol(),
            token.chain(),
            token.risk_score()
        );
        Ok(vec![token])
    }
}

/// The four demo tokens a scanner screen starts with.
pub fn seed_tokens() -> Result<Vec<TokenRecord>, ValidationError> {
    let now = Utc::now();
    let base = |id: &str, name: &str, symbol: &str, contract_address: &str, chain| TokenParams {
        id: id.to_string(),
        name: name.to_string(),
        symbol: symbol.to_string(),
        contract_address: contract_address.to_string(),
        chain,
        risk_score: 0,
        liquidity: 0.0,
        market_cap: 0.0,
        holder_count: 0,
        age_days: 0,
        volume_24h: 0.0,
        price: 0.0,
        price_change_24h_pct: 0.0,
        flags: RiskFlags::default(),
        social_score: 0,
        last_updated: now,
    };

    let risky = RiskFlags {
        is_honeypot: true,
        liquidity_locked: false,
        ownership_renounced: false,
        has_proxy: true,
    };
    let safe = RiskFlags {
        is_honeypot: false,
        liquidity_locked: true,
        ownership_renounced: true,
        has_proxy: false,
    };

    [
        TokenParams {
            risk_score: 85,
            liquidity: 250_000.0,
            market_cap: 5_000_000.0,
            holder_count: 1_250,
            age_days: 2,
            volume_24h: 150_000.0,
            price: 0.00001234,
            price_change_24h_pct: -15.5,
            flags: risky,
            social_score: 25,
            ..base(
                "1",
                "SafeMoon Clone",
                "SAFEMOON",
                "0x1234567890abcdef1234567890abcdef12345678",
                Chain::Ethereum,
            )
        },
        TokenParams {
            risk_score: 45,
            liquidity: 500_000.0,
            market_cap: 2_000_000.0,
            holder_count: 850,
            age_days: 5,
            volume_24h: 75_000.0,
            price: 0.00002345,
            price_change_24h_pct: 8.2,
            flags: safe,
            social_score: 65,
            ..base(
                "2",
                "Doge Inu",
                "DOGEINU",
                "0xabcdef1234567890abcdef1234567890abcdef12",
                Chain::Bsc,
            )
        },
        TokenParams {
            risk_score: 92,
            liquidity: 100_000.0,
            market_cap: 800_000.0,
            holder_count: 450,
            age_days: 1,
            volume_24h: 25_000.0,
            price: 0.00000123,
            price_change_24h_pct: -45.8,
            flags: risky,
            social_score: 15,
            ..base(
                "3",
                "Pepe Token",
                "PEPE",
                "0x7890abcdef1234567890abcdef1234567890abcd",
                Chain::Ethereum,
            )
        },
        TokenParams {
            risk_score: 30,
            liquidity: 750_000.0,
            market_cap: 3_500_000.0,
            holder_count: 2_100,
            age_days: 8,
            volume_24h: 200_000.0,
            price: 0.00004567,
            price_change_24h_pct: 12.3,
            flags: safe,
            social_score: 80,
            ..base(
                "4",
                "Moon Token",
                "MOON",
                "0x4567890abcdef1234567890abcdef1234567890a",
                Chain::Polygon,
            )
        },
    ]
    .into_iter()
    .map(TokenRecord::try_from)
    .collect()
}
