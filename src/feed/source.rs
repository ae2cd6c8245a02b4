use std::collections::VecDeque;

use anyhow::{Context, Result};

use crate::models::TokenRecord;

/// Pluggable origin of token snapshots.
///
/// A live feed calls `poll` once per tick and ingests whatever comes back.
/// An empty batch means nothing new was detected.
pub trait TokenSource: Send + 'static {
    fn poll(&mut self) -> Result<Vec<TokenRecord>>;
}

impl<F> TokenSource for F
where
    F: FnMut() -> Result<Vec<TokenRecord>> + Send + 'static,
{
    fn poll(&mut self) -> Result<Vec<TokenRecord>> {
        self()
    }
}

/// Replays a fixed list of tokens, one per poll, then stays silent.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    pending: VecDeque<TokenRecord>,
}

impl StaticSource {
    pub fn new(records: impl IntoIterator<Item = TokenRecord>) -> Self {
        Self {
            pending: records.into_iter().collect(),
        }
    }

    /// Load a JSON array of tokens in the dashboard feed format.
    /// Every entry is validated; one bad entry rejects the whole document.
    pub fn from_json(json: &str) -> Result<Self> {
        let records: Vec<TokenRecord> =
            serde_json::from_str(json).context("Failed to parse token list")?;
        Ok(Self::new(records))
    }

    pub fn remaining(&self) -> usize {
        self.pending.len()
    }
}

impl TokenSource for StaticSource {
    fn poll(&mut self) -> Result<Vec<TokenRecord>> {
        Ok(self.pending.pop_front().into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::test_record;

    #[test]
    fn test_static_source_replays_one_per_poll() {
        let mut source = StaticSource::new(vec![
            test_record("1", "A", "A", 10),
            test_record("2", "B", "B", 20),
        ]);

        assert_eq!(source.poll().unwrap()[0].id(), "1");
        assert_eq!(source.remaining(), 1);
        assert_eq!(source.poll().unwrap()[0].id(), "2");
        assert!(source.poll().unwrap().is_empty());
    }

    #[test]
    fn test_from_json_validates_entries() {
        let json = r#"[{
            "id": "4",
            "name": "Moon Token",
            "symbol": "MOON",
            "contractAddress": "0x4567890abcdef1234567890abcdef1234567890ab",
            "blockchain": "polygon",
            "riskScore": 30,
            "liquidity": 750000,
            "marketCap": 3500000,
            "holders": 2100,
            "age": 8,
            "volume24h": 200000,
            "price": 0.00004567,
            "priceChange24h": 12.3,
            "isHoneypot": false,
            "liquidityLocked": true,
            "ownershipRenounced": true,
            "hasProxy": false,
            "socialScore": 80,
            "lastUpdated": "2026-01-01T00:00:00Z"
        }]"#;

        let source = StaticSource::from_json(json).unwrap();
        assert_eq!(source.remaining(), 1);

        let bad = json.replace("\"liquidity\": 750000", "\"liquidity\": -5");
        assert!(StaticSource::from_json(&bad).is_err());
    }

    #[test]
    fn test_closures_are_sources() {
        let mut calls = 0;
        let mut source = move || -> Result<Vec<TokenRecord>> {
            calls += 1;
            Ok(vec![test_record(&calls.to_string(), "T", "T", 50)])
        };

        assert_eq!(TokenSource::poll(&mut source).unwrap()[0].id(), "1");
        assert_eq!(TokenSource::poll(&mut source).unwrap()[0].id(), "2");
    }
}
