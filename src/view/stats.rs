use serde::Serialize;

use crate::models::TokenRecord;

/// Summary numbers shown above a token list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct AggregateStats {
    pub count: usize,
    pub high_risk_count: usize,
    pub total_volume: f64,
    /// Mean risk score rounded to the nearest integer; 0 for an empty set.
    pub average_risk_score: u32,
}

impl AggregateStats {
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a TokenRecord>) -> Self {
        let mut count = 0usize;
        let mut high_risk_count = 0usize;
        let mut total_volume = 0.0;
        let mut risk_sum = 0u64;

        for token in records {
            count += 1;
            if token.is_high_risk() {
                high_risk_count += 1;
            }
            total_volume += token.volume_24h();
            risk_sum += u64::from(token.risk_score());
        }

        let average_risk_score = if count == 0 {
            0
        } else {
            (risk_sum as f64 / count as f64).round() as u32
        };

        Self {
            count,
            high_risk_count,
            total_volume,
            average_risk_score,
        }
    }
}
