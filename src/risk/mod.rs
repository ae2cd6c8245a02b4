mod classifier;

pub use classifier::{
    classify, is_high_risk, RiskLevel, HIGH_MAX, HIGH_RISK_THRESHOLD, LOW_MAX, MEDIUM_MAX,
};
