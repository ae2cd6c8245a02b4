use thiserror::Error;

/// A token record violated one of its construction invariants.
///
/// Records failing validation never enter a collection.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("{field} must be within 0..=100, got {value}")]
    ScoreOutOfRange { field: &'static str, value: i64 },

    #[error("{field} must be a non-negative finite amount, got {value}")]
    NegativeAmount { field: &'static str, value: f64 },

    #[error("{field} must be finite, got {value}")]
    NotFinite { field: &'static str, value: f64 },

    #[error("token identifier must not be empty")]
    EmptyIdentifier,
}

/// An unrecognised option value was handed to a view setter or settings loader.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("unknown sort key '{0}'")]
    UnknownSortKey(String),

    #[error("unknown sort direction '{0}'")]
    UnknownSortDirection(String),

    #[error("unknown time window '{0}'")]
    UnknownTimeWindow(String),

    #[error("unknown chain '{0}'")]
    UnknownChain(String),

    #[error("unknown risk level '{0}'")]
    UnknownRiskLevel(String),

    #[error("invalid setting {name}: {reason}")]
    InvalidSetting { name: &'static str, reason: String },
}
