use std::time::Duration;

use config::{Config, ConfigError, File, FileFormat};
use serde::Deserialize;

use crate::error::ConfigurationError;
use crate::view::{SortDirection, SortKey, TimeWindow, TokenFilter, DEFAULT_MAX_SIZE};

/// Initial view options for a screen's collection.
///
/// Unknown sort keys, directions or windows fail deserialization, so a bad
/// value never reaches a `CollectionViewState`.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ViewSettings {
    #[serde(default)]
    pub search: String,
    #[serde(default)]
    pub sort_key: SortKey,
    #[serde(default)]
    pub sort_direction: SortDirection,
    #[serde(default)]
    pub time_window: TimeWindow,
    /// Token identifiers watched from the start.
    #[serde(default)]
    pub watchlist: Vec<String>,
    /// Collection size cap applied when a live feed ingests new tokens.
    #[serde(default = "default_max_size")]
    pub max_size: usize,
    #[serde(default)]
    pub filter: TokenFilter,
}

fn default_max_size() -> usize {
    DEFAULT_MAX_SIZE
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self {
            search: String::new(),
            sort_key: SortKey::default(),
            sort_direction: SortDirection::default(),
            time_window: TimeWindow::default(),
            watchlist: Vec::new(),
            max_size: default_max_size(),
            filter: TokenFilter::default(),
        }
    }
}

/// Simulated "new token detected" feed.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct FeedSettings {
    #[serde(default = "default_feed_enabled")]
    pub enabled: bool,
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
    /// Chance that a single poll detects a new token
    #[serde(default = "default_detection_probability")]
    pub detection_probability: f64,
    /// Fixed RNG seed for reproducible runs
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_feed_enabled() -> bool {
    true
}

fn default_poll_interval_ms() -> u64 {
    5_000
}

fn default_detection_probability() -> f64 {
    0.3
}

impl Default for FeedSettings {
    fn default() -> Self {
        Self {
            enabled: default_feed_enabled(),
            poll_interval_ms: default_poll_interval_ms(),
            detection_probability: default_detection_probability(),
            seed: None,
        }
    }
}

impl FeedSettings {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

/// Root application configuration.
///
/// Loaded from an optional `config.yaml`; every field has a default.
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
pub struct Settings {
    #[serde(default)]
    pub view: ViewSettings,
    #[serde(default)]
    pub feed: FeedSettings,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let s = Config::builder()
            .add_source(File::with_name("config").required(false))
            .build()?;

        Self::finish(s)
    }

    /// Parse settings from an inline YAML document.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let s = Config::builder()
            .add_source(File::from_str(yaml, FileFormat::Yaml))
            .build()?;

        Self::finish(s)
    }

    fn finish(s: Config) -> Result<Self, ConfigError> {
        let settings: Settings = s.try_deserialize()?;
        settings
            .validate()
            .map_err(|e| ConfigError::Message(e.to_string()))?;

        Ok(settings)
    }

    /// Range checks serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.view.max_size == 0 {
            return Err(ConfigurationError::InvalidSetting {
                name: "view.max_size",
                reason: "must be a positive integer".to_string(),
            });
        }
        if self.feed.poll_interval_ms == 0 {
            return Err(ConfigurationError::InvalidSetting {
                name: "feed.poll_interval_ms",
                reason: "must be greater than zero".to_string(),
            });
        }
        if !(0.0..=1.0).contains(&self.feed.detection_probability) {
            return Err(ConfigurationError::InvalidSetting {
                name: "feed.detection_probability",
                reason: format!("{} is outside 0..=1", self.feed.detection_probability),
            });
        }
        Ok(())
    }
}
