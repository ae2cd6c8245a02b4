pub mod config;
pub mod error;
pub mod feed;
pub mod models;
pub mod risk;
pub mod screen;
pub mod utils;
pub mod view;

pub use crate::config::Settings;
pub use error::{ConfigurationError, ValidationError};
pub use feed::{FeedHandle, MockTokenSource, StaticSource, TokenSource};
pub use models::{Chain, RiskFlags, TokenParams, TokenRecord};
pub use risk::{classify, is_high_risk, RiskLevel};
pub use screen::Screen;
pub use view::{AggregateStats, CollectionViewState, SortDirection, SortKey, TimeWindow, TokenFilter};
