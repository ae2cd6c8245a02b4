#[allow(clippy::module_inception)]
mod config;

pub use self::config::{FeedSettings, Settings, ViewSettings};
