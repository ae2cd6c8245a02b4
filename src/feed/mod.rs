//! Token ingestion: the source abstraction plus the timer-driven live feed.

mod live;
mod mock;
mod source;

pub use live::FeedHandle;
pub use mock::{seed_tokens, MockTokenSource};
pub use source::{StaticSource, TokenSource};
