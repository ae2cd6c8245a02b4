//! Per-screen token collection views.
//!
//! - [`state`] - the `CollectionViewState` holder
//! - [`sort`] - sort keys, directions and the stable comparator
//! - [`window`] - recency windows
//! - [`filter`] - sidebar attribute filter
//! - [`stats`] - aggregate statistics

mod filter;
mod sort;
mod state;
mod stats;
mod window;

pub use filter::{Bounds, TokenFilter};
pub use sort::{sort_records, SortDirection, SortKey};
pub use state::{CollectionViewState, DEFAULT_MAX_SIZE};
pub use stats::AggregateStats;
pub use window::TimeWindow;
