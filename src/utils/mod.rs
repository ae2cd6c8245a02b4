//! Utility functions for the scanner.
//!
//! - [`format`] - display formatting (compact amounts, prices, relative time)

mod format;

// ============================================
// Re-exports
// ============================================

pub use format::{format_compact, format_price, format_time_ago};
