//! Quote ingestion: provider adapters, token parsing and the cache.

pub mod cache;
pub mod market_data;
pub mod parsing;
pub mod sources;

pub use cache::{CacheState, QuoteCache, RefreshOutcome};
pub use market_data::QuoteSource;
