//! Shared data models spanning the pipeline layers.

pub mod indicators;
pub mod quote;
pub mod response;
pub mod signal;

pub use indicators::{IndicatorSet, MacdIndicator};
pub use quote::{
    HistoricalEntry, HistoricalSeries, Metal, Price, Quote, QuoteBatch, QUOTE_DATE_FORMAT,
    QUOTE_UNIT, UNAVAILABLE,
};
pub use response::{
    CurrentQuotesResponse, HistoricalPoint, HistoricalQuotesResponse, MetalRecommendation,
    PriceHistory, QuoteView, RecommendationResponse, ResponseStatus,
};
pub use signal::{IndicatorKind, Recommendation, Signal, SignalAction, DEFAULT_CONFIDENCE};
