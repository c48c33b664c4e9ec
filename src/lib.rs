//! Precious-metal quote ingestion and technical analysis.
//!
//! Quotes are fetched from an upstream provider into a staleness-aware cache;
//! RSI, EMA and MACD computed over the cached series drive per-metal
//! buy/sell/hold recommendations.

pub mod common;
pub mod config;
pub mod core;
pub mod error;
pub mod indicators;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod services;
pub mod signals;
