//! Process-wide quote cache with a staleness clock.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Duration as ChronoDuration, Utc};
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::error::SourceError;
use crate::metrics::Metrics;
use crate::models::quote::{HistoricalSeries, Metal, Quote, QuoteBatch};
use crate::models::response::{CurrentQuotesResponse, HistoricalQuotesResponse};
use crate::services::market_data::QuoteSource;

/// Point-in-time copy of the cache contents.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheState {
    /// Exactly one entry per metal, in `Metal::ALL` order.
    pub quotes: Vec<Quote>,
    pub history: HistoricalSeries,
    pub last_success: Option<DateTime<Utc>>,
    pub last_error: Option<SourceError>,
}

impl Default for CacheState {
    fn default() -> Self {
        Self {
            quotes: Metal::ALL.iter().map(|m| Quote::unavailable(*m)).collect(),
            history: HistoricalSeries::new(),
            last_success: None,
            last_error: None,
        }
    }
}

impl CacheState {
    /// Refresh is due when nothing was ever fetched, the last attempt failed,
    /// or the last success is older than `ttl`.
    pub fn is_stale(&self, now: DateTime<Utc>, ttl: ChronoDuration) -> bool {
        match self.last_success {
            None => true,
            Some(_) if self.last_error.is_some() => true,
            Some(at) => now - at > ttl,
        }
    }

    /// Merge a successful fetch.
    ///
    /// Current quotes are matched by metal; a metal the batch does not price
    /// keeps its previous value. History is replaced wholesale.
    pub fn apply_batch(&mut self, batch: QuoteBatch, now: DateTime<Utc>) {
        for quote in batch.current {
            if !quote.price.is_available() {
                continue;
            }
            if let Some(slot) = self.quotes.iter_mut().find(|q| q.metal == quote.metal) {
                *slot = quote;
            }
        }
        self.history = batch.history;
        self.last_success = Some(now);
        self.last_error = None;
    }

    /// Record a failed fetch without touching quotes or history.
    pub fn record_failure(&mut self, error: SourceError) {
        self.last_error = Some(error);
    }

    pub fn quote(&self, metal: Metal) -> Option<&Quote> {
        self.quotes.iter().find(|q| q.metal == metal)
    }

    pub fn error_message(&self) -> Option<String> {
        self.last_error.as_ref().map(ToString::to_string)
    }

    /// True when neither history nor any current price is present.
    pub fn has_no_data(&self) -> bool {
        self.history.is_empty() && !self.quotes.iter().any(|q| q.price.is_available())
    }

    pub fn current_quotes_response(&self, requested_at: DateTime<Utc>) -> CurrentQuotesResponse {
        CurrentQuotesResponse::new(&self.quotes, self.error_message(), requested_at, self.last_success)
    }

    pub fn historical_response(&self) -> HistoricalQuotesResponse {
        HistoricalQuotesResponse::new(&self.history, self.error_message(), self.last_success)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// Data was fresh; the source was not called.
    Fresh,
    Refreshed,
    Failed,
    /// Another caller finished an attempt while this one waited for the
    /// refresh gate; its result is shared and the source was not called.
    Joined,
}

/// Owns the cache state and the source that feeds it.
///
/// The state lock is held only to apply a batch or copy a snapshot. A
/// separate refresh gate serializes network fetches so readers are never
/// blocked by a slow provider.
pub struct QuoteCache {
    source: Arc<dyn QuoteSource>,
    state: Mutex<CacheState>,
    refresh_gate: Mutex<()>,
    /// Completed fetch attempts, successful or not.
    attempts: AtomicU64,
    ttl: ChronoDuration,
    lookback_days: u32,
    metrics: Option<Arc<Metrics>>,
}

impl QuoteCache {
    pub fn new(source: Arc<dyn QuoteSource>, ttl: Duration, lookback_days: u32) -> Self {
        Self {
            source,
            state: Mutex::new(CacheState::default()),
            refresh_gate: Mutex::new(()),
            attempts: AtomicU64::new(0),
            ttl: ChronoDuration::from_std(ttl).unwrap_or_else(|_| ChronoDuration::seconds(300)),
            lookback_days,
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Snapshot of the current state.
    pub async fn read(&self) -> CacheState {
        self.state.lock().await.clone()
    }

    pub async fn refresh_if_stale(&self) -> RefreshOutcome {
        self.refresh_if_stale_at(Utc::now()).await
    }

    /// Refresh from the source if the cache is stale as of `now`.
    ///
    /// Callers queued behind an in-flight attempt take its result instead of
    /// fetching again, so an outage costs each of them at most one timeout.
    pub async fn refresh_if_stale_at(&self, now: DateTime<Utc>) -> RefreshOutcome {
        let seen_attempts = self.attempts.load(Ordering::SeqCst);
        if !self.is_stale_at(now).await {
            return RefreshOutcome::Fresh;
        }

        let _gate = self.refresh_gate.lock().await;
        if self.attempts.load(Ordering::SeqCst) != seen_attempts {
            return RefreshOutcome::Joined;
        }
        if !self.is_stale_at(now).await {
            return RefreshOutcome::Fresh;
        }

        if let Some(metrics) = &self.metrics {
            metrics.source_refresh_total.inc();
        }

        match self.source.fetch(self.lookback_days).await {
            Ok(batch) => {
                let current = batch.current.len();
                let mut state = self.state.lock().await;
                state.apply_batch(batch, now);
                self.attempts.fetch_add(1, Ordering::SeqCst);
                info!(
                    source = self.source.name(),
                    current_quotes = current,
                    "Quote cache refreshed"
                );
                RefreshOutcome::Refreshed
            }
            Err(e) => {
                warn!(source = self.source.name(), error = %e, "Quote refresh failed, keeping cached data");
                if let Some(metrics) = &self.metrics {
                    metrics.source_refresh_failures_total.inc();
                }
                self.state.lock().await.record_failure(e);
                self.attempts.fetch_add(1, Ordering::SeqCst);
                RefreshOutcome::Failed
            }
        }
    }

    async fn is_stale_at(&self, now: DateTime<Utc>) -> bool {
        self.state.lock().await.is_stale(now, self.ttl)
    }
}
