//! Unit tests for the background refresher

use std::str::FromStr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use bullion::core::scheduler::RefreshScheduler;
use bullion::error::{ConfigError, SourceError};
use bullion::models::{Metal, Price, Quote, QuoteBatch};
use bullion::services::cache::QuoteCache;
use bullion::services::market_data::QuoteSource;
use rust_decimal::Decimal;

use crate::fixtures::date;

struct CountingSource {
    calls: AtomicUsize,
}

#[async_trait]
impl QuoteSource for CountingSource {
    fn name(&self) -> &'static str {
        "counting"
    }

    async fn fetch(&self, _lookback_days: u32) -> Result<QuoteBatch, SourceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(QuoteBatch {
            current: vec![Quote::new(
                Metal::Silver,
                Price::Available(Decimal::from_str("80.12").unwrap()),
                Some(date(1, 6, 2024)),
            )],
            ..QuoteBatch::default()
        })
    }
}

fn cache(source: Arc<CountingSource>) -> Arc<QuoteCache> {
    Arc::new(QuoteCache::new(source, Duration::from_secs(300), 30))
}

#[test]
fn test_zero_interval_is_rejected() {
    let source = Arc::new(CountingSource { calls: AtomicUsize::new(0) });
    let result = RefreshScheduler::new(cache(source), Duration::ZERO);
    assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
}

#[tokio::test]
async fn test_start_refreshes_immediately_and_stop() {
    let source = Arc::new(CountingSource { calls: AtomicUsize::new(0) });
    let cache = cache(source.clone());
    let scheduler = RefreshScheduler::new(cache.clone(), Duration::from_millis(20)).unwrap();

    assert!(!scheduler.is_running().await);
    scheduler.start().await;
    assert!(scheduler.is_running().await);

    tokio::time::sleep(Duration::from_millis(100)).await;

    // Several ticks, but the cache stays fresh after the first fetch.
    assert_eq!(source.calls.load(Ordering::SeqCst), 1);
    assert!(cache.read().await.quote(Metal::Silver).unwrap().price.is_available());

    scheduler.stop().await;
    assert!(!scheduler.is_running().await);
}

#[tokio::test]
async fn test_start_is_idempotent() {
    let source = Arc::new(CountingSource { calls: AtomicUsize::new(0) });
    let scheduler = RefreshScheduler::new(cache(source), Duration::from_secs(60)).unwrap();

    scheduler.start().await;
    scheduler.start().await;
    assert!(scheduler.is_running().await);
    scheduler.stop().await;
    scheduler.stop().await;
    assert!(!scheduler.is_running().await);
}
