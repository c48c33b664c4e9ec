//! Background refresher that keeps the quote cache warm.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

use crate::error::ConfigError;
use crate::services::cache::{QuoteCache, RefreshOutcome};

pub struct RefreshScheduler {
    cache: Arc<QuoteCache>,
    interval: Duration,
    handle: Arc<RwLock<Option<tokio::task::JoinHandle<()>>>>,
}

impl RefreshScheduler {
    /// Create a scheduler that checks the cache once per `interval`.
    pub fn new(cache: Arc<QuoteCache>, interval: Duration) -> Result<Self, ConfigError> {
        if interval.is_zero() {
            return Err(ConfigError::InvalidValue {
                key: "BULLION_REFRESH_INTERVAL_SECS".to_string(),
                value: "0".to_string(),
            });
        }

        Ok(Self {
            cache,
            interval,
            handle: Arc::new(RwLock::new(None)),
        })
    }

    /// Start the refresh loop. The first check runs immediately.
    pub async fn start(&self) {
        let mut handle = self.handle.write().await;
        if handle.is_some() {
            return;
        }

        let cache = self.cache.clone();
        let interval = self.interval;
        *handle = Some(tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;
                let outcome = cache.refresh_if_stale().await;
                if outcome != RefreshOutcome::Fresh {
                    debug!(?outcome, "RefreshScheduler: tick");
                }
            }
        }));

        info!(interval_secs = interval.as_secs(), "RefreshScheduler: started");
    }

    /// Stop the scheduler
    pub async fn stop(&self) {
        let mut handle = self.handle.write().await;
        if let Some(h) = handle.take() {
            h.abort();
            info!("RefreshScheduler: stopped");
        }
    }

    /// Check if the scheduler is running
    pub async fn is_running(&self) -> bool {
        let handle = self.handle.read().await;
        handle.is_some()
    }
}
