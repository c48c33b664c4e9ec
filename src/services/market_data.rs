//! Quote source interface implemented by each upstream provider.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::USER_AGENT;
use reqwest::Client;

use crate::error::SourceError;
use crate::models::quote::QuoteBatch;

/// Upper bound on the lookback window any provider is asked for.
pub const MAX_LOOKBACK_DAYS: u32 = 90;

/// Some providers reject clients that do not look like a browser.
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

#[async_trait]
pub trait QuoteSource: Send + Sync {
    /// Short provider name for logs.
    fn name(&self) -> &'static str;

    fn max_lookback_days(&self) -> u32 {
        MAX_LOOKBACK_DAYS
    }

    fn clamp_lookback(&self, lookback_days: u32) -> u32 {
        lookback_days.clamp(1, self.max_lookback_days())
    }

    /// Fetch and parse current quotes plus history covering `lookback_days`.
    ///
    /// A successful result always holds at least one record.
    async fn fetch(&self, lookback_days: u32) -> Result<QuoteBatch, SourceError>;
}

/// HTTP client shared by the providers.
pub fn build_http_client(timeout: Duration) -> Client {
    Client::builder()
        .timeout(timeout)
        .user_agent(BROWSER_USER_AGENT)
        .build()
        .unwrap_or_else(|_| Client::new())
}

/// GET `url` and return the body, mapping timeouts and non-2xx statuses to
/// `SourceError::Network`.
pub(crate) async fn fetch_body(
    client: &Client,
    url: &str,
    query: &[(&str, String)],
    timeout: Duration,
) -> Result<String, SourceError> {
    let response = client
        .get(url)
        .query(query)
        .header(USER_AGENT, BROWSER_USER_AGENT)
        .timeout(timeout)
        .send()
        .await?
        .error_for_status()?;

    let bytes = response.bytes().await?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
