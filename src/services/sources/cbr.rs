//! Dated XML provider: one `Record` per metal per day.
//!
//! ```text
//! <Metall FromDate="..." ToDate="...">
//!   <Record Date="01.06.2024" Code="1"><Buy>8372,41</Buy><Sell>8372,41</Sell></Record>
//! </Metall>
//! ```

use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{Duration as ChronoDuration, NaiveDate, Utc};
use lazy_static::lazy_static;
use reqwest::Client;
use scraper::{Html, Selector};
use tracing::debug;

use crate::error::SourceError;
use crate::models::quote::{HistoricalEntry, HistoricalSeries, Metal, Price, Quote, QuoteBatch};
use crate::services::market_data::{build_http_client, fetch_body, QuoteSource};
use crate::services::parsing::{parse_date, parse_price_strict};

pub const CBR_URL: &str = "https://www.cbr.ru/scripts/xml_metall.asp";

const QUERY_DATE_FORMAT: &str = "%d/%m/%Y";

// The HTML parser lowercases element and attribute names.
lazy_static! {
    static ref RECORD_SELECTOR: Selector = Selector::parse("record").expect("Invalid selector");
    static ref BUY_SELECTOR: Selector = Selector::parse("buy").expect("Invalid selector");
}

pub fn metal_from_code(code: &str) -> Option<Metal> {
    match code.trim() {
        "1" => Some(Metal::Gold),
        "2" => Some(Metal::Silver),
        "3" => Some(Metal::Platinum),
        "4" => Some(Metal::Palladium),
        _ => None,
    }
}

pub struct CbrXmlSource {
    client: Client,
    url: String,
    timeout: Duration,
}

impl CbrXmlSource {
    pub fn new(timeout: Duration) -> Self {
        Self::with_url(CBR_URL, timeout)
    }

    pub fn with_url(url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client: build_http_client(timeout),
            url: url.into(),
            timeout,
        }
    }
}

/// Query parameters covering `[end - lookback_days, end]`.
pub fn date_range_query(end: NaiveDate, lookback_days: u32) -> Vec<(&'static str, String)> {
    let start = end - ChronoDuration::days(i64::from(lookback_days));
    vec![
        ("date_req1", start.format(QUERY_DATE_FORMAT).to_string()),
        ("date_req2", end.format(QUERY_DATE_FORMAT).to_string()),
    ]
}

#[async_trait]
impl QuoteSource for CbrXmlSource {
    fn name(&self) -> &'static str {
        "cbr"
    }

    async fn fetch(&self, lookback_days: u32) -> Result<QuoteBatch, SourceError> {
        let lookback = self.clamp_lookback(lookback_days);
        let query = date_range_query(Utc::now().date_naive(), lookback);
        let body = fetch_body(&self.client, &self.url, &query, self.timeout).await?;
        parse_records(&body)
    }
}

/// Parse every usable `Record`. The latest record per metal becomes its
/// current quote; all records form the history.
pub fn parse_records(xml: &str) -> Result<QuoteBatch, SourceError> {
    let document = Html::parse_document(xml);
    let mut entries = Vec::new();

    for record in document.select(&RECORD_SELECTOR) {
        let element = record.value();
        let (Some(date_attr), Some(code_attr)) = (element.attr("date"), element.attr("code")) else {
            debug!("Skipping record without Date/Code attributes");
            continue;
        };
        let Some(buy) = record.select(&BUY_SELECTOR).next() else {
            debug!(date = date_attr, "Skipping record without Buy element");
            continue;
        };

        let Some(metal) = metal_from_code(code_attr) else {
            debug!(code = code_attr, "Skipping record with unknown metal code");
            continue;
        };
        let date = match parse_date(date_attr) {
            Ok(date) => date,
            Err(e) => {
                debug!(error = %e, "Skipping record");
                continue;
            }
        };
        let buy_text: String = buy.text().collect();
        match parse_price_strict(&buy_text) {
            Ok(price) => entries.push((metal, HistoricalEntry::new(date, price))),
            Err(e) => debug!(metal = %metal, %date, error = %e, "Skipping record"),
        }
    }

    if entries.is_empty() {
        return Err(SourceError::SourceFormat(
            "no usable Record elements in response".to_string(),
        ));
    }

    let mut latest: BTreeMap<Metal, HistoricalEntry> = BTreeMap::new();
    for (metal, entry) in &entries {
        latest
            .entry(*metal)
            .and_modify(|current| {
                if entry.date > current.date {
                    *current = *entry;
                }
            })
            .or_insert(*entry);
    }

    let current = latest
        .into_iter()
        .map(|(metal, entry)| Quote::new(metal, Price::Available(entry.price), Some(entry.date)))
        .collect();

    Ok(QuoteBatch {
        current,
        history: HistoricalSeries::from_entries(entries),
    })
}
