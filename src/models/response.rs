//! Wire shapes handed to the serving layer.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};

use super::indicators::IndicatorSet;
use super::quote::{HistoricalSeries, Metal, Quote, QUOTE_DATE_FORMAT};
use super::signal::{Recommendation, Signal};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuoteView {
    pub name: &'static str,
    pub price: String,
    pub unit: &'static str,
    pub date: String,
}

impl From<&Quote> for QuoteView {
    fn from(quote: &Quote) -> Self {
        Self {
            name: quote.metal.display_name(),
            price: quote.price.to_string(),
            unit: quote.unit,
            date: quote.date_label(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CurrentQuotesResponse {
    pub data: Vec<QuoteView>,
    pub error: Option<String>,
    pub last_updated_attempt: i64,
    pub last_successful_data_update: i64,
}

impl CurrentQuotesResponse {
    pub fn new(
        quotes: &[Quote],
        error: Option<String>,
        requested_at: DateTime<Utc>,
        last_success: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            data: quotes.iter().map(QuoteView::from).collect(),
            error,
            last_updated_attempt: requested_at.timestamp(),
            last_successful_data_update: unix_or_zero(last_success),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoricalPoint {
    pub date: String,
    pub price: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct HistoricalQuotesResponse {
    pub data: BTreeMap<&'static str, Vec<HistoricalPoint>>,
    pub error: Option<String>,
    pub last_successful_data_update: i64,
}

impl HistoricalQuotesResponse {
    pub fn new(
        history: &HistoricalSeries,
        error: Option<String>,
        last_success: Option<DateTime<Utc>>,
    ) -> Self {
        let data = Metal::ALL
            .iter()
            .map(|metal| {
                let points = history
                    .get(*metal)
                    .iter()
                    .map(|e| HistoricalPoint {
                        date: e.date.format(QUOTE_DATE_FORMAT).to_string(),
                        price: e.price.to_string(),
                    })
                    .collect();
                (metal.display_name(), points)
            })
            .collect();

        Self {
            data,
            error,
            last_successful_data_update: unix_or_zero(last_success),
        }
    }
}

fn unix_or_zero(ts: Option<DateTime<Utc>>) -> i64 {
    ts.map(|t| t.timestamp()).unwrap_or(0)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    Success,
    Error,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PriceHistory {
    /// `YYYY-MM-DD`
    pub dates: Vec<String>,
    pub prices: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetalRecommendation {
    pub current_price: f64,
    pub general_recommendation: Recommendation,
    pub history: PriceHistory,
    #[serde(serialize_with = "indicators_or_empty")]
    pub indicators: Option<IndicatorSet>,
    pub signals: Vec<Signal>,
    /// True when the analysis ran on a synthetic placeholder series.
    pub placeholder: bool,
}

fn indicators_or_empty<S: Serializer>(
    indicators: &Option<IndicatorSet>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match indicators {
        Some(set) => set.serialize(serializer),
        None => BTreeMap::<String, f64>::new().serialize(serializer),
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RecommendationResponse {
    pub status: ResponseStatus,
    pub timestamp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub data: BTreeMap<&'static str, MetalRecommendation>,
}

impl RecommendationResponse {
    pub fn success(
        timestamp: DateTime<Utc>,
        data: BTreeMap<&'static str, MetalRecommendation>,
    ) -> Self {
        Self {
            status: ResponseStatus::Success,
            timestamp: timestamp.to_rfc3339(),
            message: None,
            data,
        }
    }

    pub fn error(timestamp: DateTime<Utc>, message: impl Into<String>) -> Self {
        Self {
            status: ResponseStatus::Error,
            timestamp: timestamp.to_rfc3339(),
            message: Some(message.into()),
            data: BTreeMap::new(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == ResponseStatus::Success
    }
}
