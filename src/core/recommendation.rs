//! Per-metal analysis and assembly of the recommendation payload.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, NaiveDate, Utc};
use rust_decimal::prelude::ToPrimitive;
use tracing::{info, warn};

use crate::common::math;
use crate::config::AnalysisConfig;
use crate::error::IndicatorError;
use crate::indicators::compute_indicator_set;
use crate::models::quote::Metal;
use crate::models::response::{MetalRecommendation, PriceHistory, RecommendationResponse};
use crate::models::signal::Recommendation;
use crate::services::cache::CacheState;
use crate::signals::{primary_recommendation, SignalGenerator};

pub const PLACEHOLDER_DESCRIPTION: &str = "data temporarily unavailable";
pub const NO_DATA_MESSAGE: &str = "failed to fetch data from source";
pub const PLACEHOLDER_POINTS: usize = 30;

const HISTORY_DATE_FORMAT: &str = "%Y-%m-%d";

/// Centre of the synthetic ramp used when a metal has no usable series.
pub fn placeholder_base_price(metal: Metal) -> f64 {
    match metal {
        Metal::Gold => 8000.0,
        Metal::Silver => 80.0,
        Metal::Platinum => 2500.0,
        Metal::Palladium => 2000.0,
    }
}

/// Deterministic ramp from 90% to 110% of the base price over the
/// `PLACEHOLDER_POINTS` days before `today`.
pub fn placeholder_series(metal: Metal, today: NaiveDate) -> Vec<(NaiveDate, f64)> {
    let base = placeholder_base_price(metal);
    let prices = math::linspace(base * 0.9, base * 1.1, PLACEHOLDER_POINTS);
    prices
        .into_iter()
        .enumerate()
        .map(|(i, price)| {
            let days_back = (PLACEHOLDER_POINTS - i) as i64;
            (today - Duration::days(days_back), price)
        })
        .collect()
}

/// Oldest-first series for one metal: cached history, plus the current quote
/// when it is newer than the last history entry.
pub fn analysis_series(snapshot: &CacheState, metal: Metal) -> Vec<(NaiveDate, f64)> {
    let mut series: Vec<(NaiveDate, f64)> = snapshot
        .history
        .get(metal)
        .iter()
        .filter_map(|e| e.price.to_f64().map(|p| (e.date, p)))
        .collect();

    if let Some(quote) = snapshot.quote(metal) {
        if let (Some(date), Some(price)) = (quote.date, quote.price.as_f64()) {
            if series.last().map_or(true, |(last, _)| date > *last) {
                series.push((date, price));
            }
        }
    }

    series
}

pub struct RecommendationService {
    config: AnalysisConfig,
    generator: SignalGenerator,
}

impl RecommendationService {
    pub fn new(config: AnalysisConfig) -> Self {
        let generator = SignalGenerator::new(config.clone());
        Self { config, generator }
    }

    /// Analyze every tracked metal from a cache snapshot.
    ///
    /// Only a snapshot with no data at all yields an error payload; a metal
    /// that cannot be analyzed gets a placeholder entry instead.
    pub fn recommend(&self, snapshot: &CacheState, now: DateTime<Utc>) -> RecommendationResponse {
        if snapshot.has_no_data() {
            let message = snapshot
                .error_message()
                .unwrap_or_else(|| NO_DATA_MESSAGE.to_string());
            warn!(error = %message, "No quote data available for recommendations");
            return RecommendationResponse::error(now, message);
        }

        let today = now.date_naive();
        let data: BTreeMap<&'static str, MetalRecommendation> = Metal::ALL
            .iter()
            .map(|metal| (metal.code(), self.analyze_metal(snapshot, *metal, today)))
            .collect();

        RecommendationResponse::success(now, data)
    }

    pub fn analyze_metal(&self, snapshot: &CacheState, metal: Metal, today: NaiveDate) -> MetalRecommendation {
        let series = analysis_series(snapshot, metal);

        if series.len() >= self.config.min_points() {
            match self.analyze_series(&series) {
                Ok(analysis) => return analysis,
                Err(e) => warn!(metal = %metal, error = %e, "Analysis failed, using placeholder"),
            }
        } else {
            info!(
                metal = %metal,
                points = series.len(),
                required = self.config.min_points(),
                "Series too short, using placeholder"
            );
        }

        self.placeholder(metal, today)
    }

    fn analyze_series(&self, series: &[(NaiveDate, f64)]) -> Result<MetalRecommendation, IndicatorError> {
        let prices: Vec<f64> = series.iter().map(|(_, p)| *p).collect();
        let indicators = compute_indicator_set(&prices, &self.config)?;
        let signals = self.generator.generate_signals(&indicators);
        let general_recommendation = primary_recommendation(&signals);

        Ok(MetalRecommendation {
            current_price: prices.last().copied().unwrap_or_default(),
            general_recommendation,
            history: price_history(series),
            indicators: Some(indicators),
            signals,
            placeholder: false,
        })
    }

    fn placeholder(&self, metal: Metal, today: NaiveDate) -> MetalRecommendation {
        let series = placeholder_series(metal, today);
        let prices: Vec<f64> = series.iter().map(|(_, p)| *p).collect();

        MetalRecommendation {
            current_price: placeholder_base_price(metal),
            general_recommendation: Recommendation::hold(PLACEHOLDER_DESCRIPTION),
            history: price_history(&series),
            indicators: compute_indicator_set(&prices, &self.config).ok(),
            signals: Vec::new(),
            placeholder: true,
        }
    }
}

impl Default for RecommendationService {
    fn default() -> Self {
        Self::new(AnalysisConfig::default())
    }
}

fn price_history(series: &[(NaiveDate, f64)]) -> PriceHistory {
    PriceHistory {
        dates: series
            .iter()
            .map(|(d, _)| d.format(HISTORY_DATE_FORMAT).to_string())
            .collect(),
        prices: series.iter().map(|(_, p)| *p).collect(),
    }
}
