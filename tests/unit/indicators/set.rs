//! Unit tests for the indicator snapshot

use bullion::config::AnalysisConfig;
use bullion::error::IndicatorError;
use bullion::indicators::compute_indicator_set;
use bullion::indicators::momentum::{calculate_macd, calculate_rsi};
use bullion::indicators::trend::calculate_ema;

#[test]
fn test_indicator_set_requires_rsi_window() {
    let prices: Vec<f64> = (0..14).map(|i| i as f64).collect();
    assert_eq!(
        compute_indicator_set(&prices, &AnalysisConfig::default()),
        Err(IndicatorError::InsufficientData {
            required: 15,
            actual: 14
        })
    );
}

#[test]
fn test_indicator_set_matches_individual_indicators() {
    let config = AnalysisConfig::default();
    let prices: Vec<f64> = (0..40).map(|i| 2500.0 + (i as f64 * 0.9).cos() * 30.0).collect();
    let set = compute_indicator_set(&prices, &config).unwrap();

    assert_eq!(set.rsi, calculate_rsi(&prices, 14).unwrap());
    assert_eq!(set.ema_short, calculate_ema(&prices, 7).unwrap());
    assert_eq!(set.ema_long, calculate_ema(&prices, 21).unwrap());
    let macd = calculate_macd(&prices, 12, 26, 9).unwrap();
    assert_eq!(set.macd, macd.macd);
    assert_eq!(set.signal_line, macd.signal);
}
