//! Full indicator snapshot for one price series.

use crate::config::AnalysisConfig;
use crate::error::IndicatorError;
use crate::models::indicators::IndicatorSet;

use super::momentum::{calculate_macd, calculate_rsi};
use super::trend::calculate_ema;

/// Compute RSI, both EMAs and MACD from an oldest-first price series.
///
/// Fails with `InsufficientData` when the series is too short for the RSI
/// window; the caller treats the whole analysis as unavailable.
pub fn compute_indicator_set(
    prices: &[f64],
    config: &AnalysisConfig,
) -> Result<IndicatorSet, IndicatorError> {
    let rsi = calculate_rsi(prices, config.rsi_window)?;
    let ema_short = calculate_ema(prices, config.ema_short)?;
    let ema_long = calculate_ema(prices, config.ema_long)?;
    let macd = calculate_macd(prices, config.macd_fast, config.macd_slow, config.macd_signal)?;

    Ok(IndicatorSet {
        rsi,
        ema_short,
        ema_long,
        macd: macd.macd,
        signal_line: macd.signal,
    })
}
