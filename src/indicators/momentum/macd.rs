//! MACD (Moving Average Convergence Divergence) indicator

use crate::common::math;
use crate::error::IndicatorError;
use crate::models::indicators::MacdIndicator;

/// Calculate MACD indicator
///
/// MACD = EMA(fast) - EMA(slow)
/// Signal = EMA(signal) of the MACD line
/// Histogram = MACD - Signal
///
/// Both lines are computed as full first-value-seeded series; only the latest
/// point is returned.
pub fn calculate_macd(
    prices: &[f64],
    fast_period: usize,
    slow_period: usize,
    signal_period: usize,
) -> Result<MacdIndicator, IndicatorError> {
    let (macd_line, signal_line) = calculate_macd_series(prices, fast_period, slow_period, signal_period)?;

    // Both series have the same non-zero length as `prices`.
    let macd = macd_line[macd_line.len() - 1];
    let signal = signal_line[signal_line.len() - 1];

    Ok(MacdIndicator {
        macd,
        signal,
        histogram: macd - signal,
    })
}

/// Full MACD and signal-line series.
pub fn calculate_macd_series(
    prices: &[f64],
    fast_period: usize,
    slow_period: usize,
    signal_period: usize,
) -> Result<(Vec<f64>, Vec<f64>), IndicatorError> {
    if prices.is_empty() {
        return Err(IndicatorError::InsufficientData {
            required: 1,
            actual: 0,
        });
    }

    let fast = math::ema_series(prices, fast_period);
    let slow = math::ema_series(prices, slow_period);
    let macd_line: Vec<f64> = fast.iter().zip(slow.iter()).map(|(f, s)| f - s).collect();
    let signal_line = math::ema_series(&macd_line, signal_period);

    Ok((macd_line, signal_line))
}
