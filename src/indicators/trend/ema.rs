//! EMA (Exponential Moving Average) indicator

use crate::common::math;
use crate::error::IndicatorError;

/// Latest EMA value for a specific period.
///
/// `EMA[0] = price[0]`, `EMA[i] = price[i] * a + EMA[i-1] * (1 - a)`, `a = 2 / (period + 1)`.
pub fn calculate_ema(prices: &[f64], period: usize) -> Result<f64, IndicatorError> {
    math::ema_series(prices, period)
        .last()
        .copied()
        .ok_or(IndicatorError::InsufficientData {
            required: 1,
            actual: 0,
        })
}
