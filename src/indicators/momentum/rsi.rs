//! RSI (Relative Strength Index) indicator

use crate::common::math;
use crate::error::IndicatorError;

/// Calculate RSI over the last `window` price changes.
///
/// RSI = 100 - (100 / (1 + RS))
/// RS = Average Gain / Average Loss
///
/// Averages are simple means over the trailing window. When the average loss
/// is zero the result is 100.
pub fn calculate_rsi(prices: &[f64], window: usize) -> Result<f64, IndicatorError> {
    let required = window + 1;
    if window == 0 || prices.len() < required {
        return Err(IndicatorError::InsufficientData {
            required,
            actual: prices.len(),
        });
    }

    let mut gains = Vec::with_capacity(prices.len() - 1);
    let mut losses = Vec::with_capacity(prices.len() - 1);

    for pair in prices.windows(2) {
        let change = pair[1] - pair[0];
        gains.push(change.max(0.0));
        losses.push((-change).max(0.0));
    }

    let avg_gain = math::trailing_mean(&gains, window).unwrap_or(0.0);
    let avg_loss = math::trailing_mean(&losses, window).unwrap_or(0.0);

    if avg_loss == 0.0 {
        return Ok(100.0);
    }

    let rs = avg_gain / avg_loss;
    Ok(100.0 - (100.0 / (1.0 + rs)))
}
