//! Series math used by the indicator implementations.

/// Smoothing factor for an EMA of the given period: `2 / (period + 1)`.
pub fn ema_alpha(period: usize) -> f64 {
    2.0 / (period as f64 + 1.0)
}

/// Next EMA value from the previous one.
pub fn ema_from_previous(value: f64, previous: f64, period: usize) -> f64 {
    let alpha = ema_alpha(period);
    value * alpha + previous * (1.0 - alpha)
}

/// Full EMA series, seeded with the first value (not an SMA seed).
///
/// Returns an empty vector for empty input.
pub fn ema_series(values: &[f64], period: usize) -> Vec<f64> {
    let mut out = Vec::with_capacity(values.len());
    let mut iter = values.iter();
    if let Some(&first) = iter.next() {
        out.push(first);
        let mut prev = first;
        for &v in iter {
            prev = ema_from_previous(v, prev, period);
            out.push(prev);
        }
    }
    out
}

/// Simple mean of the last `window` values. `None` if there are fewer.
pub fn trailing_mean(values: &[f64], window: usize) -> Option<f64> {
    if window == 0 || values.len() < window {
        return None;
    }
    let sum: f64 = values[values.len() - window..].iter().sum();
    Some(sum / window as f64)
}

/// Evenly spaced values from `start` to `end` inclusive.
pub fn linspace(start: f64, end: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (count - 1) as f64;
            (0..count).map(|i| start + step * i as f64).collect()
        }
    }
}

/// Round to `decimals` places, half away from zero.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
