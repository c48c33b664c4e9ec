use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacdIndicator {
    pub macd: f64,
    pub signal: f64,
    pub histogram: f64,
}

/// Latest indicator values computed from one price series snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSet {
    pub rsi: f64,
    pub ema_short: f64,
    pub ema_long: f64,
    pub macd: f64,
    pub signal_line: f64,
}

impl IndicatorSet {
    pub fn macd_diff(&self) -> f64 {
        self.macd - self.signal_line
    }

    pub fn ema_diff(&self) -> f64 {
        self.ema_short - self.ema_long
    }
}
