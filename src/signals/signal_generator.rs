use crate::common::math::round_to;
use crate::config::AnalysisConfig;
use crate::models::indicators::IndicatorSet;
use crate::models::signal::{IndicatorKind, Signal, SignalAction};

pub struct SignalGenerator {
    config: AnalysisConfig,
}

impl SignalGenerator {
    pub fn new(config: AnalysisConfig) -> Self {
        Self { config }
    }

    /// Classify indicator values into signals, sorted by ascending priority.
    ///
    /// MACD and EMA always emit exactly one signal; RSI emits one only outside
    /// the neutral band.
    pub fn generate_signals(&self, indicators: &IndicatorSet) -> Vec<Signal> {
        let mut signals = Vec::with_capacity(3);

        match self.analyze_rsi(indicators.rsi) {
            RsiAnalysis::Oversold => signals.push(Signal::new(
                IndicatorKind::Rsi,
                SignalAction::Buy,
                indicators.rsi,
                "strong oversold".to_string(),
            )),
            RsiAnalysis::Overbought => signals.push(Signal::new(
                IndicatorKind::Rsi,
                SignalAction::Sell,
                indicators.rsi,
                "strong overbought".to_string(),
            )),
            RsiAnalysis::Neutral => {}
        }

        let macd_diff = indicators.macd_diff();
        signals.push(match analyze_diff(macd_diff) {
            Crossover::Bullish => Signal::new(
                IndicatorKind::Macd,
                SignalAction::Buy,
                round_to(macd_diff, 2),
                "bullish divergence".to_string(),
            ),
            Crossover::Bearish => Signal::new(
                IndicatorKind::Macd,
                SignalAction::Sell,
                round_to(macd_diff.abs(), 2),
                "bearish divergence".to_string(),
            ),
        });

        // Value and reason share the same 2-decimal figure.
        let ema_diff = indicators.ema_diff();
        let ema_gap = round_to(ema_diff.abs(), 2);
        signals.push(match analyze_diff(ema_diff) {
            Crossover::Bullish => Signal::new(
                IndicatorKind::Ema,
                SignalAction::Buy,
                ema_gap,
                format!(
                    "EMA{} above EMA{} by {:.2}",
                    self.config.ema_short, self.config.ema_long, ema_gap
                ),
            ),
            Crossover::Bearish => Signal::new(
                IndicatorKind::Ema,
                SignalAction::Sell,
                ema_gap,
                format!(
                    "EMA{} below EMA{} by {:.2}",
                    self.config.ema_short, self.config.ema_long, ema_gap
                ),
            ),
        });

        signals.sort_by_key(|s| s.priority);
        signals
    }

    fn analyze_rsi(&self, rsi: f64) -> RsiAnalysis {
        if rsi < self.config.rsi_oversold {
            RsiAnalysis::Oversold
        } else if rsi > self.config.rsi_overbought {
            RsiAnalysis::Overbought
        } else {
            RsiAnalysis::Neutral
        }
    }
}

impl Default for SignalGenerator {
    fn default() -> Self {
        Self::new(AnalysisConfig::default())
    }
}

// A zero difference counts as bearish.
fn analyze_diff(diff: f64) -> Crossover {
    if diff > 0.0 {
        Crossover::Bullish
    } else {
        Crossover::Bearish
    }
}

enum RsiAnalysis {
    Oversold,
    Overbought,
    Neutral,
}

enum Crossover {
    Bullish,
    Bearish,
}
