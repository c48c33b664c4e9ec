use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SignalAction {
    Buy,
    Sell,
    Hold,
}

/// Indicator that produced a signal. Its rank is fixed, not a weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum IndicatorKind {
    Rsi,
    Macd,
    Ema,
}

impl IndicatorKind {
    /// 1 is the highest priority.
    pub fn priority(&self) -> u8 {
        match self {
            IndicatorKind::Rsi => 1,
            IndicatorKind::Macd => 2,
            IndicatorKind::Ema => 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    pub priority: u8,
    pub action: SignalAction,
    pub indicator: IndicatorKind,
    pub value: f64,
    pub reason: String,
    /// Unset by the indicator rules; the primary recommendation then falls
    /// back to the default confidence.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

impl Signal {
    pub fn new(indicator: IndicatorKind, action: SignalAction, value: f64, reason: String) -> Self {
        Self {
            priority: indicator.priority(),
            action,
            indicator,
            value,
            reason,
            confidence: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub action: SignalAction,
    pub confidence: f64,
    pub description: String,
}

/// Confidence reported when no signal carries its own.
pub const DEFAULT_CONFIDENCE: f64 = 0.5;

impl Recommendation {
    pub fn hold(description: impl Into<String>) -> Self {
        Self {
            action: SignalAction::Hold,
            confidence: DEFAULT_CONFIDENCE,
            description: description.into(),
        }
    }
}
