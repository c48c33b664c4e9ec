//! Unit tests for primary recommendation selection

use bullion::models::{IndicatorKind, IndicatorSet, Signal, SignalAction, DEFAULT_CONFIDENCE};
use bullion::signals::{primary_recommendation, SignalGenerator, INSUFFICIENT_DATA};

fn signal(indicator: IndicatorKind, action: SignalAction, confidence: Option<f64>) -> Signal {
    let mut signal = Signal::new(indicator, action, 1.0, format!("{:?} {:?}", indicator, action));
    signal.confidence = confidence;
    signal
}

#[test]
fn test_empty_signals_hold() {
    let rec = primary_recommendation(&[]);
    assert_eq!(rec.action, SignalAction::Hold);
    assert_eq!(rec.confidence, 0.5);
    assert_eq!(rec.description, INSUFFICIENT_DATA);
}

#[test]
fn test_highest_priority_signal_wins_without_confidences() {
    let signals = vec![
        Signal::new(IndicatorKind::Rsi, SignalAction::Buy, 25.0, "strong oversold".to_string()),
        Signal::new(IndicatorKind::Macd, SignalAction::Sell, 1.0, "bearish divergence".to_string()),
        Signal::new(IndicatorKind::Ema, SignalAction::Sell, 0.3, "EMA7 below EMA21 by 0.30".to_string()),
    ];
    let rec = primary_recommendation(&signals);
    assert_eq!(rec.action, SignalAction::Buy);
    assert_eq!(rec.confidence, DEFAULT_CONFIDENCE);
    assert_eq!(rec.description, "strong oversold");
}

#[test]
fn test_generated_signals_report_default_confidence() {
    let indicators = IndicatorSet {
        rsi: 50.0,
        ema_short: 99.0,
        ema_long: 100.0,
        macd: 3.0,
        signal_line: 2.0,
    };
    let signals = SignalGenerator::default().generate_signals(&indicators);
    let rec = primary_recommendation(&signals);

    // No RSI signal in the neutral band, so MACD leads.
    assert_eq!(rec.action, SignalAction::Buy);
    assert_eq!(rec.confidence, 0.5);
    assert_eq!(rec.description, "bullish divergence");
}

#[test]
fn test_explicit_confidence_outranks_priority() {
    let signals = vec![
        signal(IndicatorKind::Rsi, SignalAction::Sell, None),
        signal(IndicatorKind::Ema, SignalAction::Buy, Some(0.9)),
    ];
    let rec = primary_recommendation(&signals);
    assert_eq!(rec.action, SignalAction::Buy);
    assert_eq!(rec.confidence, 0.9);
    assert_eq!(rec.description, "Ema Buy");
}

#[test]
fn test_tie_keeps_earlier_signal() {
    let signals = vec![
        signal(IndicatorKind::Macd, SignalAction::Buy, Some(0.6)),
        signal(IndicatorKind::Ema, SignalAction::Sell, Some(0.6)),
    ];
    assert_eq!(primary_recommendation(&signals).action, SignalAction::Buy);
}

#[test]
fn test_confidence_is_clamped() {
    let rec = primary_recommendation(&[signal(IndicatorKind::Ema, SignalAction::Buy, Some(1.7))]);
    assert_eq!(rec.confidence, 1.0);
}
