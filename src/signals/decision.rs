//! Primary recommendation selection.

use crate::models::signal::{Recommendation, Signal, DEFAULT_CONFIDENCE};

pub const INSUFFICIENT_DATA: &str = "insufficient data for analysis";

/// Pick the signal with the highest confidence, a missing confidence counting
/// as zero.
///
/// Ties keep the earlier signal, so for a priority-sorted list without
/// confidences the highest-priority signal wins and is reported with
/// `DEFAULT_CONFIDENCE`. An empty list yields Hold.
pub fn primary_recommendation(signals: &[Signal]) -> Recommendation {
    let mut best: Option<&Signal> = None;

    for signal in signals {
        match best {
            Some(current) if rank(signal) <= rank(current) => {}
            _ => best = Some(signal),
        }
    }

    match best {
        Some(signal) => Recommendation {
            action: signal.action,
            confidence: signal
                .confidence
                .unwrap_or(DEFAULT_CONFIDENCE)
                .clamp(0.0, 1.0),
            description: signal.reason.clone(),
        },
        None => Recommendation::hold(INSUFFICIENT_DATA),
    }
}

fn rank(signal: &Signal) -> f64 {
    signal.confidence.unwrap_or(0.0)
}
