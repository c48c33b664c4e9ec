//! Unit tests for RSI indicator

use bullion::error::IndicatorError;
use bullion::indicators::momentum::calculate_rsi;

fn rising(count: usize) -> Vec<f64> {
    (0..count).map(|i| 100.0 + i as f64).collect()
}

#[test]
fn test_rsi_insufficient_data() {
    let prices = rising(14);
    assert_eq!(
        calculate_rsi(&prices, 14),
        Err(IndicatorError::InsufficientData {
            required: 15,
            actual: 14
        })
    );
}

#[test]
fn test_rsi_empty_series() {
    assert!(calculate_rsi(&[], 14).is_err());
}

#[test]
fn test_rsi_all_gains_is_100() {
    assert_eq!(calculate_rsi(&rising(15), 14), Ok(100.0));
}

#[test]
fn test_rsi_flat_series_is_100() {
    let prices = vec![50.0; 20];
    assert_eq!(calculate_rsi(&prices, 14), Ok(100.0));
}

#[test]
fn test_rsi_all_losses_is_0() {
    let prices: Vec<f64> = (0..20).map(|i| 200.0 - i as f64).collect();
    assert_eq!(calculate_rsi(&prices, 14), Ok(0.0));
}

#[test]
fn test_rsi_balanced_moves_is_50() {
    let prices: Vec<f64> = (0..15).map(|i| if i % 2 == 0 { 1.0 } else { 2.0 }).collect();
    let rsi = calculate_rsi(&prices, 14).unwrap();
    assert!((rsi - 50.0).abs() < 1e-9);
}

#[test]
fn test_rsi_uses_only_trailing_window() {
    // Long decline followed by 14 consecutive gains.
    let mut prices: Vec<f64> = (0..30).map(|i| 300.0 - i as f64).collect();
    let last = *prices.last().unwrap();
    prices.extend((1..=14).map(|i| last + i as f64));
    assert_eq!(calculate_rsi(&prices, 14), Ok(100.0));
}

#[test]
fn test_rsi_known_value() {
    // 10 gains of 2 and 4 losses of 1 in the window: RS = 20 / 4 = 5.
    let mut prices = vec![100.0];
    for i in 0..14 {
        let prev = *prices.last().unwrap();
        prices.push(if i < 10 { prev + 2.0 } else { prev - 1.0 });
    }
    let rsi = calculate_rsi(&prices, 14).unwrap();
    assert!((rsi - (100.0 - 100.0 / 6.0)).abs() < 1e-9);
}

#[test]
fn test_rsi_always_within_bounds() {
    for seed in 0..20 {
        let prices: Vec<f64> = (0..60)
            .map(|i| 1000.0 + ((i * (seed + 3)) as f64 * 0.7).sin() * 50.0 + i as f64 * (seed as f64 - 10.0) * 0.1)
            .collect();
        let rsi = calculate_rsi(&prices, 14).unwrap();
        assert!((0.0..=100.0).contains(&rsi), "rsi {} out of range for seed {}", rsi, seed);
    }
}
