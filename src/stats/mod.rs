//! Latency statistics and rounding helpers
//!
//! Reported figures use fixed precision: latencies and response times are
//! rounded to two decimals, packet loss to one decimal.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Round `value` to `places` decimal places
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// Elapsed time in milliseconds rounded to two decimals
pub fn duration_ms(elapsed: Duration) -> f64 {
    round_to(elapsed.as_secs_f64() * 1000.0, 2)
}

/// Percentage of `failed` out of `sent`, rounded to one decimal
pub fn loss_percentage(failed: u32, sent: u32) -> f64 {
    if sent == 0 {
        return 0.0;
    }
    round_to(100.0 * failed as f64 / sent as f64, 1)
}

/// Min/max/avg over a set of latency samples (milliseconds)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatencySummary {
    pub min_ms: f64,
    pub max_ms: f64,
    pub avg_ms: f64,
    pub sample_count: usize,
}

impl LatencySummary {
    /// Summarize samples; `None` when there are no samples
    pub fn from_samples(samples: &[f64]) -> Option<Self> {
        if samples.is_empty() {
            return None;
        }

        let min = samples.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = samples.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let avg = samples.iter().sum::<f64>() / samples.len() as f64;

        Some(Self {
            min_ms: round_to(min, 2),
            max_ms: round_to(max, 2),
            avg_ms: round_to(avg, 2),
            sample_count: samples.len(),
        })
    }
}
