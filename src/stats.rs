use crate::models::{Bucket, EngineMetrics};
use serde::{Deserialize, Serialize};

/// Axis labels of the driving-behavior radar, in axis order.
pub const RADAR_LABELS: [&str; 5] = ["RPM", "Speed", "TPS/APP", "Brake", "Steering"];

/// Value domains used to map raw averages onto the radar's 0..100 scale.
pub const RPM_DOMAIN: (f64, f64) = (1000.0, 4000.0);
pub const SPEED_DOMAIN: (f64, f64) = (0.0, 140.0);
pub const THROTTLE_DOMAIN: (f64, f64) = (0.0, 100.0);
pub const BRAKE_DOMAIN: (f64, f64) = (0.0, 100.0);
pub const STEERING_DOMAIN: (f64, f64) = (0.0, 180.0);

pub fn clamp(x: f64, lo: f64, hi: f64) -> f64 {
    lo.max(hi.min(x))
}

/// Linearly map `v` from `[lo, hi]` onto `[0, 100]`, clamping out-of-domain input first.
///
/// A degenerate domain (`hi <= lo`) maps everything to 0.
pub fn scale(v: f64, lo: f64, hi: f64) -> f64 {
    if hi <= lo {
        return 0.0;
    }
    (clamp(v, lo, hi) - lo) / (hi - lo) * 100.0
}

/// Arithmetic mean; 0 for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

/// Pre-scaled radar input: five values in `0..=100` plus their axis labels.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RadarInput {
    pub vals: [f64; 5],
    pub labels: [&'static str; 5],
}

impl Default for RadarInput {
    fn default() -> Self {
        Self {
            vals: [0.0; 5],
            labels: RADAR_LABELS,
        }
    }
}

/// Average raw telemetry and scale each metric into its radar domain.
///
/// Missing readings count as 0; steering is averaged by magnitude.
pub fn radar_input(metrics: &[EngineMetrics]) -> RadarInput {
    if metrics.is_empty() {
        return RadarInput::default();
    }
    let avg_of = |f: fn(&EngineMetrics) -> f64| {
        let vals: Vec<f64> = metrics.iter().map(f).collect();
        mean(&vals)
    };
    let rpm = avg_of(|m| m.rpm.unwrap_or(0.0));
    let speed = avg_of(|m| m.speed.unwrap_or(0.0));
    let tps = avg_of(|m| m.tps_app.unwrap_or(0.0));
    let brake = avg_of(|m| m.brake.unwrap_or(0.0));
    let steer = avg_of(|m| m.steering.unwrap_or(0.0).abs());

    RadarInput {
        vals: [
            scale(rpm, RPM_DOMAIN.0, RPM_DOMAIN.1),
            scale(speed, SPEED_DOMAIN.0, SPEED_DOMAIN.1),
            scale(tps, THROTTLE_DOMAIN.0, THROTTLE_DOMAIN.1),
            scale(brake, BRAKE_DOMAIN.0, BRAKE_DOMAIN.1),
            scale(steer, STEERING_DOMAIN.0, STEERING_DOMAIN.1),
        ],
        labels: RADAR_LABELS,
    }
}

/// Summary statistics for a normalized series.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Summary {
    /// Number of buckets.
    pub count: usize,
    /// Buckets holding a non-zero value (zero means "no data" after normalization).
    pub filled: usize,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub mean: Option<f64>,
    pub median: Option<f64>,
    /// Label of the bucket with the highest value.
    pub peak_label: Option<String>,
}

/// Compute statistics over the filled (non-zero) buckets of a series.
pub fn series_summary(series: &[Bucket]) -> Summary {
    let mut vals: Vec<f64> = series
        .iter()
        .map(|b| b.value)
        .filter(|v| *v != 0.0 && v.is_finite())
        .collect();
    vals.sort_by(|a, b| a.total_cmp(b));

    let filled = vals.len();
    let min = vals.first().cloned();
    let max = vals.last().cloned();
    let mean = (filled > 0).then(|| vals.iter().sum::<f64>() / filled as f64);
    let median = if filled == 0 {
        None
    } else if filled % 2 == 1 {
        Some(vals[filled / 2])
    } else {
        Some((vals[filled / 2 - 1] + vals[filled / 2]) / 2.0)
    };
    let peak_label = max.and_then(|m| {
        series
            .iter()
            .find(|b| b.value == m)
            .map(|b| b.label.clone())
    });

    Summary {
        count: series.len(),
        filled,
        min,
        max,
        mean,
        median,
        peak_label,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scale_hits_both_ends_and_clamps() {
        assert_eq!(scale(1000.0, 1000.0, 4000.0), 0.0);
        assert_eq!(scale(4000.0, 1000.0, 4000.0), 100.0);
        assert_eq!(scale(2500.0, 1000.0, 4000.0), 50.0);
        assert_eq!(scale(-50.0, 0.0, 140.0), 0.0);
        assert_eq!(scale(500.0, 0.0, 140.0), 100.0);
    }

    #[test]
    fn degenerate_domain_is_zero() {
        assert_eq!(scale(5.0, 3.0, 3.0), 0.0);
    }

    #[test]
    fn mean_of_nothing_is_zero() {
        assert_eq!(mean(&[]), 0.0);
        assert_eq!(mean(&[1.0, 2.0, 3.0]), 2.0);
    }
}
