//! Radar (polar) chart geometry.
//!
//! Axes start straight up and run clockwise. Values are expected on a 0..100
//! scale already; see [`crate::stats::radar_input`].

use super::{Point, TextAlign, TextPlacement};
use crate::error::LayoutError;
use std::f64::consts::{FRAC_PI_2, TAU};

#[derive(Debug, Clone, PartialEq)]
pub struct RadarConfig {
    /// Side length of the square canvas.
    pub size: f64,
    /// Outer radius as a fraction of `size`.
    pub radius_fraction: f64,
    /// Gap between the outer ring and the axis labels.
    pub label_offset: f64,
    /// Reference rings, in percent of the outer radius.
    pub ring_levels: Vec<f64>,
}

impl Default for RadarConfig {
    fn default() -> Self {
        Self {
            size: 280.0,
            radius_fraction: 0.42,
            label_offset: 16.0,
            ring_levels: vec![20.0, 40.0, 60.0, 80.0, 100.0],
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RadarAxis {
    /// Radians; 0 points right, `-PI/2` points up.
    pub angle: f64,
    /// Outer end of the spoke.
    pub end: Point,
    pub label: TextPlacement,
}

/// A calibration polygon at a fixed percentage of the outer radius.
#[derive(Debug, Clone, PartialEq)]
pub struct Ring {
    pub level: f64,
    pub points: Vec<Point>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RadarLayout {
    pub size: f64,
    pub center: Point,
    pub max_radius: f64,
    pub axes: Vec<RadarAxis>,
    pub rings: Vec<Ring>,
    /// Data polygon, one vertex per axis.
    pub polygon: Vec<Point>,
}

/// Angle of axis `i` out of `n`.
pub fn axis_angle(i: usize, n: usize) -> f64 {
    -FRAC_PI_2 + i as f64 * TAU / n as f64
}

fn polar(center: Point, r: f64, angle: f64) -> Point {
    Point::new(center.x + r * angle.cos(), center.y + r * angle.sin())
}

/// Compute radar geometry for `values` (0..100) with one label per value.
pub fn layout_radar(
    values: &[f64],
    labels: &[&str],
    config: &RadarConfig,
) -> Result<RadarLayout, LayoutError> {
    if values.len() != labels.len() {
        return Err(LayoutError::LengthMismatch {
            values: values.len(),
            labels: labels.len(),
        });
    }
    if !(config.size.is_finite() && config.size > 0.0) {
        return Err(LayoutError::InvalidDimension {
            name: "size",
            value: config.size,
        });
    }

    let n = values.len();
    let center = Point::new(config.size / 2.0, config.size / 2.0);
    let max_radius = config.size * config.radius_fraction;
    let angles: Vec<f64> = (0..n).map(|i| axis_angle(i, n)).collect();

    let axes = angles
        .iter()
        .zip(labels)
        .map(|(&angle, label)| RadarAxis {
            angle,
            end: polar(center, max_radius, angle),
            label: TextPlacement {
                text: (*label).to_string(),
                at: polar(center, max_radius + config.label_offset, angle),
                align: TextAlign::Middle,
                rotation_deg: 0.0,
            },
        })
        .collect();

    let rings = config
        .ring_levels
        .iter()
        .map(|&level| Ring {
            level,
            points: angles
                .iter()
                .map(|&a| polar(center, level / 100.0 * max_radius, a))
                .collect(),
        })
        .collect();

    let polygon = values
        .iter()
        .zip(&angles)
        .map(|(&v, &a)| polar(center, v / 100.0 * max_radius, a))
        .collect();

    Ok(RadarLayout {
        size: config.size,
        center,
        max_radius,
        axes,
        rings,
        polygon,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_value_reaches_outer_ring() {
        let l = layout_radar(&[100.0], &["A"], &RadarConfig::default()).unwrap();
        let top = l.polygon[0];
        assert!((top.x - 140.0).abs() < 1e-9);
        assert!((top.y - (140.0 - 280.0 * 0.42)).abs() < 1e-9);
    }

    #[test]
    fn no_axes_is_an_empty_layout() {
        let l = layout_radar(&[], &[], &RadarConfig::default()).unwrap();
        assert!(l.axes.is_empty());
        assert!(l.polygon.is_empty());
        assert!(l.rings.iter().all(|r| r.points.is_empty()));
    }
}
