//! Bar chart geometry for a normalized series.
//!
//! The canvas grows with the number of buckets instead of squeezing them: a
//! 31-day month at 60 px per slot is 1860 px wide and is meant to be scrolled.

use super::{Point, TextAlign, TextPlacement};
use crate::models::Bucket;

/// Space reserved around the plotting area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Default for Margin {
    fn default() -> Self {
        // Wide left margin leaves room for grid values plus the rotated unit title.
        Self {
            top: 24.0,
            right: 12.0,
            bottom: 70.0,
            left: 84.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BarConfig {
    /// Total canvas height in pixels.
    pub height: f64,
    /// Canvas width never shrinks below this.
    pub min_width: f64,
    pub pixels_per_slot: f64,
    pub margin: Margin,
    /// Number of intervals between horizontal grid lines (lines = intervals + 1).
    pub grid_intervals: usize,
    /// Multiplier applied to the data maximum to get the top of the scale.
    pub headroom: f64,
    /// Lower bound for the data maximum so an all-zero series still has a scale.
    pub min_scale: f64,
    pub min_bar_width: f64,
    /// Fraction of a slot covered by its bar.
    pub bar_fill: f64,
    pub label_rotation_deg: f64,
    /// Vertical gap between a bar top and its value label.
    pub value_label_gap: f64,
    /// Distance below the plot where x labels are anchored.
    pub x_label_offset: f64,
    pub unit_label: String,
}

impl Default for BarConfig {
    fn default() -> Self {
        Self {
            height: 300.0,
            min_width: 800.0,
            pixels_per_slot: 60.0,
            margin: Margin::default(),
            grid_intervals: 4,
            headroom: 1.15,
            min_scale: 0.1,
            min_bar_width: 12.0,
            bar_fill: 0.7,
            label_rotation_deg: -45.0,
            value_label_gap: 6.0,
            x_label_offset: 24.0,
            unit_label: "L/100km".to_string(),
        }
    }
}

/// One bar, in plot-area coordinates (origin at the top-left of the inner area).
#[derive(Debug, Clone, PartialEq)]
pub struct BarRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub value: f64,
    /// Where the numeric value is printed, centered above the bar.
    pub value_anchor: Point,
    pub x_label: TextPlacement,
}

/// A horizontal reference line and the scale value it marks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridLine {
    pub y: f64,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BarGeometry {
    pub width: f64,
    pub height: f64,
    pub margin: Margin,
    pub inner_width: f64,
    pub inner_height: f64,
    /// Value at the top edge of the plot area (data max plus headroom).
    pub scale_max: f64,
    pub slot_width: f64,
    pub bar_width: f64,
    pub bars: Vec<BarRect>,
    pub grid: Vec<GridLine>,
    pub unit_label: TextPlacement,
}

impl BarGeometry {
    /// Canvas position of the plot-area origin.
    pub fn origin(&self) -> Point {
        Point::new(self.margin.left, self.margin.top)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum BarLayout {
    /// Nothing to draw; renderers show a "No data" placeholder of this size.
    Empty { width: f64, height: f64 },
    Chart(BarGeometry),
}

impl BarLayout {
    pub fn width(&self) -> f64 {
        match self {
            BarLayout::Empty { width, .. } => *width,
            BarLayout::Chart(g) => g.width,
        }
    }

    pub fn height(&self) -> f64 {
        match self {
            BarLayout::Empty { height, .. } => *height,
            BarLayout::Chart(g) => g.height,
        }
    }
}

/// Canvas width for `count` slots: `max(min_width, count * pixels_per_slot)`.
pub fn canvas_width(count: usize, config: &BarConfig) -> f64 {
    config.min_width.max(count as f64 * config.pixels_per_slot)
}

/// Compute bar chart geometry for `series`.
pub fn layout_bars(series: &[Bucket], config: &BarConfig) -> BarLayout {
    if series.is_empty() {
        return BarLayout::Empty {
            width: config.min_width,
            height: config.height,
        };
    }

    let count = series.len();
    let width = canvas_width(count, config);
    let m = config.margin;
    let inner_width = (width - m.left - m.right).max(0.0);
    let inner_height = (config.height - m.top - m.bottom).max(0.0);

    let data_max = series
        .iter()
        .map(|b| b.value)
        .filter(|v| v.is_finite())
        .fold(config.min_scale, f64::max);
    let scale_max = data_max * config.headroom;

    let slot_width = inner_width / count as f64;
    let bar_width = config.min_bar_width.max(slot_width * config.bar_fill);

    let bars = series
        .iter()
        .enumerate()
        .map(|(i, b)| {
            let x = i as f64 * slot_width + (slot_width - bar_width) / 2.0;
            let value = if b.value.is_finite() { b.value } else { 0.0 };
            let h = value / scale_max * inner_height;
            let y = inner_height - h;
            let center = x + bar_width / 2.0;
            BarRect {
                x,
                y,
                width: bar_width,
                height: h,
                value,
                value_anchor: Point::new(center, y - config.value_label_gap),
                x_label: TextPlacement {
                    text: b.label.clone(),
                    at: Point::new(center, inner_height + config.x_label_offset),
                    align: TextAlign::End,
                    rotation_deg: config.label_rotation_deg,
                },
            }
        })
        .collect();

    let intervals = config.grid_intervals.max(1);
    let grid = (0..=intervals)
        .map(|i| {
            let t = i as f64 / intervals as f64;
            GridLine {
                y: t * inner_height,
                value: (1.0 - t) * scale_max,
            }
        })
        .collect();

    let unit_label = TextPlacement {
        text: config.unit_label.clone(),
        at: Point::new(-m.left + 12.0, inner_height / 2.0),
        align: TextAlign::Middle,
        rotation_deg: -90.0,
    };

    BarLayout::Chart(BarGeometry {
        width,
        height: config.height,
        margin: m,
        inner_width,
        inner_height,
        scale_max,
        slot_width,
        bar_width,
        bars,
        grid,
        unit_label,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(vals: &[f64]) -> Vec<Bucket> {
        vals.iter()
            .enumerate()
            .map(|(i, v)| Bucket {
                label: i.to_string(),
                value: *v,
            })
            .collect()
    }

    #[test]
    fn all_zero_series_still_has_a_scale() {
        let BarLayout::Chart(g) = layout_bars(&series(&[0.0, 0.0]), &BarConfig::default()) else {
            panic!("expected chart");
        };
        assert!((g.scale_max - 0.115).abs() < 1e-12);
        assert!(g.bars.iter().all(|b| b.height == 0.0));
    }

    #[test]
    fn narrow_slots_keep_minimum_bar_width() {
        let cfg = BarConfig {
            min_width: 100.0,
            pixels_per_slot: 1.0,
            ..BarConfig::default()
        };
        let BarLayout::Chart(g) = layout_bars(&series(&[1.0; 50]), &cfg) else {
            panic!("expected chart");
        };
        assert_eq!(g.bar_width, 12.0);
    }
}
