//! Chart geometry: pure functions from a series to drawable primitives.
//!
//! Nothing in here touches a drawing backend. Coordinates are `f64` pixels;
//! the renderer in [`crate::viz`] rounds them when it draws.

pub mod bar;
pub mod radar;

pub use bar::{BarConfig, BarGeometry, BarLayout, BarRect, GridLine, Margin, layout_bars};
pub use radar::{RadarAxis, RadarConfig, RadarLayout, Ring, axis_angle, layout_radar};

/// A pixel position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Horizontal anchor of a text label relative to its position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Start,
    Middle,
    End,
}

/// A positioned label. `rotation_deg` is clockwise in screen space, so
/// negative angles tilt text upward to the right.
#[derive(Debug, Clone, PartialEq)]
pub struct TextPlacement {
    pub text: String,
    pub at: Point,
    pub align: TextAlign,
    pub rotation_deg: f64,
}
