//! Utility functions for rendering: colors, locale mapping, number formatting.

use crate::layout::Point;
use num_format::{Locale, ToFormattedString};
use plotters::prelude::*;
use plotters::style::FontTransform;

pub const BAR_FILL: RGBColor = RGBColor(37, 99, 235); // #2563EB
pub const VALUE_TEXT: RGBColor = RGBColor(30, 64, 175); // #1E40AF
pub const GRID_LINE: RGBColor = RGBColor(238, 242, 255); // #EEF2FF
pub const GRID_TEXT: RGBColor = RGBColor(107, 114, 128); // #6B7280
pub const LABEL_TEXT: RGBColor = RGBColor(55, 65, 81); // #374151
pub const RADAR_STROKE: RGBColor = RGBColor(59, 130, 246); // #3B82F6
pub const RADAR_RING: RGBColor = RGBColor(209, 213, 219); // #D1D5DB
pub const MUTED_TEXT: RGBColor = RGBColor(156, 163, 175); // #9CA3AF

/// Map a user-provided locale tag to a `num_format::Locale`.
///
/// Supported tags (case-insensitive): `en`, `us`, `en_US`, `de`, `de_DE`, `german`,
/// `fr`, `es`, `it`, `pt`, `nl`, `th`. Defaults to English.
pub fn map_locale(tag: &str) -> &'static Locale {
    match tag.to_lowercase().as_str() {
        "de" | "de_de" | "german" => &Locale::de,
        "fr" | "fr_fr" => &Locale::fr,
        "es" | "es_es" => &Locale::es,
        "it" | "it_it" => &Locale::it,
        "pt" | "pt_pt" | "pt_br" => &Locale::pt,
        "nl" | "nl_nl" => &Locale::nl,
        "th" | "th_th" => &Locale::th,
        _ => &Locale::en,
    }
}

/// Fixed-precision number with the locale's grouping and decimal separator
/// (`1234.56` -> `"1,234.6"` in `en`, `"1.234,6"` in `de`).
pub fn format_decimal(v: f64, decimals: usize, locale: &Locale) -> String {
    if !v.is_finite() {
        return "NA".to_string();
    }
    let fixed = format!("{:.*}", decimals, v.abs());
    let (int_part, frac) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let is_zero = fixed.chars().all(|c| c == '0' || c == '.');

    let mut out = String::new();
    if v < 0.0 && !is_zero {
        out.push('-');
    }
    match int_part.parse::<u64>() {
        Ok(n) => out.push_str(&n.to_formatted_string(locale)),
        Err(_) => out.push_str(&group_digits(int_part, locale.separator())),
    }
    if !frac.is_empty() {
        out.push_str(locale.decimal());
        out.push_str(frac);
    }
    out
}

/// Plotters divides font sizes by this factor before writing them out.
const PLOTTERS_EM_RATIO: f64 = 1.24;

/// Font size to request from plotters so the output text is `css_px` pixels.
#[inline]
pub fn plotters_font_size(css_px: f64) -> f64 {
    css_px * PLOTTERS_EM_RATIO
}

/// Thousands grouping for digit strings wider than `u64`.
fn group_digits(digits: &str, sep: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 * sep.len());
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push_str(sep);
        }
        out.push(c);
    }
    out
}

/// Plotters only rotates text by quarter turns; snap `deg` to the nearest one,
/// rounding away from horizontal so tilted labels stay tilted.
pub fn snap_rotation(deg: f64) -> FontTransform {
    if deg == 0.0 || !deg.is_finite() {
        return FontTransform::None;
    }
    let mut quarters = (deg / 90.0).round() as i64;
    if quarters == 0 {
        quarters = deg.signum() as i64;
    }
    match quarters.rem_euclid(4) {
        1 => FontTransform::Rotate90,
        2 => FontTransform::Rotate180,
        3 => FontTransform::Rotate270,
        _ => FontTransform::None,
    }
}

/// Translate a layout point by `origin` and round to backend pixels.
#[inline]
pub fn to_px(p: Point, origin: Point) -> (i32, i32) {
    (
        (p.x + origin.x).round() as i32,
        (p.y + origin.y).round() as i32,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decimals_follow_locale() {
        assert_eq!(format_decimal(12.345, 1, map_locale("en")), "12.3");
        assert_eq!(format_decimal(12.345, 1, map_locale("de")), "12,3");
        assert_eq!(format_decimal(1234.5, 1, map_locale("en")), "1,234.5");
        assert_eq!(format_decimal(-0.01, 1, map_locale("en")), "0.0");
        assert_eq!(format_decimal(-2.0, 0, map_locale("en")), "-2");
    }

    #[test]
    fn huge_values_keep_their_digits() {
        assert_eq!(
            format_decimal(1e20, 1, map_locale("en")),
            "100,000,000,000,000,000,000.0"
        );
        assert_eq!(
            format_decimal(-1e20, 0, map_locale("de")),
            "-100.000.000.000.000.000.000"
        );
        assert_eq!(group_digits("1234567", ","), "1,234,567");
        assert_eq!(group_digits("123", ","), "123");
    }

    #[test]
    fn tilted_labels_snap_to_vertical() {
        assert!(matches!(snap_rotation(-45.0), FontTransform::Rotate270));
        assert!(matches!(snap_rotation(-90.0), FontTransform::Rotate270));
        assert!(matches!(snap_rotation(30.0), FontTransform::Rotate90));
        assert!(matches!(snap_rotation(0.0), FontTransform::None));
    }
}
