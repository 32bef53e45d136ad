//! Rendering: draw computed chart geometry to **SVG** through plotters.
//!
//! - Bar chart of a normalized fuel series, with grid, value labels and a unit title
//! - Radar chart of the five scaled driving-behavior metrics
//! - Locale-aware value labels (`12.5` vs `12,5`)
//!
//! Geometry comes from [`crate::layout`]; this module only turns it into pixels.

pub mod types;
pub mod util;

pub use types::{NO_DATA_TEXT, RenderOptions};

use crate::layout::{
    BarConfig, BarGeometry, BarLayout, Point, RadarConfig, RadarLayout, TextAlign,
    TextPlacement, layout_bars, layout_radar,
};
use crate::models::Bucket;
use crate::stats::RadarInput;
use anyhow::{Context, Result, bail};
use num_format::Locale;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters_svg::SVGBackend;
use std::path::Path;

use util::{
    BAR_FILL, GRID_LINE, GRID_TEXT, LABEL_TEXT, MUTED_TEXT, RADAR_RING, RADAR_STROKE,
    VALUE_TEXT, format_decimal, map_locale, plotters_font_size, snap_rotation, to_px,
};

type Area<'a> = DrawingArea<SVGBackend<'a>, Shift>;

const FONT: &str = "sans-serif";

/// Lay out `series` as a bar chart and write it to `out_path` (`.svg`).
pub fn plot_bar_chart<P: AsRef<Path>>(
    series: &[Bucket],
    out_path: P,
    config: &BarConfig,
    opts: &RenderOptions,
) -> Result<()> {
    let out_path = out_path.as_ref();
    ensure_svg_path(out_path)?;
    let layout = layout_bars(series, config);
    let svg = render_bar_svg(&layout, opts)?;
    std::fs::write(out_path, svg).with_context(|| format!("write {}", out_path.display()))?;
    log::info!(
        "bar chart with {} buckets written to {}",
        series.len(),
        out_path.display()
    );
    Ok(())
}

/// Lay out the radar input and write it to `out_path` (`.svg`).
pub fn plot_radar_chart<P: AsRef<Path>>(
    input: &RadarInput,
    out_path: P,
    config: &RadarConfig,
    opts: &RenderOptions,
) -> Result<()> {
    let out_path = out_path.as_ref();
    ensure_svg_path(out_path)?;
    let layout = layout_radar(&input.vals, &input.labels, config)?;
    let svg = render_radar_svg(&layout, opts)?;
    std::fs::write(out_path, svg).with_context(|| format!("write {}", out_path.display()))?;
    log::info!("radar chart written to {}", out_path.display());
    Ok(())
}

fn ensure_svg_path(path: &Path) -> Result<()> {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("svg") => Ok(()),
        _ => bail!("unsupported chart format for {}, expected .svg", path.display()),
    }
}

/// Render a bar layout to an SVG document.
///
/// Plotters can only rotate text by quarter turns, so tilted x labels
/// (−45° in the default [`BarConfig`]) are drawn vertically (`rotate(270)`),
/// still anchored at their end point below the axis.
pub fn render_bar_svg(layout: &BarLayout, opts: &RenderOptions) -> Result<String> {
    let size = (
        layout.width().round().max(1.0) as u32,
        layout.height().round().max(1.0) as u32,
    );
    let mut buf = String::new();
    {
        let root = SVGBackend::with_string(&mut buf, size).into_drawing_area();
        root.fill(&WHITE)?;
        match layout {
            BarLayout::Empty { width, height } => {
                draw_centered_note(&root, NO_DATA_TEXT, *width, *height)?;
            }
            BarLayout::Chart(geometry) => {
                draw_bars(&root, geometry, map_locale(&opts.locale), opts.decimals)?;
                if let Some(note) = &opts.overlay {
                    draw_centered_note(&root, note, geometry.width, geometry.height)?;
                }
            }
        }
        root.present()?;
    }
    Ok(buf)
}

fn draw_bars(root: &Area, g: &BarGeometry, locale: &Locale, decimals: usize) -> Result<()> {
    let origin = g.origin();

    for line in &g.grid {
        let left = to_px(Point::new(0.0, line.y), origin);
        let right = to_px(Point::new(g.inner_width, line.y), origin);
        root.draw(&PathElement::new(vec![left, right], GRID_LINE.stroke_width(1)))?;
        let label = TextPlacement {
            text: format_decimal(line.value, decimals, locale),
            at: Point::new(-18.0, line.y),
            align: TextAlign::End,
            rotation_deg: 0.0,
        };
        draw_text(root, &label, origin, 12.0, &GRID_TEXT)?;
    }

    draw_text(root, &g.unit_label, origin, 12.0, &LABEL_TEXT)?;

    for bar in &g.bars {
        let top_left = to_px(Point::new(bar.x, bar.y), origin);
        let bottom_right = to_px(Point::new(bar.x + bar.width, bar.y + bar.height), origin);
        if bar.height > 0.0 {
            root.draw(&Rectangle::new([top_left, bottom_right], BAR_FILL.filled()))?;
        }
        let value = TextPlacement {
            text: format_decimal(bar.value, decimals, locale),
            at: bar.value_anchor,
            align: TextAlign::Middle,
            rotation_deg: 0.0,
        };
        draw_text(root, &value, origin, 12.0, &VALUE_TEXT)?;
        draw_text(root, &bar.x_label, origin, 11.0, &LABEL_TEXT)?;
    }
    Ok(())
}

/// Render a radar layout to an SVG document.
pub fn render_radar_svg(layout: &RadarLayout, opts: &RenderOptions) -> Result<String> {
    let side = layout.size.round().max(1.0) as u32;
    let mut buf = String::new();
    {
        let root = SVGBackend::with_string(&mut buf, (side, side)).into_drawing_area();
        root.fill(&WHITE)?;
        draw_radar(&root, layout)?;
        if let Some(note) = &opts.overlay {
            draw_centered_note(&root, note, layout.size, layout.size)?;
        }
        root.present()?;
    }
    Ok(buf)
}

fn draw_radar(root: &Area, layout: &RadarLayout) -> Result<()> {
    let origin = Point::new(0.0, 0.0);
    let center = to_px(layout.center, origin);

    for ring in &layout.rings {
        if ring.points.len() < 2 {
            continue;
        }
        root.draw(&PathElement::new(
            closed_path(&ring.points, origin),
            RADAR_RING.stroke_width(1),
        ))?;
    }
    for axis in &layout.axes {
        root.draw(&PathElement::new(
            vec![center, to_px(axis.end, origin)],
            RADAR_RING.stroke_width(1),
        ))?;
        draw_text(root, &axis.label, origin, 12.0, &LABEL_TEXT)?;
    }

    if layout.polygon.len() >= 3 {
        let vertices: Vec<(i32, i32)> = layout.polygon.iter().map(|p| to_px(*p, origin)).collect();
        root.draw(&Polygon::new(vertices, RADAR_STROKE.mix(0.25).filled()))?;
    }
    if layout.polygon.len() >= 2 {
        root.draw(&PathElement::new(
            closed_path(&layout.polygon, origin),
            RADAR_STROKE.stroke_width(2),
        ))?;
    }
    Ok(())
}

fn closed_path(points: &[Point], origin: Point) -> Vec<(i32, i32)> {
    let mut path: Vec<(i32, i32)> = points.iter().map(|p| to_px(*p, origin)).collect();
    if let Some(first) = path.first().copied() {
        path.push(first);
    }
    path
}

fn draw_text(
    root: &Area,
    label: &TextPlacement,
    origin: Point,
    font_px: f64,
    color: &RGBColor,
) -> Result<()> {
    let h_pos = match label.align {
        TextAlign::Start => HPos::Left,
        TextAlign::Middle => HPos::Center,
        TextAlign::End => HPos::Right,
    };
    let style = (FONT, plotters_font_size(font_px))
        .into_font()
        .color(color)
        .pos(Pos::new(h_pos, VPos::Center))
        .transform(snap_rotation(label.rotation_deg));
    root.draw(&Text::new(label.text.clone(), to_px(label.at, origin), style))?;
    Ok(())
}

fn draw_centered_note(root: &Area, note: &str, width: f64, height: f64) -> Result<()> {
    let label = TextPlacement {
        text: note.to_string(),
        at: Point::new(width / 2.0, height / 2.0),
        align: TextAlign::Middle,
        rotation_deg: 0.0,
    };
    draw_text(root, &label, Point::new(0.0, 0.0), 14.0, &MUTED_TEXT)
}
