//! Static legend panel: river-count color bar with sample circles, and tributary sample rings.
//!
//! Geometry is fixed relative to the panel anchor `(20, height - 300)`. The river-count section
//! uses a hardcoded 1..32 range; the tributary section reads the live record extremes.

use crate::foundation::core::{Point, Rect, Rgba8};
use crate::foundation::error::RivermapResult;
use crate::foundation::math::arrow_segments;
use crate::render::surface::{DrawSurface, HAlign, StrokeStyle, TextStyle, VAlign};
use crate::scene::config::{ColorTable, Labels};
use crate::scene::records::ContinentRecord;
use crate::viz::overlay::circle_base_diameter;

/// Lower bound printed on the river-count scale.
pub const LEGEND_MIN_RIVERS: u32 = 1;
/// Upper bound printed on the river-count scale.
pub const LEGEND_MAX_RIVERS: u32 = 32;
/// Sample circle size relative to the overlay's unscaled diameter.
pub const LEGEND_CIRCLE_SCALE: f64 = 0.08;
/// Sample ring stroke width per tributary.
pub const LEGEND_RING_WEIGHT_PER_TRIBUTARY: f64 = 0.0015;
/// Arrow head length.
pub const ARROW_HEAD_PX: f64 = 10.0;

const MARGIN: f64 = 20.0;
const PANEL_OFFSET_FROM_BOTTOM: f64 = 300.0;
const SECTION_GAP: f64 = 100.0;
const LABEL_SIZE_PX: f32 = 13.0;
const BAR_WIDTH: f64 = 250.0;
const BAR_HEIGHT: f64 = 20.0;
const ARROW_WIDTH: f64 = 2.0;
const MIN_RING_DIAMETER: f64 = 32.0;
const MAX_RING_DIAMETER: f64 = 30.0;

/// Sample ring stroke width: `max(1, value * 0.0015)`.
pub fn legend_ring_weight(tributary_sum: u32) -> f64 {
    (f64::from(tributary_sum) * LEGEND_RING_WEIGHT_PER_TRIBUTARY).max(1.0)
}

/// Smallest and largest tributary sum; `(0, 0)` without records.
pub fn tributary_range(records: &[ContinentRecord]) -> (u32, u32) {
    let min = records.iter().map(|r| r.tributary_sum).min().unwrap_or(0);
    let max = records.iter().map(|r| r.tributary_sum).max().unwrap_or(0);
    (min, max)
}

/// Stroke a straight arrow from `from` to `to` with a two-stroke head at `to`.
pub fn draw_arrow(surface: &mut dyn DrawSurface, from: Point, to: Point) -> RivermapResult<()> {
    let stroke = StrokeStyle {
        color: Rgba8::WHITE,
        width: ARROW_WIDTH,
    };
    for seg in arrow_segments(from, to, ARROW_HEAD_PX) {
        surface.line(seg.p0, seg.p1, stroke)?;
    }
    Ok(())
}

/// Draw the legend for a canvas `canvas_height` tall.
pub fn draw_legend(
    surface: &mut dyn DrawSurface,
    canvas_height: f64,
    colors: &ColorTable,
    records: &[ContinentRecord],
    labels: &Labels,
) -> RivermapResult<()> {
    let x = MARGIN;
    let y = canvas_height - PANEL_OFFSET_FROM_BOTTOM;
    draw_river_section(surface, x, y, colors, &labels.legend_rivers)?;
    draw_tributary_section(
        surface,
        x,
        y + SECTION_GAP,
        records,
        &labels.legend_tributaries,
    )
}

fn draw_river_section(
    surface: &mut dyn DrawSurface,
    x: f64,
    y: f64,
    colors: &ColorTable,
    title: &str,
) -> RivermapResult<()> {
    let label = TextStyle::new(LABEL_SIZE_PX, Rgba8::WHITE);
    surface.text(
        title,
        Point::new(x + 130.0, y - 35.0),
        label.aligned(HAlign::Center, VAlign::Center),
    )?;

    let bar_x = x + 50.0;
    let bar_y = y - 20.0;
    if !colors.is_empty() {
        let step = BAR_WIDTH / colors.len() as f64;
        for (i, e) in colors.iter().rev().enumerate() {
            let x0 = bar_x + i as f64 * step;
            surface.fill_rect(
                Rect::new(x0, bar_y, x0 + step, bar_y + BAR_HEIGHT),
                Rgba8::from_rgb(e.rgb),
            )?;
        }
    }

    surface.text(
        &LEGEND_MIN_RIVERS.to_string(),
        Point::new(bar_x - 10.0, bar_y + 10.0),
        label.aligned(HAlign::Left, VAlign::Center),
    )?;
    surface.text(
        &LEGEND_MAX_RIVERS.to_string(),
        Point::new(bar_x + BAR_WIDTH + 18.0, bar_y + 10.0),
        label.aligned(HAlign::Right, VAlign::Center),
    )?;

    let min_size = sample_circle_diameter(LEGEND_MIN_RIVERS);
    let max_size = sample_circle_diameter(LEGEND_MAX_RIVERS);
    let cx = x + 55.0;
    let cy = y + 42.0;
    let below = label.aligned(HAlign::Center, VAlign::Top);

    surface.fill_circle(Point::new(cx, cy), min_size, Rgba8::WHITE)?;
    surface.text(
        &LEGEND_MIN_RIVERS.to_string(),
        Point::new(cx - 11.5, cy - 14.0 + min_size / 2.0 + 5.0),
        below,
    )?;

    surface.fill_circle(Point::new(cx + 225.0, cy - 11.5), max_size, Rgba8::WHITE)?;
    surface.text(
        &LEGEND_MAX_RIVERS.to_string(),
        Point::new(cx + 255.5, cy - 27.0 + max_size / 2.0 + 5.0),
        below,
    )?;

    draw_arrow(
        surface,
        Point::new(cx, cy + 20.0),
        Point::new(cx + 240.0, cy + 20.0),
    )
}

fn draw_tributary_section(
    surface: &mut dyn DrawSurface,
    x: f64,
    y: f64,
    records: &[ContinentRecord],
    title: &str,
) -> RivermapResult<()> {
    let label = TextStyle::new(LABEL_SIZE_PX, Rgba8::WHITE);
    surface.text(
        title,
        Point::new(x + 155.0, y - 15.0),
        label.aligned(HAlign::Center, VAlign::Center),
    )?;

    let (min_t, max_t) = tributary_range(records);
    let tx = x + 75.0;
    let ty = y + 19.0;
    let below = label.aligned(HAlign::Center, VAlign::Top);

    surface.stroke_circle(
        Point::new(tx, ty),
        MIN_RING_DIAMETER,
        StrokeStyle {
            color: Rgba8::WHITE,
            width: legend_ring_weight(min_t),
        },
    )?;
    surface.text(&min_t.to_string(), Point::new(tx - 28.0, ty + 5.0), below)?;

    surface.stroke_circle(
        Point::new(tx + 205.0, ty),
        MAX_RING_DIAMETER,
        StrokeStyle {
            color: Rgba8::WHITE,
            width: legend_ring_weight(max_t),
        },
    )?;
    surface.text(&max_t.to_string(), Point::new(tx + 240.0, ty + 5.0), below)?;

    draw_arrow(
        surface,
        Point::new(tx - 20.0, ty + 30.0),
        Point::new(tx + 220.0, ty + 30.0),
    )
}

fn sample_circle_diameter(river_count: u32) -> f64 {
    circle_base_diameter(river_count, LEGEND_MIN_RIVERS, LEGEND_MAX_RIVERS) * LEGEND_CIRCLE_SCALE
}

#[cfg(test)]
#[path = "../../tests/unit/viz/legend.rs"]
mod tests;
