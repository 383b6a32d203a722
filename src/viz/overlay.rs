//! Per-continent circles, tributary rings and the hover tooltip.

use crate::foundation::core::{Point, Rgba8, Size, Vec2};
use crate::foundation::diagnostics::Diagnostic;
use crate::foundation::error::RivermapResult;
use crate::foundation::math::map_range;
use crate::render::surface::{DrawSurface, StrokeStyle, TextStyle};
use crate::scene::config::{Labels, PositionTable};
use crate::scene::records::{ContinentRecord, ResolvedColors};

/// Circle diameter for the smallest river count, before scaling.
pub const CIRCLE_MIN_PX: f64 = 90.0;
/// Circle diameter for the largest river count, before scaling.
pub const CIRCLE_MAX_PX: f64 = 500.0;
/// Extra factor applied on top of the display/native image ratio.
pub const OVERLAY_SCALE: f64 = 1.5;
/// Ring diameter minus circle diameter.
pub const RING_PADDING_PX: f64 = 23.0;
/// Ring stroke width per tributary.
pub const RING_WEIGHT_PER_TRIBUTARY: f64 = 0.005;

const TOOLTIP_SIZE_PX: f32 = 15.0;
const TOOLTIP_SHADOW: Rgba8 = Rgba8::with_alpha(0, 0, 0, 150);
const TOOLTIP_LINE_STEP: f64 = 15.0;
const TOOLTIP_SHADOW_OFFSET: Vec2 = Vec2::new(11.0, 9.0);
const TOOLTIP_OFFSET: Vec2 = Vec2::new(10.0, 10.0);

/// Smallest and largest river count, or `None` for no records.
pub fn river_count_range(records: &[ContinentRecord]) -> Option<(u32, u32)> {
    let min = records.iter().map(|r| r.river_count).min()?;
    let max = records.iter().map(|r| r.river_count).max()?;
    Some((min, max))
}

/// Unscaled circle diameter: `river_count` mapped from `[min, max]` onto `[90, 500]`.
///
/// When `min == max` every count maps to the midpoint, 295.
pub fn circle_base_diameter(river_count: u32, min: u32, max: u32) -> f64 {
    map_range(
        f64::from(river_count),
        f64::from(min),
        f64::from(max),
        CIRCLE_MIN_PX,
        CIRCLE_MAX_PX,
    )
}

/// On-screen circle diameter for a map displayed `display_width` wide whose native width is
/// `native_width`.
pub fn circle_diameter(
    river_count: u32,
    min: u32,
    max: u32,
    display_width: f64,
    native_width: f64,
) -> f64 {
    circle_base_diameter(river_count, min, max) * (display_width / native_width) * OVERLAY_SCALE
}

/// Ring stroke width: `max(1, tributary_sum * 0.005)`.
pub fn ring_weight(tributary_sum: u32) -> f64 {
    (f64::from(tributary_sum) * RING_WEIGHT_PER_TRIBUTARY).max(1.0)
}

/// `true` when `pointer` lies strictly inside the circle.
pub fn hit_test(pointer: Point, center: Point, diameter: f64) -> bool {
    pointer.distance(center) < diameter / 2.0
}

/// Resolved geometry for one continent record.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Marker {
    /// Continent name.
    pub name: String,
    /// Circle center in canvas coordinates.
    pub center: Point,
    /// Filled circle diameter.
    pub diameter: f64,
    /// Ring diameter.
    pub ring_diameter: f64,
    /// Ring stroke width.
    pub ring_weight: f64,
    /// Fill and ring color.
    pub color: Rgba8,
    /// Main river count, shown in the tooltip.
    pub river_count: u32,
    /// Tributary count, shown in the tooltip.
    pub tributary_sum: u32,
}

/// Everything the overlay reads for one frame.
#[derive(Clone, Copy, Debug)]
pub struct OverlayInput<'a> {
    /// Displayed map size.
    pub display: Size,
    /// Native map image size.
    pub native: Size,
    /// Continent records.
    pub records: &'a [ContinentRecord],
    /// Resolved continent colors.
    pub colors: &'a ResolvedColors,
    /// Relative continent positions.
    pub positions: &'a PositionTable,
    /// Tooltip text.
    pub labels: &'a Labels,
    /// Current pointer, if sampled.
    pub pointer: Option<Point>,
}

/// What the overlay did in one frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct OverlayReport {
    /// Names of continents whose tooltip was drawn, in draw order.
    pub hovered: Vec<String>,
    /// Records left out for lack of a position.
    pub diagnostics: Vec<Diagnostic>,
}

/// Compute marker geometry for every record that has a position.
///
/// The river-count range is rescanned on every call. Records without a position produce a
/// [`Diagnostic::MissingPosition`] and no marker. Duplicate names yield overlapping markers.
pub fn layout_markers(input: &OverlayInput<'_>) -> (Vec<Marker>, Vec<Diagnostic>) {
    let mut markers = Vec::with_capacity(input.records.len());
    let mut diags = Vec::new();
    let Some((min, max)) = river_count_range(input.records) else {
        return (markers, diags);
    };

    for r in input.records {
        let Some((fx, fy)) = input.positions.get(&r.name) else {
            diags.push(Diagnostic::MissingPosition {
                continent: r.name.clone(),
            });
            continue;
        };
        let diameter = circle_diameter(
            r.river_count,
            min,
            max,
            input.display.width,
            input.native.width,
        );
        markers.push(Marker {
            name: r.name.clone(),
            center: Point::new(fx * input.display.width, fy * input.display.height),
            diameter,
            ring_diameter: diameter + RING_PADDING_PX,
            ring_weight: ring_weight(r.tributary_sum),
            color: input
                .colors
                .get(&r.name)
                .copied()
                .unwrap_or(Rgba8::FALLBACK_RED),
            river_count: r.river_count,
            tributary_sum: r.tributary_sum,
        });
    }
    (markers, diags)
}

/// Draw circles, rings and any tooltips whose hit-test passes.
pub fn draw_overlay(
    surface: &mut dyn DrawSurface,
    input: &OverlayInput<'_>,
) -> RivermapResult<OverlayReport> {
    let (markers, diagnostics) = layout_markers(input);
    for d in &diagnostics {
        d.emit();
    }

    let mut hovered = Vec::new();
    for m in &markers {
        surface.fill_circle(m.center, m.diameter, m.color)?;
        surface.stroke_circle(
            m.center,
            m.ring_diameter,
            StrokeStyle {
                color: m.color,
                width: m.ring_weight,
            },
        )?;

        if let Some(pointer) = input.pointer
            && hit_test(pointer, m.center, m.diameter)
        {
            draw_tooltip(surface, pointer, m, input.labels)?;
            hovered.push(m.name.clone());
        }
    }

    Ok(OverlayReport {
        hovered,
        diagnostics,
    })
}

fn draw_tooltip(
    surface: &mut dyn DrawSurface,
    pointer: Point,
    m: &Marker,
    labels: &Labels,
) -> RivermapResult<()> {
    let lines = [
        format!("{}{}", labels.tooltip_continent, m.name),
        format!("{}{}", labels.tooltip_rivers, m.river_count),
        format!("{}{}", labels.tooltip_tributaries, m.tributary_sum),
    ];
    for (offset, color) in [
        (TOOLTIP_SHADOW_OFFSET, TOOLTIP_SHADOW),
        (TOOLTIP_OFFSET, Rgba8::WHITE),
    ] {
        let style = TextStyle::new(TOOLTIP_SIZE_PX, color);
        for (i, line) in lines.iter().enumerate() {
            let at = pointer + offset + Vec2::new(0.0, TOOLTIP_LINE_STEP * i as f64);
            surface.text(line, at, style)?;
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/viz/overlay.rs"]
mod tests;
