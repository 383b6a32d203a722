use std::f64::consts::FRAC_PI_6;

use kurbo::{Line, Point, Size};

/// Linearly re-map `value` from `[start1, stop1]` onto `[start2, stop2]` without clamping.
///
/// A degenerate source range (`start1 == stop1`) maps every value to the midpoint of the
/// target range.
pub fn map_range(value: f64, start1: f64, stop1: f64, start2: f64, stop2: f64) -> f64 {
    let span = stop1 - start1;
    if span == 0.0 {
        return start2 + (stop2 - start2) * 0.5;
    }
    start2 + (value - start1) / span * (stop2 - start2)
}

/// Scale `content` to fit inside `bounds`, preserving aspect ratio.
///
/// Width is fitted first; when the derived height overflows, height is fitted instead.
pub fn contain_fit(content: Size, bounds: Size) -> Size {
    if content.width <= 0.0 || content.height <= 0.0 {
        return Size::ZERO;
    }
    let aspect = content.width / content.height;
    let mut w = bounds.width;
    let mut h = bounds.width / aspect;
    if h > bounds.height {
        h = bounds.height;
        w = bounds.height * aspect;
    }
    Size::new(w, h)
}

/// Segments of an arrow from `from` to `to`: the shaft followed by the two head strokes,
/// each `head_len` long and angled ±30° off the shaft.
pub fn arrow_segments(from: Point, to: Point, head_len: f64) -> [Line; 3] {
    let angle = (to.y - from.y).atan2(to.x - from.x);
    let wing = |a: f64| Point::new(to.x - head_len * a.cos(), to.y - head_len * a.sin());
    [
        Line::new(from, to),
        Line::new(to, wing(angle - FRAC_PI_6)),
        Line::new(to, wing(angle + FRAC_PI_6)),
    ]
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
