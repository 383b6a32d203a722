use super::*;

fn surface(w: u32, h: u32) -> CpuSurface {
    CpuSurface::new(Canvas::new(w, h).unwrap(), None).unwrap()
}

#[test]
fn clear_fills_every_pixel() {
    let mut s = surface(8, 4);
    s.clear(Rgba8::opaque(10, 20, 30)).unwrap();
    let frame = s.finish();
    assert_eq!(frame.data.len(), 8 * 4 * 4);
    assert!(frame.premultiplied);
    for px in frame.data.chunks_exact(4) {
        assert_eq!(px, [10, 20, 30, 255]);
    }
}

#[test]
fn fill_circle_covers_center_not_corner() {
    let mut s = surface(32, 32);
    s.clear(Rgba8::BLACK).unwrap();
    s.fill_circle(Point::new(16.0, 16.0), 20.0, Rgba8::WHITE)
        .unwrap();
    let frame = s.finish();
    assert_eq!(frame.pixel(16, 16), Some([255, 255, 255, 255]));
    assert_eq!(frame.pixel(0, 0), Some([0, 0, 0, 255]));
}

#[test]
fn stroke_circle_leaves_center_empty() {
    let mut s = surface(64, 64);
    s.clear(Rgba8::BLACK).unwrap();
    s.stroke_circle(
        Point::new(32.0, 32.0),
        40.0,
        StrokeStyle {
            color: Rgba8::WHITE,
            width: 4.0,
        },
    )
    .unwrap();
    let frame = s.finish();
    assert_eq!(frame.pixel(32, 32), Some([0, 0, 0, 255]));
    // Point on the ring at (32 + 20, 32).
    assert_eq!(frame.pixel(52, 32), Some([255, 255, 255, 255]));
}

#[test]
fn image_is_scaled_into_destination() {
    let img = MapImage {
        width: 2,
        height: 1,
        rgba8_premul: Arc::new(vec![255, 0, 0, 255, 0, 0, 255, 255]),
    };
    let mut s = surface(40, 20);
    s.clear(Rgba8::BLACK).unwrap();
    s.image(&img, Rect::new(0.0, 0.0, 40.0, 20.0)).unwrap();
    let frame = s.finish();
    assert_eq!(frame.pixel(5, 10), Some([255, 0, 0, 255]));
    assert_eq!(frame.pixel(35, 10), Some([0, 0, 255, 255]));
}

#[test]
fn text_without_font_is_a_noop() {
    let mut s = surface(16, 16);
    s.clear(Rgba8::BLACK).unwrap();
    s.text("hello", Point::new(0.0, 0.0), TextStyle::new(12.0, Rgba8::WHITE))
        .unwrap();
    let frame = s.finish();
    assert!(frame.data.chunks_exact(4).all(|px| px == [0, 0, 0, 255]));
}

#[test]
fn oversized_canvas_is_render_error() {
    let err = CpuSurface::new(Canvas::new(70_000, 10).unwrap(), None)
        .err()
        .unwrap();
    assert!(err.to_string().contains("render error:"));
}

#[test]
fn invalid_font_bytes_are_rejected() {
    assert!(CpuSurface::new(Canvas::new(4, 4).unwrap(), Some(b"nope")).is_err());
}

fn font_surface(w: u32, h: u32) -> CpuSurface {
    let font = std::fs::read("tests/data/fonts/DejaVuSans.ttf").unwrap();
    CpuSurface::new(Canvas::new(w, h).unwrap(), Some(&font)).unwrap()
}

/// Inclusive `(min_x, min_y, max_x, max_y)` of every non-black pixel.
fn ink_bounds(frame: &FrameRGBA) -> Option<(u32, u32, u32, u32)> {
    let mut bounds: Option<(u32, u32, u32, u32)> = None;
    for y in 0..frame.height {
        for x in 0..frame.width {
            let px = frame.pixel(x, y).unwrap();
            if px[0] == 0 && px[1] == 0 && px[2] == 0 {
                continue;
            }
            bounds = Some(match bounds {
                None => (x, y, x, y),
                Some((x0, y0, x1, y1)) => (x0.min(x), y0.min(y), x1.max(x), y1.max(y)),
            });
        }
    }
    bounds
}

fn text_ink(h_align: HAlign, v_align: VAlign) -> (u32, u32, u32, u32) {
    let mut s = font_surface(300, 100);
    s.clear(Rgba8::BLACK).unwrap();
    s.text(
        "Asia 32",
        Point::new(150.0, 50.0),
        TextStyle::new(24.0, Rgba8::WHITE).aligned(h_align, v_align),
    )
    .unwrap();
    ink_bounds(&s.finish()).expect("text left no ink")
}

#[test]
fn left_top_text_starts_at_anchor() {
    let (x0, y0, x1, _) = text_ink(HAlign::Left, VAlign::Top);
    assert!((150..=156).contains(&x0), "x0 = {x0}");
    assert!(x1 > 200, "x1 = {x1}");
    assert!(y0 >= 50, "y0 = {y0}");
}

#[test]
fn center_center_text_straddles_anchor() {
    let (x0, y0, x1, y1) = text_ink(HAlign::Center, VAlign::Center);
    let mid_x = (x0 + x1) / 2;
    assert!(mid_x.abs_diff(150) <= 5, "ink x-range {x0}..{x1}");
    assert!(y0 < 50 && y1 > 50, "ink y-range {y0}..{y1}");
}

#[test]
fn right_center_text_ends_at_anchor() {
    let (x0, y0, x1, y1) = text_ink(HAlign::Right, VAlign::Center);
    assert!((140..=150).contains(&x1), "x1 = {x1}");
    assert!(x0 < 100, "x0 = {x0}");
    assert!(y0 < 50 && y1 > 50, "ink y-range {y0}..{y1}");
}
