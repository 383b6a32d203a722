use super::*;

#[test]
fn map_range_hits_endpoints() {
    assert_eq!(map_range(5.0, 5.0, 12.0, 90.0, 500.0), 90.0);
    assert_eq!(map_range(12.0, 5.0, 12.0, 90.0, 500.0), 500.0);
    assert!((map_range(1.0, 1.0, 32.0, 90.0, 500.0) * 0.08 - 7.2).abs() < 1e-9);
    assert!((map_range(32.0, 1.0, 32.0, 90.0, 500.0) * 0.08 - 40.0).abs() < 1e-9);
}

#[test]
fn map_range_degenerate_span_is_midpoint() {
    assert_eq!(map_range(7.0, 7.0, 7.0, 90.0, 500.0), 295.0);
    assert_eq!(map_range(0.0, 7.0, 7.0, 90.0, 500.0), 295.0);
}

#[test]
fn map_range_is_monotonic_for_increasing_span() {
    let mut prev = f64::NEG_INFINITY;
    for v in 0..=40 {
        let out = map_range(f64::from(v), 3.0, 32.0, 90.0, 500.0);
        assert!(out >= prev);
        prev = out;
    }
}

#[test]
fn contain_fit_width_bound() {
    // 2:1 image into a tall canvas: width fits, height derived.
    let out = contain_fit(Size::new(2000.0, 1000.0), Size::new(800.0, 900.0));
    assert_eq!(out, Size::new(800.0, 400.0));
}

#[test]
fn contain_fit_height_bound() {
    // 2:1 image into a wide canvas: height overflows, so height fits.
    let out = contain_fit(Size::new(2000.0, 1000.0), Size::new(1600.0, 500.0));
    assert_eq!(out, Size::new(1000.0, 500.0));
}

#[test]
fn contain_fit_preserves_aspect_ratio() {
    let content = Size::new(1536.0, 1024.0);
    let r = content.width / content.height;
    for (w, h) in [(1280.0, 720.0), (720.0, 1280.0), (333.0, 333.0), (1920.0, 1080.0)] {
        let out = contain_fit(content, Size::new(w, h));
        assert!((out.width / out.height - r).abs() < 1e-9);
        assert!(out.width <= w + 1e-9 && out.height <= h + 1e-9);
    }
}

#[test]
fn contain_fit_zero_content_is_zero() {
    assert_eq!(contain_fit(Size::ZERO, Size::new(10.0, 10.0)), Size::ZERO);
}

#[test]
fn arrow_head_wings_are_symmetric() {
    let [shaft, a, b] = arrow_segments(Point::new(0.0, 0.0), Point::new(100.0, 0.0), 10.0);
    assert_eq!(shaft.p0, Point::new(0.0, 0.0));
    assert_eq!(shaft.p1, Point::new(100.0, 0.0));
    assert_eq!(a.p0, Point::new(100.0, 0.0));
    assert!((a.p1.x - (100.0 - 10.0 * FRAC_PI_6.cos())).abs() < 1e-9);
    assert!((a.p1.y + b.p1.y).abs() < 1e-9);
    assert!((a.p1.y.abs() - 5.0).abs() < 1e-9);
    assert!((a.p1.distance(a.p0) - 10.0).abs() < 1e-9);
}
