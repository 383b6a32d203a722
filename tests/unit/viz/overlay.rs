use super::*;
use crate::render::recorder::{DrawOp, RecordingSurface};
use crate::scene::config::{ColorTable, PositionTable};
use crate::scene::records::assign_colors;

fn rec(name: &str, river_count: u32, tributary_sum: u32) -> ContinentRecord {
    ContinentRecord {
        name: name.to_string(),
        river_count,
        tributary_sum,
    }
}

struct Fixture {
    records: Vec<ContinentRecord>,
    colors: ResolvedColors,
    positions: PositionTable,
    labels: Labels,
}

impl Fixture {
    fn new(records: Vec<ContinentRecord>) -> Self {
        let (colors, _) = assign_colors(&records, &ColorTable::default());
        Self {
            records,
            colors,
            positions: PositionTable::default(),
            labels: Labels::default(),
        }
    }

    fn input(&self, pointer: Option<Point>) -> OverlayInput<'_> {
        OverlayInput {
            display: Size::new(1000.0, 500.0),
            native: Size::new(2000.0, 1000.0),
            records: &self.records,
            colors: &self.colors,
            positions: &self.positions,
            labels: &self.labels,
            pointer,
        }
    }
}

#[test]
fn max_river_count_maps_to_500_and_ring_weight_scales() {
    assert_eq!(circle_base_diameter(12, 5, 12), 500.0);
    assert_eq!(circle_base_diameter(5, 5, 12), 90.0);
    assert_eq!(ring_weight(4000), 20.0);
}

#[test]
fn ring_weight_has_floor_of_one() {
    assert_eq!(ring_weight(0), 1.0);
    assert_eq!(ring_weight(199), 1.0);
    assert_eq!(ring_weight(200), 1.0);
    assert_eq!(ring_weight(201), 201.0 * 0.005);
    for t in [0u32, 1, 50, 999, 1000, 12345, 1_000_000] {
        assert_eq!(ring_weight(t), (f64::from(t) * 0.005).max(1.0));
    }
}

#[test]
fn diameter_is_monotonic_in_river_count() {
    let mut prev = 0.0;
    for v in 3..=32 {
        let d = circle_diameter(v, 3, 32, 1280.0, 2048.0);
        assert!(d >= prev);
        prev = d;
    }
}

#[test]
fn diameter_applies_image_scale_and_factor() {
    assert_eq!(circle_diameter(12, 5, 12, 1000.0, 2000.0), 500.0 * 0.5 * 1.5);
}

#[test]
fn equal_counts_use_midpoint_diameter() {
    let f = Fixture::new(vec![rec("Asia", 7, 1), rec("Europe", 7, 1)]);
    let (markers, _) = layout_markers(&f.input(None));
    assert_eq!(markers.len(), 2);
    for m in markers {
        assert_eq!(m.diameter, 295.0 * 0.5 * 1.5);
    }
}

#[test]
fn markers_use_relative_positions_and_colors() {
    let f = Fixture::new(vec![rec("Asia", 12, 4000), rec("Europe", 5, 900)]);
    let (markers, diags) = layout_markers(&f.input(None));
    assert!(diags.is_empty());
    let asia = &markers[0];
    assert_eq!(asia.center, Point::new(715.0, 200.0));
    assert_eq!(asia.diameter, 375.0);
    assert_eq!(asia.ring_diameter, 375.0 + 23.0);
    assert_eq!(asia.ring_weight, 20.0);
    assert_eq!(asia.color, Rgba8::opaque(29, 52, 99));
}

#[test]
fn hit_test_is_strictly_inside_radius() {
    let c = Point::new(100.0, 100.0);
    assert!(hit_test(Point::new(100.0, 100.0), c, 20.0));
    assert!(hit_test(Point::new(109.9, 100.0), c, 20.0));
    assert!(!hit_test(Point::new(110.0, 100.0), c, 20.0));
    assert!(!hit_test(Point::new(108.0, 108.0), c, 20.0));
}

#[test]
fn missing_position_produces_no_draw_calls() {
    let f = Fixture::new(vec![rec("Asia", 12, 4000), rec("Atlantis", 30, 9000)]);
    let mut s = RecordingSurface::new();
    let report = draw_overlay(&mut s, &f.input(None)).unwrap();

    assert_eq!(
        report.diagnostics,
        vec![Diagnostic::MissingPosition {
            continent: "Atlantis".to_string()
        }]
    );
    assert_eq!(s.ops().len(), 2);
    for op in s.ops() {
        match op {
            DrawOp::FillCircle { color, .. } => assert_eq!(*color, Rgba8::opaque(29, 52, 99)),
            DrawOp::StrokeCircle { stroke, .. } => {
                assert_eq!(stroke.color, Rgba8::opaque(29, 52, 99))
            }
            other => panic!("unexpected op {other:?}"),
        }
    }
}

#[test]
fn missing_position_still_counts_toward_river_range() {
    // Atlantis is skipped but its count still widens the range, so Asia is not the max.
    let f = Fixture::new(vec![rec("Asia", 12, 4000), rec("Atlantis", 30, 9000)]);
    let (markers, _) = layout_markers(&f.input(None));
    assert!(markers[0].diameter < 500.0 * 0.5 * 1.5);
}

#[test]
fn duplicate_names_draw_overlapping_circles() {
    let f = Fixture::new(vec![rec("Africa", 3, 10), rec("Africa", 9, 20)]);
    let mut s = RecordingSurface::new();
    draw_overlay(&mut s, &f.input(None)).unwrap();
    let centers: Vec<Point> = s
        .ops()
        .iter()
        .filter_map(|op| match op {
            DrawOp::FillCircle { center, .. } => Some(*center),
            _ => None,
        })
        .collect();
    assert_eq!(centers.len(), 2);
    assert_eq!(centers[0], centers[1]);
}

#[test]
fn tooltip_draws_shadow_then_foreground() {
    let f = Fixture::new(vec![rec("Asia", 12, 4000), rec("Europe", 5, 900)]);
    let pointer = Point::new(715.0, 200.0);
    let mut s = RecordingSurface::new();
    let report = draw_overlay(&mut s, &f.input(Some(pointer))).unwrap();
    assert_eq!(report.hovered, vec!["Asia".to_string()]);

    let texts: Vec<(&str, Point, Rgba8)> = s
        .ops()
        .iter()
        .filter_map(|op| match op {
            DrawOp::Text {
                text,
                origin,
                style,
            } => Some((text.as_str(), *origin, style.color)),
            _ => None,
        })
        .collect();
    assert_eq!(texts.len(), 6);
    assert_eq!(texts[0].0, "Continente: Asia");
    assert_eq!(texts[0].1, Point::new(726.0, 209.0));
    assert_eq!(texts[0].2, Rgba8::with_alpha(0, 0, 0, 150));
    assert_eq!(texts[2].0, "Fiumi tributari: 4000");
    assert_eq!(texts[2].1, Point::new(726.0, 239.0));
    assert_eq!(texts[3].1, Point::new(725.0, 210.0));
    assert_eq!(texts[3].2, Rgba8::WHITE);
    assert_eq!(texts[4].0, "Fiumi principali: 12");
    assert_eq!(texts[5].1, Point::new(725.0, 240.0));
}

#[test]
fn overlapping_circles_stack_tooltips() {
    let f = Fixture::new(vec![rec("Africa", 3, 10), rec("Africa", 9, 20)]);
    let pointer = Point::new(530.0, 315.0);
    let mut s = RecordingSurface::new();
    let report = draw_overlay(&mut s, &f.input(Some(pointer))).unwrap();
    assert_eq!(report.hovered.len(), 2);
}

#[test]
fn no_pointer_no_tooltip() {
    let f = Fixture::new(vec![rec("Asia", 12, 4000)]);
    let mut s = RecordingSurface::new();
    let report = draw_overlay(&mut s, &f.input(None)).unwrap();
    assert!(report.hovered.is_empty());
    assert!(!s.ops().iter().any(|op| matches!(op, DrawOp::Text { .. })));
}

#[test]
fn empty_records_draw_nothing() {
    let f = Fixture::new(vec![]);
    let mut s = RecordingSurface::new();
    let report = draw_overlay(&mut s, &f.input(Some(Point::ZERO))).unwrap();
    assert!(s.ops().is_empty());
    assert_eq!(report, OverlayReport::default());
}
