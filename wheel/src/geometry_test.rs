#![allow(clippy::float_cmp)]

use super::*;

const EPSILON: f64 = 1e-9;
const C: Point = Point { x: 814.0, y: 814.0 };

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

fn point_approx_eq(a: Point, b: Point) -> bool {
    approx_eq(a.x, b.x) && approx_eq(a.y, b.y)
}

fn arcs(path: &SvgPath) -> Vec<(f64, bool, bool, Point)> {
    path.commands()
        .iter()
        .filter_map(|c| match *c {
            PathCommand::Arc { radius, large_arc, clockwise, to } => Some((radius, large_arc, clockwise, to)),
            _ => None,
        })
        .collect()
}

// =============================================================
// polar_to_cartesian
// =============================================================

#[test]
fn zero_degrees_is_top() {
    assert!(point_approx_eq(polar_to_cartesian(C, 100.0, 0.0), Point::new(814.0, 714.0)));
}

#[test]
fn ninety_degrees_is_right() {
    assert!(point_approx_eq(polar_to_cartesian(C, 100.0, 90.0), Point::new(914.0, 814.0)));
}

#[test]
fn one_eighty_is_bottom() {
    assert!(point_approx_eq(polar_to_cartesian(C, 100.0, 180.0), Point::new(814.0, 914.0)));
}

// =============================================================
// large_arc_flag
// =============================================================

#[test]
fn large_arc_flag_law() {
    let cases = [(30.0, 30.0), (0.0, 90.0), (0.0, 180.0), (0.0, 180.0001), (10.0, 350.0), (200.0, 300.0)];
    for (start, end) in cases {
        assert_eq!(large_arc_flag(start, end), end - start > 180.0, "{start}..{end}");
    }
}

#[test]
fn exactly_half_circle_is_small_arc() {
    assert!(!large_arc_flag(0.0, 180.0));
}

// =============================================================
// angle_from_center
// =============================================================

#[test]
fn angle_from_center_uses_atan2_convention() {
    let c = Point::new(0.0, 0.0);
    assert!(approx_eq(angle_from_center(c, Point::new(1.0, 0.0)), 0.0));
    assert!(approx_eq(angle_from_center(c, Point::new(0.0, 1.0)), 90.0));
    assert!(approx_eq(angle_from_center(c, Point::new(-1.0, 0.0)), 180.0));
    assert!(approx_eq(angle_from_center(c, Point::new(0.0, -1.0)), -90.0));
}

// =============================================================
// annular_sector_path
// =============================================================

#[test]
fn sector_has_six_commands_in_order() {
    let path = annular_sector_path(C, 100.0, 200.0, 0.0, 90.0).unwrap();
    let cmds = path.commands();
    assert_eq!(cmds.len(), 6);
    assert!(matches!(cmds[0], PathCommand::MoveTo(_)));
    assert!(matches!(cmds[1], PathCommand::LineTo(_)));
    assert!(matches!(cmds[2], PathCommand::Arc { clockwise: true, .. }));
    assert!(matches!(cmds[3], PathCommand::LineTo(_)));
    assert!(matches!(cmds[4], PathCommand::Arc { clockwise: false, .. }));
    assert_eq!(cmds[5], PathCommand::Close);
}

#[test]
fn sector_endpoints_match_polar_points() {
    let path = annular_sector_path(C, 100.0, 200.0, 0.0, 90.0).unwrap();
    let cmds = path.commands();
    let PathCommand::MoveTo(start) = cmds[0] else { panic!("expected move") };
    let PathCommand::LineTo(outer_start) = cmds[1] else { panic!("expected line") };
    assert!(point_approx_eq(start, polar_to_cartesian(C, 100.0, 0.0)));
    assert!(point_approx_eq(outer_start, polar_to_cartesian(C, 200.0, 0.0)));
    let arcs = arcs(&path);
    assert!(point_approx_eq(arcs[0].3, polar_to_cartesian(C, 200.0, 90.0)));
    assert!(point_approx_eq(arcs[1].3, start));
}

#[test]
fn sector_flags_follow_sweep() {
    let small = annular_sector_path(C, 100.0, 200.0, 0.0, 120.0).unwrap();
    let large = annular_sector_path(C, 100.0, 200.0, 0.0, 240.0).unwrap();
    assert!(arcs(&small).iter().all(|a| !a.1));
    assert!(arcs(&large).iter().all(|a| a.1));
}

#[test]
fn sector_arc_radii() {
    let path = annular_sector_path(C, 100.0, 200.0, 30.0, 60.0).unwrap();
    let arcs = arcs(&path);
    assert_eq!(arcs[0].0, 200.0);
    assert_eq!(arcs[1].0, 100.0);
}

#[test]
fn full_circle_keeps_endpoints_distinct() {
    let path = annular_sector_path(C, 100.0, 200.0, 0.0, 360.0).unwrap();
    let arcs = arcs(&path);
    assert!(arcs[0].1, "full circle should use the large arc");
    let PathCommand::LineTo(outer_start) = path.commands()[1] else { panic!("expected line") };
    assert!(outer_start != arcs[0].3);
}

#[test]
fn malformed_input_renders_nothing() {
    assert!(annular_sector_path(C, 200.0, 100.0, 0.0, 90.0).is_none());
    assert!(annular_sector_path(C, 100.0, 100.0, 0.0, 90.0).is_none());
    assert!(annular_sector_path(C, -1.0, 100.0, 0.0, 90.0).is_none());
    assert!(annular_sector_path(C, 10.0, 100.0, 90.0, 0.0).is_none());
    assert!(annular_sector_path(C, 10.0, 100.0, 0.0, f64::NAN).is_none());
}

#[test]
fn zero_sweep_is_degenerate_small_arc() {
    let path = annular_sector_path(C, 100.0, 200.0, 30.0, 30.0).unwrap();
    let arcs = arcs(&path);
    assert_eq!(arcs.len(), 2);
    assert!(arcs.iter().all(|a| !a.1));
    assert!(point_approx_eq(arcs[0].3, polar_to_cartesian(C, 200.0, 30.0)));
    assert!(path.to_string().contains(" 0 0 1 "));
}

#[test]
fn sector_display_format() {
    let path = annular_sector_path(Point::new(0.0, 0.0), 10.0, 20.0, 0.0, 90.0).unwrap();
    assert_eq!(path.to_string(), "M 0 -10 L 0 -20 A 20 20 0 0 1 20 0 L 10 0 A 10 10 0 0 0 0 -10 Z");
}

// =============================================================
// text_arc_path
// =============================================================

#[test]
fn text_arc_is_move_plus_clockwise_arc() {
    let path = text_arc_path(C, 150.0, 0.0, 90.0).unwrap();
    assert_eq!(path.commands().len(), 2);
    assert!(matches!(path.commands()[1], PathCommand::Arc { clockwise: true, large_arc: false, .. }));
}

#[test]
fn text_arc_rejects_zero_radius() {
    assert!(text_arc_path(C, 0.0, 0.0, 90.0).is_none());
}

#[test]
fn text_arc_accepts_zero_sweep_rejects_negative() {
    let path = text_arc_path(C, 150.0, 45.0, 45.0).unwrap();
    assert!(matches!(path.commands()[1], PathCommand::Arc { large_arc: false, .. }));
    assert!(text_arc_path(C, 150.0, 45.0, 44.0).is_none());
}

// =============================================================
// fmt_num
// =============================================================

#[test]
fn fmt_num_trims_trailing_zeros() {
    assert_eq!(fmt_num(814.0), "814");
    assert_eq!(fmt_num(1.25), "1.25");
    assert_eq!(fmt_num(1.23456), "1.235");
    assert_eq!(fmt_num(-0.0001), "0");
}
