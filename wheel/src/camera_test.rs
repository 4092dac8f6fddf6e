#![allow(clippy::clone_on_copy, clippy::float_cmp)]

use super::*;

fn limits() -> ZoomLimits {
    ZoomLimits::default()
}

// --- Point ---

#[test]
fn point_new() {
    let p = Point::new(3.0, 4.0);
    assert_eq!(p.x, 3.0);
    assert_eq!(p.y, 4.0);
}

#[test]
fn point_default_is_origin() {
    assert_eq!(Point::default(), Point::new(0.0, 0.0));
}

// --- Camera defaults ---

#[test]
fn camera_default_is_identity() {
    let cam = Camera::default();
    assert_eq!(cam.pan(), Point::new(0.0, 0.0));
    assert_eq!(cam.zoom, 1.0);
}

// --- Zoom ---

#[test]
fn zoom_in_steps_by_point_two() {
    let mut cam = Camera::default();
    cam.zoom_in(limits());
    assert_eq!(cam.zoom, 1.2);
}

#[test]
fn zoom_in_clamps_at_max() {
    let mut cam = Camera::default();
    for _ in 0..20 {
        cam.zoom_in(limits());
    }
    assert_eq!(cam.zoom, 2.0);
    assert!(!cam.can_zoom_in(limits()));
}

#[test]
fn zoom_out_clamps_at_min() {
    let mut cam = Camera::default();
    for _ in 0..20 {
        cam.zoom_out(limits());
    }
    assert_eq!(cam.zoom, 0.5);
    assert!(!cam.can_zoom_out(limits()));
}

#[test]
fn zoom_round_trip_has_no_drift() {
    let mut cam = Camera::default();
    for _ in 0..3 {
        cam.zoom_in(limits());
    }
    for _ in 0..3 {
        cam.zoom_out(limits());
    }
    assert_eq!(cam.zoom, 1.0);
}

#[test]
fn zoom_stays_in_bounds_for_any_sequence() {
    let mut cam = Camera::default();
    let pattern = [true, true, false, true, true, true, true, false, false, false, false, false, false, false];
    for zoom_in in pattern {
        if zoom_in {
            cam.zoom_in(limits());
        } else {
            cam.zoom_out(limits());
        }
        assert!(cam.zoom >= 0.5 && cam.zoom <= 2.0, "zoom {} out of bounds", cam.zoom);
    }
}

#[test]
fn reset_restores_identity() {
    let mut cam = Camera { pan_x: 150.0, pan_y: 200.0, zoom: 1.8 };
    cam.reset();
    assert_eq!(cam.zoom, 1.0);
    assert_eq!(cam.pan(), Point::new(0.0, 0.0));
}

// --- Transform ---

#[test]
fn css_transform_translates_then_scales() {
    let cam = Camera { pan_x: 150.0, pan_y: -20.5, zoom: 1.2 };
    assert_eq!(cam.css_transform(), "translate(150px, -20.5px) scale(1.2)");
}

#[test]
fn board_center_moves_with_pan_only() {
    let cam = Camera { pan_x: 10.0, pan_y: -5.0, zoom: 2.0 };
    let c = cam.board_center_on_screen(Point::new(400.0, 300.0));
    assert_eq!(c, Point::new(410.0, 295.0));
}

#[test]
fn layout_center_undoes_pan() {
    let cam = Camera { pan_x: 10.0, pan_y: -5.0, zoom: 1.6 };
    let layout = cam.layout_center_of(Point::new(410.0, 295.0));
    assert_eq!(layout, Point::new(400.0, 300.0));
    assert_eq!(cam.board_center_on_screen(layout), Point::new(410.0, 295.0));
}
