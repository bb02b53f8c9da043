use venuekit_designer::viewport::{MAX_ZOOM, MIN_ZOOM};
use venuekit_designer::{Bounds, Point, Viewport};

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn test_screen_world_round_trip() {
    let mut vp = Viewport::new(800.0, 600.0);
    vp.set_zoom(2.5);
    vp.set_pan(40.0, -20.0);
    let world = Point::new(123.0, 456.0);
    let back = vp.screen_to_world(&vp.world_to_screen(&world));
    assert!(approx(back.x, world.x));
    assert!(approx(back.y, world.y));
}

#[test]
fn test_zoom_is_clamped() {
    let mut vp = Viewport::new(800.0, 600.0);
    vp.set_zoom(500.0);
    assert_eq!(vp.zoom(), MAX_ZOOM);
    vp.set_zoom(0.0);
    assert_eq!(vp.zoom(), MIN_ZOOM);
    vp.set_zoom(f64::NAN);
    assert_eq!(vp.zoom(), MIN_ZOOM);
}

#[test]
fn test_zoom_to_point_keeps_anchor() {
    let mut vp = Viewport::new(800.0, 600.0);
    let anchor = Point::new(300.0, 200.0);
    let before = vp.world_to_screen(&anchor);
    vp.zoom_in_at(&anchor);
    let after = vp.world_to_screen(&anchor);
    assert!(vp.zoom() > 1.0);
    assert!(approx(before.x, after.x));
    assert!(approx(before.y, after.y));
}

#[test]
fn test_fit_to_bounds_centres_content() {
    let mut vp = Viewport::new(1000.0, 500.0);
    let bounds = Bounds::new(0.0, 0.0, 2000.0, 1000.0);
    vp.fit_to_bounds(&bounds, 0.0);
    assert!(approx(vp.zoom(), 0.5));
    let centre = vp.world_to_screen(&bounds.center());
    assert!(approx(centre.x, 500.0));
    assert!(approx(centre.y, 250.0));
}

#[test]
fn test_fit_ignores_empty_bounds() {
    let mut vp = Viewport::new(800.0, 600.0);
    vp.fit_to_view(&Bounds::new(5.0, 5.0, 5.0, 5.0));
    assert_eq!(vp.zoom(), 1.0);
    assert_eq!(vp.pan_x(), 0.0);
}

#[test]
fn test_screen_distance() {
    let mut vp = Viewport::new(800.0, 600.0);
    vp.set_zoom(4.0);
    assert!(approx(vp.screen_distance_to_world(20.0), 5.0));
    vp.reset();
    assert_eq!(vp.zoom(), 1.0);
}
