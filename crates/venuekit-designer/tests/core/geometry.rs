use venuekit_designer::geometry::{
    axis_snap, box_overlap, chaikin_smooth, distance_to_segment, expand_box, point_in_polygon,
    Bounds, Point,
};

fn square(size: f64) -> Vec<Point> {
    vec![
        Point::new(0.0, 0.0),
        Point::new(size, 0.0),
        Point::new(size, size),
        Point::new(0.0, size),
    ]
}

#[test]
fn test_point_in_polygon_square() {
    let poly = square(100.0);
    assert!(point_in_polygon(&Point::new(50.0, 50.0), &poly));
    assert!(!point_in_polygon(&Point::new(150.0, 50.0), &poly));
    assert!(!point_in_polygon(&Point::new(50.0, -1.0), &poly));
}

#[test]
fn test_point_in_polygon_ignores_closing_vertex() {
    let mut poly = square(100.0);
    poly.push(poly[0]);
    assert!(point_in_polygon(&Point::new(10.0, 90.0), &poly));
    assert!(!point_in_polygon(&Point::new(110.0, 90.0), &poly));
}

#[test]
fn test_degenerate_polygon_is_unbounded() {
    let line = vec![Point::new(0.0, 0.0), Point::new(10.0, 0.0)];
    assert!(point_in_polygon(&Point::new(5000.0, -300.0), &line));
    assert!(point_in_polygon(&Point::new(1.0, 1.0), &[]));
}

#[test]
fn test_box_overlap_is_strict() {
    let a = Bounds::new(0.0, 0.0, 10.0, 10.0);
    let touching = Bounds::new(10.0, 0.0, 20.0, 10.0);
    let overlapping = Bounds::new(9.0, 9.0, 20.0, 20.0);
    assert!(!box_overlap(&a, &touching));
    assert!(box_overlap(&a, &overlapping));
    assert!(box_overlap(&expand_box(&a, 1.0), &touching));
}

#[test]
fn test_bounds_normalizes_and_measures() {
    let b = Bounds::new(10.0, 20.0, 0.0, 5.0);
    assert_eq!(b.min_x, 0.0);
    assert_eq!(b.max_y, 20.0);
    assert_eq!(b.width(), 10.0);
    assert_eq!(b.height(), 15.0);
    assert_eq!(b.center(), Point::new(5.0, 12.5));
    assert!(b.contains_point(&Point::new(10.0, 20.0)));
}

#[test]
fn test_bounds_from_points() {
    assert!(Bounds::from_points(std::iter::empty()).is_none());
    let points = square(40.0);
    let b = Bounds::from_points(points.iter()).unwrap();
    assert_eq!(b, Bounds::new(0.0, 0.0, 40.0, 40.0));
    assert_eq!(b.corners()[2], Point::new(40.0, 40.0));
}

#[test]
fn test_distance_to_segment() {
    let a = Point::new(0.0, 0.0);
    let b = Point::new(10.0, 0.0);
    assert!((distance_to_segment(&Point::new(5.0, 3.0), &a, &b) - 3.0).abs() < 1e-9);
    assert!((distance_to_segment(&Point::new(13.0, 4.0), &a, &b) - 5.0).abs() < 1e-9);
}

#[test]
fn test_chaikin_one_pass() {
    let points = vec![Point::new(0.0, 0.0), Point::new(100.0, 0.0), Point::new(100.0, 100.0)];
    let smooth = chaikin_smooth(&points);
    assert_eq!(smooth.len(), 4);
    assert_eq!(smooth[0], Point::new(25.0, 0.0));
    assert_eq!(smooth[1], Point::new(75.0, 0.0));
    assert_eq!(smooth[3], Point::new(100.0, 75.0));
}

#[test]
fn test_axis_snap_keeps_dominant_axis() {
    let prev = Point::new(10.0, 10.0);
    assert_eq!(axis_snap(&prev, &Point::new(50.0, 14.0)), Point::new(50.0, 10.0));
    assert_eq!(axis_snap(&prev, &Point::new(12.0, 80.0)), Point::new(10.0, 80.0));
}
