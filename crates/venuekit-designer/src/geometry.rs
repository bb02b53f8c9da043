//! Point, box and polygon primitives.
//!
//! World coordinates are centimetres with y growing downward, matching the
//! screen. Rotations are in degrees, clockwise on screen.

use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Sub};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    pub fn length(&self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// Linear interpolation towards `other`; `t = 0` is `self`.
    pub fn lerp(&self, other: &Point, t: f64) -> Point {
        Point::new(
            self.x + (other.x - self.x) * t,
            self.y + (other.y - self.y) * t,
        )
    }

    /// Rotates this point around `center` by `degrees`.
    pub fn rotated_about(&self, center: &Point, degrees: f64) -> Point {
        if degrees == 0.0 {
            return *self;
        }
        let (sin, cos) = degrees.to_radians().sin_cos();
        let dx = self.x - center.x;
        let dy = self.y - center.y;
        Point::new(
            center.x + dx * cos - dy * sin,
            center.y + dx * sin + dy * cos,
        )
    }

    /// Unit vector in the same direction, or `None` for the zero vector.
    pub fn normalized(&self) -> Option<Point> {
        let len = self.length();
        if len <= f64::EPSILON || !len.is_finite() {
            None
        } else {
            Some(Point::new(self.x / len, self.y / len))
        }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Point {
    type Output = Point;

    fn mul(self, rhs: f64) -> Point {
        Point::new(self.x * rhs, self.y * rhs)
    }
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    /// Creates a box from two opposite corners in any order.
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self {
            min_x: x1.min(x2),
            min_y: y1.min(y2),
            max_x: x1.max(x2),
            max_y: y1.max(y2),
        }
    }

    pub fn from_center(center: Point, width: f64, height: f64) -> Self {
        let hw = width.abs() / 2.0;
        let hh = height.abs() / 2.0;
        Self::new(center.x - hw, center.y - hh, center.x + hw, center.y + hh)
    }

    /// Smallest box holding every point, or `None` for an empty iterator.
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Point>) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut b = Self::new(first.x, first.y, first.x, first.y);
        for p in iter {
            b.min_x = b.min_x.min(p.x);
            b.min_y = b.min_y.min(p.y);
            b.max_x = b.max_x.max(p.x);
            b.max_y = b.max_y.max(p.y);
        }
        Some(b)
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn center(&self) -> Point {
        Point::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    /// Corners clockwise from the top-left.
    pub fn corners(&self) -> [Point; 4] {
        [
            Point::new(self.min_x, self.min_y),
            Point::new(self.max_x, self.min_y),
            Point::new(self.max_x, self.max_y),
            Point::new(self.min_x, self.max_y),
        ]
    }

    pub fn expand(&self, margin: f64) -> Self {
        Self {
            min_x: self.min_x - margin,
            min_y: self.min_y - margin,
            max_x: self.max_x + margin,
            max_y: self.max_y + margin,
        }
    }

    /// Strict overlap; boxes that only share an edge do not intersect.
    pub fn intersects(&self, other: &Bounds) -> bool {
        self.min_x < other.max_x
            && self.max_x > other.min_x
            && self.min_y < other.max_y
            && self.max_y > other.min_y
    }

    /// Inclusive containment.
    pub fn contains_point(&self, p: &Point) -> bool {
        p.x >= self.min_x && p.x <= self.max_x && p.y >= self.min_y && p.y <= self.max_y
    }

    pub fn union(&self, other: &Bounds) -> Bounds {
        Bounds {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }
}

/// Axis-aligned overlap test used by the obstacle and spacing checks.
pub fn box_overlap(a: &Bounds, b: &Bounds) -> bool {
    a.intersects(b)
}

/// Grows `bounds` by `margin` on every side.
pub fn expand_box(bounds: &Bounds, margin: f64) -> Bounds {
    bounds.expand(margin)
}

/// Ray-casting point-in-polygon test.
///
/// Polygons with fewer than three distinct vertices are unbounded: every
/// point is inside. A closing vertex equal to the first one is ignored.
pub fn point_in_polygon(p: &Point, polygon: &[Point]) -> bool {
    let mut n = polygon.len();
    if n >= 2 && polygon[0] == polygon[n - 1] {
        n -= 1;
    }
    if n < 3 {
        return true;
    }

    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let pi = polygon[i];
        let pj = polygon[j];
        if (pi.y > p.y) != (pj.y > p.y) {
            let x_cross = (pj.x - pi.x) * (p.y - pi.y) / (pj.y - pi.y) + pi.x;
            if p.x < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// Shortest distance from `p` to the segment `a`-`b`.
pub fn distance_to_segment(p: &Point, a: &Point, b: &Point) -> f64 {
    let ab = *b - *a;
    let len_sq = ab.x * ab.x + ab.y * ab.y;
    if len_sq <= f64::EPSILON {
        return p.distance_to(a);
    }
    let t = (((p.x - a.x) * ab.x + (p.y - a.y) * ab.y) / len_sq).clamp(0.0, 1.0);
    p.distance_to(&a.lerp(b, t))
}

/// One pass of Chaikin corner cutting.
///
/// Every segment `p0 -> p1` becomes the pair
/// `0.75·p0 + 0.25·p1` and `0.25·p0 + 0.75·p1`. Sequences shorter than two
/// points are returned unchanged.
pub fn chaikin_smooth(points: &[Point]) -> Vec<Point> {
    if points.len() < 2 {
        return points.to_vec();
    }
    let mut out = Vec::with_capacity((points.len() - 1) * 2);
    for pair in points.windows(2) {
        let (p0, p1) = (pair[0], pair[1]);
        out.push(p0.lerp(&p1, 0.25));
        out.push(p0.lerp(&p1, 0.75));
    }
    out
}

/// Constrains `p` to the horizontal or vertical through `prev`, whichever
/// axis the pointer has moved further along.
pub fn axis_snap(prev: &Point, p: &Point) -> Point {
    let dx = (p.x - prev.x).abs();
    let dy = (p.y - prev.y).abs();
    if dx >= dy {
        Point::new(p.x, prev.y)
    } else {
        Point::new(prev.x, p.y)
    }
}
