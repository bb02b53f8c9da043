//! Drawn venue areas.

use crate::geometry::{distance_to_segment, point_in_polygon, Bounds, Point};
use serde::{Deserialize, Serialize};
use venuekit_core::AreaKind;

/// A polyline or polygon drawn on the venue floor.
///
/// An outline whose last point equals its first is closed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Area {
    pub kind: AreaKind,
    pub points: Vec<Point>,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

impl Area {
    pub fn new(kind: AreaKind, points: Vec<Point>) -> Self {
        Self {
            kind,
            points,
            enabled: true,
        }
    }

    pub fn is_closed(&self) -> bool {
        self.points.len() >= 4 && self.points.first() == self.points.last()
    }

    /// Appends the first vertex unless the outline is already closed.
    pub fn close(&mut self) {
        if self.points.len() >= 3 && !self.is_closed() {
            if let Some(first) = self.points.first().copied() {
                self.points.push(first);
            }
        }
    }

    pub fn bounds(&self) -> Option<Bounds> {
        Bounds::from_points(self.points.iter())
    }

    pub fn segment_count(&self) -> usize {
        self.points.len().saturating_sub(1)
    }

    pub fn segment(&self, index: usize) -> Option<(Point, Point)> {
        if index >= self.segment_count() {
            return None;
        }
        Some((self.points[index], self.points[index + 1]))
    }

    pub fn segment_length(&self, index: usize) -> Option<f64> {
        self.segment(index).map(|(a, b)| a.distance_to(&b))
    }

    pub fn perimeter(&self) -> f64 {
        self.points.windows(2).map(|w| w[0].distance_to(&w[1])).sum()
    }

    /// Whether `p` is on the outline within `tolerance`, or inside it when
    /// closed.
    pub fn hit_test(&self, p: &Point, tolerance: f64) -> bool {
        if self.is_closed() && point_in_polygon(p, &self.points) {
            return true;
        }
        match self.points.len() {
            0 => false,
            1 => self.points[0].distance_to(p) <= tolerance,
            _ => self
                .points
                .windows(2)
                .any(|w| distance_to_segment(p, &w[0], &w[1]) <= tolerance),
        }
    }
}
