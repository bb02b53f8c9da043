//! Viewport and coordinate transformation for the floor plan.
//!
//! Screen and world axes point the same way (y grows downward), so the
//! mapping is a uniform scale plus translation:
//!
//! ```text
//! screen = world * zoom + pan
//! world  = (screen - pan) / zoom
//! ```

use std::fmt;

use crate::geometry::{Bounds, Point};
use venuekit_core::constants::VIEW_PADDING;

/// Smallest accepted zoom factor.
pub const MIN_ZOOM: f64 = 0.1;
/// Largest accepted zoom factor.
pub const MAX_ZOOM: f64 = 50.0;

const ZOOM_STEP: f64 = 1.2;

/// Zoom and pan state of the floor plan view.
#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    zoom: f64,
    pan_x: f64,
    pan_y: f64,
    canvas_width: f64,
    canvas_height: f64,
}

impl Viewport {
    /// Creates a viewport at 1:1 with the world origin at the top-left.
    pub fn new(canvas_width: f64, canvas_height: f64) -> Self {
        Self {
            zoom: 1.0,
            pan_x: 0.0,
            pan_y: 0.0,
            canvas_width,
            canvas_height,
        }
    }

    pub fn canvas_width(&self) -> f64 {
        self.canvas_width
    }

    pub fn canvas_height(&self) -> f64 {
        self.canvas_height
    }

    /// Sets the canvas dimensions, typically after a window resize.
    pub fn set_canvas_size(&mut self, width: f64, height: f64) {
        self.canvas_width = width;
        self.canvas_height = height;
    }

    /// Screen pixels per world unit.
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Sets the zoom level, clamped to [`MIN_ZOOM`, `MAX_ZOOM`].
    pub fn set_zoom(&mut self, zoom: f64) {
        if zoom.is_finite() {
            self.zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
        }
    }

    pub fn zoom_in(&mut self) {
        self.set_zoom(self.zoom * ZOOM_STEP);
    }

    pub fn zoom_out(&mut self) {
        self.set_zoom(self.zoom / ZOOM_STEP);
    }

    pub fn pan_x(&self) -> f64 {
        self.pan_x
    }

    pub fn pan_y(&self) -> f64 {
        self.pan_y
    }

    pub fn set_pan(&mut self, x: f64, y: f64) {
        self.pan_x = x;
        self.pan_y = y;
    }

    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.pan_x += dx;
        self.pan_y += dy;
    }

    pub fn screen_to_world(&self, screen: &Point) -> Point {
        Point::new(
            (screen.x - self.pan_x) / self.zoom,
            (screen.y - self.pan_y) / self.zoom,
        )
    }

    pub fn world_to_screen(&self, world: &Point) -> Point {
        Point::new(
            world.x * self.zoom + self.pan_x,
            world.y * self.zoom + self.pan_y,
        )
    }

    /// Converts a screen distance (pixels) into world units.
    pub fn screen_distance_to_world(&self, pixels: f64) -> f64 {
        pixels / self.zoom
    }

    /// Fits `bounds` into the canvas, reserving `padding` (a fraction of
    /// the canvas) on each side, and centers it.
    pub fn fit_to_bounds(&mut self, bounds: &Bounds, padding: f64) {
        let width = bounds.width();
        let height = bounds.height();
        if width <= 0.0 || height <= 0.0 || !width.is_finite() || !height.is_finite() {
            return;
        }

        let padding_factor = (1.0 - padding * 2.0).max(0.0);
        let zoom_x = (self.canvas_width * padding_factor) / width;
        let zoom_y = (self.canvas_height * padding_factor) / height;
        let new_zoom = zoom_x.min(zoom_y).clamp(MIN_ZOOM, MAX_ZOOM);

        let offset_x = (self.canvas_width - width * new_zoom) / 2.0;
        let offset_y = (self.canvas_height - height * new_zoom) / 2.0;

        self.zoom = new_zoom;
        self.pan_x = offset_x - bounds.min_x * new_zoom;
        self.pan_y = offset_y - bounds.min_y * new_zoom;
    }

    /// Fits with the default padding.
    pub fn fit_to_view(&mut self, bounds: &Bounds) {
        self.fit_to_bounds(bounds, VIEW_PADDING);
    }

    /// Changes zoom while keeping `world_point` under the same screen pixel.
    pub fn zoom_to_point(&mut self, world_point: &Point, new_zoom: f64) {
        if !new_zoom.is_finite() {
            return;
        }
        let new_zoom = new_zoom.clamp(MIN_ZOOM, MAX_ZOOM);
        let anchor = self.world_to_screen(world_point);
        self.zoom = new_zoom;
        self.pan_x = anchor.x - world_point.x * new_zoom;
        self.pan_y = anchor.y - world_point.y * new_zoom;
    }

    pub fn zoom_in_at(&mut self, world_point: &Point) {
        self.zoom_to_point(world_point, self.zoom * ZOOM_STEP);
    }

    pub fn zoom_out_at(&mut self, world_point: &Point) {
        self.zoom_to_point(world_point, self.zoom / ZOOM_STEP);
    }

    pub fn center_on(&mut self, world_point: &Point) {
        self.pan_x = self.canvas_width / 2.0 - world_point.x * self.zoom;
        self.pan_y = self.canvas_height / 2.0 - world_point.y * self.zoom;
    }

    pub fn reset(&mut self) {
        self.zoom = 1.0;
        self.pan_x = 0.0;
        self.pan_y = 0.0;
    }
}

impl fmt::Display for Viewport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Zoom: {:.2}x | Pan: ({:.1}, {:.1})",
            self.zoom, self.pan_x, self.pan_y
        )
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1200.0, 800.0)
    }
}
