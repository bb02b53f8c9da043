//! Drawing capture for venue areas.
//!
//! [`DrawingEngine`] turns pointer and keyboard events, already converted
//! to world coordinates, into finished [`Area`]s. It owns no layout state:
//! callers apply the returned [`DrawOutcome`].

mod types;

pub use types::{DrawKey, DrawMode, DrawOutcome, DrawPreview, Modifiers};

use crate::geometry::{axis_snap, chaikin_smooth, Point};
use crate::model::Area;
use venuekit_core::constants::{AUTO_CLOSE_RADIUS_PX, ERASE_TOLERANCE_PX, FREEHAND_POINT_CAP};
use venuekit_core::AreaKind;

/// Gesture state machine for the drawing tools.
#[derive(Debug, Clone)]
pub struct DrawingEngine {
    mode: Option<DrawMode>,
    kind_override: Option<AreaKind>,
    points: Vec<Point>,
    anchor: Option<Point>,
    drawing: bool,
    dragging: bool,
    cursor: Option<Point>,
    closed_preview: bool,
    awaiting_length: bool,
    scale: f64,
}

impl DrawingEngine {
    /// Creates an idle engine with no tool selected.
    pub fn new() -> Self {
        Self {
            mode: None,
            kind_override: None,
            points: Vec::new(),
            anchor: None,
            drawing: false,
            dragging: false,
            cursor: None,
            closed_preview: false,
            awaiting_length: false,
            scale: 1.0,
        }
    }

    /// Selects a tool. Any gesture in progress is discarded.
    pub fn set_mode(&mut self, mode: Option<DrawMode>) {
        if self.drawing {
            tracing::debug!("Drawing mode changed mid-gesture; discarding {} points", self.points.len());
        }
        self.reset();
        self.mode = mode;
    }

    pub fn mode(&self) -> Option<DrawMode> {
        self.mode
    }

    /// Forces the kind of the next finished areas; `None` restores the
    /// per-mode default.
    pub fn set_area_kind(&mut self, kind: Option<AreaKind>) {
        self.kind_override = kind;
    }

    /// Kind the current gesture will produce.
    pub fn area_kind(&self) -> Option<AreaKind> {
        self.mode
            .map(|m| self.kind_override.unwrap_or_else(|| m.default_area_kind()))
    }

    /// Screen pixels per world unit; pixel tolerances are divided by it.
    pub fn set_scale(&mut self, scale: f64) {
        if scale.is_finite() && scale > 0.0 {
            self.scale = scale;
        }
    }

    pub fn is_drawing(&self) -> bool {
        self.drawing
    }

    pub fn is_awaiting_length(&self) -> bool {
        self.awaiting_length
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Auto-close radius in world units at the current scale.
    pub fn close_radius(&self) -> f64 {
        AUTO_CLOSE_RADIUS_PX / self.scale
    }

    pub fn pointer_down(&mut self, p: Point, mods: Modifiers, areas: &[Area]) -> DrawOutcome {
        let Some(mode) = self.mode else {
            return DrawOutcome::Ignored;
        };
        if !p.is_finite() {
            return DrawOutcome::Ignored;
        }
        match mode {
            DrawMode::Erase => {
                let tolerance = ERASE_TOLERANCE_PX / self.scale;
                areas
                    .iter()
                    .rposition(|a| a.hit_test(&p, tolerance))
                    .map(DrawOutcome::Erase)
                    .unwrap_or(DrawOutcome::Ignored)
            }
            DrawMode::Free | DrawMode::Curve => {
                let next = self.constrain(p, mods);
                self.push_point(next);
                self.drawing = true;
                self.dragging = true;
                DrawOutcome::Updated
            }
            DrawMode::Line | DrawMode::Rect => {
                self.points.clear();
                self.anchor = Some(p);
                self.drawing = true;
                self.dragging = true;
                self.drag_shape(mode, p, mods);
                DrawOutcome::Updated
            }
            DrawMode::Boundary => {
                if self.points.len() >= mode.min_points()
                    && p.distance_to(&self.points[0]) <= self.close_radius()
                {
                    return self.finish();
                }
                let next = self.constrain(p, mods);
                self.points.push(next);
                self.drawing = true;
                self.closed_preview = false;
                DrawOutcome::Updated
            }
        }
    }

    pub fn pointer_move(&mut self, p: Point, mods: Modifiers) -> DrawOutcome {
        let Some(mode) = self.mode else {
            return DrawOutcome::Ignored;
        };
        if !p.is_finite() {
            return DrawOutcome::Ignored;
        }
        match mode {
            DrawMode::Free | DrawMode::Curve if self.dragging => {
                let next = self.constrain(p, mods);
                if self.points.last() == Some(&next) {
                    return DrawOutcome::Ignored;
                }
                self.push_point(next);
                DrawOutcome::Updated
            }
            DrawMode::Line | DrawMode::Rect if self.dragging => {
                self.drag_shape(mode, p, mods);
                DrawOutcome::Updated
            }
            DrawMode::Boundary if self.drawing => {
                self.cursor = Some(self.constrain(p, mods));
                DrawOutcome::Updated
            }
            _ => {
                self.cursor = Some(p);
                DrawOutcome::Ignored
            }
        }
    }

    /// Ends a drag. The gesture stays open until finished or canceled.
    pub fn pointer_up(&mut self, p: Point, mods: Modifiers) -> DrawOutcome {
        if !self.dragging {
            return DrawOutcome::Ignored;
        }
        let outcome = self.pointer_move(p, mods);
        self.dragging = false;
        match outcome {
            DrawOutcome::Ignored => DrawOutcome::Updated,
            other => other,
        }
    }

    /// Finishes freehand strokes; visually closes a boundary.
    pub fn double_click(&mut self, _p: Point) -> DrawOutcome {
        match self.mode {
            Some(mode) if mode.is_freehand() => self.finish(),
            Some(DrawMode::Boundary) if self.points.len() >= 3 => {
                self.closed_preview = true;
                DrawOutcome::Updated
            }
            _ => DrawOutcome::Ignored,
        }
    }

    pub fn key(&mut self, key: DrawKey) -> DrawOutcome {
        match key {
            DrawKey::Enter => self.finish(),
            DrawKey::Escape => self.cancel(),
            DrawKey::UndoPoint => self.undo_point(),
            DrawKey::ExactLength => {
                if self.mode == Some(DrawMode::Boundary) && !self.points.is_empty() {
                    self.awaiting_length = true;
                    DrawOutcome::AwaitingLength
                } else {
                    DrawOutcome::Ignored
                }
            }
        }
    }

    /// Adds a boundary vertex at exactly `length` from the last one.
    ///
    /// The heading points at the cursor, else continues the last segment,
    /// else runs along +x. Non-positive or non-finite lengths are ignored.
    pub fn submit_length(&mut self, length: f64) -> DrawOutcome {
        if !self.awaiting_length {
            return DrawOutcome::Ignored;
        }
        self.awaiting_length = false;
        if !length.is_finite() || length <= 0.0 {
            return DrawOutcome::Ignored;
        }
        let Some(last) = self.points.last().copied() else {
            return DrawOutcome::Ignored;
        };
        let heading = self
            .cursor
            .and_then(|c| (c - last).normalized())
            .or_else(|| {
                let n = self.points.len();
                if n >= 2 {
                    (last - self.points[n - 2]).normalized()
                } else {
                    None
                }
            })
            .unwrap_or(Point::new(1.0, 0.0));
        self.points.push(last + heading * length);
        self.closed_preview = false;
        DrawOutcome::Updated
    }

    /// Closes the length prompt without adding a vertex.
    pub fn dismiss_length_prompt(&mut self) {
        self.awaiting_length = false;
    }

    /// Finalizes the gesture when it has enough vertices.
    pub fn finish(&mut self) -> DrawOutcome {
        let (Some(mode), Some(kind)) = (self.mode, self.area_kind()) else {
            return DrawOutcome::Ignored;
        };
        if !self.drawing || self.points.len() < mode.min_points() {
            return DrawOutcome::Ignored;
        }

        let points = std::mem::take(&mut self.points);
        let mut area = match mode {
            DrawMode::Free | DrawMode::Curve => Area::new(kind, chaikin_smooth(&points)),
            _ => Area::new(kind, points),
        };
        if mode == DrawMode::Boundary {
            area.close();
        }
        self.reset();
        tracing::debug!("Finalized {} area with {} points", area.kind, area.points.len());
        DrawOutcome::Finalized(area)
    }

    pub fn cancel(&mut self) -> DrawOutcome {
        if !self.drawing && !self.awaiting_length {
            return DrawOutcome::Ignored;
        }
        self.reset();
        DrawOutcome::Canceled
    }

    pub fn preview(&self) -> DrawPreview {
        let cursor_segment = match (self.mode, self.points.last(), self.cursor) {
            (Some(DrawMode::Boundary), Some(last), Some(cursor)) if !self.closed_preview => {
                Some((*last, cursor))
            }
            _ => None,
        };
        DrawPreview {
            points: self.points.clone(),
            cursor_segment,
            closed: self.closed_preview,
            kind: self.area_kind(),
        }
    }

    fn undo_point(&mut self) -> DrawOutcome {
        match self.mode {
            Some(DrawMode::Boundary | DrawMode::Free | DrawMode::Curve) if self.drawing => {
                self.points.pop();
                self.closed_preview = false;
                if self.points.is_empty() {
                    self.reset();
                }
                DrawOutcome::Updated
            }
            _ => DrawOutcome::Ignored,
        }
    }

    fn drag_shape(&mut self, mode: DrawMode, p: Point, mods: Modifiers) {
        let Some(start) = self.anchor else {
            return;
        };
        let end = if mods.axis_snap { axis_snap(&start, &p) } else { p };
        self.points = match mode {
            DrawMode::Rect => vec![
                start,
                Point::new(end.x, start.y),
                end,
                Point::new(start.x, end.y),
            ],
            _ => vec![start, end],
        };
    }

    fn constrain(&self, p: Point, mods: Modifiers) -> Point {
        match (mods.axis_snap, self.points.last()) {
            (true, Some(prev)) => axis_snap(prev, &p),
            _ => p,
        }
    }

    fn push_point(&mut self, p: Point) {
        if self.points.len() < FREEHAND_POINT_CAP {
            self.points.push(p);
        }
    }

    fn reset(&mut self) {
        self.points.clear();
        self.anchor = None;
        self.drawing = false;
        self.dragging = false;
        self.cursor = None;
        self.closed_preview = false;
        self.awaiting_length = false;
    }
}

impl Default for DrawingEngine {
    fn default() -> Self {
        Self::new()
    }
}
