//! Drawing type definitions: DrawMode, Modifiers, DrawKey, DrawOutcome, DrawPreview.

use crate::geometry::Point;
use crate::model::Area;
use venuekit_core::AreaKind;

/// Drawing tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawMode {
    /// Freehand stroke, smoothed on finish.
    Free,
    /// Freehand stroke intended as a curve, smoothed on finish.
    Curve,
    /// Click-by-click polygon that closes into a boundary.
    Boundary,
    /// Single drag segment.
    Line,
    /// Axis-aligned rectangle dragged from a corner.
    Rect,
    /// Removes the area under the pointer.
    Erase,
}

impl DrawMode {
    /// Kind given to areas finished in this mode when no override is set.
    pub fn default_area_kind(&self) -> AreaKind {
        match self {
            Self::Free | Self::Curve | Self::Erase => AreaKind::Freeform,
            Self::Boundary => AreaKind::Boundary,
            Self::Line => AreaKind::Aisle,
            Self::Rect => AreaKind::Obstacle,
        }
    }

    /// Vertices required before the gesture can be finished.
    pub fn min_points(&self) -> usize {
        match self {
            Self::Free | Self::Curve | Self::Boundary => 3,
            Self::Line => 2,
            Self::Rect => 4,
            Self::Erase => usize::MAX,
        }
    }

    pub fn is_freehand(&self) -> bool {
        matches!(self, Self::Free | Self::Curve)
    }
}

/// Keyboard modifiers held during a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    /// Constrain the new point horizontally or vertically.
    pub axis_snap: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers { axis_snap: false };
    pub const AXIS_SNAP: Modifiers = Modifiers { axis_snap: true };
}

/// Keyboard commands understood while drawing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawKey {
    /// Finish the gesture.
    Enter,
    /// Discard the gesture.
    Escape,
    /// Remove the last vertex.
    UndoPoint,
    /// Ask for an exact length for the next boundary segment.
    ExactLength,
}

/// Result of feeding an event to the drawing engine.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOutcome {
    /// Nothing changed.
    Ignored,
    /// The in-progress gesture changed; redraw the preview.
    Updated,
    /// The engine is waiting for [`super::DrawingEngine::submit_length`].
    AwaitingLength,
    /// The gesture produced an area. Emitted once per gesture.
    Finalized(Area),
    /// The area at this index should be removed.
    Erase(usize),
    /// The gesture was discarded.
    Canceled,
}

/// What to render for the gesture in progress.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DrawPreview {
    pub points: Vec<Point>,
    /// Rubber-band segment from the last vertex to the pointer.
    pub cursor_segment: Option<(Point, Point)>,
    /// The outline should be shown closed.
    pub closed: bool,
    pub kind: Option<AreaKind>,
}
