//! Tuning constants for the layout engine.
//!
//! All lengths are world units (centimetres) unless the name says otherwise.

/// Table edge length reserved for one guest.
pub const SEAT_SPACING: f64 = 60.0;

/// Minimum short side for an imperial table to take a guest at each head.
pub const IMPERIAL_HEAD_MIN_WIDTH: f64 = 80.0;

/// Aspect ratio from which a rectangular table is treated as imperial.
pub const IMPERIAL_ASPECT_RATIO: f64 = 1.6;

/// Lower bound for round and square table capacity.
pub const MIN_ROUND_SQUARE_SEATS: u32 = 4;

/// Lower bound for imperial table capacity.
pub const MIN_IMPERIAL_SEATS: u32 = 6;

/// Fixed capacity of a cocktail (standing) table.
pub const COCKTAIL_SEATS: u32 = 4;

/// Upper bound accepted for a manually entered seat count.
pub const MAX_TABLE_SEATS: u32 = 64;

/// Auto-close radius for boundary drawing, in screen pixels.
pub const AUTO_CLOSE_RADIUS_PX: f64 = 20.0;

/// Raw points retained for a single freehand gesture.
pub const FREEHAND_POINT_CAP: usize = 4000;

/// Default number of undo steps kept per scope.
pub const DEFAULT_HISTORY_DEPTH: usize = 100;

/// Offset applied to a duplicated table, on both axes.
pub const DUPLICATE_OFFSET: f64 = 30.0;

/// Distance from the table edge to the centre of a rendered seat.
pub const SEAT_RING_OFFSET: f64 = 25.0;

/// Radius used when picking a ceremony seat with the pointer.
pub const SEAT_PICK_RADIUS: f64 = 30.0;

/// Hit tolerance, in screen pixels, for erasing a drawn area.
pub const ERASE_TOLERANCE_PX: f64 = 8.0;

/// Fit-to-view padding as a fraction of the viewport.
pub const VIEW_PADDING: f64 = 0.05;
