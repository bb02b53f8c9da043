//! Table type inference and seat capacity.
//!
//! Capacity is derived from the table footprint: one guest per
//! [`SEAT_SPACING`] of usable edge, with per-type minimums.

use std::f64::consts::PI;
use venuekit_core::constants::{
    COCKTAIL_SEATS, IMPERIAL_ASPECT_RATIO, IMPERIAL_HEAD_MIN_WIDTH, MIN_IMPERIAL_SEATS,
    MIN_ROUND_SQUARE_SEATS, SEAT_SPACING,
};
use venuekit_core::{TableShape, TableType};

/// Outline dimensions of a table, independent of position and rotation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Footprint {
    pub shape: TableShape,
    pub diameter: f64,
    pub width: f64,
    pub height: f64,
}

impl Footprint {
    pub fn circle(diameter: f64) -> Self {
        Self {
            shape: TableShape::Circle,
            diameter,
            width: diameter,
            height: diameter,
        }
    }

    pub fn rectangle(width: f64, height: f64) -> Self {
        Self {
            shape: TableShape::Rectangle,
            diameter: width.max(height),
            width,
            height,
        }
    }

    /// Unrotated extent as `(width, height)`.
    pub fn extent(&self) -> (f64, f64) {
        match self.shape {
            TableShape::Circle => (self.diameter, self.diameter),
            TableShape::Rectangle => (self.width, self.height),
        }
    }

    pub fn perimeter(&self) -> f64 {
        match self.shape {
            TableShape::Circle => PI * self.diameter,
            TableShape::Rectangle => 2.0 * (self.width + self.height),
        }
    }

    pub fn long_side(&self) -> f64 {
        let (w, h) = self.extent();
        w.max(h)
    }

    pub fn short_side(&self) -> f64 {
        let (w, h) = self.extent();
        w.min(h)
    }
}

/// Resolves the effective table type.
///
/// A declared type always wins. Otherwise circles are round tables and
/// rectangles become imperial once their aspect ratio reaches
/// [`IMPERIAL_ASPECT_RATIO`], square below it.
pub fn infer_table_type(declared: Option<TableType>, footprint: &Footprint) -> TableType {
    if let Some(declared) = declared {
        return declared;
    }
    match footprint.shape {
        TableShape::Circle => TableType::Round,
        TableShape::Rectangle => {
            let short = footprint.short_side();
            if short > 0.0 && footprint.long_side() / short >= IMPERIAL_ASPECT_RATIO {
                TableType::Imperial
            } else {
                TableType::Square
            }
        }
    }
}

/// Seats a table of this type and footprint holds.
pub fn compute_capacity(table_type: TableType, footprint: &Footprint) -> u32 {
    match table_type {
        TableType::Round | TableType::Square => {
            seats_along(footprint.perimeter()).max(MIN_ROUND_SQUARE_SEATS)
        }
        TableType::Imperial => {
            let mut seats = seats_along(footprint.long_side()) * 2;
            if footprint.short_side() >= IMPERIAL_HEAD_MIN_WIDTH {
                seats += 2;
            }
            seats.max(MIN_IMPERIAL_SEATS)
        }
        TableType::Cocktail => COCKTAIL_SEATS,
        TableType::Auxiliary => 0,
    }
}

fn seats_along(length: f64) -> u32 {
    if !length.is_finite() || length <= 0.0 {
        return 0;
    }
    (length / SEAT_SPACING).floor() as u32
}
