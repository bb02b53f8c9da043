//! Ceremony seats.

use crate::geometry::Point;
use serde::{Deserialize, Serialize};

/// A single ceremony chair.
///
/// Occupancy is not stored here; it is derived from guest assignments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Seat {
    pub id: u32,
    pub position: Point,
    pub row: u32,
    pub col: u32,
    pub enabled: bool,
    /// Locked seats are kept out of automatic placement.
    pub locked: bool,
    /// Reservation label such as "VIP".
    pub reservation: Option<String>,
}

impl Seat {
    pub fn new(id: u32, position: Point, row: u32, col: u32) -> Self {
        Self {
            id,
            position,
            row,
            col,
            enabled: true,
            locked: false,
            reservation: None,
        }
    }

    pub fn is_reserved(&self) -> bool {
        self.reservation.is_some()
    }

    /// Human-readable label, 1-based: `R1C4`.
    pub fn label(&self) -> String {
        format!("R{}C{}", self.row + 1, self.col + 1)
    }
}
