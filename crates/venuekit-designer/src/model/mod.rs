//! Layout data model: areas, tables, seats, guests and snapshots.

mod area;
mod guest;
mod seat;
mod snapshot;
mod table;

pub use area::Area;
pub use guest::{Assignment, Guest, GuestId};
pub use seat::Seat;
pub use snapshot::{LayoutSnapshot, ScopeSettings};
pub use table::{FieldValue, Table, TableField, MAX_TABLE_DIMENSION, MIN_TABLE_DIMENSION};

pub(crate) use table::normalize_degrees;
