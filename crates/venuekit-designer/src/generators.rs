//! Grid generators for ceremony seating and banquet tables.

use crate::geometry::Point;
use crate::model::{Seat, Table};
use venuekit_settings::{BanquetLayoutSettings, CeremonyLayoutSettings};

/// Ceremony chairs in rows and columns.
///
/// Columns at or after `aisle_after_col` shift right by `aisle_width`.
/// The first `vip_rows` rows carry the VIP reservation and are locked when
/// configured to be.
pub fn seat_grid(settings: &CeremonyLayoutSettings) -> Vec<Seat> {
    let mut seats = Vec::with_capacity((settings.rows * settings.cols) as usize);
    let aisle_col = settings
        .aisle_after_col
        .filter(|c| *c > 0 && *c < settings.cols);
    let first_id: u32 = 1;

    for row in 0..settings.rows {
        for col in 0..settings.cols {
            let mut x = settings.origin_x + col as f64 * settings.seat_gap;
            if aisle_col.is_some_and(|a| col >= a) {
                x += settings.aisle_width;
            }
            let y = settings.origin_y + row as f64 * settings.row_gap;
            let id = first_id + row * settings.cols + col;

            let mut seat = Seat::new(id, Point::new(x, y), row, col);
            if row < settings.vip_rows {
                seat.reservation = Some(settings.vip_label.clone());
                seat.locked = settings.lock_vip_seats;
            }
            seats.push(seat);
        }
    }
    tracing::debug!(
        "Generated {} ceremony seats ({}x{})",
        seats.len(),
        settings.rows,
        settings.cols
    );
    seats
}

/// Banquet tables of one template laid out on a grid, ids from 1.
pub fn banquet_grid(settings: &BanquetLayoutSettings) -> Vec<Table> {
    banquet_grid_from(settings, 1)
}

/// Same grid with ids counting up from `first_id`.
pub fn banquet_grid_from(settings: &BanquetLayoutSettings, first_id: u32) -> Vec<Table> {
    let mut tables = Vec::with_capacity((settings.rows * settings.cols) as usize);
    for row in 0..settings.rows {
        for col in 0..settings.cols {
            let id = first_id + row * settings.cols + col;
            let position = Point::new(
                settings.origin_x + col as f64 * settings.spacing_x,
                settings.origin_y + row as f64 * settings.spacing_y,
            );
            tables.push(Table::from_template(id, settings.table_type, position));
        }
    }
    tables
}
