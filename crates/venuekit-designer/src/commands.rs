//! Layout mutations as values.
//!
//! Every edit of a scope is a [`LayoutCommand`] applied to the current
//! [`LayoutSnapshot`], producing the next one. Commands never mutate in
//! place, so history entries stay valid.

use crate::conflicts::active_boundary;
use crate::geometry::{Bounds, Point};
use crate::import::table_hints_from_name;
use crate::model::{Area, FieldValue, LayoutSnapshot, Seat, Table, TableField};
use venuekit_core::constants::DUPLICATE_OFFSET;
use venuekit_core::LayoutError;
use venuekit_settings::{CeremonyLayoutSettings, ScoringOverrides, VenueSettings};

#[derive(Debug, Clone, PartialEq)]
#[allow(clippy::large_enum_variant)]
pub enum LayoutCommand {
    AddTable { table: Table },
    UpdateTable { id: u32, field: TableField, value: FieldValue },
    MoveTable { id: u32, position: Point },
    DeleteTable { id: u32 },
    /// Removes several tables at once. Ids that are already gone are
    /// skipped; it fails only when none of them exist.
    DeleteTables { ids: Vec<u32> },
    /// Copies table `id` as `new_id`, or the next id when `new_id` is taken.
    DuplicateTable { id: u32, new_id: u32 },
    ToggleLocked { id: u32 },
    /// Shifts a table so its box lies inside the boundary, or the venue
    /// rectangle when there is none.
    ClampTable { id: u32 },
    ReplaceTables { tables: Vec<Table> },
    AddArea { area: Area },
    UpdateArea { index: usize, area: Area },
    SetSegmentLength { index: usize, segment: usize, length: f64 },
    DeleteArea { index: usize },
    ReplaceSeats { seats: Vec<Seat> },
    ToggleSeat { id: u32 },
    SetSeatReservation { id: u32, label: Option<String> },
    ConfigureVenue { venue: VenueSettings },
    SetCeremonyLayout { settings: CeremonyLayoutSettings },
    SetScoring { overrides: ScoringOverrides },
    /// Replaces the whole layout, e.g. when a named snapshot is loaded.
    ReplaceLayout { snapshot: LayoutSnapshot },
}

impl LayoutCommand {
    /// Short label for history and change notifications.
    pub fn name(&self) -> &'static str {
        match self {
            Self::AddTable { .. } => "Add Table",
            Self::UpdateTable { .. } => "Update Table",
            Self::MoveTable { .. } => "Move Table",
            Self::DeleteTable { .. } => "Delete Table",
            Self::DeleteTables { .. } => "Delete Tables",
            Self::DuplicateTable { .. } => "Duplicate Table",
            Self::ToggleLocked { .. } => "Toggle Lock",
            Self::ClampTable { .. } => "Move Table Inside",
            Self::ReplaceTables { .. } => "Generate Tables",
            Self::AddArea { .. } => "Add Area",
            Self::UpdateArea { .. } => "Update Area",
            Self::SetSegmentLength { .. } => "Set Segment Length",
            Self::DeleteArea { .. } => "Delete Area",
            Self::ReplaceSeats { .. } => "Generate Seats",
            Self::ToggleSeat { .. } => "Toggle Seat",
            Self::SetSeatReservation { .. } => "Reserve Seat",
            Self::ConfigureVenue { .. } => "Configure Venue",
            Self::SetCeremonyLayout { .. } => "Ceremony Layout",
            Self::SetScoring { .. } => "Scoring Weights",
            Self::ReplaceLayout { .. } => "Load Snapshot",
        }
    }

    /// Table the command targets, if any.
    pub fn table_id(&self) -> Option<u32> {
        match self {
            Self::UpdateTable { id, .. }
            | Self::MoveTable { id, .. }
            | Self::DeleteTable { id }
            | Self::DuplicateTable { id, .. }
            | Self::ToggleLocked { id }
            | Self::ClampTable { id } => Some(*id),
            _ => None,
        }
    }

    /// Produces the snapshot that results from applying this command.
    pub fn apply(&self, current: &LayoutSnapshot) -> Result<LayoutSnapshot, LayoutError> {
        let mut next = current.clone();
        match self {
            Self::AddTable { table } => {
                let mut table = table.clone();
                if current.table(table.id).is_some() {
                    table.id = current.next_table_id();
                }
                table.refresh_capacity();
                fill_name_hints(&mut table, None);
                next.tables_mut().push(table);
            }
            Self::UpdateTable { id, field, value } => {
                let table = table_mut(&mut next, *id)?;
                let old_name = table.name.clone();
                table.apply_field(*field, value);
                if *field == TableField::Name && table.name != old_name {
                    fill_name_hints(table, Some(&old_name));
                }
            }
            Self::MoveTable { id, position } => {
                if position.is_finite() {
                    table_mut(&mut next, *id)?.position = *position;
                } else {
                    table_mut(&mut next, *id)?;
                }
            }
            Self::DeleteTable { id } => {
                let index = current
                    .table_index(*id)
                    .ok_or(LayoutError::TableNotFound { id: *id })?;
                next.tables_mut().remove(index);
            }
            Self::DeleteTables { ids } => {
                let tables = next.tables_mut();
                let before = tables.len();
                tables.retain(|t| !ids.contains(&t.id));
                if tables.len() == before {
                    if let Some(&id) = ids.first() {
                        return Err(LayoutError::TableNotFound { id });
                    }
                }
            }
            Self::DuplicateTable { id, new_id } => {
                let source = current
                    .table(*id)
                    .ok_or(LayoutError::TableNotFound { id: *id })?;
                let mut copy = source.clone();
                copy.id = if current.table(*new_id).is_some() {
                    current.next_table_id()
                } else {
                    *new_id
                };
                copy.name = format!("{} (copy)", source.name);
                copy.position = source.position + Point::new(DUPLICATE_OFFSET, DUPLICATE_OFFSET);
                copy.locked = false;
                next.tables_mut().push(copy);
            }
            Self::ToggleLocked { id } => {
                let table = table_mut(&mut next, *id)?;
                table.locked = !table.locked;
            }
            Self::ClampTable { id } => {
                let container = active_boundary(&current.areas)
                    .and_then(Area::bounds)
                    .unwrap_or_else(|| {
                        let venue = &current.settings.venue;
                        Bounds::new(0.0, 0.0, venue.width, venue.height)
                    });
                let table = table_mut(&mut next, *id)?;
                table.position = clamp_into(&table.bounds(), table.position, &container);
            }
            Self::ReplaceTables { tables } => {
                *next.tables_mut() = tables.clone();
            }
            Self::AddArea { area } => {
                next.areas_mut().push(area.clone());
            }
            Self::UpdateArea { index, area } => {
                *area_mut(&mut next, *index)? = area.clone();
            }
            Self::SetSegmentLength {
                index,
                segment,
                length,
            } => {
                let area = area_mut(&mut next, *index)?;
                set_segment_length(area, *index, *segment, *length)?;
            }
            Self::DeleteArea { index } => {
                if *index >= current.areas.len() {
                    return Err(LayoutError::AreaNotFound { index: *index });
                }
                next.areas_mut().remove(*index);
            }
            Self::ReplaceSeats { seats } => {
                *next.seats_mut() = seats.clone();
            }
            Self::ToggleSeat { id } => {
                let seat = seat_mut(&mut next, *id)?;
                seat.enabled = !seat.enabled;
            }
            Self::SetSeatReservation { id, label } => {
                let seat = seat_mut(&mut next, *id)?;
                seat.reservation = label
                    .as_deref()
                    .map(str::trim)
                    .filter(|l| !l.is_empty())
                    .map(str::to_string);
            }
            Self::ConfigureVenue { venue } => {
                next.settings_mut().venue = *venue;
            }
            Self::SetCeremonyLayout { settings } => {
                next.settings_mut().ceremony = settings.clone();
            }
            Self::SetScoring { overrides } => {
                next.settings_mut().scoring = *overrides;
            }
            Self::ReplaceLayout { snapshot } => {
                next = snapshot.clone();
            }
        }
        Ok(next)
    }
}

fn table_mut(snapshot: &mut LayoutSnapshot, id: u32) -> Result<&mut Table, LayoutError> {
    let index = snapshot
        .table_index(id)
        .ok_or(LayoutError::TableNotFound { id })?;
    Ok(&mut snapshot.tables_mut()[index])
}

/// Fills side and VIP hints from the table name when none are set.
/// Derives side and VIP hints from the table name. On a rename, hints
/// that came from the old name follow the new one; hints set by hand
/// stay.
fn fill_name_hints(table: &mut Table, old_name: Option<&str>) {
    let (side, vip) = table_hints_from_name(&table.name);
    let (old_side, old_vip) = old_name.map_or((None, false), table_hints_from_name);
    if table.side_hint.is_none() || (old_side.is_some() && table.side_hint == old_side) {
        table.side_hint = side;
    }
    if old_vip && table.vip {
        table.vip = vip;
    } else {
        table.vip |= vip;
    }
}

fn area_mut(snapshot: &mut LayoutSnapshot, index: usize) -> Result<&mut Area, LayoutError> {
    if index >= snapshot.areas.len() {
        return Err(LayoutError::AreaNotFound { index });
    }
    Ok(&mut snapshot.areas_mut()[index])
}

fn seat_mut(snapshot: &mut LayoutSnapshot, id: u32) -> Result<&mut Seat, LayoutError> {
    let index = snapshot
        .seat_index(id)
        .ok_or(LayoutError::SeatNotFound { id })?;
    Ok(&mut snapshot.seats_mut()[index])
}

/// Rescales segment `segment` to `length`, keeping its start and direction.
/// A closed outline stays closed when its last segment is edited.
fn set_segment_length(
    area: &mut Area,
    index: usize,
    segment: usize,
    length: f64,
) -> Result<(), LayoutError> {
    let (start, end) = area
        .segment(segment)
        .ok_or(LayoutError::SegmentOutOfRange { index, segment })?;
    if !length.is_finite() || length <= 0.0 {
        return Ok(());
    }
    let was_closed = area.is_closed();
    let direction = (end - start).normalized().unwrap_or(Point::new(1.0, 0.0));
    let new_end = start + direction * length;

    let last = area.points.len() - 1;
    area.points[segment + 1] = new_end;
    if was_closed && segment + 1 == last {
        area.points[0] = new_end;
    }
    Ok(())
}

/// Position that moves `bounds` the least while fitting it in `container`.
/// Oversized boxes are centred on that axis.
fn clamp_into(bounds: &Bounds, position: Point, container: &Bounds) -> Point {
    let shift = |min: f64, max: f64, lo: f64, hi: f64| -> f64 {
        if max - min > hi - lo {
            (lo + hi) / 2.0 - (min + max) / 2.0
        } else if min < lo {
            lo - min
        } else if max > hi {
            hi - max
        } else {
            0.0
        }
    };
    let dx = shift(bounds.min_x, bounds.max_x, container.min_x, container.max_x);
    let dy = shift(bounds.min_y, bounds.max_y, container.min_y, container.max_y);
    Point::new(position.x + dx, position.y + dy)
}
