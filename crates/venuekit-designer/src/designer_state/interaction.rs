use super::DesignerState;
use crate::geometry::Point;
use crate::hit_test::{seat_at, seat_index_at, table_at};
use crate::model::Assignment;
use venuekit_core::constants::SEAT_PICK_RADIUS;
use venuekit_core::{LayoutError, Scope};

/// A table being dragged on the floor plan.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    pub scope: Scope,
    pub table_id: u32,
    /// Pointer position relative to the table centre at grab time.
    pub grab_offset: Point,
}

impl DesignerState {
    /// Table under a screen position.
    pub fn table_at_screen(&self, screen: Point) -> Option<u32> {
        let world = self.viewport.screen_to_world(&screen);
        table_at(&self.snapshot().tables, &world)
    }

    /// Table and seat slot under a screen position.
    pub fn seat_slot_at_screen(&self, screen: Point) -> Option<(u32, u32)> {
        let world = self.viewport.screen_to_world(&screen);
        let table_id = table_at(&self.snapshot().tables, &world)?;
        let table = self.snapshot().table(table_id)?;
        seat_index_at(table, &world).map(|slot| (table_id, slot))
    }

    /// Starts dragging the table under the pointer. Returns its id, or
    /// `None` when the pointer is over empty floor.
    pub fn begin_table_drag(&mut self, screen: Point) -> Result<Option<u32>, LayoutError> {
        let world = self.viewport.screen_to_world(&screen);
        let Some(table_id) = table_at(&self.snapshot().tables, &world) else {
            return Ok(None);
        };
        self.ensure_not_held(self.active, table_id)?;
        let table = self
            .snapshot()
            .table(table_id)
            .ok_or(LayoutError::TableNotFound { id: table_id })?;
        if table.locked {
            return Err(LayoutError::TableLocked {
                id: table_id,
                by: None,
            });
        }
        let grab_offset = world - table.position;
        self.drag = Some(DragSession {
            scope: self.active,
            table_id,
            grab_offset,
        });
        self.select_table(table_id, false)?;
        Ok(Some(table_id))
    }

    pub fn drag_session(&self) -> Option<&DragSession> {
        self.drag.as_ref()
    }

    /// Moves the dragged table so the grab point follows the pointer.
    pub fn drag_table_to(&mut self, screen: Point) -> Result<(), LayoutError> {
        let Some(drag) = self.drag else {
            return Ok(());
        };
        let world = self.viewport.screen_to_world(&screen);
        self.preview_move(drag.table_id, world - drag.grab_offset)
    }

    /// Drops the dragged table, recording the move. Returns whether a drag
    /// was in progress.
    pub fn end_table_drag(&mut self, screen: Point) -> Result<bool, LayoutError> {
        let Some(drag) = self.drag.take() else {
            return Ok(false);
        };
        let world = self.viewport.screen_to_world(&screen);
        self.commit_move(drag.table_id, world - drag.grab_offset)?;
        Ok(true)
    }

    /// Abandons a drag and restores the committed layout.
    pub fn cancel_table_drag(&mut self) {
        if self.drag.take().is_some() {
            self.discard_preview();
        }
    }

    /// Assigns a guest dropped at a screen position.
    ///
    /// In the ceremony the nearest seat within [`SEAT_PICK_RADIUS`] wins;
    /// otherwise the table under the pointer. A drop on the seat ring
    /// rather than the table top picks that seat slot. Returns `None` when
    /// the drop landed on empty floor.
    pub fn drop_guest(
        &mut self,
        guest_id: &str,
        screen: Point,
    ) -> Result<Option<Assignment>, LayoutError> {
        let world = self.viewport.screen_to_world(&screen);
        let snapshot = self.snapshot();

        let seat = if self.active == Scope::Ceremony {
            seat_at(&snapshot.seats, &world, SEAT_PICK_RADIUS)
        } else {
            None
        };
        let assignment = match seat {
            Some(seat_id) => Some(Assignment::Seat { seat_id }),
            None => table_at(&snapshot.tables, &world).map(|table_id| {
                let seat = snapshot
                    .table(table_id)
                    .filter(|t| !t.contains_point(&world, 0.0))
                    .and_then(|t| seat_index_at(t, &world));
                Assignment::Table { table_id, seat }
            }),
        };

        match assignment {
            Some(assignment) => {
                self.assign_guest(guest_id, assignment)?;
                let scope = self.active;
                Ok(self.guest(guest_id).and_then(|g| g.assignment(scope)))
            }
            None => Ok(None),
        }
    }
}
