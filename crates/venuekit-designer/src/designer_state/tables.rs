use super::DesignerState;
use crate::commands::LayoutCommand;
use crate::generators::{banquet_grid_from, seat_grid};
use crate::geometry::Point;
use crate::model::{FieldValue, Table, TableField};
use venuekit_core::{LayoutError, Scope, TableType};
use venuekit_settings::{
    BanquetLayoutSettings, CeremonyLayoutSettings, ScoringOverrides, VenueSettings,
};

impl DesignerState {
    pub fn tables(&self) -> &[Table] {
        &self.snapshot().tables
    }

    pub fn table(&self, id: u32) -> Option<&Table> {
        self.snapshot().table(id)
    }

    /// Adds a table from a template; without a position it lands in the
    /// middle of the venue. Returns the new id.
    pub fn add_table(
        &mut self,
        template: TableType,
        position: Option<Point>,
    ) -> Result<u32, LayoutError> {
        let snapshot = self.snapshot();
        let venue = &snapshot.settings.venue;
        let position = position
            .filter(Point::is_finite)
            .unwrap_or_else(|| Point::new(venue.width / 2.0, venue.height / 2.0));
        let id = self.next_free_table_id(self.active);
        let table = Table::from_template(id, template, position);
        self.dispatch(LayoutCommand::AddTable { table })?;
        Ok(id)
    }

    /// Edits one table field with lenient coercion. Position edits are
    /// refused on a locked table.
    pub fn update_table_field(
        &mut self,
        id: u32,
        field: TableField,
        value: impl Into<FieldValue>,
    ) -> Result<(), LayoutError> {
        if matches!(field, TableField::X | TableField::Y) {
            self.ensure_movable(id)?;
        }
        self.dispatch(LayoutCommand::UpdateTable {
            id,
            field,
            value: value.into(),
        })
    }

    /// Shows a table at `position` without recording the move.
    pub fn preview_move(&mut self, id: u32, position: Point) -> Result<(), LayoutError> {
        self.ensure_movable(id)?;
        self.preview(LayoutCommand::MoveTable { id, position })
    }

    /// Moves a table and records the move as one undo step.
    pub fn commit_move(&mut self, id: u32, position: Point) -> Result<(), LayoutError> {
        self.ensure_movable(id)?;
        self.dispatch(LayoutCommand::MoveTable { id, position })
    }

    /// Deletes a table. Guests assigned to it keep their assignment, which
    /// is ignored until the table comes back through undo or is pruned.
    pub fn delete_table(&mut self, id: u32) -> Result<(), LayoutError> {
        self.dispatch(LayoutCommand::DeleteTable { id })?;
        self.scope_state_mut(self.active).selection.remove(&id);
        Ok(())
    }

    /// Deletes every selected table as a single undo step.
    pub fn delete_selected(&mut self) -> Result<usize, LayoutError> {
        let selected: Vec<u32> = self.selection().iter().copied().collect();
        if selected.is_empty() {
            return Ok(0);
        }
        for id in &selected {
            self.ensure_not_held(self.active, *id)?;
        }
        let before = self.committed_snapshot(self.active).tables.len();
        self.dispatch(LayoutCommand::DeleteTables { ids: selected })?;
        let removed = before - self.committed_snapshot(self.active).tables.len();
        self.clear_selection();
        Ok(removed)
    }

    /// Copies a table next to the original. Returns the copy's id.
    pub fn duplicate_table(&mut self, id: u32) -> Result<u32, LayoutError> {
        let new_id = self.next_free_table_id(self.active);
        self.dispatch(LayoutCommand::DuplicateTable { id, new_id })?;
        Ok(new_id)
    }

    pub fn toggle_locked(&mut self, id: u32) -> Result<(), LayoutError> {
        self.dispatch(LayoutCommand::ToggleLocked { id })
    }

    /// Moves a table the shortest distance that brings it inside the venue.
    pub fn clamp_table_into_venue(&mut self, id: u32) -> Result<(), LayoutError> {
        self.dispatch(LayoutCommand::ClampTable { id })
    }

    pub fn toggle_seat(&mut self, id: u32) -> Result<(), LayoutError> {
        self.dispatch(LayoutCommand::ToggleSeat { id })
    }

    /// Sets or clears (`None` or blank) a seat's reservation label.
    pub fn set_seat_reservation(
        &mut self,
        id: u32,
        label: Option<String>,
    ) -> Result<(), LayoutError> {
        self.dispatch(LayoutCommand::SetSeatReservation { id, label })
    }

    pub fn configure_venue(&mut self, venue: VenueSettings) -> Result<(), LayoutError> {
        self.dispatch(LayoutCommand::ConfigureVenue { venue })
    }

    pub fn set_scoring_overrides(&mut self, overrides: ScoringOverrides) -> Result<(), LayoutError> {
        self.dispatch(LayoutCommand::SetScoring { overrides })
    }

    pub fn set_ceremony_layout(
        &mut self,
        settings: CeremonyLayoutSettings,
    ) -> Result<(), LayoutError> {
        self.dispatch_in(Scope::Ceremony, LayoutCommand::SetCeremonyLayout { settings })
    }

    /// Replaces the ceremony seats with a grid built from the ceremony
    /// layout settings.
    pub fn generate_seat_grid(&mut self) -> Result<usize, LayoutError> {
        let settings = self.snapshot_of(Scope::Ceremony).settings.ceremony.clone();
        let seats = seat_grid(&settings);
        let count = seats.len();
        self.dispatch_in(Scope::Ceremony, LayoutCommand::ReplaceSeats { seats })?;
        Ok(count)
    }

    /// Replaces every banquet table with a generated grid. Ids start above
    /// any id guests are still assigned to, so those assignments dangle
    /// instead of landing on a generated table.
    pub fn generate_banquet_layout(
        &mut self,
        settings: Option<&BanquetLayoutSettings>,
    ) -> Result<usize, LayoutError> {
        let first_id = self.first_unreferenced_table_id(Scope::Banquet);
        let tables = banquet_grid_from(settings.unwrap_or(&self.banquet_defaults), first_id);
        let count = tables.len();
        self.dispatch_in(Scope::Banquet, LayoutCommand::ReplaceTables { tables })?;
        Ok(count)
    }

    fn ensure_movable(&self, id: u32) -> Result<(), LayoutError> {
        let table = self
            .committed_snapshot(self.active)
            .table(id)
            .ok_or(LayoutError::TableNotFound { id })?;
        if table.locked {
            return Err(LayoutError::TableLocked { id, by: None });
        }
        Ok(())
    }
}
