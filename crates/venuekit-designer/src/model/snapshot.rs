//! Immutable per-scope layout state.

use super::{Area, Seat, Table};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use venuekit_settings::{CeremonyLayoutSettings, ScoringOverrides, VenueSettings};

/// Settings that travel with a scope's layout and its undo history.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScopeSettings {
    pub venue: VenueSettings,
    pub ceremony: CeremonyLayoutSettings,
    pub scoring: ScoringOverrides,
}

/// Areas, tables, seats and settings of one scope at one point in time.
///
/// Collections are shared between snapshots; a mutation clones only the
/// collection it touches.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LayoutSnapshot {
    pub areas: Arc<Vec<Area>>,
    pub tables: Arc<Vec<Table>>,
    pub seats: Arc<Vec<Seat>>,
    pub settings: Arc<ScopeSettings>,
}

impl LayoutSnapshot {
    pub fn with_settings(settings: ScopeSettings) -> Self {
        Self {
            settings: Arc::new(settings),
            ..Self::default()
        }
    }

    pub fn table(&self, id: u32) -> Option<&Table> {
        self.tables.iter().find(|t| t.id == id)
    }

    pub fn table_index(&self, id: u32) -> Option<usize> {
        self.tables.iter().position(|t| t.id == id)
    }

    pub fn seat(&self, id: u32) -> Option<&Seat> {
        self.seats.iter().find(|s| s.id == id)
    }

    pub fn seat_index(&self, id: u32) -> Option<usize> {
        self.seats.iter().position(|s| s.id == id)
    }

    /// One past the highest table id in use.
    pub fn next_table_id(&self) -> u32 {
        self.tables.iter().map(|t| t.id).max().unwrap_or(0) + 1
    }

    pub fn tables_mut(&mut self) -> &mut Vec<Table> {
        Arc::make_mut(&mut self.tables)
    }

    pub fn areas_mut(&mut self) -> &mut Vec<Area> {
        Arc::make_mut(&mut self.areas)
    }

    pub fn seats_mut(&mut self) -> &mut Vec<Seat> {
        Arc::make_mut(&mut self.seats)
    }

    pub fn settings_mut(&mut self) -> &mut ScopeSettings {
        Arc::make_mut(&mut self.settings)
    }

    /// Whether both snapshots point at the same table collection.
    pub fn shares_tables_with(&self, other: &LayoutSnapshot) -> bool {
        Arc::ptr_eq(&self.tables, &other.tables)
    }

    pub fn shares_areas_with(&self, other: &LayoutSnapshot) -> bool {
        Arc::ptr_eq(&self.areas, &other.areas)
    }
}
