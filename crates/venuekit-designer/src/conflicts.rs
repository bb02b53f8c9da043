//! Layout conflict detection.
//!
//! Four checks run per scope:
//! - perimeter: every bounding-box corner of a table must lie inside the
//!   active boundary (the last closed boundary area); seats use their
//!   position
//! - obstacle: table boxes grown by half the minimum aisle must not overlap
//!   obstacle or door boxes; seats must not fall inside them
//! - spacing: grown table boxes must not overlap each other
//! - overbooking: assigned parties must leave room at the table
//!
//! A table outside the perimeter reports only that conflict. Disabled
//! tables, seats and areas are skipped.

use crate::geometry::{box_overlap, expand_box, point_in_polygon, Bounds};
use crate::model::{Area, Guest, Seat, Table};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;
use venuekit_core::{AreaKind, Scope};
use venuekit_settings::VenueSettings;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConflictKind {
    Perimeter,
    Obstacle,
    Spacing,
    Overbooking,
}

impl ConflictKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Perimeter => "perimeter",
            Self::Obstacle => "obstacle",
            Self::Spacing => "spacing",
            Self::Overbooking => "overbooking",
        }
    }
}

impl fmt::Display for ConflictKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The entity a conflict is reported against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "id", rename_all = "lowercase")]
pub enum ConflictSubject {
    Table(u32),
    Seat(u32),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conflict {
    pub kind: ConflictKind,
    pub subject: ConflictSubject,
    pub message: String,
}

impl Conflict {
    fn table(kind: ConflictKind, id: u32, message: String) -> Self {
        Self {
            kind,
            subject: ConflictSubject::Table(id),
            message,
        }
    }

    fn seat(kind: ConflictKind, id: u32, message: String) -> Self {
        Self {
            kind,
            subject: ConflictSubject::Seat(id),
            message,
        }
    }

    pub fn table_id(&self) -> Option<u32> {
        match self.subject {
            ConflictSubject::Table(id) => Some(id),
            ConflictSubject::Seat(_) => None,
        }
    }
}

/// Everything the detector reads for one scope.
#[derive(Debug, Clone, Copy)]
pub struct ConflictInput<'a> {
    pub scope: Scope,
    pub venue: &'a VenueSettings,
    pub areas: &'a [Area],
    pub tables: &'a [Table],
    pub seats: &'a [Seat],
    pub guests: &'a [Guest],
}

/// The last closed, enabled boundary area.
pub fn active_boundary(areas: &[Area]) -> Option<&Area> {
    areas
        .iter()
        .rev()
        .find(|a| a.enabled && a.kind == AreaKind::Boundary && a.is_closed())
}

/// Seats taken per table by assigned parties in `scope`.
///
/// Assignments to tables that no longer exist are ignored.
pub fn table_usage(scope: Scope, tables: &[Table], guests: &[Guest]) -> HashMap<u32, u32> {
    let known: HashSet<u32> = tables.iter().map(|t| t.id).collect();
    let mut usage = HashMap::new();
    for guest in guests {
        if let Some(table_id) = guest.table_in(scope) {
            if known.contains(&table_id) {
                *usage.entry(table_id).or_insert(0) += guest.party_size();
            }
        }
    }
    usage
}

/// Runs every check and returns conflicts in a stable order.
pub fn detect_conflicts(input: &ConflictInput<'_>) -> Vec<Conflict> {
    let mut conflicts = Vec::new();
    let margin = input.venue.collision_margin();
    let boundary = active_boundary(input.areas);
    let exclusions: Vec<(AreaKind, Bounds)> = input
        .areas
        .iter()
        .filter(|a| a.enabled && a.kind.is_exclusion())
        .filter_map(|a| a.bounds().map(|b| (a.kind, b)))
        .collect();

    let tables: Vec<&Table> = input.tables.iter().filter(|t| t.enabled).collect();
    let mut placed: Vec<(&Table, Bounds)> = Vec::with_capacity(tables.len());

    for table in &tables {
        let bounds = table.bounds();
        if let Some(boundary) = boundary {
            if bounds
                .corners()
                .iter()
                .any(|c| !point_in_polygon(c, &boundary.points))
            {
                conflicts.push(Conflict::table(
                    ConflictKind::Perimeter,
                    table.id,
                    format!("{} is outside the venue boundary", table.name),
                ));
                continue;
            }
        }

        let grown = expand_box(&bounds, margin);
        if let Some((kind, _)) = exclusions.iter().find(|(_, b)| box_overlap(&grown, b)) {
            conflicts.push(Conflict::table(
                ConflictKind::Obstacle,
                table.id,
                format!("{} is too close to a {}", table.name, kind),
            ));
        }
        placed.push((*table, grown));
    }

    for i in 0..placed.len() {
        for j in (i + 1)..placed.len() {
            let (a, a_box) = placed[i];
            let (b, b_box) = placed[j];
            if box_overlap(&a_box, &b_box) {
                conflicts.push(Conflict::table(
                    ConflictKind::Spacing,
                    a.id,
                    format!("{} is too close to {}", a.name, b.name),
                ));
                conflicts.push(Conflict::table(
                    ConflictKind::Spacing,
                    b.id,
                    format!("{} is too close to {}", b.name, a.name),
                ));
            }
        }
    }

    for seat in input.seats.iter().filter(|s| s.enabled) {
        if let Some(boundary) = boundary {
            if !point_in_polygon(&seat.position, &boundary.points) {
                conflicts.push(Conflict::seat(
                    ConflictKind::Perimeter,
                    seat.id,
                    format!("Seat {} is outside the venue boundary", seat.label()),
                ));
                continue;
            }
        }
        if let Some((kind, _)) = exclusions
            .iter()
            .find(|(_, b)| b.contains_point(&seat.position))
        {
            conflicts.push(Conflict::seat(
                ConflictKind::Obstacle,
                seat.id,
                format!("Seat {} is inside a {}", seat.label(), kind),
            ));
        }
    }

    let usage = table_usage(input.scope, input.tables, input.guests);
    for table in &tables {
        let used = usage.get(&table.id).copied().unwrap_or(0);
        if used > 0 && used >= table.seats {
            conflicts.push(Conflict::table(
                ConflictKind::Overbooking,
                table.id,
                format!("{} is full ({}/{})", table.name, used, table.seats),
            ));
        }
    }

    tracing::trace!(
        "Conflict pass for {}: {} tables, {} seats, {} conflicts",
        input.scope,
        input.tables.len(),
        input.seats.len(),
        conflicts.len()
    );
    conflicts
}

/// Conflicts per table id.
pub fn conflicts_per_table(conflicts: &[Conflict]) -> HashMap<u32, usize> {
    let mut counts = HashMap::new();
    for id in conflicts.iter().filter_map(Conflict::table_id) {
        *counts.entry(id).or_insert(0) += 1;
    }
    counts
}

/// Conflicts memoized by scope and layout revision.
#[derive(Debug, Clone, Default)]
pub struct ConflictCache {
    key: Option<(Scope, u64)>,
    conflicts: Vec<Conflict>,
}

impl ConflictCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached result for `(scope, revision)` or recomputes it.
    pub fn get_or_compute<F>(&mut self, scope: Scope, revision: u64, compute: F) -> &[Conflict]
    where
        F: FnOnce() -> Vec<Conflict>,
    {
        if self.key != Some((scope, revision)) {
            self.conflicts = compute();
            self.key = Some((scope, revision));
        }
        &self.conflicts
    }

    pub fn invalidate(&mut self) {
        self.key = None;
    }
}
