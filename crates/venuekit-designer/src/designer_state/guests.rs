use super::DesignerState;
use crate::import::{GuestImporter, RawGuest};
use crate::model::{Assignment, Guest, GuestId};
use crate::recommend::{recommend, Recommendation, RecommendationInput};
use venuekit_core::{LayoutError, Scope};

/// A guest assignment whose table or seat no longer exists.
#[derive(Debug, Clone, PartialEq)]
pub struct DanglingAssignment {
    pub guest_id: GuestId,
    pub scope: Scope,
    pub assignment: Assignment,
}

impl DesignerState {
    pub fn guests(&self) -> &[Guest] {
        &self.guests
    }

    pub fn guest(&self, id: &str) -> Option<&Guest> {
        self.guests.iter().find(|g| g.id == id)
    }

    /// Replaces the guest directory. Later duplicates of an id are dropped.
    pub fn set_guests(&mut self, guests: Vec<Guest>) {
        let mut unique: Vec<Guest> = Vec::with_capacity(guests.len());
        for guest in guests {
            if unique.iter().any(|g| g.id == guest.id) {
                tracing::warn!("Ignoring duplicate guest id {}", guest.id);
                continue;
            }
            unique.push(guest);
        }
        self.guests = unique;
        self.revision += 1;
    }

    /// Inserts a guest or replaces the one with the same id.
    pub fn upsert_guest(&mut self, guest: Guest) {
        match self.guests.iter_mut().find(|g| g.id == guest.id) {
            Some(existing) => *existing = guest,
            None => self.guests.push(guest),
        }
        self.revision += 1;
    }

    pub fn remove_guest(&mut self, id: &str) -> Result<Guest, LayoutError> {
        let index = self
            .guests
            .iter()
            .position(|g| g.id == id)
            .ok_or_else(|| LayoutError::GuestNotFound { id: id.to_string() })?;
        self.revision += 1;
        Ok(self.guests.remove(index))
    }

    /// Imports a legacy guest list, resolving table references against
    /// the current tables of both scopes.
    pub fn import_guests(&mut self, rows: &[RawGuest]) -> usize {
        let guests = {
            let importer = GuestImporter::new(
                &self.ceremony.snapshot.tables,
                &self.banquet.snapshot.tables,
            );
            importer.import_all(rows)
        };
        let count = guests.len();
        self.set_guests(guests);
        count
    }

    /// Places a guest in the active scope.
    ///
    /// The table or seat must exist. Tables held by another editor and
    /// disabled seats are refused; locked seats only take VIP guests. A
    /// table slot that is out of range or already taken falls back to a
    /// place anywhere at the table.
    pub fn assign_guest(&mut self, guest_id: &str, assignment: Assignment) -> Result<(), LayoutError> {
        let scope = self.active;
        let guest_index = self.guest_index(guest_id)?;
        let snapshot = &self.scope_state(scope).snapshot;
        let assignment = match assignment {
            Assignment::Table { table_id, seat } => {
                let table = snapshot
                    .table(table_id)
                    .ok_or(LayoutError::TableNotFound { id: table_id })?;
                self.ensure_not_held(scope, table_id)?;
                let taken = |slot: u32| {
                    self.guests.iter().any(|g| {
                        g.id != guest_id
                            && g.assignment(scope)
                                == Some(Assignment::Table {
                                    table_id,
                                    seat: Some(slot),
                                })
                    })
                };
                Assignment::Table {
                    table_id,
                    seat: seat.filter(|slot| *slot < table.seats && !taken(*slot)),
                }
            }
            Assignment::Seat { seat_id } => {
                let seat = snapshot
                    .seat(seat_id)
                    .ok_or(LayoutError::SeatNotFound { id: seat_id })?;
                let vip = self.guests[guest_index].vip;
                if !seat.enabled || (seat.locked && !vip) {
                    return Err(LayoutError::SeatLocked { id: seat_id });
                }
                assignment
            }
        };
        self.guests[guest_index]
            .assignments
            .insert(scope, assignment);
        self.revision += 1;
        tracing::debug!("Assigned guest {} to {:?} in {}", guest_id, assignment, scope);
        Ok(())
    }

    /// Removes the guest's assignment in the active scope. Returns the
    /// assignment that was removed, if any.
    pub fn unassign_guest(&mut self, guest_id: &str) -> Result<Option<Assignment>, LayoutError> {
        let scope = self.active;
        let index = self.guest_index(guest_id)?;
        let removed = self.guests[index].assignments.remove(&scope);
        if removed.is_some() {
            self.revision += 1;
        }
        Ok(removed)
    }

    /// Assignments in either scope whose target is missing.
    pub fn dangling_assignments(&self) -> Vec<DanglingAssignment> {
        let mut out = Vec::new();
        for guest in &self.guests {
            for (&scope, &assignment) in &guest.assignments {
                let snapshot = self.snapshot_of(scope);
                let exists = match assignment {
                    Assignment::Table { table_id, .. } => snapshot.table(table_id).is_some(),
                    Assignment::Seat { seat_id } => snapshot.seat(seat_id).is_some(),
                };
                if !exists {
                    out.push(DanglingAssignment {
                        guest_id: guest.id.clone(),
                        scope,
                        assignment,
                    });
                }
            }
        }
        out
    }

    /// Drops every dangling assignment. Returns how many were removed.
    pub fn prune_dangling_assignments(&mut self) -> usize {
        let dangling = self.dangling_assignments();
        for entry in &dangling {
            if let Some(guest) = self.guests.iter_mut().find(|g| g.id == entry.guest_id) {
                guest.assignments.remove(&entry.scope);
            }
        }
        if !dangling.is_empty() {
            tracing::info!("Pruned {} dangling assignments", dangling.len());
            self.revision += 1;
        }
        dangling.len()
    }

    /// Ranked table suggestions for the unassigned guests of the active
    /// scope.
    pub fn recommendations(&mut self) -> Vec<Recommendation> {
        let scope = self.active;
        let weights = self.scoring_weights();
        let remote_locks = self.remote_locks_of(scope);
        let conflicts = self.conflicts().to_vec();
        let snapshot = self.snapshot_of(scope);
        recommend(RecommendationInput {
            scope,
            tables: &snapshot.tables,
            guests: &self.guests,
            conflicts: &conflicts,
            remote_locks: &remote_locks,
            weights,
        })
    }

    /// Assigns the guest to its best suggested table. Returns the table id,
    /// or `None` when nothing fits.
    pub fn accept_best_recommendation(&mut self, guest_id: &str) -> Result<Option<u32>, LayoutError> {
        self.guest_index(guest_id)?;
        let best = self
            .recommendations()
            .into_iter()
            .find(|r| r.guest_id == guest_id)
            .and_then(|r| r.candidates.first().map(|c| c.table_id));
        if let Some(table_id) = best {
            self.assign_guest(guest_id, Assignment::table(table_id))?;
        }
        Ok(best)
    }

    fn guest_index(&self, guest_id: &str) -> Result<usize, LayoutError> {
        self.guests
            .iter()
            .position(|g| g.id == guest_id)
            .ok_or_else(|| LayoutError::GuestNotFound {
                id: guest_id.to_string(),
            })
    }
}
