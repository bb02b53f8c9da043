//! Table recommendations for unassigned guests.
//!
//! Each unassigned guest is scored against every table of the scope. A
//! table that cannot take the whole party, is disabled, or is held by
//! another editor scores negative infinity and is never suggested.
//!
//! Positive terms: room left after seating (less slack is better) with a
//! bonus for an exact fit, side affinity, guests of the same group or tag
//! already seated, requested companions present, VIP table for a VIP
//! guest. Negative terms: avoided guests present, VIP table for a non-VIP
//! guest, locked table, open conflicts on the table.

use crate::conflicts::{conflicts_per_table, table_usage, Conflict};
use crate::model::{Guest, GuestId, Table};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use venuekit_core::{Scope, Side};
use venuekit_settings::ScoringWeights;

/// Candidates returned per guest.
pub const MAX_CANDIDATES: usize = 3;

const FIT_BONUS: f64 = 10.0;
const EXACT_FIT_BONUS: f64 = 5.0;
const SIDE_BONUS: f64 = 4.0;
const GROUP_BONUS: f64 = 2.0;
const GROUP_CAP: usize = 4;
const WANT_BONUS: f64 = 3.0;
const AVOID_PENALTY: f64 = 5.0;
const VIP_MATCH_BONUS: f64 = 6.0;
const VIP_GUEST_BONUS: f64 = 2.0;
const VIP_MISMATCH_PENALTY: f64 = 3.0;
const LOCKED_PENALTY: f64 = 8.0;
const CONFLICT_PENALTY: f64 = 2.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub table_id: u32,
    pub table_name: String,
    pub score: f64,
    /// Seats left before this party sits down.
    pub free_seats: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub guest_id: GuestId,
    pub guest_name: String,
    pub party_size: u32,
    /// Best first; empty when no table can take the party.
    pub candidates: Vec<Candidate>,
}

impl Recommendation {
    pub fn best_score(&self) -> Option<f64> {
        self.candidates.first().map(|c| c.score)
    }
}

/// Everything the scorer reads for one scope.
#[derive(Debug, Clone, Copy)]
pub struct RecommendationInput<'a> {
    pub scope: Scope,
    pub tables: &'a [Table],
    pub guests: &'a [Guest],
    pub conflicts: &'a [Conflict],
    /// Table id to the editor currently holding it.
    pub remote_locks: &'a HashMap<u32, String>,
    pub weights: ScoringWeights,
}

/// Per-scope facts shared by every scoring call.
pub struct ScoringContext<'a> {
    input: RecommendationInput<'a>,
    usage: HashMap<u32, u32>,
    conflict_counts: HashMap<u32, usize>,
    seated: HashMap<u32, Vec<&'a Guest>>,
}

impl<'a> ScoringContext<'a> {
    pub fn new(input: RecommendationInput<'a>) -> Self {
        let known: HashSet<u32> = input.tables.iter().map(|t| t.id).collect();
        let mut seated: HashMap<u32, Vec<&'a Guest>> = HashMap::new();
        for guest in input.guests {
            if let Some(id) = guest.table_in(input.scope) {
                if known.contains(&id) {
                    seated.entry(id).or_default().push(guest);
                }
            }
        }
        Self {
            usage: table_usage(input.scope, input.tables, input.guests),
            conflict_counts: conflicts_per_table(input.conflicts),
            seated,
            input,
        }
    }

    pub fn free_seats(&self, table: &Table) -> u32 {
        table
            .seats
            .saturating_sub(self.usage.get(&table.id).copied().unwrap_or(0))
    }

    /// Score of seating `guest` at `table`; `NEG_INFINITY` when the table
    /// is not eligible.
    pub fn score(&self, guest: &Guest, table: &Table) -> f64 {
        let w = &self.input.weights;
        let needs = guest.party_size();
        let free = self.free_seats(table);
        if !table.enabled || free < needs || self.input.remote_locks.contains_key(&table.id) {
            return f64::NEG_INFINITY;
        }

        let slack = (free - needs) as f64;
        let mut score = w.fit * FIT_BONUS / (1.0 + slack);
        if free == needs {
            score += w.fit * EXACT_FIT_BONUS;
        }

        if let (Some(guest_side), Some(table_side)) = (guest.side, table.side_hint) {
            if guest_side == table_side || table_side == Side::Shared {
                score += w.side * SIDE_BONUS;
            }
        }

        let seated = self
            .seated
            .get(&table.id)
            .map(Vec::as_slice)
            .unwrap_or_default();
        let same_label = seated
            .iter()
            .filter(|other| other.id != guest.id && guest.shares_label_with(other))
            .count()
            .min(GROUP_CAP);
        score += w.wants * GROUP_BONUS * same_label as f64;

        for other in seated.iter().filter(|o| o.id != guest.id) {
            if guest.wants.contains(&other.id) {
                score += w.wants * WANT_BONUS;
            }
            if guest.avoids.contains(&other.id) || other.avoids.contains(&guest.id) {
                score -= w.avoid * AVOID_PENALTY;
            }
        }

        match (guest.vip, table.vip) {
            (true, true) => score += w.wants * VIP_MATCH_BONUS,
            (true, false) => score += w.wants * VIP_GUEST_BONUS,
            (false, true) => score -= w.avoid * VIP_MISMATCH_PENALTY,
            (false, false) => {}
        }

        if table.locked {
            score -= w.avoid * LOCKED_PENALTY;
        }

        let conflicts = self.conflict_counts.get(&table.id).copied().unwrap_or(0);
        score -= w.avoid * CONFLICT_PENALTY * conflicts as f64;

        score
    }

    /// Up to [`MAX_CANDIDATES`] eligible tables, best first, ties by id.
    pub fn candidates_for(&self, guest: &Guest) -> Vec<Candidate> {
        let mut candidates: Vec<Candidate> = self
            .input
            .tables
            .iter()
            .filter_map(|table| {
                let score = self.score(guest, table);
                score.is_finite().then(|| Candidate {
                    table_id: table.id,
                    table_name: table.name.clone(),
                    score,
                    free_seats: self.free_seats(table),
                })
            })
            .collect();
        candidates.sort_by(|a, b| {
            b.score
                .total_cmp(&a.score)
                .then_with(|| a.table_id.cmp(&b.table_id))
        });
        candidates.truncate(MAX_CANDIDATES);
        candidates
    }

    /// Whether the guest still needs a place in this scope.
    fn needs_placement(&self, guest: &Guest) -> bool {
        match guest.assignment(self.input.scope) {
            None => true,
            Some(_) => match guest.table_in(self.input.scope) {
                Some(id) => !self.input.tables.iter().any(|t| t.id == id),
                None => false,
            },
        }
    }
}

/// Recommendations for every unassigned guest, ordered by best score with
/// ties broken by guest id; guests without candidates come last.
pub fn recommend(input: RecommendationInput<'_>) -> Vec<Recommendation> {
    let ctx = ScoringContext::new(input);
    let mut out: Vec<Recommendation> = input
        .guests
        .iter()
        .filter(|g| ctx.needs_placement(g))
        .map(|guest| Recommendation {
            guest_id: guest.id.clone(),
            guest_name: guest.name.clone(),
            party_size: guest.party_size(),
            candidates: ctx.candidates_for(guest),
        })
        .collect();

    out.sort_by(|a, b| match (a.best_score(), b.best_score()) {
        (Some(x), Some(y)) => y.total_cmp(&x).then_with(|| a.guest_id.cmp(&b.guest_id)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.guest_id.cmp(&b.guest_id),
    });
    tracing::debug!("Scored {} unassigned guests in {}", out.len(), input.scope);
    out
}
