//! Guests and their table or seat assignments.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use venuekit_core::{Scope, Side};

pub type GuestId = String;

/// Where a guest sits within one scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Assignment {
    /// At a table; `seat` is the slot index when a specific place was picked.
    Table {
        table_id: u32,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        seat: Option<u32>,
    },
    Seat { seat_id: u32 },
}

impl Assignment {
    /// Anywhere at the table.
    pub fn table(table_id: u32) -> Self {
        Self::Table {
            table_id,
            seat: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Guest {
    pub id: GuestId,
    pub name: String,
    /// Additional people arriving with this guest.
    #[serde(default)]
    pub companions: u32,
    #[serde(default)]
    pub side: Option<Side>,
    #[serde(default)]
    pub group: Option<String>,
    #[serde(default)]
    pub tags: BTreeSet<String>,
    #[serde(default)]
    pub vip: bool,
    /// Guests this one wants to sit with.
    #[serde(default)]
    pub wants: Vec<GuestId>,
    /// Guests this one should be kept away from.
    #[serde(default)]
    pub avoids: Vec<GuestId>,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub assignments: BTreeMap<Scope, Assignment>,
}

impl Guest {
    pub fn new(id: impl Into<GuestId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            companions: 0,
            side: None,
            group: None,
            tags: BTreeSet::new(),
            vip: false,
            wants: Vec::new(),
            avoids: Vec::new(),
            notes: String::new(),
            assignments: BTreeMap::new(),
        }
    }

    /// Seats this guest's party takes: the guest plus companions.
    pub fn party_size(&self) -> u32 {
        1 + self.companions
    }

    pub fn assignment(&self, scope: Scope) -> Option<Assignment> {
        self.assignments.get(&scope).copied()
    }

    pub fn table_in(&self, scope: Scope) -> Option<u32> {
        match self.assignment(scope) {
            Some(Assignment::Table { table_id, .. }) => Some(table_id),
            _ => None,
        }
    }

    pub fn seat_in(&self, scope: Scope) -> Option<u32> {
        match self.assignment(scope) {
            Some(Assignment::Seat { seat_id }) => Some(seat_id),
            _ => None,
        }
    }

    /// Group name and tags, the labels used for clustering.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.group
            .iter()
            .map(String::as_str)
            .chain(self.tags.iter().map(String::as_str))
    }

    pub fn shares_label_with(&self, other: &Guest) -> bool {
        self.labels().any(|l| other.labels().any(|o| o == l))
    }
}
