//! Guest list import.
//!
//! Legacy guest lists reference tables by id or by name and carry side and
//! VIP information only inside free text. Everything is normalized here,
//! once, into [`Guest`] records with explicit fields.

use crate::model::{Assignment, Guest, Table};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use venuekit_core::{Scope, Side};

const VIP_KEYWORDS: &[&str] = &["vip", "honor", "honour", "padrino", "madrina", "presidencial"];
const VIP_TABLE_KEYWORDS: &[&str] = &["vip", "head", "honor", "honour", "presidencial", "principal"];
const BRIDE_KEYWORDS: &[&str] = &["bride", "novia"];
const GROOM_KEYWORDS: &[&str] = &["groom", "novio"];

/// A guest row as it appears in an imported list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawGuest {
    pub id: String,
    pub name: String,
    /// Companion count as typed; unparsable text counts as zero.
    pub companions: String,
    pub side: Option<String>,
    pub group: Option<String>,
    pub tags: Vec<String>,
    pub notes: String,
    pub wants: Vec<String>,
    pub avoids: Vec<String>,
    /// Table reference: a numeric id or a table name.
    pub table: Option<String>,
    pub scope: Option<Scope>,
}

/// Converts raw rows into guests, resolving table references against the
/// tables of each scope.
pub struct GuestImporter<'a> {
    ceremony: &'a [Table],
    banquet: &'a [Table],
}

impl<'a> GuestImporter<'a> {
    pub fn new(ceremony: &'a [Table], banquet: &'a [Table]) -> Self {
        Self { ceremony, banquet }
    }

    pub fn import(&self, raw: &RawGuest) -> Guest {
        let mut guest = Guest::new(raw.id.trim(), raw.name.trim());
        guest.companions = parse_companions(&raw.companions);
        guest.notes = raw.notes.clone();
        guest.group = raw
            .group
            .as_deref()
            .map(str::trim)
            .filter(|g| !g.is_empty())
            .map(str::to_string);
        guest.tags = raw
            .tags
            .iter()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect::<BTreeSet<_>>();
        guest.wants = raw.wants.clone();
        guest.avoids = raw.avoids.clone();

        guest.side = raw
            .side
            .as_deref()
            .and_then(parse_side)
            .or_else(|| side_from_text(&raw.notes))
            .or_else(|| guest.group.as_deref().and_then(side_from_text));

        guest.vip = guest.tags.iter().any(|t| contains_keyword(t, VIP_KEYWORDS))
            || contains_keyword(&raw.notes, VIP_KEYWORDS)
            || guest
                .group
                .as_deref()
                .is_some_and(|g| contains_keyword(g, VIP_KEYWORDS));

        if let Some(reference) = raw.table.as_deref() {
            let scope = raw.scope.unwrap_or_default();
            match self.resolve_table(scope, reference) {
                Some(table_id) => {
                    guest
                        .assignments
                        .insert(scope, Assignment::table(table_id));
                }
                None => tracing::warn!(
                    "Guest {} references unknown {} table {:?}",
                    guest.id,
                    scope,
                    reference
                ),
            }
        }
        guest
    }

    pub fn import_all(&self, rows: &[RawGuest]) -> Vec<Guest> {
        let guests: Vec<Guest> = rows
            .iter()
            .filter(|r| !r.id.trim().is_empty())
            .map(|r| self.import(r))
            .collect();
        tracing::info!("Imported {} of {} guest rows", guests.len(), rows.len());
        guests
    }

    /// Resolves a legacy reference: a numeric id that exists, otherwise a
    /// case-insensitive name match.
    pub fn resolve_table(&self, scope: Scope, reference: &str) -> Option<u32> {
        let tables = match scope {
            Scope::Ceremony => self.ceremony,
            Scope::Banquet => self.banquet,
        };
        let reference = reference.trim();
        if reference.is_empty() {
            return None;
        }
        if let Ok(id) = reference.parse::<u32>() {
            if tables.iter().any(|t| t.id == id) {
                return Some(id);
            }
        }
        let wanted = reference.to_lowercase();
        tables
            .iter()
            .find(|t| t.name.trim().to_lowercase() == wanted)
            .map(|t| t.id)
    }
}

/// Side and VIP hints carried by a legacy table name.
pub fn table_hints_from_name(name: &str) -> (Option<Side>, bool) {
    (side_from_text(name), contains_keyword(name, VIP_TABLE_KEYWORDS))
}

fn parse_companions(text: &str) -> u32 {
    text.trim()
        .parse::<i64>()
        .ok()
        .filter(|n| *n > 0)
        .map(|n| n.min(u32::MAX as i64) as u32)
        .unwrap_or(0)
}

fn parse_side(text: &str) -> Option<Side> {
    match text.trim().to_lowercase().as_str() {
        "bride" | "novia" => Some(Side::Bride),
        "groom" | "novio" => Some(Side::Groom),
        "shared" | "both" | "ambos" => Some(Side::Shared),
        _ => None,
    }
}

fn side_from_text(text: &str) -> Option<Side> {
    let bride = contains_keyword(text, BRIDE_KEYWORDS);
    let groom = contains_keyword(text, GROOM_KEYWORDS);
    match (bride, groom) {
        (true, true) => Some(Side::Shared),
        (true, false) => Some(Side::Bride),
        (false, true) => Some(Side::Groom),
        (false, false) => None,
    }
}

fn contains_keyword(text: &str, keywords: &[&str]) -> bool {
    let lower = text.to_lowercase();
    keywords.iter().any(|k| lower.contains(k))
}
