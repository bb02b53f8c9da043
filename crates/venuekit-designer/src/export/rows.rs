//! Delimited guest rows.

use crate::model::{Assignment, Guest, LayoutSnapshot};
use std::borrow::Cow;
use venuekit_core::{ExportError, Scope};

/// Column names, in output order.
pub const ROW_HEADER: [&str; 6] = ["guestId", "name", "scope", "table", "companions", "notes"];

#[derive(Debug, Clone, PartialEq)]
pub struct GuestRow {
    pub guest_id: String,
    pub name: String,
    /// `None` for guests without any assignment.
    pub scope: Option<Scope>,
    /// Table name or seat label; empty when unplaced or dangling.
    pub table: String,
    pub companions: u32,
    pub notes: String,
}

impl GuestRow {
    fn fields(&self) -> [Cow<'_, str>; 6] {
        [
            Cow::Borrowed(self.guest_id.as_str()),
            Cow::Borrowed(self.name.as_str()),
            Cow::Borrowed(self.scope.map(|s| s.as_str()).unwrap_or("")),
            Cow::Borrowed(self.table.as_str()),
            Cow::Owned(self.companions.to_string()),
            Cow::Borrowed(self.notes.as_str()),
        ]
    }
}

/// One row per guest and assigned scope, ceremony first. Guests placed
/// nowhere get a single row with empty scope and table.
pub fn guest_rows(
    guests: &[Guest],
    ceremony: &LayoutSnapshot,
    banquet: &LayoutSnapshot,
) -> Vec<GuestRow> {
    let mut rows = Vec::with_capacity(guests.len());
    for guest in guests {
        let row = |scope: Option<Scope>, table: String| GuestRow {
            guest_id: guest.id.clone(),
            name: guest.name.clone(),
            scope,
            table,
            companions: guest.companions,
            notes: guest.notes.clone(),
        };
        if guest.assignments.is_empty() {
            rows.push(row(None, String::new()));
            continue;
        }
        for scope in Scope::ALL {
            let Some(assignment) = guest.assignment(scope) else {
                continue;
            };
            let snapshot = match scope {
                Scope::Ceremony => ceremony,
                Scope::Banquet => banquet,
            };
            let label = match assignment {
                Assignment::Table { table_id, .. } => snapshot
                    .table(table_id)
                    .map(|t| t.name.clone())
                    .unwrap_or_default(),
                Assignment::Seat { seat_id } => {
                    snapshot.seat(seat_id).map(|s| s.label()).unwrap_or_default()
                }
            };
            rows.push(row(Some(scope), label));
        }
    }
    rows
}

/// Renders rows with a header line. Fields holding the delimiter, quotes
/// or line breaks are quoted, with inner quotes doubled.
pub fn write_rows(rows: &[GuestRow], delimiter: char) -> Result<String, ExportError> {
    if matches!(delimiter, '"' | '\n' | '\r') {
        return Err(ExportError::InvalidDelimiter { delimiter });
    }
    let sep = delimiter.to_string();
    let mut out = ROW_HEADER.join(sep.as_str());
    out.push('\n');
    for row in rows {
        let line: Vec<Cow<'_, str>> = row
            .fields()
            .into_iter()
            .map(|f| escape_field(f, delimiter))
            .collect();
        out.push_str(&line.join(sep.as_str()));
        out.push('\n');
    }
    Ok(out)
}

fn escape_field(field: Cow<'_, str>, delimiter: char) -> Cow<'_, str> {
    let needs_quotes = field
        .chars()
        .any(|c| c == delimiter || c == '"' || c == '\n' || c == '\r');
    if needs_quotes {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        field
    }
}
