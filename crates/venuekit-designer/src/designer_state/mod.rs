//! Designer state: the editable venue layout and everything around it.
//!
//! This module is split into submodules by concern:
//! - `tables`: table and seat edits, venue settings, generators
//! - `areas`: area edits and the drawing tools
//! - `guests`: guest directory, assignments and recommendations
//! - `interaction`: pointer drags and drops on the floor plan
//! - `snapshots`: named snapshots and autosave changes
//! - `export`: row, vector and report exports
//!
//! Each scope keeps its own snapshot, history, selection and drawing
//! engine. Guests are shared by both scopes.

mod areas;
mod export;
mod guests;
mod interaction;
mod snapshots;
mod tables;

use crate::canvas::DrawingEngine;
use crate::commands::LayoutCommand;
use crate::conflicts::{detect_conflicts, Conflict, ConflictCache, ConflictInput};
use crate::history::History;
use crate::model::{Guest, LayoutSnapshot, ScopeSettings};
use crate::viewport::Viewport;
use std::collections::{BTreeSet, HashMap};
use venuekit_core::constants::DEFAULT_HISTORY_DEPTH;
use venuekit_core::{LayoutError, Scope};
use venuekit_settings::{BanquetLayoutSettings, Config, ExportSettings, ScoringWeights};

pub use guests::DanglingAssignment;
pub use interaction::DragSession;

/// A committed change to one scope, queued for autosave.
#[derive(Debug, Clone)]
pub struct LayoutChange {
    pub scope: Scope,
    pub description: &'static str,
    pub revision: u64,
    pub snapshot: LayoutSnapshot,
}

/// Per-scope editing state.
#[derive(Debug, Clone)]
pub(crate) struct ScopeState {
    /// What the view shows; may hold an uncommitted preview.
    pub(crate) snapshot: LayoutSnapshot,
    pub(crate) history: History,
    pub(crate) selection: BTreeSet<u32>,
    pub(crate) drawing: DrawingEngine,
}

impl ScopeState {
    fn new(initial: LayoutSnapshot, max_depth: usize) -> Self {
        Self {
            snapshot: initial.clone(),
            history: History::new(initial, max_depth),
            selection: BTreeSet::new(),
            drawing: DrawingEngine::new(),
        }
    }

    fn prune_selection(&mut self) {
        let tables = &self.snapshot.tables;
        self.selection.retain(|id| tables.iter().any(|t| t.id == *id));
    }
}

/// Venue designer state for UI integration.
#[derive(Debug, Clone)]
pub struct DesignerState {
    ceremony: ScopeState,
    banquet: ScopeState,
    active: Scope,
    guests: Vec<Guest>,
    remote_locks: HashMap<Scope, HashMap<u32, String>>,
    pub viewport: Viewport,
    revision: u64,
    conflict_cache: ConflictCache,
    changes: Vec<LayoutChange>,
    session_id: String,
    base_weights: ScoringWeights,
    banquet_defaults: BanquetLayoutSettings,
    export_settings: ExportSettings,
    drag: Option<DragSession>,
}

impl DesignerState {
    /// Creates an empty designer with default settings.
    pub fn new() -> Self {
        Self::from_config(&Config::default())
    }

    /// Creates an empty designer seeded from `config`.
    pub fn from_config(config: &Config) -> Self {
        let settings = ScopeSettings {
            venue: config.venue,
            ceremony: config.ceremony.clone(),
            scoring: config.scoring,
        };
        let depth = if config.history.max_depth == 0 {
            DEFAULT_HISTORY_DEPTH
        } else {
            config.history.max_depth
        };
        let initial = LayoutSnapshot::with_settings(settings);
        let session_id = config
            .storage
            .session_id
            .clone()
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

        tracing::debug!("Designer session {} (history depth {})", session_id, depth);
        Self {
            ceremony: ScopeState::new(initial.clone(), depth),
            banquet: ScopeState::new(initial, depth),
            active: Scope::default(),
            guests: Vec::new(),
            remote_locks: HashMap::new(),
            viewport: Viewport::default(),
            revision: 0,
            conflict_cache: ConflictCache::new(),
            changes: Vec::new(),
            session_id,
            base_weights: ScoringWeights::default(),
            banquet_defaults: config.banquet.clone(),
            export_settings: config.export.clone(),
            drag: None,
        }
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn set_session_id(&mut self, session_id: impl Into<String>) {
        self.session_id = session_id.into();
    }

    pub fn active_scope(&self) -> Scope {
        self.active
    }

    /// Switches the edited scope. An unfinished drag is abandoned.
    pub fn set_active_scope(&mut self, scope: Scope) {
        if self.active != scope {
            self.cancel_table_drag();
            self.active = scope;
            self.revision += 1;
        }
    }

    /// Monotonic counter bumped by every layout or guest change.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub(crate) fn scope_state(&self, scope: Scope) -> &ScopeState {
        match scope {
            Scope::Ceremony => &self.ceremony,
            Scope::Banquet => &self.banquet,
        }
    }

    pub(crate) fn scope_state_mut(&mut self, scope: Scope) -> &mut ScopeState {
        match scope {
            Scope::Ceremony => &mut self.ceremony,
            Scope::Banquet => &mut self.banquet,
        }
    }

    /// Layout of the active scope as currently displayed.
    pub fn snapshot(&self) -> &LayoutSnapshot {
        &self.scope_state(self.active).snapshot
    }

    pub fn snapshot_of(&self, scope: Scope) -> &LayoutSnapshot {
        &self.scope_state(scope).snapshot
    }

    /// Last committed layout of `scope`, ignoring any preview.
    pub fn committed_snapshot(&self, scope: Scope) -> &LayoutSnapshot {
        self.scope_state(scope).history.current()
    }

    /// Id for a new table in `scope`: above every table there and every
    /// table a guest is still assigned to, so a new table never picks up
    /// guests left behind by a deleted one.
    pub(crate) fn next_free_table_id(&self, scope: Scope) -> u32 {
        self.committed_snapshot(scope)
            .next_table_id()
            .max(self.first_unreferenced_table_id(scope))
    }

    pub(crate) fn first_unreferenced_table_id(&self, scope: Scope) -> u32 {
        self.guests
            .iter()
            .filter_map(|g| g.table_in(scope))
            .max()
            .map_or(1, |id| id.saturating_add(1))
    }

    pub fn settings(&self) -> &ScopeSettings {
        &self.snapshot().settings
    }

    /// Applies `command` to the active scope and records it for undo.
    pub fn dispatch(&mut self, command: LayoutCommand) -> Result<(), LayoutError> {
        self.dispatch_in(self.active, command)
    }

    /// Applies `command` to `scope` and records it for undo.
    ///
    /// The command starts from the committed layout, so a pending preview
    /// is replaced. Commands that change nothing are not recorded.
    pub fn dispatch_in(&mut self, scope: Scope, command: LayoutCommand) -> Result<(), LayoutError> {
        if let Some(id) = command.table_id() {
            self.ensure_not_held(scope, id)?;
        }
        let state = self.scope_state_mut(scope);
        let base = state.history.current();
        let next = command.apply(base)?;

        if &next == base {
            if state.snapshot != next {
                state.snapshot = next;
                self.revision += 1;
            }
            return Ok(());
        }

        state.history.record(next.clone());
        state.snapshot = next.clone();
        state.prune_selection();
        self.revision += 1;
        tracing::debug!("{} in {} (revision {})", command.name(), scope, self.revision);
        self.changes.push(LayoutChange {
            scope,
            description: command.name(),
            revision: self.revision,
            snapshot: next,
        });
        Ok(())
    }

    /// Shows the result of `command` without recording it.
    ///
    /// Successive previews all start from the committed layout.
    pub fn preview(&mut self, command: LayoutCommand) -> Result<(), LayoutError> {
        let scope = self.active;
        if let Some(id) = command.table_id() {
            self.ensure_not_held(scope, id)?;
        }
        let state = self.scope_state_mut(scope);
        state.snapshot = command.apply(state.history.current())?;
        self.revision += 1;
        Ok(())
    }

    /// Drops any preview and shows the committed layout again.
    pub fn discard_preview(&mut self) {
        let state = self.scope_state_mut(self.active);
        if state.snapshot != *state.history.current() {
            state.snapshot = state.history.current().clone();
            self.revision += 1;
        }
    }

    /// Steps the active scope back one command; `None` when there is
    /// nothing to undo.
    pub fn undo(&mut self) -> Option<&LayoutSnapshot> {
        self.step_history(true)
    }

    /// Re-applies the last undone command; `None` when there is nothing
    /// to redo.
    pub fn redo(&mut self) -> Option<&LayoutSnapshot> {
        self.step_history(false)
    }

    fn step_history(&mut self, back: bool) -> Option<&LayoutSnapshot> {
        let scope = self.active;
        self.drag = None;
        let state = self.scope_state_mut(scope);
        let restored = if back {
            state.history.undo()?.clone()
        } else {
            state.history.redo()?.clone()
        };
        state.snapshot = restored.clone();
        state.prune_selection();
        self.revision += 1;
        self.changes.push(LayoutChange {
            scope,
            description: if back { "Undo" } else { "Redo" },
            revision: self.revision,
            snapshot: restored,
        });
        Some(&self.scope_state(scope).snapshot)
    }

    pub fn can_undo(&self) -> bool {
        self.scope_state(self.active).history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.scope_state(self.active).history.can_redo()
    }

    /// Sets the undo depth for both scopes.
    pub fn set_history_depth(&mut self, depth: usize) {
        self.ceremony.history.set_max_depth(depth);
        self.banquet.history.set_max_depth(depth);
    }

    /// Committed changes since the last call, oldest first.
    pub fn drain_changes(&mut self) -> Vec<LayoutChange> {
        std::mem::take(&mut self.changes)
    }

    /// Conflicts of the active scope, recomputed only after a change.
    pub fn conflicts(&mut self) -> &[Conflict] {
        let scope = self.active;
        let revision = self.revision;
        let state = match scope {
            Scope::Ceremony => &self.ceremony,
            Scope::Banquet => &self.banquet,
        };
        let guests = &self.guests;
        self.conflict_cache.get_or_compute(scope, revision, || {
            detect_conflicts(&ConflictInput {
                scope,
                venue: &state.snapshot.settings.venue,
                areas: &state.snapshot.areas,
                tables: &state.snapshot.tables,
                seats: &state.snapshot.seats,
                guests,
            })
        })
    }

    /// Conflicts of any scope, computed fresh.
    pub fn conflicts_in(&self, scope: Scope) -> Vec<Conflict> {
        let snapshot = self.snapshot_of(scope);
        detect_conflicts(&ConflictInput {
            scope,
            venue: &snapshot.settings.venue,
            areas: &snapshot.areas,
            tables: &snapshot.tables,
            seats: &snapshot.seats,
            guests: &self.guests,
        })
    }

    /// Marks a table of the active scope as held by another editor, or
    /// releases it with `None`. Locks are not part of the layout history.
    pub fn set_remote_lock(&mut self, table_id: u32, editor: Option<String>) {
        let locks = self.remote_locks.entry(self.active).or_default();
        match editor {
            Some(editor) => {
                locks.insert(table_id, editor);
            }
            None => {
                locks.remove(&table_id);
            }
        }
        self.revision += 1;
    }

    pub fn remote_lock(&self, table_id: u32) -> Option<&str> {
        self.remote_locks
            .get(&self.active)
            .and_then(|locks| locks.get(&table_id))
            .map(String::as_str)
    }

    pub(crate) fn remote_locks_of(&self, scope: Scope) -> HashMap<u32, String> {
        self.remote_locks.get(&scope).cloned().unwrap_or_default()
    }

    fn ensure_not_held(&self, scope: Scope, table_id: u32) -> Result<(), LayoutError> {
        match self.remote_locks.get(&scope).and_then(|l| l.get(&table_id)) {
            Some(editor) => Err(LayoutError::TableLocked {
                id: table_id,
                by: Some(editor.clone()),
            }),
            None => Ok(()),
        }
    }

    /// Scoring weights for the active scope: configured defaults with the
    /// scope's overrides applied.
    pub fn scoring_weights(&self) -> ScoringWeights {
        self.base_weights.merged(&self.settings().scoring)
    }

    pub fn set_base_weights(&mut self, weights: ScoringWeights) {
        self.base_weights = weights;
        self.revision += 1;
    }

    pub fn export_settings(&self) -> &ExportSettings {
        &self.export_settings
    }

    pub fn set_export_settings(&mut self, settings: ExportSettings) {
        self.export_settings = settings;
    }

    pub fn selection(&self) -> &BTreeSet<u32> {
        &self.scope_state(self.active).selection
    }

    /// Selects a table; `additive` keeps the current selection.
    pub fn select_table(&mut self, id: u32, additive: bool) -> Result<(), LayoutError> {
        let state = self.scope_state_mut(self.active);
        if state.snapshot.table(id).is_none() {
            return Err(LayoutError::TableNotFound { id });
        }
        if !additive {
            state.selection.clear();
        }
        state.selection.insert(id);
        Ok(())
    }

    pub fn clear_selection(&mut self) {
        self.scope_state_mut(self.active).selection.clear();
    }
}

impl Default for DesignerState {
    fn default() -> Self {
        Self::new()
    }
}
