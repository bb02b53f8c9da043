//! # VenueKit Designer
//!
//! Layout engine for event venues. A venue has two independent scopes, the
//! ceremony and the banquet, each holding its own drawn areas, tables and
//! chair grid. Guests are shared by both scopes and are placed at a table or
//! seat in each.
//!
//! ## Core Components
//!
//! - **Model**: tables, seats, areas, guests and copy-on-write snapshots
//! - **Capacity**: seat counts derived from table type and footprint
//! - **Canvas**: the drawing engine that turns pointer input into areas
//! - **Viewport**: pan and zoom between screen and world coordinates
//! - **Conflicts**: perimeter, obstacle, spacing and overbooking checks
//! - **Recommend**: ranked table suggestions for unplaced guests
//! - **History**: snapshot-based undo and redo
//! - **Export**: guest rows, vector floor plans and the setup report
//! - **Persistence**: named snapshots and autosave
//!
//! ## Architecture
//!
//! ```text
//! DesignerState
//!   ├── ScopeState (ceremony)   snapshot, history, selection, drawing
//!   ├── ScopeState (banquet)
//!   ├── Guests                  shared directory with per-scope assignments
//!   └── Viewport
//!
//! LayoutCommand ──apply──▶ LayoutSnapshot ──record──▶ History
//! ```
//!
//! World coordinates are centimetres with y pointing down; angles are
//! degrees, clockwise on screen.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use venuekit_designer::DesignerState;
//! use venuekit_core::TableType;
//!
//! let mut state = DesignerState::new();
//! let id = state.add_table(TableType::Round, None)?;
//! state.commit_move(id, Point::new(400.0, 300.0))?;
//! let conflicts = state.conflicts();
//! ```

pub mod canvas;
pub mod capacity;
pub mod commands;
pub mod conflicts;
pub mod export;
pub mod generators;
pub mod geometry;
pub mod history;
pub mod import;
pub mod model;
pub mod persistence;
pub mod recommend;
pub mod viewport;

// Integration modules
pub mod designer_state;

pub use canvas::{DrawKey, DrawMode, DrawOutcome, DrawPreview, DrawingEngine, Modifiers};
pub use capacity::{compute_capacity, infer_table_type, Footprint};
pub use commands::LayoutCommand;
pub use conflicts::{
    detect_conflicts, Conflict, ConflictCache, ConflictInput, ConflictKind, ConflictSubject,
};
pub use designer_state::{DanglingAssignment, DesignerState, DragSession, LayoutChange};
pub use export::{
    build_report, guest_rows, vector_drawing, write_rows, GuestRow, Report, ReportBlock,
    ReportOptions, VectorDrawing, VectorShape,
};
pub use geometry::{Bounds, Point};
pub use history::History;
pub use import::{GuestImporter, RawGuest};
pub use model::{
    Area, Assignment, FieldValue, Guest, GuestId, LayoutSnapshot, ScopeSettings, Seat, Table,
    TableField,
};
pub use persistence::{
    AutoSaver, FileSnapshotStore, MemorySnapshotStore, NamedSnapshot, SnapshotInfo, SnapshotStore,
};
pub use recommend::{recommend, Candidate, Recommendation};
pub use viewport::Viewport;
