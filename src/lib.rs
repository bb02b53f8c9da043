//! # VenueKit
//!
//! Layout engine for event venues: ceremony seating grids, banquet tables,
//! drawn zones, conflict detection and guided guest placement.
//!
//! ## Architecture
//!
//! VenueKit is organized as a workspace with multiple crates:
//!
//! 1. **venuekit-core** - Shared types, units, constants and error types
//! 2. **venuekit-settings** - Configuration files and validation
//! 3. **venuekit-designer** - Layout model, drawing engine, conflicts,
//!    recommendations, history, exports and snapshot storage
//! 4. **venuekit** - This facade, tying configuration, storage and the
//!    designer together into a [`Session`]
//!
//! ## Features
//!
//! - **Two Scopes**: independent ceremony and banquet layouts sharing one guest list
//! - **Drawing Tools**: boundary, rectangle, freehand, exact-length and erase modes
//! - **Conflict Detection**: perimeter, obstacle, spacing and overbooking checks
//! - **Guided Placement**: ranked table suggestions per unassigned guest
//! - **Exports**: delimited guest rows, SVG floor plans, paginated En/Es report
//! - **Snapshots**: named layouts and background autosave

mod session;

pub use session::{load_config, Session};

pub use venuekit_core::{
    AreaKind, Error, ExportError, LayoutError, MeasurementSystem, Result, Scope, Side,
    StoreError, TableShape, TableType,
};

pub use venuekit_designer::{
    Area, Assignment, AutoSaver, Conflict, ConflictKind, DesignerState, DrawMode, FileSnapshotStore,
    Guest, LayoutSnapshot, MemorySnapshotStore, Point, Recommendation, Report, ReportOptions,
    SnapshotStore, Table, VectorDrawing,
};

pub use venuekit_settings::{Config, ExportSettings, Language, Orientation, VenueSettings};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Console output with pretty formatting
/// - RUST_LOG environment variable support
///
/// Calling it a second time returns an error instead of panicking.
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stdout)
        .with_target(true)
        .with_level(true)
        .with_thread_ids(true)
        .with_thread_names(true)
        .with_line_number(true)
        .pretty();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    tracing::info!("VenueKit {} (built {})", VERSION, BUILD_DATE);
    Ok(())
}
