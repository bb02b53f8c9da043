//! Error handling for VenueKit
//!
//! Provides error types for all layers of the layout engine:
//! - Layout errors (unknown tables, areas, seats or guests)
//! - Store errors (named snapshot persistence)
//! - Export errors (report and row generation)
//!
//! Geometry problems are never errors: degenerate boundaries and conflicting
//! placements are handled permissively by the engine itself.

use thiserror::Error;

/// Layout error type
///
/// Raised when a mutation targets an entity that does not exist in the
/// active scope, or one that an external editor currently holds.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LayoutError {
    /// No table with this id in the scope
    #[error("Table {id} not found")]
    TableNotFound {
        /// The requested table id.
        id: u32,
    },

    /// No area at this index in the scope
    #[error("Area {index} not found")]
    AreaNotFound {
        /// The requested area index.
        index: usize,
    },

    /// Segment index past the end of an area outline
    #[error("Segment {segment} out of range for area {index}")]
    SegmentOutOfRange {
        /// The area index.
        index: usize,
        /// The requested segment.
        segment: usize,
    },

    /// No seat with this id in the scope
    #[error("Seat {id} not found")]
    SeatNotFound {
        /// The requested seat id.
        id: u32,
    },

    /// No guest with this id in the directory
    #[error("Guest {id} not found")]
    GuestNotFound {
        /// The requested guest id.
        id: String,
    },

    /// Table is locked, locally or by another editor
    #[error("Table {id} is locked{}", .by.as_ref().map(|b| format!(" by {b}")).unwrap_or_default())]
    TableLocked {
        /// The locked table id.
        id: u32,
        /// The editor holding the lock, when known.
        by: Option<String>,
    },

    /// Seat is locked or reserved
    #[error("Seat {id} is locked")]
    SeatLocked {
        /// The locked seat id.
        id: u32,
    },
}

/// Snapshot store error type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    /// No snapshot stored under this key
    #[error("Snapshot '{name}' not found for session {session}")]
    NotFound {
        /// The session or venue identifier.
        session: String,
        /// The snapshot name.
        name: String,
    },

    /// Snapshot name is empty or unusable as a key
    #[error("Invalid snapshot name: {name:?}")]
    InvalidName {
        /// The rejected name.
        name: String,
    },

    /// Stored payload could not be encoded or decoded
    #[error("Snapshot serialization failed: {reason}")]
    Serialization {
        /// The reason the payload was rejected.
        reason: String,
    },

    /// Underlying storage failed
    #[error("Snapshot backend error: {reason}")]
    Backend {
        /// The backend failure.
        reason: String,
    },
}

/// Export error type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExportError {
    /// Delimiter cannot be used for row output
    #[error("Invalid delimiter {delimiter:?}")]
    InvalidDelimiter {
        /// The rejected delimiter.
        delimiter: char,
    },

    /// Report page geometry is unusable
    #[error("Invalid page layout: {reason}")]
    InvalidPageLayout {
        /// The reason the layout was rejected.
        reason: String,
    },
}

/// Main error type for VenueKit
///
/// A unified error type that can represent any error from all layers.
#[derive(Error, Debug)]
pub enum Error {
    /// Layout error
    #[error(transparent)]
    Layout(#[from] LayoutError),

    /// Store error
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Export error
    #[error(transparent)]
    Export(#[from] ExportError),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Check if this is a missing-entity error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Error::Layout(
                LayoutError::TableNotFound { .. }
                    | LayoutError::AreaNotFound { .. }
                    | LayoutError::SeatNotFound { .. }
                    | LayoutError::GuestNotFound { .. }
            ) | Error::Store(StoreError::NotFound { .. })
        )
    }

    /// Check if this is a lock error
    pub fn is_locked(&self) -> bool {
        matches!(
            self,
            Error::Layout(LayoutError::TableLocked { .. } | LayoutError::SeatLocked { .. })
        )
    }

    /// Check if this is a store error
    pub fn is_store_error(&self) -> bool {
        matches!(self, Error::Store(_))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
