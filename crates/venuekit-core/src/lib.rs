//! # VenueKit Core
//!
//! Core types and utilities shared by the VenueKit crates:
//! error definitions, the scope/table/area vocabulary, length units and the
//! tuning constants used by the layout engine.

pub mod constants;
pub mod error;
pub mod types;
pub mod units;

pub use error::{Error, ExportError, LayoutError, Result, StoreError};
pub use types::{AreaKind, Scope, Side, TableShape, TableType};
pub use units::{coerce_in_range, format_length, parse_length_lenient, unit_label, MeasurementSystem};
