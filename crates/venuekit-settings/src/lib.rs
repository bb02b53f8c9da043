//! VenueKit Settings Crate
//!
//! Handles engine configuration: venue dimensions, scoring weight overrides,
//! generator defaults, export and history preferences, and snapshot storage.

pub mod config;
pub mod error;

pub use config::{
    default_config_path, BanquetLayoutSettings, CeremonyLayoutSettings, Config, ExportSettings,
    HistorySettings, Language, Orientation, ScoringOverrides, ScoringWeights, StorageSettings,
    VenueSettings,
};
pub use error::{ConfigError, ConfigResult, SettingsError, SettingsResult};
