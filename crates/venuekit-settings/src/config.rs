//! Configuration and settings management for VenueKit
//!
//! Provides configuration file handling and validation. Supports JSON and
//! TOML file formats stored in platform-specific directories.
//!
//! Configuration is organized into logical sections:
//! - Venue dimensions and aisle clearance
//! - Scoring weight overrides for guided placement
//! - Ceremony seat grid and banquet table generator defaults
//! - Export preferences (language, orientation, delimiter)
//! - History depth and snapshot storage

use crate::error::{ConfigError, SettingsError, SettingsResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use venuekit_core::constants::DEFAULT_HISTORY_DEPTH;
use venuekit_core::{MeasurementSystem, TableType};

/// Venue floor dimensions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VenueSettings {
    /// Floor width in centimetres
    pub width: f64,
    /// Floor height in centimetres
    pub height: f64,
    /// Minimum clearance between tables and around exclusion zones
    pub min_aisle: f64,
}

impl Default for VenueSettings {
    fn default() -> Self {
        Self {
            width: 2000.0,
            height: 1500.0,
            min_aisle: 120.0,
        }
    }
}

impl VenueSettings {
    /// Padding applied to each side of a table box in collision checks.
    pub fn collision_margin(&self) -> f64 {
        self.min_aisle.max(0.0) / 2.0
    }
}

/// Weights applied by the scoring engine.
///
/// `fit` scales the slack and exact-fit terms, `side` the side affinity,
/// `wants` every positive social term (group clustering, requested
/// companions, VIP match) and `avoid` every penalty (avoided guests, VIP
/// mismatch, locked tables, conflicts).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    pub fit: f64,
    pub side: f64,
    pub wants: f64,
    pub avoid: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            fit: 1.0,
            side: 1.0,
            wants: 1.0,
            avoid: 1.0,
        }
    }
}

impl ScoringWeights {
    /// Applies overrides on top of these weights. Missing or non-finite
    /// overrides keep the current value; negative ones clamp to zero.
    pub fn merged(&self, overrides: &ScoringOverrides) -> Self {
        fn pick(base: f64, over: Option<f64>) -> f64 {
            match over {
                Some(v) if v.is_finite() => v.max(0.0),
                _ => base,
            }
        }
        Self {
            fit: pick(self.fit, overrides.fit),
            side: pick(self.side, overrides.side),
            wants: pick(self.wants, overrides.wants),
            avoid: pick(self.avoid, overrides.avoid),
        }
    }
}

/// Runtime-tunable scoring weights; unset fields fall back to the engine defaults.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fit: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub side: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wants: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avoid: Option<f64>,
}

impl ScoringOverrides {
    /// Resolves the overrides against the engine defaults.
    pub fn resolve(&self) -> ScoringWeights {
        ScoringWeights::default().merged(self)
    }
}

/// Ceremony seat grid generator settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CeremonyLayoutSettings {
    pub rows: u32,
    pub cols: u32,
    /// Distance between seat centres within a row
    pub seat_gap: f64,
    /// Distance between row centres
    pub row_gap: f64,
    /// Insert the central aisle after this many columns
    pub aisle_after_col: Option<u32>,
    pub aisle_width: f64,
    /// Number of front rows reserved for VIP guests
    pub vip_rows: u32,
    pub vip_label: String,
    /// Lock reserved VIP seats against general assignment
    pub lock_vip_seats: bool,
    /// Centre of the first seat
    pub origin_x: f64,
    pub origin_y: f64,
}

impl Default for CeremonyLayoutSettings {
    fn default() -> Self {
        Self {
            rows: 10,
            cols: 8,
            seat_gap: 55.0,
            row_gap: 90.0,
            aisle_after_col: Some(4),
            aisle_width: 150.0,
            vip_rows: 1,
            vip_label: "VIP".to_string(),
            lock_vip_seats: true,
            origin_x: 300.0,
            origin_y: 400.0,
        }
    }
}

/// Banquet table grid generator settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BanquetLayoutSettings {
    pub rows: u32,
    pub cols: u32,
    pub table_type: TableType,
    /// Distance between table centres, horizontally
    pub spacing_x: f64,
    /// Distance between table centres, vertically
    pub spacing_y: f64,
    /// Centre of the first table
    pub origin_x: f64,
    pub origin_y: f64,
}

impl Default for BanquetLayoutSettings {
    fn default() -> Self {
        Self {
            rows: 3,
            cols: 4,
            table_type: TableType::Round,
            spacing_x: 350.0,
            spacing_y: 350.0,
            origin_x: 300.0,
            origin_y: 300.0,
        }
    }
}

/// Report language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Es,
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::En => write!(f, "en"),
            Self::Es => write!(f, "es"),
        }
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "en" | "english" => Ok(Self::En),
            "es" | "spanish" | "español" => Ok(Self::Es),
            _ => Err(format!("Unsupported language: {}", s)),
        }
    }
}

/// Report page orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
}

impl Orientation {
    /// Text lines that fit on one page.
    pub fn lines_per_page(&self) -> usize {
        match self {
            Self::Portrait => 48,
            Self::Landscape => 32,
        }
    }
}

/// Export preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    pub language: Language,
    pub orientation: Orientation,
    /// Field delimiter for guest rows
    pub delimiter: char,
    /// Units used for lengths printed in reports
    pub units: MeasurementSystem,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            language: Language::En,
            orientation: Orientation::Portrait,
            delimiter: ',',
            units: MeasurementSystem::Metric,
        }
    }
}

/// Undo history preferences
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistorySettings {
    /// Undo steps kept per scope
    pub max_depth: usize,
}

impl Default for HistorySettings {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_HISTORY_DEPTH,
        }
    }
}

/// Snapshot storage preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// Directory for named snapshots; platform data dir when unset
    pub snapshot_dir: Option<PathBuf>,
    /// Session or venue identifier that keys stored snapshots
    pub session_id: Option<String>,
    /// Push committed changes to the store in the background
    pub autosave: bool,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            snapshot_dir: None,
            session_id: None,
            autosave: true,
        }
    }
}

impl StorageSettings {
    /// Snapshot directory, falling back to the platform data directory.
    pub fn resolved_snapshot_dir(&self) -> SettingsResult<PathBuf> {
        if let Some(dir) = &self.snapshot_dir {
            return Ok(dir.clone());
        }
        dirs::data_dir()
            .map(|d| d.join("venuekit").join("snapshots"))
            .ok_or_else(|| {
                SettingsError::ConfigDirectory("no platform data directory".to_string())
            })
    }
}

/// Complete engine configuration
///
/// Aggregates all settings sections and provides file I/O operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub venue: VenueSettings,
    pub scoring: ScoringOverrides,
    pub ceremony: CeremonyLayoutSettings,
    pub banquet: BanquetLayoutSettings,
    pub export: ExportSettings,
    pub history: HistorySettings,
    pub storage: StorageSettings,
}

/// Default location of the configuration file.
pub fn default_config_path() -> SettingsResult<PathBuf> {
    dirs::config_dir()
        .map(|d| d.join("venuekit").join("config.toml"))
        .ok_or_else(|| {
            ConfigError::UnsupportedPlatform(std::env::consts::OS.to_string()).into()
        })
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| SettingsError::LoadError(format!("{}: {}", path.display(), e)))?;

        let config: Self = match extension(path) {
            Some("json") => serde_json::from_str(&content)?,
            Some("toml") => toml::from_str(&content)?,
            other => {
                return Err(
                    ConfigError::UnsupportedFormat(other.unwrap_or("none").to_string()).into(),
                )
            }
        };

        config.validate()?;
        tracing::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Load config from file, falling back to defaults when the file is
    /// missing or invalid.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load_from_file(path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Using default configuration: {}", e);
                Self::default()
            }
        }
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match extension(path) {
            Some("json") => serde_json::to_string_pretty(self)?,
            Some("toml") => toml::to_string_pretty(self)?,
            other => {
                return Err(
                    ConfigError::UnsupportedFormat(other.unwrap_or("none").to_string()).into(),
                )
            }
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| SettingsError::ConfigDirectory(e.to_string()))?;
            }
        }
        std::fs::write(path, content)
            .map_err(|e| SettingsError::SaveError(format!("{}: {}", path.display(), e)))?;

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> SettingsResult<()> {
        fn positive(key: &str, value: f64) -> SettingsResult<()> {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(SettingsError::InvalidSetting {
                    key: key.to_string(),
                    reason: format!("must be positive, got {}", value),
                })
            }
        }

        positive("venue.width", self.venue.width)?;
        positive("venue.height", self.venue.height)?;
        if !self.venue.min_aisle.is_finite() || self.venue.min_aisle < 0.0 {
            return Err(SettingsError::InvalidSetting {
                key: "venue.min_aisle".to_string(),
                reason: "must be zero or positive".to_string(),
            });
        }

        positive("ceremony.seat_gap", self.ceremony.seat_gap)?;
        positive("ceremony.row_gap", self.ceremony.row_gap)?;
        if self.ceremony.vip_rows > self.ceremony.rows {
            return Err(ConfigError::ValueOutOfRange {
                key: "ceremony.vip_rows".to_string(),
                value: self.ceremony.vip_rows.to_string(),
            }
            .into());
        }

        positive("banquet.spacing_x", self.banquet.spacing_x)?;
        positive("banquet.spacing_y", self.banquet.spacing_y)?;

        let d = self.export.delimiter;
        if d == '"' || d == '\n' || d == '\r' {
            return Err(SettingsError::InvalidSetting {
                key: "export.delimiter".to_string(),
                reason: format!("{:?} cannot delimit fields", d),
            });
        }

        if self.history.max_depth == 0 {
            return Err(ConfigError::ValueOutOfRange {
                key: "history.max_depth".to_string(),
                value: "0".to_string(),
            }
            .into());
        }

        Ok(())
    }

    /// Resolved scoring weights (overrides merged over engine defaults).
    pub fn scoring_weights(&self) -> ScoringWeights {
        self.scoring.resolve()
    }

    /// Merge another config into this one. Scoring overrides merge field by
    /// field; other sections are taken from `other` when they differ from
    /// their defaults.
    pub fn merge(&mut self, other: &Config) {
        if other.venue != VenueSettings::default() {
            self.venue = other.venue;
        }
        self.scoring = ScoringOverrides {
            fit: other.scoring.fit.or(self.scoring.fit),
            side: other.scoring.side.or(self.scoring.side),
            wants: other.scoring.wants.or(self.scoring.wants),
            avoid: other.scoring.avoid.or(self.scoring.avoid),
        };
        if other.ceremony != CeremonyLayoutSettings::default() {
            self.ceremony = other.ceremony.clone();
        }
        if other.banquet != BanquetLayoutSettings::default() {
            self.banquet = other.banquet.clone();
        }
        if other.export != ExportSettings::default() {
            self.export = other.export.clone();
        }
        if other.history != HistorySettings::default() {
            self.history = other.history;
        }
        if other.storage != StorageSettings::default() {
            self.storage = other.storage.clone();
        }
    }
}

fn extension(path: &Path) -> Option<&str> {
    path.extension().and_then(|ext| ext.to_str())
}
