//! Shared vocabulary types used by the settings and designer crates.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which part of the event a layout belongs to.
///
/// Each scope owns independent areas, tables, seats and history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    Ceremony,
    #[default]
    Banquet,
}

impl Scope {
    pub const ALL: [Scope; 2] = [Scope::Ceremony, Scope::Banquet];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ceremony => "ceremony",
            Self::Banquet => "banquet",
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Physical outline of a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TableShape {
    #[default]
    Circle,
    Rectangle,
}

/// Table category; drives the capacity formula.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableType {
    Round,
    Square,
    /// Elongated banquet table seating guests along both long sides.
    Imperial,
    /// Standing high table.
    Cocktail,
    /// Staff, cake or gift table without guest seats.
    Auxiliary,
}

impl TableType {
    pub const ALL: [TableType; 5] = [
        TableType::Round,
        TableType::Square,
        TableType::Imperial,
        TableType::Cocktail,
        TableType::Auxiliary,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Round => "round",
            Self::Square => "square",
            Self::Imperial => "imperial",
            Self::Cocktail => "cocktail",
            Self::Auxiliary => "auxiliary",
        }
    }
}

impl fmt::Display for TableType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TableType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "round" => Ok(Self::Round),
            "square" => Ok(Self::Square),
            "imperial" => Ok(Self::Imperial),
            "cocktail" => Ok(Self::Cocktail),
            "auxiliary" | "aux" | "staff" => Ok(Self::Auxiliary),
            _ => Err(format!("Unknown table type: {}", s)),
        }
    }
}

/// Which family a guest belongs to, or which family a table is meant for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Bride,
    Groom,
    Shared,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bride => write!(f, "bride"),
            Self::Groom => write!(f, "groom"),
            Self::Shared => write!(f, "shared"),
        }
    }
}

/// Kind of a drawn venue area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AreaKind {
    /// Closed outline of the usable floor.
    Boundary,
    /// Exclusion zone (pillar, stage, buffet).
    Obstacle,
    /// Exclusion zone that also needs foot-traffic clearance.
    Door,
    Aisle,
    Freeform,
}

impl AreaKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Boundary => "boundary",
            Self::Obstacle => "obstacle",
            Self::Door => "door",
            Self::Aisle => "aisle",
            Self::Freeform => "freeform",
        }
    }

    /// Whether tables and seats must keep clear of this kind of area.
    pub fn is_exclusion(&self) -> bool {
        matches!(self, Self::Obstacle | Self::Door)
    }
}

impl fmt::Display for AreaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
