//! Length units
//!
//! World coordinates are centimetres. Labels and reports can show them in
//! metres or feet. Field input is parsed leniently: anything that does not
//! read as a finite number becomes zero instead of an error.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const CM_PER_FOOT: f64 = 30.48;

/// Measurement system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MeasurementSystem {
    /// Metres
    #[default]
    Metric,
    /// Feet
    Imperial,
}

impl fmt::Display for MeasurementSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Metric => write!(f, "Metric"),
            Self::Imperial => write!(f, "Imperial"),
        }
    }
}

impl FromStr for MeasurementSystem {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "metric" | "m" | "cm" => Ok(Self::Metric),
            "imperial" | "ft" | "feet" => Ok(Self::Imperial),
            _ => Err(format!("Unknown measurement system: {}", s)),
        }
    }
}

/// Format a world length for display
///
/// * `value_cm` - Length in centimetres
/// * `system` - Target measurement system
pub fn format_length(value_cm: f64, system: MeasurementSystem) -> String {
    match system {
        MeasurementSystem::Metric => format!("{:.2} {}", value_cm / 100.0, unit_label(system)),
        MeasurementSystem::Imperial => {
            format!("{:.1} {}", value_cm / CM_PER_FOOT, unit_label(system))
        }
    }
}

/// Parse a user-entered length into centimetres.
///
/// Metric input is read as metres, imperial input as feet. Empty,
/// non-numeric or non-finite input yields `0.0`.
pub fn parse_length_lenient(input: &str, system: MeasurementSystem) -> f64 {
    let trimmed = input
        .trim()
        .trim_end_matches(|c: char| c.is_alphabetic() || c.is_whitespace());
    let value = trimmed.replace(',', ".").parse::<f64>().unwrap_or(0.0);
    if !value.is_finite() {
        return 0.0;
    }
    match system {
        MeasurementSystem::Metric => value * 100.0,
        MeasurementSystem::Imperial => value * CM_PER_FOOT,
    }
}

/// Coerce a raw number into a finite value within `[min, max]`.
///
/// NaN maps to `min`; infinities clamp to the nearest bound.
pub fn coerce_in_range(value: f64, min: f64, max: f64) -> f64 {
    if value.is_nan() {
        return min;
    }
    value.clamp(min, max)
}

/// Unit label for the given system
pub fn unit_label(system: MeasurementSystem) -> &'static str {
    match system {
        MeasurementSystem::Metric => "m",
        MeasurementSystem::Imperial => "ft",
    }
}
