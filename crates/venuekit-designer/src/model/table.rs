//! Tables and their editable fields.

use crate::capacity::{compute_capacity, infer_table_type, Footprint};
use crate::geometry::{Bounds, Point};
use serde::{Deserialize, Serialize};
use venuekit_core::constants::MAX_TABLE_SEATS;
use venuekit_core::{coerce_in_range, Side, TableShape, TableType};

/// Smallest accepted table dimension.
pub const MIN_TABLE_DIMENSION: f64 = 30.0;
/// Largest accepted table dimension.
pub const MAX_TABLE_DIMENSION: f64 = 3000.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub id: u32,
    pub name: String,
    /// Centre of the table in world units.
    pub position: Point,
    /// Clockwise rotation in degrees, normalized to `[0, 360)`.
    pub rotation: f64,
    pub shape: TableShape,
    /// Declared type; `None` lets the footprint decide.
    pub table_type: Option<TableType>,
    pub diameter: f64,
    pub width: f64,
    pub height: f64,
    pub seats: u32,
    /// Recompute `seats` whenever the footprint or type changes.
    pub auto_capacity: bool,
    pub enabled: bool,
    pub locked: bool,
    pub side_hint: Option<Side>,
    pub vip: bool,
}

impl Table {
    /// Builds a table from one of the standard templates.
    pub fn from_template(id: u32, template: TableType, position: Point) -> Self {
        let (shape, diameter, width, height) = match template {
            TableType::Round => (TableShape::Circle, 180.0, 180.0, 180.0),
            TableType::Square => (TableShape::Rectangle, 120.0, 120.0, 120.0),
            TableType::Imperial => (TableShape::Rectangle, 240.0, 240.0, 100.0),
            TableType::Cocktail => (TableShape::Circle, 70.0, 70.0, 70.0),
            TableType::Auxiliary => (TableShape::Rectangle, 180.0, 180.0, 75.0),
        };
        let mut table = Self {
            id,
            name: format!("Table {}", id),
            position,
            rotation: 0.0,
            shape,
            table_type: Some(template),
            diameter,
            width,
            height,
            seats: 0,
            auto_capacity: true,
            enabled: true,
            locked: false,
            side_hint: None,
            vip: false,
        };
        table.refresh_capacity();
        table
    }

    pub fn footprint(&self) -> Footprint {
        Footprint {
            shape: self.shape,
            diameter: self.diameter,
            width: self.width,
            height: self.height,
        }
    }

    pub fn effective_type(&self) -> TableType {
        infer_table_type(self.table_type, &self.footprint())
    }

    /// Capacity the footprint supports, ignoring manual overrides.
    pub fn computed_capacity(&self) -> u32 {
        compute_capacity(self.effective_type(), &self.footprint())
    }

    /// Re-derives `seats` when automatic capacity is on.
    pub fn refresh_capacity(&mut self) {
        if self.auto_capacity {
            self.seats = self.computed_capacity();
        }
    }

    /// Unrotated `(width, height)`.
    pub fn extent(&self) -> (f64, f64) {
        self.footprint().extent()
    }

    /// Footprint corners in world space, rotation applied.
    pub fn corners(&self) -> [Point; 4] {
        let (w, h) = self.extent();
        Bounds::from_center(self.position, w, h)
            .corners()
            .map(|c| c.rotated_about(&self.position, self.rotation))
    }

    /// Axis-aligned box around the rotated footprint.
    pub fn bounds(&self) -> Bounds {
        match self.shape {
            TableShape::Circle => Bounds::from_center(self.position, self.diameter, self.diameter),
            TableShape::Rectangle => {
                let corners = self.corners();
                Bounds::from_points(corners.iter())
                    .unwrap_or_else(|| Bounds::from_center(self.position, 0.0, 0.0))
            }
        }
    }

    /// Converts a world point into the table's unrotated frame, origin at
    /// the table centre.
    pub fn to_local(&self, world: &Point) -> Point {
        let rel = *world - self.position;
        rel.rotated_about(&Point::default(), -self.rotation)
    }

    pub fn to_world(&self, local: &Point) -> Point {
        local.rotated_about(&Point::default(), self.rotation) + self.position
    }

    /// Whether `p` lies on the footprint grown by `margin`.
    pub fn contains_point(&self, p: &Point, margin: f64) -> bool {
        let local = self.to_local(p);
        match self.shape {
            TableShape::Circle => local.length() <= self.diameter / 2.0 + margin,
            TableShape::Rectangle => {
                local.x.abs() <= self.width / 2.0 + margin
                    && local.y.abs() <= self.height / 2.0 + margin
            }
        }
    }

    /// Applies one field edit with lenient coercion.
    ///
    /// Non-numeric input becomes zero and is then clamped into the field's
    /// valid range. Editing the seat count switches automatic capacity off.
    pub fn apply_field(&mut self, field: TableField, value: &FieldValue) {
        match field {
            TableField::Name => self.name = value.as_text(),
            TableField::X => self.position.x = value.as_number(),
            TableField::Y => self.position.y = value.as_number(),
            TableField::Rotation => self.rotation = normalize_degrees(value.as_number()),
            TableField::Shape => {
                self.shape = match value.as_text().trim().to_lowercase().as_str() {
                    "rectangle" | "rect" | "rectangular" => TableShape::Rectangle,
                    _ => TableShape::Circle,
                }
            }
            TableField::Type => self.table_type = value.as_text().parse().ok(),
            TableField::Diameter => self.diameter = coerce_dimension(value.as_number()),
            TableField::Width => self.width = coerce_dimension(value.as_number()),
            TableField::Height => self.height = coerce_dimension(value.as_number()),
            TableField::Seats => {
                self.seats = coerce_in_range(value.as_number().round(), 0.0, MAX_TABLE_SEATS as f64)
                    as u32;
                self.auto_capacity = false;
            }
            TableField::AutoCapacity => self.auto_capacity = value.as_bool(),
            TableField::Enabled => self.enabled = value.as_bool(),
            TableField::Locked => self.locked = value.as_bool(),
            TableField::Side => {
                self.side_hint = match value.as_text().trim().to_lowercase().as_str() {
                    "bride" => Some(Side::Bride),
                    "groom" => Some(Side::Groom),
                    "shared" | "both" => Some(Side::Shared),
                    _ => None,
                }
            }
            TableField::Vip => self.vip = value.as_bool(),
        }
        if field.affects_capacity() {
            self.refresh_capacity();
        }
    }
}

/// Editable table attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableField {
    Name,
    X,
    Y,
    Rotation,
    Shape,
    Type,
    Diameter,
    Width,
    Height,
    Seats,
    AutoCapacity,
    Enabled,
    Locked,
    Side,
    Vip,
}

impl TableField {
    pub fn affects_capacity(&self) -> bool {
        matches!(
            self,
            Self::Shape
                | Self::Type
                | Self::Diameter
                | Self::Width
                | Self::Height
                | Self::AutoCapacity
        )
    }
}

/// Raw value entered in the property panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FieldValue {
    Number(f64),
    Text(String),
    Bool(bool),
}

impl FieldValue {
    /// Numeric reading; anything unparsable or non-finite is `0.0`.
    pub fn as_number(&self) -> f64 {
        let n = match self {
            Self::Number(n) => *n,
            Self::Text(s) => s.trim().replace(',', ".").parse::<f64>().unwrap_or(0.0),
            Self::Bool(b) => {
                if *b {
                    1.0
                } else {
                    0.0
                }
            }
        };
        if n.is_finite() {
            n
        } else {
            0.0
        }
    }

    pub fn as_bool(&self) -> bool {
        match self {
            Self::Bool(b) => *b,
            Self::Number(n) => *n != 0.0 && !n.is_nan(),
            Self::Text(s) => matches!(
                s.trim().to_lowercase().as_str(),
                "true" | "1" | "yes" | "y" | "on" | "si" | "sí"
            ),
        }
    }

    pub fn as_text(&self) -> String {
        match self {
            Self::Text(s) => s.clone(),
            Self::Number(n) => n.to_string(),
            Self::Bool(b) => b.to_string(),
        }
    }
}

impl From<f64> for FieldValue {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<&str> for FieldValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<bool> for FieldValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

fn coerce_dimension(value: f64) -> f64 {
    coerce_in_range(value, MIN_TABLE_DIMENSION, MAX_TABLE_DIMENSION)
}

pub(crate) fn normalize_degrees(value: f64) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }
    let r = value.rem_euclid(360.0);
    if r >= 360.0 {
        0.0
    } else {
        r
    }
}
