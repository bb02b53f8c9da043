//! Vector description of a layout and its SVG rendering.

use crate::geometry::{Bounds, Point};
use crate::model::LayoutSnapshot;
use lyon::math::{point, Transform};
use lyon::path::{Event, Path, Winding};
use serde::{Deserialize, Serialize};
use venuekit_core::{AreaKind, TableShape};

/// One drawable element of the floor plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "lowercase")]
pub enum VectorShape {
    Polyline {
        kind: AreaKind,
        points: Vec<Point>,
        closed: bool,
    },
    Circle {
        table_id: u32,
        label: String,
        center: Point,
        radius: f64,
    },
    Rect {
        table_id: u32,
        label: String,
        center: Point,
        width: f64,
        height: f64,
        /// Degrees, clockwise on screen.
        rotation: f64,
    },
}

impl VectorShape {
    /// Outline as a lyon path in world units.
    pub fn render(&self) -> Path {
        let mut builder = Path::builder();
        match self {
            Self::Polyline { points, closed, .. } => {
                let mut iter = points.iter();
                if let Some(first) = iter.next() {
                    builder.begin(point(first.x as f32, first.y as f32));
                    for p in iter {
                        builder.line_to(point(p.x as f32, p.y as f32));
                    }
                    builder.end(*closed);
                }
                builder.build()
            }
            Self::Circle { center, radius, .. } => {
                builder.add_circle(
                    point(center.x as f32, center.y as f32),
                    *radius as f32,
                    Winding::Positive,
                );
                builder.build()
            }
            Self::Rect {
                center,
                width,
                height,
                rotation,
                ..
            } => {
                let (hw, hh) = ((*width / 2.0) as f32, (*height / 2.0) as f32);
                builder.begin(point(-hw, -hh));
                builder.line_to(point(hw, -hh));
                builder.line_to(point(hw, hh));
                builder.line_to(point(-hw, hh));
                builder.close();
                let path = builder.build();

                let mut transform = Transform::identity();
                if rotation.abs() > 1e-6 {
                    transform = transform
                        .then_rotate(lyon::math::Angle::radians(rotation.to_radians() as f32));
                }
                transform = transform
                    .then_translate(lyon::math::vector(center.x as f32, center.y as f32));
                path.transformed(&transform)
            }
        }
    }

    pub fn bounds(&self) -> Option<Bounds> {
        let path = self.render();
        if path.iter().next().is_none() {
            return None;
        }
        let bb = lyon::algorithms::aabb::bounding_box(path.iter());
        Some(Bounds::new(
            bb.min.x as f64,
            bb.min.y as f64,
            bb.max.x as f64,
            bb.max.y as f64,
        ))
    }
}

/// Everything needed to draw one scope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VectorDrawing {
    pub width: f64,
    pub height: f64,
    pub shapes: Vec<VectorShape>,
}

/// Areas first, then tables, in layout order. Disabled entities are left
/// out.
pub fn vector_drawing(snapshot: &LayoutSnapshot) -> VectorDrawing {
    let mut shapes = Vec::with_capacity(snapshot.areas.len() + snapshot.tables.len());
    for area in snapshot.areas.iter().filter(|a| a.enabled) {
        shapes.push(VectorShape::Polyline {
            kind: area.kind,
            points: area.points.clone(),
            closed: area.is_closed(),
        });
    }
    for table in snapshot.tables.iter().filter(|t| t.enabled) {
        shapes.push(match table.shape {
            TableShape::Circle => VectorShape::Circle {
                table_id: table.id,
                label: table.name.clone(),
                center: table.position,
                radius: table.diameter / 2.0,
            },
            TableShape::Rectangle => VectorShape::Rect {
                table_id: table.id,
                label: table.name.clone(),
                center: table.position,
                width: table.width,
                height: table.height,
                rotation: table.rotation,
            },
        });
    }
    let venue = &snapshot.settings.venue;
    VectorDrawing {
        width: venue.width,
        height: venue.height,
        shapes,
    }
}

impl VectorDrawing {
    /// Box around every shape, or `None` for an empty drawing.
    pub fn extent(&self) -> Option<Bounds> {
        self.shapes
            .iter()
            .filter_map(VectorShape::bounds)
            .reduce(|a, b| a.union(&b))
    }

    /// Standalone SVG document in world units.
    pub fn to_svg(&self) -> String {
        let mut svg = format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"0 0 {} {}\" width=\"{}\" height=\"{}\">\n",
            self.width, self.height, self.width, self.height
        );
        for shape in &self.shapes {
            match shape {
                VectorShape::Polyline { kind, .. } => {
                    svg.push_str(&format!(
                        "  <path class=\"area {}\" d=\"{}\" fill=\"{}\" stroke=\"{}\"/>\n",
                        kind,
                        path_data(&shape.render()),
                        area_fill(*kind),
                        area_stroke(*kind)
                    ));
                }
                VectorShape::Circle {
                    table_id,
                    label,
                    center,
                    radius,
                } => {
                    svg.push_str(&format!(
                        "  <circle class=\"table\" data-id=\"{}\" cx=\"{}\" cy=\"{}\" r=\"{}\" fill=\"#ffffff\" stroke=\"#333333\"/>\n",
                        table_id, center.x, center.y, radius
                    ));
                    svg.push_str(&table_label(center, label));
                }
                VectorShape::Rect {
                    table_id,
                    label,
                    center,
                    width,
                    height,
                    rotation,
                } => {
                    svg.push_str(&format!(
                        "  <rect class=\"table\" data-id=\"{}\" x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" transform=\"rotate({} {} {})\" fill=\"#ffffff\" stroke=\"#333333\"/>\n",
                        table_id,
                        center.x - width / 2.0,
                        center.y - height / 2.0,
                        width,
                        height,
                        rotation,
                        center.x,
                        center.y
                    ));
                    svg.push_str(&table_label(center, label));
                }
            }
        }
        svg.push_str("</svg>\n");
        svg
    }
}

/// SVG path data for a lyon path.
pub fn path_data(path: &Path) -> String {
    let mut d = String::new();
    for event in path.iter() {
        match event {
            Event::Begin { at } => d.push_str(&format!("M {} {} ", at.x, at.y)),
            Event::Line { to, .. } => d.push_str(&format!("L {} {} ", to.x, to.y)),
            Event::Quadratic { ctrl, to, .. } => {
                d.push_str(&format!("Q {} {} {} {} ", ctrl.x, ctrl.y, to.x, to.y))
            }
            Event::Cubic {
                ctrl1, ctrl2, to, ..
            } => d.push_str(&format!(
                "C {} {} {} {} {} {} ",
                ctrl1.x, ctrl1.y, ctrl2.x, ctrl2.y, to.x, to.y
            )),
            Event::End { close, .. } => {
                if close {
                    d.push_str("Z ");
                }
            }
        }
    }
    d.trim_end().to_string()
}

fn table_label(center: &Point, label: &str) -> String {
    format!(
        "  <text x=\"{}\" y=\"{}\" text-anchor=\"middle\" dominant-baseline=\"middle\">{}</text>\n",
        center.x,
        center.y,
        escape_xml(label)
    )
}

fn area_fill(kind: AreaKind) -> &'static str {
    match kind {
        AreaKind::Boundary => "none",
        AreaKind::Obstacle => "#e0b0b0",
        AreaKind::Door => "#b0c4e0",
        AreaKind::Aisle | AreaKind::Freeform => "none",
    }
}

fn area_stroke(kind: AreaKind) -> &'static str {
    match kind {
        AreaKind::Boundary => "#000000",
        AreaKind::Obstacle => "#a04040",
        AreaKind::Door => "#4060a0",
        AreaKind::Aisle => "#808080",
        AreaKind::Freeform => "#40a040",
    }
}

fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
