//! Parametric shapes and contour generation.
//!
//! Angles follow the screen convention used throughout Keyshape: 0 degrees
//! points up (north) and positive angles turn clockwise on screen, so
//! `x = cx + r * sin(a)` and `y = cy - r * cos(a)`.
//!
//! `num_vertices` counts the closing vertex: the last vertex of every
//! generated closed contour repeats the first.

use std::f64::consts::{PI, TAU};

use keyshape_path_core::{resample_polyline, Point};
use serde::{Deserialize, Serialize};

use crate::contour::{Contour, ContourSet};
use crate::error::{ContourError, Result};

/// Minimum vertex density accepted by every shape.
pub const MIN_VERTICES: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Shape {
    Circle {
        radius: f64,
        #[serde(default)]
        start_angle: f64,
    },
    Ellipse {
        rx: f64,
        ry: f64,
    },
    RegularPolygon {
        size: f64,
        sides: usize,
        #[serde(default)]
        rotation: f64,
    },
    Star {
        outer_radius: f64,
        inner_radius: f64,
        points: usize,
    },
    Flower {
        size: f64,
        petals: usize,
    },
    Ring {
        inner_radius: f64,
        outer_radius: f64,
    },
    PolyRing {
        inner_size: f64,
        outer_size: f64,
        edges: usize,
        #[serde(default)]
        inner_rotation: f64,
    },
}

impl Shape {
    pub fn name(&self) -> &'static str {
        match self {
            Shape::Circle { .. } => "circle",
            Shape::Ellipse { .. } => "ellipse",
            Shape::RegularPolygon { .. } => "regular_polygon",
            Shape::Star { .. } => "star",
            Shape::Flower { .. } => "flower",
            Shape::Ring { .. } => "ring",
            Shape::PolyRing { .. } => "poly_ring",
        }
    }

    /// Ring-family shapes produce exactly one hole.
    pub fn is_perforated(&self) -> bool {
        matches!(self, Shape::Ring { .. } | Shape::PolyRing { .. })
    }

    /// Smallest `num_vertices` this shape accepts.
    pub fn min_vertices(&self) -> usize {
        match *self {
            Shape::RegularPolygon { sides, .. } => sides.max(MIN_VERTICES),
            Shape::PolyRing { edges, .. } => edges.max(MIN_VERTICES),
            _ => MIN_VERTICES,
        }
    }

    fn scalars(&self) -> Vec<(&'static str, f64)> {
        match *self {
            Shape::Circle {
                radius,
                start_angle,
            } => vec![("radius", radius), ("start_angle", start_angle)],
            Shape::Ellipse { rx, ry } => vec![("rx", rx), ("ry", ry)],
            Shape::RegularPolygon { size, rotation, .. } => {
                vec![("size", size), ("rotation", rotation)]
            }
            Shape::Star {
                outer_radius,
                inner_radius,
                ..
            } => vec![("outer_radius", outer_radius), ("inner_radius", inner_radius)],
            Shape::Flower { size, .. } => vec![("size", size)],
            Shape::Ring {
                inner_radius,
                outer_radius,
            } => vec![("inner_radius", inner_radius), ("outer_radius", outer_radius)],
            Shape::PolyRing {
                inner_size,
                outer_size,
                inner_rotation,
                ..
            } => vec![
                ("inner_size", inner_size),
                ("outer_size", outer_size),
                ("inner_rotation", inner_rotation),
            ],
        }
    }
}

/// A shape placed at `center` and sampled with `num_vertices` outer vertices.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShapeParams {
    pub shape: Shape,
    #[serde(default)]
    pub center: Point,
    #[serde(default = "default_num_vertices")]
    pub num_vertices: usize,
}

pub const DEFAULT_NUM_VERTICES: usize = 128;

fn default_num_vertices() -> usize {
    DEFAULT_NUM_VERTICES
}

impl ShapeParams {
    pub fn new(shape: Shape) -> Self {
        Self {
            shape,
            center: Point::ORIGIN,
            num_vertices: DEFAULT_NUM_VERTICES,
        }
    }

    pub fn with_center(mut self, center: Point) -> Self {
        self.center = center;
        self
    }

    pub fn with_num_vertices(mut self, num_vertices: usize) -> Self {
        self.num_vertices = num_vertices;
        self
    }

    pub fn validate(&self) -> Result<()> {
        let name = self.shape.name();
        match self.shape {
            Shape::RegularPolygon { sides, .. } if sides < 3 => {
                return Err(ContourError::invalid(name, format!("needs at least 3 sides, got {sides}")))
            }
            Shape::PolyRing { edges, .. } if edges < 3 => {
                return Err(ContourError::invalid(name, format!("needs at least 3 edges, got {edges}")))
            }
            Shape::Star { points, .. } if points < 3 => {
                return Err(ContourError::invalid(name, format!("needs at least 3 points, got {points}")))
            }
            Shape::Flower { petals, .. } if petals == 0 => {
                return Err(ContourError::invalid(name, "needs at least 1 petal"))
            }
            _ => {}
        }
        let min = self.shape.min_vertices();
        if self.num_vertices < min {
            return Err(ContourError::invalid(
                name,
                format!("num_vertices must be at least {min}, got {}", self.num_vertices),
            ));
        }
        if let Some((field, value)) = self
            .shape
            .scalars()
            .into_iter()
            .chain([("center.x", self.center.x), ("center.y", self.center.y)])
            .find(|(_, v)| !v.is_finite())
        {
            return Err(ContourError::invalid(name, format!("{field} must be finite, got {value}")));
        }
        Ok(())
    }
}

/// Generate the contours for `params`.
pub fn generate(params: &ShapeParams) -> Result<ContourSet> {
    params.validate()?;
    let n = params.num_vertices;
    let c = params.center;
    let set = match params.shape {
        Shape::Circle {
            radius,
            start_angle,
        } => ContourSet::single(ellipse_loop(c, radius, radius, start_angle, n)),
        Shape::Ellipse { rx, ry } => ContourSet::single(ellipse_loop(c, rx, ry, 0.0, n)),
        Shape::RegularPolygon {
            size,
            sides,
            rotation,
        } => ContourSet::single(perimeter_loop(&polygon_corners(c, size, sides, rotation), n)),
        Shape::Star {
            outer_radius,
            inner_radius,
            points,
        } => ContourSet::single(perimeter_loop(
            &star_corners(c, outer_radius, inner_radius, points),
            n,
        )),
        Shape::Flower { size, petals } => ContourSet::single(flower_loop(c, size, petals, n)),
        Shape::Ring {
            inner_radius,
            outer_radius,
        } => ContourSet::new(
            ellipse_loop(c, outer_radius, outer_radius, 0.0, n),
            vec![ellipse_loop(c, inner_radius, inner_radius, 0.0, n).reversed()],
        )?,
        Shape::PolyRing {
            inner_size,
            outer_size,
            edges,
            inner_rotation,
        } => ContourSet::new(
            perimeter_loop(&polygon_corners(c, outer_size, edges, 0.0), n),
            vec![perimeter_loop(&polygon_corners(c, inner_size, edges, inner_rotation), n).reversed()],
        )?,
    };
    Ok(set)
}

#[inline]
fn polar(center: Point, rx: f64, ry: f64, angle: f64) -> Point {
    Point::new(center.x + rx * angle.sin(), center.y - ry * angle.cos())
}

fn close_loop(mut vertices: Vec<Point>) -> Contour {
    if let Some(&first) = vertices.first() {
        vertices.push(first);
    }
    Contour::new(vertices, true)
}

fn ellipse_loop(center: Point, rx: f64, ry: f64, start_degrees: f64, n: usize) -> Contour {
    let start = start_degrees.to_radians();
    let distinct = n - 1;
    close_loop(
        (0..distinct)
            .map(|i| polar(center, rx, ry, start + TAU * i as f64 / distinct as f64))
            .collect(),
    )
}

fn polygon_corners(center: Point, size: f64, sides: usize, rotation: f64) -> Vec<Point> {
    (0..sides)
        .map(|i| {
            let angle = (i as f64 * 360.0 / sides as f64 + rotation).to_radians();
            polar(center, size, size, angle)
        })
        .collect()
}

fn star_corners(center: Point, outer: f64, inner: f64, points: usize) -> Vec<Point> {
    (0..points * 2)
        .map(|i| {
            let r = if i % 2 == 0 { outer } else { inner };
            polar(center, r, r, i as f64 * PI / points as f64)
        })
        .collect()
}

/// Spread `n - 1` vertices evenly along the closed polygon through `corners`,
/// starting at the first corner, then close the loop.
fn perimeter_loop(corners: &[Point], n: usize) -> Contour {
    let mut ring = corners.to_vec();
    if let Some(&first) = corners.first() {
        ring.push(first);
    }
    close_loop(resample_polyline(&ring, n - 1, true))
}

/// Rose curve `r = |size * cos(k * theta)|`. Odd petal counts trace the full
/// flower over half a turn.
fn flower_loop(center: Point, size: f64, petals: usize, n: usize) -> Contour {
    let range = if petals % 2 == 1 { PI } else { TAU };
    let distinct = n - 1;
    close_loop(
        (0..distinct)
            .map(|i| {
                let t = range * i as f64 / distinct as f64;
                let r = (size * (petals as f64 * t).cos()).abs();
                polar(center, r, r, t)
            })
            .collect(),
    )
}
