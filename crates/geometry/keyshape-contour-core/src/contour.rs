//! Contours and contour sets.
//!
//! A [`Contour`] is an ordered vertex list with a closed flag. Generated
//! closed contours repeat their first vertex at the end. A [`ContourSet`] pairs
//! one outer contour with hole contours wound the opposite way, so a renderer
//! can separate fill from hole by fill rule.

use keyshape_path_core::{Path, PathCommand, Point};
use serde::{Deserialize, Serialize};

use crate::error::{ContourError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    fn union(self, other: Bounds) -> Bounds {
        Bounds {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contour {
    vertices: Vec<Point>,
    closed: bool,
}

impl Contour {
    pub fn new(vertices: Vec<Point>, closed: bool) -> Self {
        Self { vertices, closed }
    }

    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    pub fn closed(&self) -> bool {
        self.closed
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Signed shoelace area. Zero for open contours.
    pub fn area(&self) -> f64 {
        if !self.closed || self.vertices.len() < 3 {
            return 0.0;
        }
        keyshape_path_core::signed_area(&self.vertices)
    }

    pub fn is_clockwise(&self) -> bool {
        self.area() < 0.0
    }

    /// Area-weighted centroid for closed contours, vertex average otherwise.
    pub fn centroid(&self) -> Point {
        let n = self.vertices.len();
        if n == 0 {
            return Point::ORIGIN;
        }
        if !self.closed {
            return keyshape_path_core::centroid(&self.vertices);
        }
        let mut area = 0.0;
        let mut cx = 0.0;
        let mut cy = 0.0;
        for (i, a) in self.vertices.iter().enumerate() {
            let b = self.vertices[(i + 1) % n];
            let cross = a.x * b.y - b.x * a.y;
            area += cross;
            cx += (a.x + b.x) * cross;
            cy += (a.y + b.y) * cross;
        }
        if area.abs() < 1e-10 {
            return keyshape_path_core::centroid(&self.vertices);
        }
        area *= 0.5;
        Point::new(cx / (6.0 * area), cy / (6.0 * area))
    }

    pub fn bounds(&self) -> Bounds {
        let mut it = self.vertices.iter();
        let Some(first) = it.next() else {
            return Bounds {
                min_x: 0.0,
                min_y: 0.0,
                max_x: 0.0,
                max_y: 0.0,
            };
        };
        it.fold(
            Bounds {
                min_x: first.x,
                min_y: first.y,
                max_x: first.x,
                max_y: first.y,
            },
            |b, p| Bounds {
                min_x: b.min_x.min(p.x),
                min_y: b.min_y.min(p.y),
                max_x: b.max_x.max(p.x),
                max_y: b.max_y.max(p.y),
            },
        )
    }

    pub fn reversed(&self) -> Contour {
        let mut vertices = self.vertices.clone();
        vertices.reverse();
        Contour::new(vertices, self.closed)
    }

    pub fn translate(&self, dx: f64, dy: f64) -> Contour {
        self.map(|p| p.offset(dx, dy))
    }

    pub fn scale(&self, sx: f64, sy: f64) -> Contour {
        self.map(|p| Point::new(p.x * sx, p.y * sy))
    }

    /// Rotate by `degrees` around `center`.
    pub fn rotate(&self, degrees: f64, center: Point) -> Contour {
        let (sin, cos) = degrees.to_radians().sin_cos();
        self.map(|p| {
            let x = p.x - center.x;
            let y = p.y - center.y;
            Point::new(x * cos - y * sin + center.x, x * sin + y * cos + center.y)
        })
    }

    fn map(&self, f: impl Fn(Point) -> Point) -> Contour {
        Contour::new(self.vertices.iter().copied().map(f).collect(), self.closed)
    }

    /// Polyline path, closed with `Z` when the contour is closed.
    pub fn to_path(&self) -> Path {
        let mut commands = Vec::with_capacity(self.vertices.len() + 1);
        self.append_commands(&mut commands);
        Path::new(commands)
    }

    fn append_commands(&self, out: &mut Vec<PathCommand>) {
        let mut it = self.vertices.iter();
        let Some(first) = it.next() else { return };
        out.push(PathCommand::move_to(first.x, first.y));
        out.extend(it.map(|p| PathCommand::line_to(p.x, p.y)));
        if self.closed {
            out.push(PathCommand::ClosePath);
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContourSet {
    outer: Contour,
    holes: Vec<Contour>,
}

impl ContourSet {
    /// Holes require a closed outer contour and must be closed themselves.
    pub fn new(outer: Contour, holes: Vec<Contour>) -> Result<Self> {
        if !holes.is_empty() && !outer.closed() {
            return Err(ContourError::invalid("contour set", "outer contour must be closed"));
        }
        if let Some(i) = holes.iter().position(|h| !h.closed()) {
            return Err(ContourError::invalid(
                "contour set",
                format!("hole {i} must be closed"),
            ));
        }
        Ok(Self { outer, holes })
    }

    pub fn single(outer: Contour) -> Self {
        Self {
            outer,
            holes: Vec::new(),
        }
    }

    pub fn outer(&self) -> &Contour {
        &self.outer
    }

    pub fn holes(&self) -> &[Contour] {
        &self.holes
    }

    pub fn has_holes(&self) -> bool {
        !self.holes.is_empty()
    }

    pub fn num_holes(&self) -> usize {
        self.holes.len()
    }

    pub fn all_contours(&self) -> impl Iterator<Item = &Contour> {
        std::iter::once(&self.outer).chain(self.holes.iter())
    }

    pub fn total_vertices(&self) -> usize {
        self.all_contours().map(Contour::len).sum()
    }

    pub fn bounds(&self) -> Bounds {
        self.holes
            .iter()
            .fold(self.outer.bounds(), |b, h| b.union(h.bounds()))
    }

    pub fn centroid(&self) -> Point {
        self.outer.centroid()
    }

    pub fn translate(&self, dx: f64, dy: f64) -> ContourSet {
        self.map(|c| c.translate(dx, dy))
    }

    pub fn scale(&self, sx: f64, sy: f64) -> ContourSet {
        self.map(|c| c.scale(sx, sy))
    }

    pub fn rotate(&self, degrees: f64, center: Point) -> ContourSet {
        self.map(|c| c.rotate(degrees, center))
    }

    fn map(&self, f: impl Fn(&Contour) -> Contour) -> ContourSet {
        ContourSet {
            outer: f(&self.outer),
            holes: self.holes.iter().map(f).collect(),
        }
    }

    /// One subpath per contour, outer first.
    pub fn to_path(&self) -> Path {
        let mut commands = Vec::with_capacity(self.total_vertices() + 1 + self.holes.len());
        for contour in self.all_contours() {
            contour.append_commands(&mut commands);
        }
        Path::new(commands)
    }
}
