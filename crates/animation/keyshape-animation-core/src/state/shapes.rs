//! Geometric primitives: circles, rectangles and parametric vertex shapes.

use keyshape_contour_core::{generate, Contour, ContourSet, Shape, ShapeParams};
use keyshape_path_core::{Path, Point};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::blend::{step, FieldBlender};
use crate::error::AnimationError;
use crate::morph::align_ring;
use crate::schema::Field;
use crate::state::Appearance;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CircleState {
    appearance: Appearance,
    radius: f64,
}

impl Default for CircleState {
    fn default() -> Self {
        Self {
            appearance: Appearance::default(),
            radius: 10.0,
        }
    }
}

impl CircleState {
    pub fn new(radius: f64) -> Self {
        Self {
            radius,
            ..Self::default()
        }
    }

    pub fn appearance(&self) -> &Appearance {
        &self.appearance
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn with_appearance(self, appearance: Appearance) -> Self {
        Self { appearance, ..self }
    }

    pub fn with_radius(self, radius: f64) -> Self {
        Self { radius, ..self }
    }

    pub(crate) fn blend(&self, other: &Self, b: &FieldBlender<'_, '_>) -> Self {
        Self {
            appearance: self.appearance.blend(&other.appearance, b),
            radius: b.number(Field::Radius, self.radius, other.radius),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RectangleState {
    appearance: Appearance,
    width: f64,
    height: f64,
    corner_radius: f64,
}

impl Default for RectangleState {
    fn default() -> Self {
        Self {
            appearance: Appearance::default(),
            width: 100.0,
            height: 100.0,
            corner_radius: 0.0,
        }
    }
}

impl RectangleState {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    pub fn appearance(&self) -> &Appearance {
        &self.appearance
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn corner_radius(&self) -> f64 {
        self.corner_radius
    }

    pub fn with_appearance(self, appearance: Appearance) -> Self {
        Self { appearance, ..self }
    }

    pub fn with_size(self, width: f64, height: f64) -> Self {
        Self { width, height, ..self }
    }

    pub fn with_corner_radius(self, corner_radius: f64) -> Self {
        Self { corner_radius, ..self }
    }

    pub(crate) fn blend(&self, other: &Self, b: &FieldBlender<'_, '_>) -> Self {
        Self {
            appearance: self.appearance.blend(&other.appearance, b),
            width: b.number(Field::Width, self.width, other.width),
            height: b.number(Field::Height, self.height, other.height),
            corner_radius: b.number(Field::CornerRadius, self.corner_radius, other.corner_radius),
        }
    }
}

/// A parametric vertex shape rendered through the contour generator.
///
/// Blending two shapes of different kinds cannot go through the parameters,
/// so the blended state carries the interpolated vertices in `outline`
/// instead. `shape` then holds whichever endpoint's parameters are nearer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShapeState {
    appearance: Appearance,
    shape: ShapeParams,
    closed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    outline: Option<ContourSet>,
}

impl Default for ShapeState {
    fn default() -> Self {
        Self {
            appearance: Appearance::default(),
            shape: ShapeParams::new(Shape::Circle {
                radius: 50.0,
                start_angle: 0.0,
            }),
            closed: true,
            outline: None,
        }
    }
}

impl ShapeState {
    pub fn new(shape: ShapeParams) -> Self {
        Self {
            shape,
            ..Self::default()
        }
    }

    pub fn appearance(&self) -> &Appearance {
        &self.appearance
    }

    pub fn shape(&self) -> &ShapeParams {
        &self.shape
    }

    pub fn closed(&self) -> bool {
        self.closed
    }

    /// Vertex outline produced by a cross-kind blend, if any.
    pub fn outline(&self) -> Option<&ContourSet> {
        self.outline.as_ref()
    }

    pub fn with_appearance(self, appearance: Appearance) -> Self {
        Self { appearance, ..self }
    }

    /// Replaces the parameters and drops any blended outline.
    pub fn with_shape(self, shape: ShapeParams) -> Self {
        Self {
            shape,
            outline: None,
            ..self
        }
    }

    pub fn with_closed(self, closed: bool) -> Self {
        Self { closed, ..self }
    }

    /// The blended outline when present, otherwise the generated one.
    /// Parameters are validated here rather than at construction, so
    /// blended intermediates may still fail.
    pub fn contours(&self) -> Result<ContourSet, AnimationError> {
        match &self.outline {
            Some(outline) => Ok(outline.clone()),
            None => Ok(generate(&self.shape)?),
        }
    }

    pub fn to_path(&self) -> Result<Path, AnimationError> {
        self.contours().map(|set| set.to_path())
    }

    pub(crate) fn blend(&self, other: &Self, b: &FieldBlender<'_, '_>) -> Self {
        let appearance = self.appearance.blend(&other.appearance, b);
        let closed = b.step(Field::Closed, &self.closed, &other.closed);
        if let Some(outline) = self.morph_outline(other, b) {
            return Self {
                appearance,
                shape: b.step(Field::Shape, &self.shape, &other.shape),
                closed,
                outline: Some(outline),
            };
        }
        Self {
            appearance,
            shape: blend_params(&self.shape, &other.shape, b),
            closed,
            outline: b.step(Field::Shape, &self.outline, &other.outline),
        }
    }

    /// Vertex-level morph for pairs the parametric blend cannot reach:
    /// different shape kinds, or an endpoint that already carries a blended
    /// outline. Requires equal outer vertex counts; `None` falls back to the
    /// parametric blend, which steps between kinds.
    fn morph_outline(&self, other: &Self, b: &FieldBlender<'_, '_>) -> Option<ContourSet> {
        let cross_kind = self.shape.shape.name() != other.shape.shape.name();
        if !cross_kind && self.outline.is_none() && other.outline.is_none() {
            return None;
        }
        let t = b.eased(Field::Shape);
        if t == 0.0 || t == 1.0 {
            return None;
        }
        let from = self.contours().ok()?;
        let to = other.contours().ok()?;
        if from.outer().len() != to.outer().len() {
            debug!(
                from = from.outer().len(),
                to = to.outer().len(),
                "outer vertex counts differ, stepping between shapes"
            );
            return None;
        }

        let close = self.closed && other.closed;
        let outer = lerp_contour(from.outer(), to.outer(), t, close)?;
        let holes: Vec<Contour> = if from.num_holes() == to.num_holes() {
            from.holes()
                .iter()
                .zip(to.holes())
                .map(|(h0, h1)| lerp_contour(h0, h1, t, true).unwrap_or_else(|| step(h0, h1, t)))
                .collect()
        } else {
            step(&from.holes().to_vec(), &to.holes().to_vec(), t)
        };
        ContourSet::new(outer, holes).ok()
    }
}

/// Ring vertices without the repeated closing vertex.
fn ring(contour: &Contour) -> &[Point] {
    let v = contour.vertices();
    match v.split_last() {
        Some((last, rest))
            if contour.closed() && !rest.is_empty() && last.distance_squared(rest[0]) <= 1e-18 =>
        {
            rest
        }
        _ => v,
    }
}

/// Aligns `c` onto `a` and lerps vertex by vertex. `None` when the rings
/// differ in length.
fn lerp_contour(a: &Contour, c: &Contour, t: f64, close: bool) -> Option<Contour> {
    let from = ring(a);
    let to = ring(c);
    if from.len() != to.len() || from.is_empty() {
        return None;
    }
    let to = align_ring(from, to.to_vec());
    let mut vertices: Vec<Point> = from.iter().zip(&to).map(|(p, q)| p.lerp(*q, t)).collect();
    if close || from.len() < a.len() {
        vertices.push(vertices[0]);
    }
    Some(Contour::new(vertices, close))
}

fn blend_params(a: &ShapeParams, c: &ShapeParams, b: &FieldBlender<'_, '_>) -> ShapeParams {
    if a == c {
        return *a;
    }
    ShapeParams {
        shape: blend_shape(&a.shape, &c.shape, b),
        center: b.point(Field::Shape, a.center, c.center),
        num_vertices: b.count(Field::NumVertices, a.num_vertices, c.num_vertices),
    }
}

/// Same shape kind: every parameter blends. Different kinds step.
fn blend_shape(a: &Shape, c: &Shape, b: &FieldBlender<'_, '_>) -> Shape {
    let n = |x: f64, y: f64| b.number(Field::Shape, x, y);
    let k = |x: usize, y: usize| b.count(Field::Shape, x, y);
    match (*a, *c) {
        (
            Shape::Circle {
                radius: r0,
                start_angle: s0,
            },
            Shape::Circle {
                radius: r1,
                start_angle: s1,
            },
        ) => Shape::Circle {
            radius: n(r0, r1),
            start_angle: b.angle(Field::Shape, s0, s1),
        },
        (Shape::Ellipse { rx: x0, ry: y0 }, Shape::Ellipse { rx: x1, ry: y1 }) => Shape::Ellipse {
            rx: n(x0, x1),
            ry: n(y0, y1),
        },
        (
            Shape::RegularPolygon {
                size: z0,
                sides: s0,
                rotation: r0,
            },
            Shape::RegularPolygon {
                size: z1,
                sides: s1,
                rotation: r1,
            },
        ) => Shape::RegularPolygon {
            size: n(z0, z1),
            sides: k(s0, s1),
            rotation: b.angle(Field::Shape, r0, r1),
        },
        (
            Shape::Star {
                outer_radius: o0,
                inner_radius: i0,
                points: p0,
            },
            Shape::Star {
                outer_radius: o1,
                inner_radius: i1,
                points: p1,
            },
        ) => Shape::Star {
            outer_radius: n(o0, o1),
            inner_radius: n(i0, i1),
            points: k(p0, p1),
        },
        (Shape::Flower { size: z0, petals: p0 }, Shape::Flower { size: z1, petals: p1 }) => Shape::Flower {
            size: n(z0, z1),
            petals: k(p0, p1),
        },
        (
            Shape::Ring {
                inner_radius: i0,
                outer_radius: o0,
            },
            Shape::Ring {
                inner_radius: i1,
                outer_radius: o1,
            },
        ) => Shape::Ring {
            inner_radius: n(i0, i1),
            outer_radius: n(o0, o1),
        },
        (
            Shape::PolyRing {
                inner_size: i0,
                outer_size: o0,
                edges: e0,
                inner_rotation: r0,
            },
            Shape::PolyRing {
                inner_size: i1,
                outer_size: o1,
                edges: e1,
                inner_rotation: r1,
            },
        ) => Shape::PolyRing {
            inner_size: n(i0, i1),
            outer_size: n(o0, o1),
            edges: k(e0, e1),
            inner_rotation: b.angle(Field::Shape, r0, r1),
        },
        _ => b.step(Field::Shape, a, c),
    }
}
